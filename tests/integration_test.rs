mod common;

use common::{joined_settings, StaticDeviceCertificate, TokenSigner, ENDPOINT};
use pkeyauth::{
    CertificateSelector, ChallengeErrorKind, ChallengeFormat, ChallengeResponseBuilder,
    ChallengeSettings,
};

fn plain_builder() -> ChallengeResponseBuilder<TokenSigner> {
    ChallengeResponseBuilder::new(TokenSigner::default(), ChallengeSettings::new())
}

#[test]
fn header_round_trip_without_device_certificate() {
    let response = plain_builder()
        .from_header(
            r#"PKeyAuth Nonce="n1",CertAuthorities="DN1;DN2",Version="1.0",Context="ctx1""#,
            "https://submit.example/",
        )
        .unwrap();

    assert_eq!(response.submit_url(), "https://submit.example/");
    assert_eq!(
        response.authorization_header_value(),
        r#"PKeyAuth Context="ctx1",Version="1.0""#
    );
    assert!(!response.is_signed());
}

#[test]
fn bare_key_with_equals_is_malformed() {
    let err = plain_builder()
        .from_header("PKeyAuth Nonce=,Version=1.0,Context=ctx1", ENDPOINT)
        .unwrap_err();

    assert_eq!(err.kind(), ChallengeErrorKind::InvalidRequest);
}

#[test]
fn header_missing_fields_reported_in_order() {
    let builder = plain_builder();
    let cases = [
        (r#"PKeyAuth Version="1.0",Context="c""#, "Nonce"),
        (r#"PKeyAuth Context="c""#, "Nonce"),
        (r#"PKeyAuth Nonce="n",Context="c""#, "Version"),
        (r#"PKeyAuth Nonce="n""#, "Version"),
        (r#"PKeyAuth Nonce="n",Version="1.0""#, "Context"),
    ];

    for (header, missing) in cases {
        let err = builder.from_header(header, ENDPOINT).unwrap_err();
        assert_eq!(err.kind(), ChallengeErrorKind::InvalidRequest, "{header}");
        assert_eq!(err.message(), missing, "{header}");
    }
}

#[test]
fn redirect_missing_fields_reported_in_order() {
    let builder = plain_builder();
    let cases = [
        ("urn:http-auth:PKeyAuth?Version=1.0&SubmitUrl=s&Context=c&CertAuthorities=a", "Nonce"),
        ("urn:http-auth:PKeyAuth?Nonce=n&SubmitUrl=s&Context=c&CertAuthorities=a", "Version"),
        ("urn:http-auth:PKeyAuth?Nonce=n&Version=1.0&Context=c&CertAuthorities=a", "SubmitUrl"),
        ("urn:http-auth:PKeyAuth?Nonce=n&Version=1.0&SubmitUrl=s&CertAuthorities=a", "Context"),
        ("urn:http-auth:PKeyAuth?Nonce=n&Version=1.0&SubmitUrl=s&Context=c", "CertAuthorities"),
    ];

    for (uri, missing) in cases {
        let err = builder.from_uri(uri).unwrap_err();
        assert_eq!(err.kind(), ChallengeErrorKind::InvalidRequest, "{uri}");
        assert_eq!(err.message(), missing, "{uri}");
    }
}

#[test]
fn nonce_key_accepts_exact_and_lowercase_only() {
    let builder = plain_builder();

    let exact = builder
        .parse_header(r#"PKeyAuth Nonce="abc",Version="1.0",Context="c""#, ENDPOINT)
        .unwrap();
    let lower = builder
        .parse_header(r#"PKeyAuth nonce="abc",Version="1.0",Context="c""#, ENDPOINT)
        .unwrap();
    assert_eq!(exact.nonce(), "abc");
    assert_eq!(lower.nonce(), "abc");

    let err = builder
        .parse_header(r#"PKeyAuth NONCE="abc",Version="1.0",Context="c""#, ENDPOINT)
        .unwrap_err();
    assert_eq!(err.kind(), ChallengeErrorKind::InvalidRequest);
    assert_eq!(err.message(), "Nonce");
}

#[test]
fn quoted_commas_and_equals_stay_in_value() {
    let signer = TokenSigner::default();
    let builder = ChallengeResponseBuilder::new(
        &signer,
        joined_settings(StaticDeviceCertificate::issued_by("A=1,B=2")),
    );

    let request = builder
        .parse_header(
            r#"PKeyAuth Nonce="n",CertAuthorities="A=1,B=2",Version="1.0",Context="c""#,
            ENDPOINT,
        )
        .unwrap();
    assert_eq!(request.cert_authorities(), ["A=1,B=2".to_string()]);

    let response = builder.respond(&request).unwrap();
    assert!(response.is_signed());
}

#[test]
fn scheme_prefix_is_case_sensitive() {
    let err = plain_builder()
        .from_header(r#"pkeyauth Nonce="n",Version="1.0",Context="c""#, ENDPOINT)
        .unwrap_err();

    assert_eq!(err.kind(), ChallengeErrorKind::InvalidRequest);
}

#[test]
fn thumbprint_challenge_is_signed_for_matching_device() {
    let signer = TokenSigner::default();
    let builder = ChallengeResponseBuilder::new(
        &signer,
        joined_settings(StaticDeviceCertificate::thumbprint("0A1B2C3D")),
    );

    let response = builder
        .from_header(
            r#"PKeyAuth Nonce="xyz",CertThumbprint="0a1b2c3d",Version="1.0",Context="ctx""#,
            ENDPOINT,
        )
        .unwrap();

    assert_eq!(
        response.authorization_header_value(),
        r#"PKeyAuth AuthToken="jwt.xyz.sig",Context="ctx",Version="1.0""#
    );
    assert_eq!(response.submit_url(), ENDPOINT);
    assert_eq!(
        signer.calls(),
        vec![("xyz".to_string(), ENDPOINT.to_string())]
    );
}

#[test]
fn joined_device_needs_thumbprint_or_authorities() {
    let builder = ChallengeResponseBuilder::new(
        TokenSigner::default(),
        joined_settings(StaticDeviceCertificate::thumbprint("AA")),
    );

    let err = builder
        .from_header(r#"PKeyAuth Nonce="n",Version="1.0",Context="c""#, ENDPOINT)
        .unwrap_err();

    assert_eq!(err.kind(), ChallengeErrorKind::InvalidRequest);
}

#[test]
fn empty_authorities_key_still_selects_authority_matching() {
    let builder = ChallengeResponseBuilder::new(
        TokenSigner::default(),
        joined_settings(StaticDeviceCertificate::issued_by("CN=Device CA")),
    );

    let request = builder
        .parse_header(
            r#"PKeyAuth Nonce="n",CertAuthorities,Version="1.0",Context="c""#,
            ENDPOINT,
        )
        .unwrap();
    assert_eq!(request.selector(), &CertificateSelector::Authorities(Vec::new()));

    let response = builder.respond(&request).unwrap();
    assert!(!response.is_signed());
}

#[test]
fn redirect_uri_challenge_signs_for_trusted_issuer() {
    let signer = TokenSigner::default();
    let builder = ChallengeResponseBuilder::new(
        &signer,
        joined_settings(StaticDeviceCertificate::issued_by("CN=Corp Device CA")),
    );

    let request = builder
        .parse_uri(
            "urn:http-auth:PKeyAuth?Nonce=r1&CertAuthorities=CN%3DOther%3BCN%3DCorp%20Device%20CA\
             &Version=1.0&SubmitUrl=https%3A%2F%2Flogin.example%2Fsubmit&Context=rctx",
        )
        .unwrap();

    assert_eq!(request.format(), ChallengeFormat::RedirectUri);
    assert_eq!(
        request.cert_authorities(),
        ["CN=Other".to_string(), "CN=Corp Device CA".to_string()]
    );
    assert_eq!(request.submit_url(), "https://login.example/submit");

    let response = builder.respond(&request).unwrap();
    assert_eq!(response.submit_url(), "https://login.example/submit");
    assert_eq!(
        response.authorization_header_value(),
        r#"PKeyAuth AuthToken="jwt.r1.sig",Context="rctx",Version="1.0""#
    );
}

#[test]
fn redirect_uri_without_provider_is_unsigned() {
    let response = plain_builder()
        .from_uri(
            "urn:http-auth:PKeyAuth?Nonce=r1&CertAuthorities=DN1&Version=1.0\
             &SubmitUrl=https://login.example/submit&Context=rctx",
        )
        .unwrap();

    assert_eq!(
        response.authorization_header_value(),
        r#"PKeyAuth Context="rctx",Version="1.0""#
    );
}

#[test]
fn blank_inputs_are_invalid_requests() {
    let builder = plain_builder();

    let header_err = builder.from_header("   ", ENDPOINT).unwrap_err();
    assert_eq!(header_err.kind(), ChallengeErrorKind::InvalidRequest);

    let uri_err = builder.from_uri("").unwrap_err();
    assert_eq!(uri_err.kind(), ChallengeErrorKind::InvalidRequest);
}

#[test]
fn oversized_challenge_is_rejected() {
    let settings = ChallengeSettings::new().max_challenge_len(32);
    let builder = ChallengeResponseBuilder::new(TokenSigner::default(), settings);

    let long = format!(
        r#"PKeyAuth Nonce="{}",Version="1.0",Context="c""#,
        "n".repeat(64)
    );
    let err = builder.from_header(&long, ENDPOINT).unwrap_err();

    assert_eq!(err.kind(), ChallengeErrorKind::InvalidRequest);
}

#[test]
fn signed_response_debug_hides_token() {
    let builder = ChallengeResponseBuilder::new(
        TokenSigner::default(),
        joined_settings(StaticDeviceCertificate::thumbprint("AA")),
    );

    let response = builder
        .from_header(
            r#"PKeyAuth Nonce="secretnonce",CertThumbprint="aa",Version="1.0",Context="c""#,
            ENDPOINT,
        )
        .unwrap();

    assert!(!format!("{response:?}").contains("jwt.secretnonce.sig"));
}

#[test]
fn relative_redirect_uri_yields_validated_request() {
    let builder = plain_builder();

    let request = builder
        .parse_uri("callback?Nonce=n1&CertAuthorities=DN1&Version=1.0&SubmitUrl=https://s/&Context=c")
        .unwrap();
    assert_eq!(request.nonce(), "n1");
    assert_eq!(request.submit_url(), "https://s/");
    assert_eq!(request.cert_authorities(), ["DN1".to_string()]);

    let response = builder
        .from_uri(
            "https://login.example:99999/cb?Nonce=n2&CertAuthorities=DN1&Version=1.0\
             &SubmitUrl=https://s/&Context=c",
        )
        .unwrap();
    assert_eq!(response.submit_url(), "https://s/");
    assert_eq!(
        response.authorization_header_value(),
        r#"PKeyAuth Context="c",Version="1.0""#
    );
}

#[test]
fn relative_redirect_uri_missing_field_is_named() {
    let err = plain_builder()
        .from_uri("callback?Nonce=n1&Version=1.0&Context=c")
        .unwrap_err();

    assert_eq!(err.kind(), ChallengeErrorKind::InvalidRequest);
    assert_eq!(err.message(), "SubmitUrl");
}

#[test]
fn bad_percent_escape_in_header_is_unsupported_encoding() {
    let err = plain_builder()
        .from_header(r#"PKeyAuth Nonce="n",Version="1.0",Context=%G1"#, ENDPOINT)
        .unwrap_err();

    assert_eq!(err.kind(), ChallengeErrorKind::UnsupportedEncoding);
}

#[test]
fn oversized_redirect_uri_is_rejected() {
    let settings = ChallengeSettings::new().max_challenge_len(64);
    let builder = ChallengeResponseBuilder::new(TokenSigner::default(), settings);

    let uri = format!(
        "urn:http-auth:PKeyAuth?Nonce={}&CertAuthorities=DN1&Version=1.0\
         &SubmitUrl=https://s/&Context=c",
        "n".repeat(64)
    );
    let err = builder.from_uri(&uri).unwrap_err();

    assert_eq!(err.kind(), ChallengeErrorKind::InvalidRequest);
    assert!(err.message().contains("maximum length"));
}
