//! Parsing of both challenge encodings into a [`ChallengeRequest`].

use url::Url;

use crate::codec::decode_fields;
use crate::error::ChallengeError;
use crate::field::{split_authorities, FieldMap, RequestField, SCHEME};
use crate::logging::ChallengeLog;
use crate::request::{CertificateSelector, ChallengeRequest};
use crate::tainted::Tainted;
use crate::validator::{validate, ChallengeFormat, ValidatedFields};

/// Parses a `PKeyAuth` challenge header.
///
/// `endpoint` becomes the submit URL since the header encoding never carries
/// one. `workplace_joined` decides whether a certificate selector is read at
/// all.
///
/// # Errors
///
/// `InvalidRequest` for blank or oversized input, a missing or mismatched
/// scheme token, a malformed attribute list, a missing required field, or a
/// workplace-joined device facing a challenge with neither `CertThumbprint`
/// nor `CertAuthorities`. `UnsupportedEncoding` when an attribute cannot be
/// decoded.
pub(crate) fn parse_header(
    header: Tainted<&str>,
    endpoint: &str,
    workplace_joined: bool,
    max_len: usize,
) -> Result<ChallengeRequest, ChallengeError> {
    let log = ChallengeLog::HEADER;
    let header = header.into_inner();

    if header.trim().is_empty() {
        return Err(ChallengeError::invalid_request("headerValue"));
    }
    check_length(header, max_len)?;

    let attributes = strip_scheme(header)
        .ok_or_else(|| ChallengeError::invalid_request(format!("expected {SCHEME} challenge")))?;

    let validated = validate(decode_fields(attributes)?, ChallengeFormat::Header)?;
    let fields = validated.fields();

    let selector = if !workplace_joined {
        log.debug(format_args!("device is not workplace joined"));
        CertificateSelector::Unconstrained
    } else if let Some(thumbprint) = fields
        .get(RequestField::CertThumbprint)
        .filter(|tp| !tp.trim().is_empty())
    {
        log.debug(format_args!("challenge names a certificate thumbprint"));
        CertificateSelector::Thumbprint(thumbprint.to_string())
    } else if fields.contains(RequestField::CertAuthorities) {
        log.debug(format_args!("challenge names certificate authorities"));
        CertificateSelector::Authorities(authorities(fields))
    } else {
        return Err(ChallengeError::invalid_request(
            "Both CertThumbprint and CertAuthorities are not present",
        ));
    };

    Ok(build_request(
        &validated,
        endpoint.to_string(),
        selector,
        ChallengeFormat::Header,
    ))
}

/// Parses a challenge carried by a redirect URI such as
/// `urn:http-auth:PKeyAuth?Nonce=...&CertAuthorities=...&Version=1.0&SubmitUrl=...&Context=...`.
///
/// Parameters are read from the fragment when it holds any, otherwise from
/// the query. The redirect form is always authority based.
///
/// # Errors
///
/// `InvalidRequest` for blank or oversized URIs and for missing required
/// fields, including `SubmitUrl` and `CertAuthorities`. A URI that is not
/// absolute is still read for its `?` query and `#` fragment.
pub(crate) fn parse_redirect_uri(
    redirect_uri: Tainted<&str>,
    max_len: usize,
) -> Result<ChallengeRequest, ChallengeError> {
    let log = ChallengeLog::REDIRECT_URI;
    let redirect_uri = redirect_uri.into_inner();

    if redirect_uri.trim().is_empty() {
        return Err(ChallengeError::invalid_request("redirectUri"));
    }
    check_length(redirect_uri, max_len)?;

    let redirect_uri = redirect_uri.trim();
    let parameters = match Url::parse(redirect_uri) {
        Ok(url) => url_parameters(url.fragment(), url.query()),
        Err(err) => {
            log.debug(format_args!(
                "redirect uri is not absolute ({err}), reading raw components"
            ));
            let (fragment, query) = raw_components(redirect_uri);
            url_parameters(fragment, query)
        }
    };

    let validated = validate(parameters, ChallengeFormat::RedirectUri)?;
    let fields = validated.fields();

    let authorities = authorities(fields);
    log.debug(format_args!("challenge authorities: {:?}", authorities));

    let submit_url = fields.get_or_empty(RequestField::SubmitUrl);
    Ok(build_request(
        &validated,
        submit_url,
        CertificateSelector::Authorities(authorities),
        ChallengeFormat::RedirectUri,
    ))
}

/// Returns the attribute list after `PKeyAuth` and its separating whitespace.
fn strip_scheme(header: &str) -> Option<&str> {
    let rest = header.strip_prefix(SCHEME)?;
    rest.starts_with(char::is_whitespace).then_some(rest)
}

fn check_length(input: &str, max_len: usize) -> Result<(), ChallengeError> {
    if input.len() > max_len {
        return Err(ChallengeError::invalid_request(format!(
            "challenge exceeds maximum length of {max_len}"
        )));
    }
    Ok(())
}

fn url_parameters(fragment: Option<&str>, query: Option<&str>) -> FieldMap {
    let from_fragment = form_pairs(fragment);
    if from_fragment.is_empty() {
        form_pairs(query)
    } else {
        from_fragment
    }
}

fn form_pairs(component: Option<&str>) -> FieldMap {
    component
        .map(|c| url::form_urlencoded::parse(c.as_bytes()).collect())
        .unwrap_or_default()
}

/// Splits a URI that `Url` rejects (relative, bad port, ...) into its
/// fragment and query: the fragment follows the first `#`, the query the
/// first `?` before it.
fn raw_components(uri: &str) -> (Option<&str>, Option<&str>) {
    let (rest, fragment) = match uri.split_once('#') {
        Some((rest, fragment)) => (rest, Some(fragment)),
        None => (uri, None),
    };
    let query = rest.split_once('?').map(|(_, query)| query);
    (fragment, query)
}

fn authorities(fields: &FieldMap) -> Vec<String> {
    split_authorities(fields.get(RequestField::CertAuthorities).unwrap_or_default())
}

fn build_request(
    validated: &ValidatedFields,
    submit_url: String,
    selector: CertificateSelector,
    format: ChallengeFormat,
) -> ChallengeRequest {
    let fields = validated.fields();
    ChallengeRequest::new(
        fields.get_or_empty(RequestField::Nonce),
        fields.get_or_empty(RequestField::Context),
        fields.get_or_empty(RequestField::Version),
        submit_url,
        selector,
        format,
    )
}
