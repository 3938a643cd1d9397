use crate::device::DeviceCertificate;
use crate::error::{ChallengeError, ChallengeErrorKind};
use crate::logging::ChallengeLog;
use crate::parser::{parse_header, parse_redirect_uri};
use crate::request::ChallengeRequest;
use crate::response::ChallengeResponse;
use crate::settings::ChallengeSettings;
use crate::signer::ProofSigner;
use crate::tainted::Tainted;

/// Answers PKeyAuth device challenges.
///
/// `ChallengeResponseBuilder` is the entry point of the crate. It parses a
/// challenge from either wire encoding, decides whether the device can prove
/// its identity, and builds the matching [`ChallengeResponse`].
///
/// The builder holds only read-only settings and the signer, so a single
/// instance can serve concurrent calls when the signer is `Sync`.
///
/// # Examples
///
/// ```
/// use pkeyauth::{
///     Certificate, ChallengeResponseBuilder, ChallengeSettings, PrivateKey, ProofSigner,
///     PublicKey, SignerError,
/// };
///
/// struct UnusedSigner;
///
/// impl ProofSigner for UnusedSigner {
///     fn sign(
///         &self,
///         _nonce: &str,
///         _submit_url: &str,
///         _private_key: &PrivateKey,
///         _public_key: Option<&PublicKey>,
///         _certificate: Option<&Certificate>,
///     ) -> Result<String, SignerError> {
///         unreachable!("no device certificate is registered")
///     }
/// }
///
/// let builder = ChallengeResponseBuilder::new(UnusedSigner, ChallengeSettings::new());
/// let response = builder
///     .from_header(
///         r#"PKeyAuth Nonce="n1",CertAuthorities="DN1;DN2",Version="1.0",Context="ctx1""#,
///         "https://submit.example/",
///     )
///     .expect("valid challenge");
///
/// assert_eq!(response.submit_url(), "https://submit.example/");
/// assert_eq!(
///     response.authorization_header_value(),
///     r#"PKeyAuth Context="ctx1",Version="1.0""#
/// );
/// ```
#[derive(Debug)]
pub struct ChallengeResponseBuilder<S> {
    signer: S,
    settings: ChallengeSettings,
}

impl<S: ProofSigner> ChallengeResponseBuilder<S> {
    /// Creates a builder with the given signer and settings.
    pub fn new(signer: S, settings: ChallengeSettings) -> Self {
        Self { signer, settings }
    }

    /// Returns the settings in use.
    pub fn settings(&self) -> &ChallengeSettings {
        &self.settings
    }

    /// Answers a challenge delivered as a `PKeyAuth` authentication header.
    ///
    /// `endpoint` is the URL that returned the challenge; the response is
    /// submitted there.
    ///
    /// # Errors
    ///
    /// - `InvalidRequest` for a malformed or incomplete challenge, or for a
    ///   workplace-joined device facing a challenge without `CertThumbprint`
    ///   or `CertAuthorities`
    /// - `UnsupportedEncoding` when an attribute cannot be decoded
    /// - device proof errors, see [`Self::respond`]
    pub fn from_header(
        &self,
        header_value: &str,
        endpoint: &str,
    ) -> Result<ChallengeResponse, ChallengeError> {
        let request = self.parse_header(header_value, endpoint)?;
        self.respond(&request)
    }

    /// Answers a challenge delivered as parameters of a redirect URI.
    ///
    /// # Errors
    ///
    /// - `InvalidRequest` for a blank, unparseable or incomplete redirect URI
    /// - device proof errors, see [`Self::respond`]
    pub fn from_uri(&self, redirect_uri: &str) -> Result<ChallengeResponse, ChallengeError> {
        let request = self.parse_uri(redirect_uri)?;
        self.respond(&request)
    }

    /// Parses and validates a header challenge without answering it.
    ///
    /// # Errors
    ///
    /// Same parsing errors as [`Self::from_header`].
    pub fn parse_header(
        &self,
        header_value: &str,
        endpoint: &str,
    ) -> Result<ChallengeRequest, ChallengeError> {
        parse_header(
            Tainted::new(header_value),
            endpoint,
            self.settings.is_workplace_joined(),
            self.settings.challenge_len_limit(),
        )
        .map_err(|err| ChallengeLog::HEADER.rejected(err))
    }

    /// Parses and validates a redirect URI challenge without answering it.
    ///
    /// # Errors
    ///
    /// Same parsing errors as [`Self::from_uri`].
    pub fn parse_uri(&self, redirect_uri: &str) -> Result<ChallengeRequest, ChallengeError> {
        parse_redirect_uri(
            Tainted::new(redirect_uri),
            self.settings.challenge_len_limit(),
        )
        .map_err(|err| ChallengeLog::REDIRECT_URI.rejected(err))
    }

    /// Builds the response to a parsed challenge.
    ///
    /// Without a registered device certificate provider, or when the device
    /// certificate does not satisfy the challenge, the response carries no
    /// proof. Otherwise the signer produces a proof token for the response.
    ///
    /// # Errors
    ///
    /// - `ProviderInstantiationError` when the registered device certificate
    ///   provider fails
    /// - `KeyUnavailable` when the matching certificate has no private key
    /// - `UnsupportedEncoding`, `CertificateEncodingError`, `SignatureError`,
    ///   `UnsupportedAlgorithm`, `KeyUnavailable` or `DeviceProofFailed`
    ///   mapped from a signer failure
    pub fn respond(&self, request: &ChallengeRequest) -> Result<ChallengeResponse, ChallengeError> {
        let log = ChallengeLog::for_format(request.format());
        let Some(provider) = self.settings.device_certificate() else {
            return Ok(ChallengeResponse::unsigned(request));
        };

        let device = provider.instantiate().map_err(|err| {
            log.rejected(ChallengeError::new(
                ChallengeErrorKind::ProviderInstantiationError,
                err.message(),
            ))
        })?;

        if !certificate_matches(device.as_ref(), request) {
            log.debug(format_args!("device certificate does not match challenge"));
            return Ok(ChallengeResponse::unsigned(request));
        }

        let private_key = device.private_key().ok_or_else(|| {
            log.rejected(ChallengeError::new(
                ChallengeErrorKind::KeyUnavailable,
                "device certificate private key is unavailable",
            ))
        })?;

        let token = self
            .signer
            .sign(
                request.nonce(),
                request.submit_url(),
                &private_key,
                device.public_key().as_ref(),
                device.certificate().as_ref(),
            )
            .map_err(|err| {
                log.warn(format_args!("proof signer failed: {err}"));
                log.rejected(ChallengeError::from(err))
            })?;

        log.info(format_args!(
            "signed device challenge response for {}",
            request.submit_url()
        ));
        Ok(ChallengeResponse::signed(request, &token))
    }
}

/// A device certificate satisfies a challenge when its issuer is accepted or
/// its thumbprint equals the requested one, ignoring ASCII case.
fn certificate_matches(device: &dyn DeviceCertificate, request: &ChallengeRequest) -> bool {
    if device.is_valid_issuer(request.cert_authorities()) {
        return true;
    }
    match (device.thumbprint(), request.thumbprint()) {
        (Some(device_tp), Some(requested)) => device_tp.eq_ignore_ascii_case(requested),
        _ => false,
    }
}
