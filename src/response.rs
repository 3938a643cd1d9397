use std::fmt;

use crate::field::SCHEME;
use crate::request::ChallengeRequest;

/// The answer to a PKeyAuth challenge.
///
/// Send `authorization_header_value` as the `Authorization` header of a
/// request to `submit_url`.
///
/// The header value is one of two shapes:
///
/// ```text
/// PKeyAuth Context="<context>",Version="<version>"
/// PKeyAuth AuthToken="<jwt>",Context="<context>",Version="<version>"
/// ```
///
/// `Debug` output omits the proof token.
#[derive(Clone, PartialEq, Eq)]
pub struct ChallengeResponse {
    submit_url: String,
    authorization_header_value: String,
    signed: bool,
}

impl ChallengeResponse {
    /// Builds the response that proves nothing about the device.
    pub(crate) fn unsigned(request: &ChallengeRequest) -> Self {
        Self {
            submit_url: request.submit_url().to_string(),
            authorization_header_value: format!(
                r#"{SCHEME} Context="{}",Version="{}""#,
                request.context(),
                request.version()
            ),
            signed: false,
        }
    }

    /// Builds the response carrying a signed proof token.
    pub(crate) fn signed(request: &ChallengeRequest, token: &str) -> Self {
        Self {
            submit_url: request.submit_url().to_string(),
            authorization_header_value: format!(
                r#"{SCHEME} AuthToken="{}",Context="{}",Version="{}""#,
                token,
                request.context(),
                request.version()
            ),
            signed: true,
        }
    }

    /// Endpoint the response must be submitted to.
    pub fn submit_url(&self) -> &str {
        &self.submit_url
    }

    /// Complete `Authorization` header value.
    pub fn authorization_header_value(&self) -> &str {
        &self.authorization_header_value
    }

    /// Returns `true` if the header carries a device proof token.
    pub fn is_signed(&self) -> bool {
        self.signed
    }
}

impl fmt::Debug for ChallengeResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let header: &dyn fmt::Debug = if self.signed {
            &"[REDACTED]"
        } else {
            &self.authorization_header_value
        };
        f.debug_struct("ChallengeResponse")
            .field("submit_url", &self.submit_url)
            .field("authorization_header_value", header)
            .field("signed", &self.signed)
            .finish()
    }
}
