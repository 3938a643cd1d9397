use std::fmt;

use crate::signer::{SignerError, SignerErrorKind};

/// Error returned when a challenge cannot be turned into a response.
///
/// Every failure of the challenge pipeline is reported through this type:
/// malformed or incomplete challenges, decoding failures, and failures of the
/// device certificate provider or proof signer. Nothing is retried
/// internally; the caller decides whether to abort the authentication flow.
///
/// # Examples
///
/// ```
/// use pkeyauth::{ChallengeError, ChallengeErrorKind};
///
/// let error = ChallengeError::new(ChallengeErrorKind::InvalidRequest, "Nonce");
/// assert_eq!(error.kind(), ChallengeErrorKind::InvalidRequest);
/// assert_eq!(error.message(), "Nonce");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChallengeError {
    kind: ChallengeErrorKind,
    message: String,
}

impl ChallengeError {
    /// Creates a new challenge error.
    pub fn new(kind: ChallengeErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Shorthand for an [`ChallengeErrorKind::InvalidRequest`] naming a field or reason.
    pub(crate) fn invalid_request(reason: impl Into<String>) -> Self {
        Self::new(ChallengeErrorKind::InvalidRequest, reason)
    }

    /// Returns the error kind.
    pub fn kind(&self) -> ChallengeErrorKind {
        self.kind
    }

    /// Returns the error message.
    ///
    /// For a missing required field this is the field name, e.g. `"Version"`.
    /// For signer failures it is the signer's own message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ChallengeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "device challenge failed ({}): {}", self.kind, self.message)
    }
}

impl std::error::Error for ChallengeError {}

/// Kind of challenge error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChallengeErrorKind {
    /// The challenge is malformed, incomplete, or names no usable certificate.
    InvalidRequest,
    /// A challenge value or signer input could not be decoded.
    UnsupportedEncoding,
    /// A device certificate matched but its private key is unavailable.
    KeyUnavailable,
    /// The signer could not encode the device certificate.
    CertificateEncodingError,
    /// The signer failed to produce a signature.
    SignatureError,
    /// The signer does not support the required algorithm.
    UnsupportedAlgorithm,
    /// The signer failed for a reason with no dedicated kind.
    DeviceProofFailed,
    /// The registered device certificate provider could not be instantiated.
    ProviderInstantiationError,
}

impl fmt::Display for ChallengeErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRequest => write!(f, "invalid request"),
            Self::UnsupportedEncoding => write!(f, "unsupported encoding"),
            Self::KeyUnavailable => write!(f, "private key unavailable"),
            Self::CertificateEncodingError => write!(f, "certificate encoding error"),
            Self::SignatureError => write!(f, "signature error"),
            Self::UnsupportedAlgorithm => write!(f, "unsupported algorithm"),
            Self::DeviceProofFailed => write!(f, "device proof failed"),
            Self::ProviderInstantiationError => write!(f, "provider instantiation error"),
        }
    }
}

impl From<SignerErrorKind> for ChallengeErrorKind {
    fn from(kind: SignerErrorKind) -> Self {
        match kind {
            SignerErrorKind::UnsupportedEncoding => Self::UnsupportedEncoding,
            SignerErrorKind::CertificateEncoding => Self::CertificateEncodingError,
            SignerErrorKind::PrivateKeyUnavailable => Self::KeyUnavailable,
            SignerErrorKind::Signature => Self::SignatureError,
            SignerErrorKind::NoSuchAlgorithm => Self::UnsupportedAlgorithm,
            SignerErrorKind::Other => Self::DeviceProofFailed,
        }
    }
}

/// Signer failures keep the signer's message and translate only the kind.
impl From<SignerError> for ChallengeError {
    fn from(err: SignerError) -> Self {
        Self::new(err.kind().into(), err.message())
    }
}
