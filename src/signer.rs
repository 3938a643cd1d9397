use std::fmt;

use crate::keys::{Certificate, PrivateKey, PublicKey};

/// Produces the signed proof-of-possession token for a matched device certificate.
///
/// The token binds the server nonce and the submit URL to the device key. How
/// it is built (JWS header, algorithm, certificate chain encoding) belongs to
/// the implementation; the challenge pipeline only embeds the returned string
/// verbatim in the `AuthToken` attribute of the response header.
///
/// Implementations may block on hardware-backed key storage. No timeout or
/// retry is applied around `sign`.
///
/// # Examples
///
/// ```
/// use pkeyauth::{Certificate, PrivateKey, ProofSigner, PublicKey, SignerError};
///
/// struct StaticSigner;
///
/// impl ProofSigner for StaticSigner {
///     fn sign(
///         &self,
///         nonce: &str,
///         submit_url: &str,
///         _private_key: &PrivateKey,
///         _public_key: Option<&PublicKey>,
///         _certificate: Option<&Certificate>,
///     ) -> Result<String, SignerError> {
///         Ok(format!("{nonce}.{submit_url}"))
///     }
/// }
/// ```
pub trait ProofSigner {
    /// Signs a proof token for `nonce` and `submit_url` with the device key.
    ///
    /// # Errors
    ///
    /// Returns a [`SignerError`] whose kind is translated into the challenge
    /// error taxonomy by the caller.
    fn sign(
        &self,
        nonce: &str,
        submit_url: &str,
        private_key: &PrivateKey,
        public_key: Option<&PublicKey>,
        certificate: Option<&Certificate>,
    ) -> Result<String, SignerError>;
}

impl<T: ProofSigner + ?Sized> ProofSigner for &T {
    fn sign(
        &self,
        nonce: &str,
        submit_url: &str,
        private_key: &PrivateKey,
        public_key: Option<&PublicKey>,
        certificate: Option<&Certificate>,
    ) -> Result<String, SignerError> {
        (**self).sign(nonce, submit_url, private_key, public_key, certificate)
    }
}

/// Error reported by a [`ProofSigner`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignerError {
    kind: SignerErrorKind,
    message: String,
}

impl SignerError {
    /// Creates a new signer error.
    pub fn new(kind: SignerErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Returns the error kind.
    pub fn kind(&self) -> SignerErrorKind {
        self.kind
    }

    /// Returns the signer's message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for SignerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "signer error ({}): {}", self.kind, self.message)
    }
}

impl std::error::Error for SignerError {}

/// Conditions a [`ProofSigner`] can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignerErrorKind {
    /// Token claims could not be encoded.
    UnsupportedEncoding,
    /// The device certificate could not be encoded into the token header.
    CertificateEncoding,
    /// The private key could not be used for signing.
    PrivateKeyUnavailable,
    /// Signature generation failed.
    Signature,
    /// The signing algorithm is not available.
    NoSuchAlgorithm,
    /// Any other failure.
    Other,
}

impl fmt::Display for SignerErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedEncoding => write!(f, "unsupported encoding"),
            Self::CertificateEncoding => write!(f, "certificate encoding"),
            Self::PrivateKeyUnavailable => write!(f, "private key unavailable"),
            Self::Signature => write!(f, "signature"),
            Self::NoSuchAlgorithm => write!(f, "no such algorithm"),
            Self::Other => write!(f, "other"),
        }
    }
}
