use std::fmt;

use crate::keys::{Certificate, PrivateKey, PublicKey};

/// Access to the device certificate held in platform secure storage.
///
/// A registered [`DeviceCertificateProvider`] hands out one instance per
/// challenge. Every method may block on secure-storage access.
pub trait DeviceCertificate {
    /// Returns `true` if the device certificate was issued by one of `authorities`.
    ///
    /// `authorities` holds issuer distinguished names in challenge order and
    /// is empty when the challenge named a thumbprint instead.
    fn is_valid_issuer(&self, authorities: &[String]) -> bool;

    /// Returns the certificate thumbprint, if the device has a certificate.
    fn thumbprint(&self) -> Option<String>;

    /// Returns the private key, if it can be read.
    fn private_key(&self) -> Option<PrivateKey>;

    /// Returns the public key, if available.
    fn public_key(&self) -> Option<PublicKey>;

    /// Returns the certificate, if available.
    fn certificate(&self) -> Option<Certificate>;
}

/// Factory for [`DeviceCertificate`] instances, registered in
/// [`ChallengeSettings`](crate::ChallengeSettings).
///
/// Registering a provider marks the device as workplace-joined. The provider
/// is shared across calls, so it must be `Send + Sync`; the instances it
/// creates are used by a single call only.
///
/// Closures returning `Result<Box<dyn DeviceCertificate>, ProviderError>`
/// implement this trait.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use pkeyauth::{ChallengeSettings, DeviceCertificate, DeviceCertificateProvider, ProviderError};
///
/// let provider = || -> Result<Box<dyn DeviceCertificate>, ProviderError> {
///     Err(ProviderError::new("keystore locked"))
/// };
///
/// let settings = ChallengeSettings::new().with_device_certificate(Arc::new(provider));
/// assert!(settings.is_workplace_joined());
/// ```
pub trait DeviceCertificateProvider: Send + Sync {
    /// Creates a device certificate accessor for one challenge.
    ///
    /// # Errors
    ///
    /// Returns a [`ProviderError`] when the platform implementation is missing
    /// or cannot be initialized.
    fn instantiate(&self) -> Result<Box<dyn DeviceCertificate>, ProviderError>;
}

impl<F> DeviceCertificateProvider for F
where
    F: Fn() -> Result<Box<dyn DeviceCertificate>, ProviderError> + Send + Sync,
{
    fn instantiate(&self) -> Result<Box<dyn DeviceCertificate>, ProviderError> {
        self()
    }
}

/// Error returned when a [`DeviceCertificateProvider`] cannot create an instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderError {
    message: String,
}

impl ProviderError {
    /// Creates a new provider error.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Returns the error message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "device certificate provider error: {}", self.message)
    }
}

impl std::error::Error for ProviderError {}
