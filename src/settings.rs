use std::fmt;
use std::sync::Arc;

use crate::device::DeviceCertificateProvider;

/// Default upper bound on the length of a challenge header or redirect URI, in bytes.
pub const DEFAULT_MAX_CHALLENGE_LEN: usize = 16 * 1024;

/// Configuration consulted by [`ChallengeResponseBuilder`](crate::ChallengeResponseBuilder).
///
/// Settings are read, never written, while a challenge is handled. A device
/// is treated as workplace-joined exactly when a device certificate provider
/// is registered.
///
/// # Examples
///
/// ```
/// use pkeyauth::ChallengeSettings;
///
/// let settings = ChallengeSettings::new().max_challenge_len(4096);
///
/// assert!(!settings.is_workplace_joined());
/// assert_eq!(settings.challenge_len_limit(), 4096);
/// ```
#[derive(Clone)]
pub struct ChallengeSettings {
    device_certificate: Option<Arc<dyn DeviceCertificateProvider>>,
    max_challenge_len: usize,
}

impl ChallengeSettings {
    /// Creates settings with no device certificate provider and the default length limit.
    pub fn new() -> Self {
        Self {
            device_certificate: None,
            max_challenge_len: DEFAULT_MAX_CHALLENGE_LEN,
        }
    }

    /// Registers the device certificate provider.
    pub fn with_device_certificate(mut self, provider: Arc<dyn DeviceCertificateProvider>) -> Self {
        self.device_certificate = Some(provider);
        self
    }

    /// Sets the maximum accepted challenge length in bytes.
    ///
    /// # Panics
    ///
    /// Panics if `max_len` is 0.
    pub fn max_challenge_len(mut self, max_len: usize) -> Self {
        assert!(max_len > 0, "max_challenge_len must be greater than 0");
        self.max_challenge_len = max_len;
        self
    }

    /// Returns the maximum accepted challenge length in bytes.
    pub fn challenge_len_limit(&self) -> usize {
        self.max_challenge_len
    }

    /// Returns `true` if a device certificate provider is registered.
    pub fn is_workplace_joined(&self) -> bool {
        self.device_certificate.is_some()
    }

    /// Returns the registered provider.
    pub fn device_certificate(&self) -> Option<&Arc<dyn DeviceCertificateProvider>> {
        self.device_certificate.as_ref()
    }
}

impl Default for ChallengeSettings {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ChallengeSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChallengeSettings")
            .field("workplace_joined", &self.is_workplace_joined())
            .field("max_challenge_len", &self.max_challenge_len)
            .finish()
    }
}
