//! Device key material handed from the certificate provider to the signer.
//!
//! The core never inspects these bytes. It only moves them from a
//! [`DeviceCertificate`](crate::DeviceCertificate) to a
//! [`ProofSigner`](crate::ProofSigner), so they are opaque byte containers.

use std::fmt;

/// The device private key.
///
/// Formatted output never contains the key bytes, and the type is neither
/// `Clone` nor `Copy`, so a key obtained for one signing call is dropped with
/// it.
///
/// # Examples
///
/// ```
/// use pkeyauth::PrivateKey;
///
/// let key = PrivateKey::new(vec![0x30, 0x82, 0x01]);
///
/// assert_eq!(format!("{:?}", key), "PrivateKey([REDACTED])");
/// assert_eq!(format!("{}", key), "[REDACTED]");
/// assert_eq!(key.expose_secret(), &[0x30, 0x82, 0x01]);
/// ```
// Must stay without Clone, Copy or Default; a duplicated key outlives the call that fetched it.
pub struct PrivateKey {
    // Must stay private. Direct access would let key bytes reach logs (CWE-532).
    der: Vec<u8>,
}

impl PrivateKey {
    /// Wraps encoded private key bytes (or a platform handle serialized as bytes).
    pub fn new(der: impl Into<Vec<u8>>) -> Self {
        Self { der: der.into() }
    }

    /// Exposes the key bytes to a signer.
    ///
    /// The verbose name marks every place key material leaves this wrapper.
    pub fn expose_secret(&self) -> &[u8] {
        &self.der
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivateKey([REDACTED])")
    }
}

impl fmt::Display for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

/// The device public key, encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKey {
    der: Vec<u8>,
}

impl PublicKey {
    /// Wraps encoded public key bytes.
    pub fn new(der: impl Into<Vec<u8>>) -> Self {
        Self { der: der.into() }
    }

    /// Returns the encoded key.
    pub fn as_bytes(&self) -> &[u8] {
        &self.der
    }
}

/// The device certificate, DER encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Certificate {
    der: Vec<u8>,
}

impl Certificate {
    /// Wraps a DER encoded certificate.
    pub fn new(der: impl Into<Vec<u8>>) -> Self {
        Self { der: der.into() }
    }

    /// Returns the DER bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.der
    }
}
