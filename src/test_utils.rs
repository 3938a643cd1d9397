//! Fakes and proptest strategies shared by unit tests.

use std::cell::RefCell;

use proptest::prelude::*;

use crate::device::DeviceCertificate;
use crate::keys::{Certificate, PrivateKey, PublicKey};
use crate::signer::{ProofSigner, SignerError};

/// In-memory device certificate.
#[derive(Debug, Clone)]
pub(crate) struct FakeDeviceCertificate {
    thumbprint: Option<String>,
    issuers: Vec<String>,
    has_private_key: bool,
}

impl FakeDeviceCertificate {
    pub(crate) fn with_thumbprint(thumbprint: &str) -> Self {
        Self {
            thumbprint: Some(thumbprint.to_string()),
            issuers: Vec::new(),
            has_private_key: true,
        }
    }

    pub(crate) fn with_issuer(issuer: &str) -> Self {
        Self {
            thumbprint: None,
            issuers: vec![issuer.to_string()],
            has_private_key: true,
        }
    }

    pub(crate) fn without_private_key(mut self) -> Self {
        self.has_private_key = false;
        self
    }
}

impl DeviceCertificate for FakeDeviceCertificate {
    fn is_valid_issuer(&self, authorities: &[String]) -> bool {
        authorities.iter().any(|dn| self.issuers.contains(dn))
    }

    fn thumbprint(&self) -> Option<String> {
        self.thumbprint.clone()
    }

    fn private_key(&self) -> Option<PrivateKey> {
        self.has_private_key
            .then(|| PrivateKey::new(b"fake-private-key".to_vec()))
    }

    fn public_key(&self) -> Option<PublicKey> {
        Some(PublicKey::new(b"fake-public-key".to_vec()))
    }

    fn certificate(&self) -> Option<Certificate> {
        Some(Certificate::new(b"fake-certificate".to_vec()))
    }
}

/// Signer returning a fixed token and recording `(nonce, submit_url)` per call.
#[derive(Debug)]
pub(crate) struct RecordingSigner {
    token: String,
    calls: RefCell<Vec<(String, String)>>,
}

impl RecordingSigner {
    pub(crate) fn new(token: &str) -> Self {
        Self {
            token: token.to_string(),
            calls: RefCell::new(Vec::new()),
        }
    }

    pub(crate) fn calls(&self) -> Vec<(String, String)> {
        self.calls.borrow().clone()
    }

    pub(crate) fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

impl ProofSigner for RecordingSigner {
    fn sign(
        &self,
        nonce: &str,
        submit_url: &str,
        private_key: &PrivateKey,
        _public_key: Option<&PublicKey>,
        _certificate: Option<&Certificate>,
    ) -> Result<String, SignerError> {
        assert!(!private_key.expose_secret().is_empty());
        self.calls
            .borrow_mut()
            .push((nonce.to_string(), submit_url.to_string()));
        Ok(self.token.clone())
    }
}

/// Signer that always fails with the given error.
#[derive(Debug)]
pub(crate) struct FailingSigner(pub(crate) SignerError);

impl ProofSigner for FailingSigner {
    fn sign(
        &self,
        _nonce: &str,
        _submit_url: &str,
        _private_key: &PrivateKey,
        _public_key: Option<&PublicKey>,
        _certificate: Option<&Certificate>,
    ) -> Result<String, SignerError> {
        Err(self.0.clone())
    }
}

/// Field values free of quotes and URL-form escapes; may contain `,`, `=` and `;`.
pub(crate) fn arb_field_value() -> impl Strategy<Value = String> {
    prop::string::string_regex("[A-Za-z0-9 ,=;:/._-]{0,40}").unwrap()
}
