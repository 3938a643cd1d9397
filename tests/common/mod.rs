//! Fakes shared by the integration test binaries.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use pkeyauth::{
    Certificate, ChallengeSettings, DeviceCertificate, DeviceCertificateProvider, PrivateKey,
    ProofSigner, ProviderError, PublicKey, SignerError,
};

pub const ENDPOINT: &str = "https://login.example/adfs/ls";

/// Device certificate backed by plain fields.
#[derive(Debug, Clone, Default)]
pub struct StaticDeviceCertificate {
    pub thumbprint: Option<String>,
    pub issuers: Vec<String>,
    pub private_key: Option<Vec<u8>>,
}

impl StaticDeviceCertificate {
    pub fn thumbprint(thumbprint: &str) -> Self {
        Self {
            thumbprint: Some(thumbprint.to_string()),
            private_key: Some(b"device-private-key".to_vec()),
            ..Self::default()
        }
    }

    pub fn issued_by(issuer: &str) -> Self {
        Self {
            issuers: vec![issuer.to_string()],
            private_key: Some(b"device-private-key".to_vec()),
            ..Self::default()
        }
    }
}

impl DeviceCertificate for StaticDeviceCertificate {
    fn is_valid_issuer(&self, authorities: &[String]) -> bool {
        authorities.iter().any(|dn| self.issuers.contains(dn))
    }

    fn thumbprint(&self) -> Option<String> {
        self.thumbprint.clone()
    }

    fn private_key(&self) -> Option<PrivateKey> {
        self.private_key.clone().map(PrivateKey::new)
    }

    fn public_key(&self) -> Option<PublicKey> {
        Some(PublicKey::new(b"device-public-key".to_vec()))
    }

    fn certificate(&self) -> Option<Certificate> {
        Some(Certificate::new(b"device-certificate".to_vec()))
    }
}

/// Settings for a workplace-joined device holding `cert`.
pub fn joined_settings(cert: StaticDeviceCertificate) -> ChallengeSettings {
    let provider = move || -> Result<Box<dyn DeviceCertificate>, ProviderError> {
        Ok(Box::new(cert.clone()))
    };
    let provider: Arc<dyn DeviceCertificateProvider> = Arc::new(provider);
    ChallengeSettings::new().with_device_certificate(provider)
}

/// Signer that builds a fake token from its inputs and records each call.
#[derive(Debug, Default)]
pub struct TokenSigner {
    calls: Mutex<Vec<(String, String)>>,
}

impl TokenSigner {
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

impl ProofSigner for TokenSigner {
    fn sign(
        &self,
        nonce: &str,
        submit_url: &str,
        _private_key: &PrivateKey,
        _public_key: Option<&PublicKey>,
        _certificate: Option<&Certificate>,
    ) -> Result<String, SignerError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((nonce.to_string(), submit_url.to_string()));
        }
        Ok(format!("jwt.{nonce}.sig"))
    }
}
