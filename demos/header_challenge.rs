//! Header challenge demonstration.
//!
//! This example answers `WWW-Authenticate: PKeyAuth ...` challenges:
//! 1. Without a device certificate (plain response)
//! 2. With a device certificate matching the requested thumbprint
//! 3. With a malformed challenge
//!
//! Run with: `cargo run --example header_challenge`

use std::sync::Arc;

use pkeyauth::{
    Certificate, ChallengeResponseBuilder, ChallengeSettings, DeviceCertificate, PrivateKey,
    ProofSigner, ProviderError, PublicKey, SignerError,
};

/// Device certificate as it would come out of a platform key store.
#[derive(Clone)]
struct KeyStoreCertificate {
    thumbprint: String,
}

impl DeviceCertificate for KeyStoreCertificate {
    fn is_valid_issuer(&self, _authorities: &[String]) -> bool {
        false
    }

    fn thumbprint(&self) -> Option<String> {
        Some(self.thumbprint.clone())
    }

    fn private_key(&self) -> Option<PrivateKey> {
        Some(PrivateKey::new(b"demo-private-key".to_vec()))
    }

    fn public_key(&self) -> Option<PublicKey> {
        Some(PublicKey::new(b"demo-public-key".to_vec()))
    }

    fn certificate(&self) -> Option<Certificate> {
        Some(Certificate::new(b"demo-certificate".to_vec()))
    }
}

/// Stand-in for a JWS signer; a real one signs a JWT with the device key.
struct DemoSigner;

impl ProofSigner for DemoSigner {
    fn sign(
        &self,
        nonce: &str,
        submit_url: &str,
        _private_key: &PrivateKey,
        _public_key: Option<&PublicKey>,
        _certificate: Option<&Certificate>,
    ) -> Result<String, SignerError> {
        Ok(format!("demo-jwt(nonce={nonce},aud={submit_url})"))
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_writer(std::io::stderr)
        .init();

    println!("=== Header Challenge Example ===\n");

    let endpoint = "https://login.example/adfs/ls";
    let challenge =
        r#"PKeyAuth Nonce="f3a2",CertThumbprint="9F86D081",Version="1.0",Context="rp-ctx""#;

    println!("--- Scenario 1: Device Not Registered ---");
    let builder = ChallengeResponseBuilder::new(DemoSigner, ChallengeSettings::new());
    match builder.from_header(challenge, endpoint) {
        Ok(response) => {
            println!("Submit to: {}", response.submit_url());
            println!("Authorization: {}", response.authorization_header_value());
        }
        Err(e) => eprintln!("Challenge failed: {}", e),
    }

    println!("\n--- Scenario 2: Workplace-Joined Device ---");
    let cert = KeyStoreCertificate {
        thumbprint: "9f86d081".to_string(),
    };
    let provider = move || -> Result<Box<dyn DeviceCertificate>, ProviderError> {
        Ok(Box::new(cert.clone()))
    };
    let settings = ChallengeSettings::new().with_device_certificate(Arc::new(provider));
    let builder = ChallengeResponseBuilder::new(DemoSigner, settings);
    match builder.from_header(challenge, endpoint) {
        Ok(response) => {
            println!("Signed: {}", response.is_signed());
            println!("Authorization: {}", response.authorization_header_value());
        }
        Err(e) => eprintln!("Challenge failed: {}", e),
    }

    println!("\n--- Scenario 3: Malformed Challenge ---");
    match builder.from_header("PKeyAuth Nonce=,Version=1.0,Context=ctx1", endpoint) {
        Ok(_) => println!("Unexpected success"),
        Err(e) => println!("Rejected (expected): {}", e),
    }
}
