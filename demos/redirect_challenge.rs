//! Redirect URI challenge demonstration.
//!
//! Brokers that intercept the `urn:http-auth:PKeyAuth` redirect answer the
//! challenge with the parameters carried by the URI. The response goes to
//! the `SubmitUrl` the server asked for.
//!
//! Run with: `cargo run --example redirect_challenge`

use std::sync::Arc;

use pkeyauth::{
    Certificate, ChallengeResponseBuilder, ChallengeSettings, DeviceCertificate, PrivateKey,
    ProofSigner, ProviderError, PublicKey, SignerError, SignerErrorKind,
};

struct TrustedIssuerCertificate {
    issuer: &'static str,
}

impl DeviceCertificate for TrustedIssuerCertificate {
    fn is_valid_issuer(&self, authorities: &[String]) -> bool {
        authorities.iter().any(|dn| dn == self.issuer)
    }

    fn thumbprint(&self) -> Option<String> {
        None
    }

    fn private_key(&self) -> Option<PrivateKey> {
        Some(PrivateKey::new(b"demo-private-key".to_vec()))
    }

    fn public_key(&self) -> Option<PublicKey> {
        None
    }

    fn certificate(&self) -> Option<Certificate> {
        Some(Certificate::new(b"demo-certificate".to_vec()))
    }
}

/// Signer that refuses to work without the certificate chain.
struct ChainSigner;

impl ProofSigner for ChainSigner {
    fn sign(
        &self,
        nonce: &str,
        _submit_url: &str,
        _private_key: &PrivateKey,
        _public_key: Option<&PublicKey>,
        certificate: Option<&Certificate>,
    ) -> Result<String, SignerError> {
        let certificate = certificate.ok_or_else(|| {
            SignerError::new(SignerErrorKind::CertificateEncoding, "missing x5c chain")
        })?;
        Ok(format!("demo-jwt({nonce},{} cert bytes)", certificate.as_bytes().len()))
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_writer(std::io::stderr)
        .init();

    println!("=== Redirect Challenge Example ===\n");

    let provider = || -> Result<Box<dyn DeviceCertificate>, ProviderError> {
        Ok(Box::new(TrustedIssuerCertificate {
            issuer: "CN=MS-Organization-Access",
        }))
    };
    let settings = ChallengeSettings::new().with_device_certificate(Arc::new(provider));
    let builder = ChallengeResponseBuilder::new(ChainSigner, settings);

    let redirects = [
        "urn:http-auth:PKeyAuth?Nonce=7c1e&CertAuthorities=CN%3DMS-Organization-Access%3BCN%3DOther\
         &Version=1.0&SubmitUrl=https%3A%2F%2Flogin.example%2Fpkeyauth&Context=ctx-1",
        "urn:http-auth:PKeyAuth?Nonce=7c1f&CertAuthorities=CN%3DUnknown\
         &Version=1.0&SubmitUrl=https%3A%2F%2Flogin.example%2Fpkeyauth&Context=ctx-2",
        "urn:http-auth:PKeyAuth?Nonce=7c20&Version=1.0&Context=ctx-3",
    ];

    for (i, redirect) in redirects.iter().enumerate() {
        println!("--- Redirect {} ---", i + 1);
        match builder.from_uri(redirect) {
            Ok(response) => {
                println!("Submit to: {}", response.submit_url());
                println!("Signed: {}", response.is_signed());
                println!("Authorization: {}", response.authorization_header_value());
            }
            Err(e) => println!("Rejected: {} ({})", e, e.kind()),
        }
        println!();
    }
}
