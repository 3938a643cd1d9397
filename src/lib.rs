//! PKeyAuth device-authentication challenge handling.
//!
//! Identity providers ask a client to prove it runs on a registered
//! ("workplace-joined") device by sending a PKeyAuth challenge, either as an
//! authentication-challenge header or as parameters of an OAuth redirect URI.
//! This crate:
//! - **Parses** both encodings into a validated [`ChallengeRequest`]
//! - **Decides** whether the device certificate satisfies the challenge
//! - **Builds** the [`ChallengeResponse`], signed with a proof token when it does
//!
//! Challenge input is untrusted. It stays opaque until it has been decoded and
//! validated, and private keys and proof tokens never appear in formatted
//! output or logs.
//!
//! # Core Types
//!
//! - [`ChallengeResponseBuilder`]: Entry point (`from_header`, `from_uri`, or
//!   `parse_header`/`parse_uri` followed by `respond`)
//! - [`ChallengeSettings`]: Registered device certificate provider and input limits
//! - [`DeviceCertificateProvider`] / [`DeviceCertificate`]: Secure-storage collaborator
//! - [`ProofSigner`]: Builds the signed proof token
//! - [`ChallengeError`]: Typed failure with a [`ChallengeErrorKind`]
//!
//! # Examples
//!
//! ```
//! use pkeyauth::{
//!     Certificate, ChallengeErrorKind, ChallengeResponseBuilder, ChallengeSettings, PrivateKey,
//!     ProofSigner, PublicKey, SignerError,
//! };
//!
//! struct NoopSigner;
//!
//! impl ProofSigner for NoopSigner {
//!     fn sign(
//!         &self,
//!         _nonce: &str,
//!         _submit_url: &str,
//!         _private_key: &PrivateKey,
//!         _public_key: Option<&PublicKey>,
//!         _certificate: Option<&Certificate>,
//!     ) -> Result<String, SignerError> {
//!         Ok(String::new())
//!     }
//! }
//!
//! let builder = ChallengeResponseBuilder::new(NoopSigner, ChallengeSettings::default());
//!
//! // Redirect challenges must name a submit URL and accepted authorities
//! let err = builder
//!     .from_uri("urn:http-auth:PKeyAuth?Nonce=n1&Version=1.0&Context=ctx")
//!     .unwrap_err();
//! assert_eq!(err.kind(), ChallengeErrorKind::InvalidRequest);
//! assert_eq!(err.message(), "SubmitUrl");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod builder;
mod codec;
mod device;
mod error;
mod field;
mod keys;
mod logging;
mod parser;
mod request;
mod response;
mod settings;
mod signer;
mod tainted;
mod validator;

#[cfg(test)]
mod test_utils;

pub use builder::ChallengeResponseBuilder;
pub use device::{DeviceCertificate, DeviceCertificateProvider, ProviderError};
pub use error::{ChallengeError, ChallengeErrorKind};
pub use field::{RequestField, AUTHORITY_DELIMITER, SCHEME};
pub use keys::{Certificate, PrivateKey, PublicKey};
pub use request::{CertificateSelector, ChallengeRequest};
pub use response::ChallengeResponse;
pub use settings::{ChallengeSettings, DEFAULT_MAX_CHALLENGE_LEN};
pub use signer::{ProofSigner, SignerError, SignerErrorKind};
pub use validator::ChallengeFormat;
