use crate::error::ChallengeError;
use crate::field::{FieldMap, RequestField};

/// Wire encoding a challenge arrived in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChallengeFormat {
    /// `WWW-Authenticate: PKeyAuth ...` header; the submit URL is the
    /// endpoint that returned the challenge.
    Header,
    /// Redirect URI carrying the challenge as parameters.
    RedirectUri,
}

impl ChallengeFormat {
    /// Fields that must be present, in the order they are checked.
    fn required_fields(self) -> &'static [RequestField] {
        match self {
            Self::Header => &[
                RequestField::Nonce,
                RequestField::Version,
                RequestField::Context,
            ],
            Self::RedirectUri => &[
                RequestField::Nonce,
                RequestField::Version,
                RequestField::SubmitUrl,
                RequestField::Context,
                RequestField::CertAuthorities,
            ],
        }
    }
}

/// Challenge fields that passed [`validate`].
///
/// There is no other constructor, so parser code holding a
/// `ValidatedFields` knows every required key is present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ValidatedFields {
    fields: FieldMap,
}

impl ValidatedFields {
    pub(crate) fn fields(&self) -> &FieldMap {
        &self.fields
    }
}

/// Checks that every field required by `format` is present.
///
/// Only key presence is checked. A present but empty value passes and
/// surfaces later as a blank field.
///
/// # Errors
///
/// `InvalidRequest` whose message is the name of the first missing field.
pub(crate) fn validate(
    fields: FieldMap,
    format: ChallengeFormat,
) -> Result<ValidatedFields, ChallengeError> {
    if let Some(missing) = format
        .required_fields()
        .iter()
        .find(|field| !fields.contains(**field))
    {
        return Err(ChallengeError::invalid_request(missing.name()));
    }

    Ok(ValidatedFields { fields })
}
