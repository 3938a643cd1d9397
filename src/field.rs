//! Field names of the PKeyAuth challenge and the decoded field map.

use std::collections::HashMap;
use std::fmt;

/// Authentication scheme token opening a challenge header and every response header.
pub const SCHEME: &str = "PKeyAuth";

/// Separator between distinguished names in `CertAuthorities`.
pub const AUTHORITY_DELIMITER: char = ';';

/// A named field of a PKeyAuth challenge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestField {
    /// Server anti-replay value.
    Nonce,
    /// Accepted certificate issuers.
    CertAuthorities,
    /// Protocol version.
    Version,
    /// Endpoint the response is submitted to.
    SubmitUrl,
    /// Opaque server state.
    Context,
    /// Accepted certificate thumbprint.
    CertThumbprint,
}

/// Keys accepted for each field, in lookup order.
///
/// Servers are inconsistent about the case of `Nonce`; the all-lowercase
/// spelling is the only alternative accepted for any field.
const FIELD_KEYS: &[(RequestField, &[&str])] = &[
    (RequestField::Nonce, &["Nonce", "nonce"]),
    (RequestField::CertAuthorities, &["CertAuthorities"]),
    (RequestField::Version, &["Version"]),
    (RequestField::SubmitUrl, &["SubmitUrl"]),
    (RequestField::Context, &["Context"]),
    (RequestField::CertThumbprint, &["CertThumbprint"]),
];

impl RequestField {
    /// Returns the canonical wire name of the field.
    pub fn name(self) -> &'static str {
        self.accepted_keys()[0]
    }

    /// Returns every key accepted for this field, canonical name first.
    pub fn accepted_keys(self) -> &'static [&'static str] {
        FIELD_KEYS
            .iter()
            .find(|(field, _)| *field == self)
            .map(|(_, keys)| *keys)
            .unwrap_or(&[])
    }
}

impl fmt::Display for RequestField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Decoded challenge fields keyed by their wire name.
///
/// Keys are stored exactly as received. Lookups go through [`RequestField`]
/// so the accepted case variants are applied in one place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct FieldMap {
    entries: HashMap<String, String>,
}

impl FieldMap {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Inserts a decoded pair. A repeated key replaces the earlier value.
    pub(crate) fn insert(&mut self, key: String, value: String) {
        self.entries.insert(key, value);
    }

    /// Returns `true` if any accepted key of `field` is present, whatever its value.
    pub(crate) fn contains(&self, field: RequestField) -> bool {
        field
            .accepted_keys()
            .iter()
            .any(|key| self.entries.contains_key(*key))
    }

    /// Returns the first non-blank value among the accepted keys of `field`.
    ///
    /// Falls back to a present blank value, then to `None` when no key is present.
    pub(crate) fn get(&self, field: RequestField) -> Option<&str> {
        let mut present = field
            .accepted_keys()
            .iter()
            .filter_map(|key| self.entries.get(*key).map(String::as_str));

        let first = present.next()?;
        if !first.trim().is_empty() {
            return Some(first);
        }
        Some(
            present
                .find(|value| !value.trim().is_empty())
                .unwrap_or(first),
        )
    }

    /// Returns the field value, or an empty string when absent.
    pub(crate) fn get_or_empty(&self, field: RequestField) -> String {
        self.get(field).unwrap_or_default().to_string()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub(crate) fn raw(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FieldMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (key, value) in iter {
            map.insert(key.into(), value.into());
        }
        map
    }
}

/// Splits a `CertAuthorities` value into distinguished names, dropping blank entries.
pub(crate) fn split_authorities(value: &str) -> Vec<String> {
    value
        .split(AUTHORITY_DELIMITER)
        .filter(|dn| !dn.trim().is_empty())
        .map(str::to_string)
        .collect()
}
