//! Decoding of the attribute list that follows the scheme token in a
//! challenge header.
//!
//! The list is a comma-separated sequence of `key=value` tokens, where values
//! are usually quoted and may contain `,` or `=` inside the quotes. Each part
//! is URL-form decoded, trimmed, and the value loses one layer of quotes.

use percent_encoding::percent_decode_str;

use crate::error::{ChallengeError, ChallengeErrorKind};
use crate::field::FieldMap;

const QUOTE: char = '"';

/// Decodes a header attribute list into a [`FieldMap`].
///
/// A token holding a bare key decodes to that key with an empty value.
///
/// # Errors
///
/// - `InvalidRequest` when a token has a blank side around `=` or more than
///   one unquoted `=`.
/// - `UnsupportedEncoding` when a part is not valid URL-form encoding.
pub(crate) fn decode_fields(fragment: &str) -> Result<FieldMap, ChallengeError> {
    let mut fields = FieldMap::new();

    for token in split_with_quotes(fragment, ',') {
        if token.trim().is_empty() {
            continue;
        }

        let parts = split_with_quotes(token, '=');
        match parts.as_slice() {
            [key, value] if !key.trim().is_empty() && !value.trim().is_empty() => {
                let key = form_decode(key)?.trim().to_string();
                let value = form_decode(value)?;
                fields.insert(key, strip_quotes(value.trim()).to_string());
            }
            [key] => {
                fields.insert(form_decode(key)?.trim().to_string(), String::new());
            }
            _ => {
                return Err(ChallengeError::invalid_request(format!(
                    "malformed challenge token: {}",
                    token.trim()
                )));
            }
        }
    }

    Ok(fields)
}

/// Splits `input` on `delimiter`, ignoring delimiters between double quotes.
///
/// Every piece is returned, including empty ones; an unterminated quote runs
/// to the end of the input.
pub(crate) fn split_with_quotes(input: &str, delimiter: char) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut start = 0;
    let mut quoted = false;

    for (idx, c) in input.char_indices() {
        if c == QUOTE {
            quoted = !quoted;
        } else if c == delimiter && !quoted {
            pieces.push(&input[start..idx]);
            start = idx + c.len_utf8();
        }
    }
    pieces.push(&input[start..]);

    pieces
}

/// Decodes `application/x-www-form-urlencoded` text: `+` is a space and
/// `%XX` escapes are UTF-8 bytes.
///
/// # Errors
///
/// `UnsupportedEncoding` for a `%` not followed by two hex digits, or for
/// escapes that do not form valid UTF-8.
pub(crate) fn form_decode(input: &str) -> Result<String, ChallengeError> {
    let bytes = input.as_bytes();
    for (idx, _) in input.match_indices('%') {
        let escape = bytes.get(idx + 1..idx + 3);
        if !escape.is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit)) {
            return Err(ChallengeError::new(
                ChallengeErrorKind::UnsupportedEncoding,
                "incomplete percent escape in challenge",
            ));
        }
    }

    let spaced = input.replace('+', " ");
    percent_decode_str(&spaced)
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .map_err(|_| {
            ChallengeError::new(
                ChallengeErrorKind::UnsupportedEncoding,
                "challenge value is not valid UTF-8",
            )
        })
}

/// Removes one pair of enclosing double quotes, if present.
pub(crate) fn strip_quotes(value: &str) -> &str {
    value
        .strip_prefix(QUOTE)
        .and_then(|rest| rest.strip_suffix(QUOTE))
        .unwrap_or(value)
}
