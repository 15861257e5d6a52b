//! Codepoint token decoding and skin-tone variant composition.
//!
//! A codepoint token is one or more hexadecimal Unicode scalar values joined
//! with `-`, e.g. `"1F44D"` or `"1F469-200D-1F4BB"`.
//!
//! Skin-tone variants are stored as the bare modifier token whenever the
//! toned sequence is simply `base-modifier`; sequences where the modifier
//! sits elsewhere (ZWJ sequences, presentation selectors) keep their full
//! token. [`strip_skin_tone`] and [`compose_skin_tone`] are inverses of each
//! other under that rule.
//!
//! # Examples
//!
//! ```
//! use emojiscript_core::{compose_skin_tone, strip_skin_tone, unicode_to_char};
//!
//! assert_eq!(unicode_to_char("1F44D").unwrap(), "\u{1F44D}");
//!
//! let stored = strip_skin_tone("1F44D", "1F44D-1F3FB");
//! assert_eq!(stored, "1F3FB");
//! assert_eq!(compose_skin_tone("1F44D", &stored), "1F44D-1F3FB");
//! ```

use thiserror::Error;

/// Legacy marker some generated data files put in front of modifier tokens.
const LEGACY_MARKER: &str = "u-";

/// Failure to decode a codepoint token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// The token, or one of its `-` separated segments, is empty.
    #[error("empty codepoint token")]
    EmptyToken,
    /// A segment is not valid hexadecimal.
    #[error("invalid hexadecimal codepoint: {0:?}")]
    InvalidHex(String),
    /// A segment parses but is not a Unicode scalar value.
    #[error("not a unicode scalar value: U+{0:X}")]
    InvalidScalar(u32),
}

/// Decodes a codepoint token into the characters it names.
///
/// # Errors
///
/// Returns [`CodecError`] if any segment is empty, not hexadecimal, or not a
/// valid Unicode scalar value (surrogates, values above `U+10FFFF`).
///
/// # Examples
///
/// ```
/// use emojiscript_core::{CodecError, unicode_to_char};
///
/// assert_eq!(unicode_to_char("1F600").unwrap(), "\u{1F600}");
/// assert_eq!(unicode_to_char("0031-FE0F-20E3").unwrap(), "1\u{FE0F}\u{20E3}");
/// assert!(matches!(unicode_to_char("1F6XX"), Err(CodecError::InvalidHex(_))));
/// ```
pub fn unicode_to_char(token: &str) -> Result<String, CodecError> {
    if token.is_empty() {
        return Err(CodecError::EmptyToken);
    }

    token
        .split('-')
        .map(|segment| {
            if segment.is_empty() {
                return Err(CodecError::EmptyToken);
            }
            // from_str_radix alone would accept a leading sign
            if !segment.bytes().all(|b| b.is_ascii_hexdigit()) {
                return Err(CodecError::InvalidHex(segment.to_string()));
            }
            let value = u32::from_str_radix(segment, 16)
                .map_err(|_| CodecError::InvalidHex(segment.to_string()))?;
            char::from_u32(value).ok_or(CodecError::InvalidScalar(value))
        })
        .collect()
}

/// Builds the full codepoint token for a stored skin-tone variant.
///
/// A leading `u-` marker is dropped. A variant that already holds a full
/// multi-codepoint token is returned unchanged; a bare modifier is appended
/// to `base`.
///
/// # Examples
///
/// ```
/// use emojiscript_core::compose_skin_tone;
///
/// assert_eq!(compose_skin_tone("1F44B", "1F3FD"), "1F44B-1F3FD");
/// assert_eq!(compose_skin_tone("1F44B", "u-1F3FD"), "1F44B-1F3FD");
/// assert_eq!(
///     compose_skin_tone("1F469-200D-1F4BB", "1F469-1F3FB-200D-1F4BB"),
///     "1F469-1F3FB-200D-1F4BB"
/// );
/// ```
pub fn compose_skin_tone(base: &str, variant: &str) -> String {
    let variant = variant.strip_prefix(LEGACY_MARKER).unwrap_or(variant);
    if variant.contains('-') {
        variant.to_string()
    } else {
        format!("{base}-{variant}")
    }
}

/// Reduces a toned codepoint token to its stored form.
///
/// Returns just the modifier when `full` is exactly `base` followed by one
/// more codepoint, and the full token otherwise.
pub fn strip_skin_tone(base: &str, full: &str) -> String {
    match full
        .strip_prefix(base)
        .and_then(|rest| rest.strip_prefix('-'))
    {
        Some(suffix) if !suffix.is_empty() && !suffix.contains('-') => suffix.to_string(),
        _ => full.to_string(),
    }
}
