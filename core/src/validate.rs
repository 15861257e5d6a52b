//! Category index validation.
//!
//! Checks the structural invariants of a stored [`CategoryIndex`]: every
//! record has at least one name and no repeated names, variant lists are
//! non-empty and hold at most five tones, and every codepoint token decodes.
//! Indexes produced by [`build_index`](crate::build_index) always pass; the
//! checks exist for data files that were edited or generated elsewhere.
//!
//! # Examples
//!
//! ```
//! use emojiscript_core::*;
//!
//! let mut index = CategoryIndex::new();
//! index.push_category("Smileys & Emotion", vec![CompactEmoji::new(vec!["grinning face".into()], "1F600")]);
//! assert!(validate_index(&index).is_empty());
//!
//! // Invalid: record without names
//! index.push_category("Objects", vec![CompactEmoji::new(Vec::new(), "231A")]);
//! assert_eq!(validate_index(&index), vec![ValidationError::EmptyNames("231A".into())]);
//! ```

use std::collections::HashSet;

use thiserror::Error;

use crate::codec::{compose_skin_tone, unicode_to_char};
use crate::types::{CategoryIndex, CompactEmoji, SkinTone};

/// Index validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Category name is empty or whitespace-only.
    #[error("category name cannot be empty")]
    EmptyCategoryName,
    /// Record has no names.
    #[error("emoji {0} has no names")]
    EmptyNames(String),
    /// Record lists the same name twice.
    #[error("emoji {unified} repeats name {name:?}")]
    DuplicateName { unified: String, name: String },
    /// Variant list is present but empty.
    #[error("emoji {0} has an empty variant list")]
    EmptyVariants(String),
    /// More variants than there are skin tones.
    #[error("emoji {unified} has {count} variants, at most 5 allowed")]
    TooManyVariants { unified: String, count: usize },
    /// A base or composed variant token does not decode.
    #[error("emoji {unified} has undecodable codepoint {token}")]
    InvalidCodepoint { unified: String, token: String },
}

/// Validates every category and record of an index.
///
/// Collects all problems rather than stopping at the first one, in category
/// then record order.
pub fn validate_index(index: &CategoryIndex) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for category in index {
        if category.name.trim().is_empty() {
            errors.push(ValidationError::EmptyCategoryName);
        }
        for emoji in &category.emojis {
            errors.extend(validate_emoji(emoji));
        }
    }

    errors
}

/// Validates a single compact record.
pub fn validate_emoji(emoji: &CompactEmoji) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let unified = &emoji.unified;

    if emoji.names.is_empty() {
        errors.push(ValidationError::EmptyNames(unified.clone()));
    }

    let mut seen: HashSet<&str> = HashSet::new();
    for name in &emoji.names {
        if !seen.insert(name.as_str()) {
            errors.push(ValidationError::DuplicateName {
                unified: unified.clone(),
                name: name.clone(),
            });
        }
    }

    if unicode_to_char(unified).is_err() {
        errors.push(ValidationError::InvalidCodepoint {
            unified: unified.clone(),
            token: unified.clone(),
        });
    }

    if let Some(variants) = &emoji.variants {
        if variants.is_empty() {
            errors.push(ValidationError::EmptyVariants(unified.clone()));
        }
        if variants.len() > SkinTone::ALL.len() {
            errors.push(ValidationError::TooManyVariants {
                unified: unified.clone(),
                count: variants.len(),
            });
        }
        for variant in variants {
            let token = compose_skin_tone(unified, variant);
            if unicode_to_char(&token).is_err() {
                errors.push(ValidationError::InvalidCodepoint {
                    unified: unified.clone(),
                    token,
                });
            }
        }
    }

    errors
}
