//! Core emoji data model and transform primitives.
//!
//! This crate turns the upstream emoji dataset into a compact,
//! category-indexed structure and provides the codepoint codec used to render
//! it:
//!
//! - [`RawEmoji`]: one record of the upstream dataset.
//! - [`CompactEmoji`]: the persisted record: names, base codepoint and
//!   optional skin-tone variants.
//! - [`CategoryIndex`]: ordered mapping from category name to records.
//! - [`SkinTone`]: the five skin-tone modifiers in canonical order.
//!
//! [`build_index`] performs the transform, [`validate_index`] checks stored
//! data against the index invariants, and [`unicode_to_char`] /
//! [`compose_skin_tone`] render codepoint tokens.
//!
//! # Example
//!
//! ```
//! use emojiscript_core::*;
//!
//! let raw: Vec<RawEmoji> = serde_json::from_str(r#"[
//!     {"name": "THUMBS UP SIGN", "unified": "1F44D", "category": "People & Body",
//!      "sort_order": 1, "short_names": ["+1", "thumbsup"],
//!      "skin_variations": {"1F3FB": {"unified": "1F44D-1F3FB"}}}
//! ]"#).unwrap();
//!
//! let index = build_index(&raw);
//! let thumbs = &index.get("People & Body").unwrap()[0];
//! assert_eq!(thumbs.names, vec!["thumbs up sign", "+1", "thumbsup"]);
//! assert_eq!(thumbs.variants.as_deref().unwrap(), ["1F3FB"]);
//!
//! let toned = compose_skin_tone(&thumbs.unified, &thumbs.variants.as_ref().unwrap()[0]);
//! assert_eq!(unicode_to_char(&toned).unwrap(), "\u{1F44D}\u{1F3FB}");
//! assert!(validate_index(&index).is_empty());
//! ```

mod codec;
mod transform;
mod types;
mod validate;

pub use codec::{CodecError, compose_skin_tone, strip_skin_tone, unicode_to_char};
pub use transform::{build_index, build_index_from_values, compact_emoji, normalize_name};
pub use types::*;
pub use validate::{ValidationError, validate_emoji, validate_index};
