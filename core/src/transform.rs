//! Raw dataset to [`CategoryIndex`] transform.
//!
//! The transform is a single pass: each usable raw record is compacted,
//! grouped under its category (categories keep first-seen order), then every
//! group is stably sorted by the source `sort_order`, which is dropped from
//! the output.

use std::collections::HashMap;

use serde::Deserialize;
use tracing::debug;

use crate::codec::strip_skin_tone;
use crate::types::{CategoryIndex, CompactEmoji, RawEmoji, SkinTone};

/// Normalizes a short name for storage: lower-cased, underscores turned
/// into spaces.
///
/// ```
/// use emojiscript_core::normalize_name;
///
/// assert_eq!(normalize_name("Smiling_Face_With_Heart_Eyes"), "smiling face with heart eyes");
/// assert_eq!(normalize_name("flag-ac"), "flag-ac");
/// ```
pub fn normalize_name(name: &str) -> String {
    name.to_lowercase().replace('_', " ")
}

/// Compacts one raw record.
///
/// Returns `None` for records without short names. The name list starts with
/// the lower-cased full name (falling back to the first short name when the
/// record has none), followed by the normalized short names with duplicates
/// removed.
///
/// # Examples
///
/// ```
/// use emojiscript_core::{RawEmoji, compact_emoji};
///
/// let raw: RawEmoji = serde_json::from_str(r#"{
///     "name": "SMILING FACE WITH OPEN MOUTH",
///     "unified": "1F603",
///     "category": "Smileys & Emotion",
///     "sort_order": 3,
///     "short_names": ["smiley", "Smiling_Face_With_Open_Mouth"]
/// }"#).unwrap();
///
/// let compact = compact_emoji(&raw).unwrap();
/// assert_eq!(compact.names, vec!["smiling face with open mouth", "smiley"]);
/// assert_eq!(compact.unified, "1F603");
/// ```
pub fn compact_emoji(raw: &RawEmoji) -> Option<CompactEmoji> {
    let first_short = raw.short_names.first()?;

    let primary = raw
        .name
        .as_deref()
        .filter(|n| !n.trim().is_empty())
        .map(str::to_lowercase)
        .unwrap_or_else(|| normalize_name(first_short));

    let mut names = vec![primary];
    for short_name in &raw.short_names {
        let normalized = normalize_name(short_name);
        if !normalized.is_empty() && !names.contains(&normalized) {
            names.push(normalized);
        }
    }

    let variants = raw
        .skin_variations
        .as_ref()
        .map(|variations| {
            SkinTone::ALL
                .iter()
                .filter_map(|tone| variations.get(tone.modifier()))
                .map(|variation| strip_skin_tone(&raw.unified, &variation.unified))
                .collect::<Vec<_>>()
        })
        .unwrap_or_default();

    Some(CompactEmoji::new(names, raw.unified.clone()).with_variants(variants))
}

/// Builds a category index from raw records.
///
/// Records without short names are skipped. Within a category, records are
/// ordered by ascending `sort_order`; records with equal `sort_order` keep
/// their input order.
pub fn build_index<'a, I>(records: I) -> CategoryIndex
where
    I: IntoIterator<Item = &'a RawEmoji>,
{
    let mut order: Vec<String> = Vec::new();
    let mut groups: HashMap<String, Vec<(i64, CompactEmoji)>> = HashMap::new();

    for raw in records {
        let Some(compact) = compact_emoji(raw) else {
            debug!(unified = %raw.unified, "skipping emoji without short names");
            continue;
        };
        let group = groups.entry(raw.category.clone()).or_insert_with(|| {
            order.push(raw.category.clone());
            Vec::new()
        });
        group.push((raw.sort_order, compact));
    }

    let mut index = CategoryIndex::new();
    for category in order {
        let mut group = groups.remove(&category).unwrap_or_default();
        group.sort_by_key(|(sort_order, _)| *sort_order);
        index.push_category(category, group.into_iter().map(|(_, emoji)| emoji).collect());
    }
    index
}

/// Builds a category index from untyped JSON records.
///
/// Elements that do not deserialize as a [`RawEmoji`] (missing or mistyped
/// required fields) are skipped. Returns the index together with the number
/// of skipped elements, including those without short names.
pub fn build_index_from_values(values: &[serde_json::Value]) -> (CategoryIndex, usize) {
    let mut records = Vec::with_capacity(values.len());
    let mut malformed = 0usize;

    for (position, value) in values.iter().enumerate() {
        match RawEmoji::deserialize(value) {
            Ok(raw) => records.push(raw),
            Err(err) => {
                debug!(position, error = %err, "skipping malformed emoji record");
                malformed += 1;
            }
        }
    }

    let index = build_index(&records);
    let skipped = malformed + (records.len() - index.emoji_count());
    (index, skipped)
}
