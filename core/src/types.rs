//! Emoji data model: raw dataset records, compact records and the
//! category index that ties them together.
//!
//! Raw records only live for the duration of a transform run. Compact records
//! and the [`CategoryIndex`] are what gets persisted and queried afterwards.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Skin-tone modifier, in canonical order.
///
/// The position of a variant in [`CompactEmoji::variants`] maps to the tone
/// at the same position in [`SkinTone::ALL`].
///
/// # Examples
///
/// ```
/// use emojiscript_core::SkinTone;
///
/// assert_eq!(SkinTone::ALL[0], SkinTone::Light);
/// assert_eq!(SkinTone::MediumDark.modifier(), "1F3FE");
/// assert_eq!(SkinTone::MediumDark.label(), "medium-dark");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkinTone {
    /// Fitzpatrick type 1-2.
    Light,
    /// Fitzpatrick type 3.
    MediumLight,
    /// Fitzpatrick type 4.
    Medium,
    /// Fitzpatrick type 5.
    MediumDark,
    /// Fitzpatrick type 6.
    Dark,
}

impl SkinTone {
    /// Fixed iteration order used when building variant lists.
    pub const ALL: [SkinTone; 5] = [
        SkinTone::Light,
        SkinTone::MediumLight,
        SkinTone::Medium,
        SkinTone::MediumDark,
        SkinTone::Dark,
    ];

    /// Codepoint token of the modifier as it appears in the raw dataset.
    pub fn modifier(self) -> &'static str {
        match self {
            SkinTone::Light => "1F3FB",
            SkinTone::MediumLight => "1F3FC",
            SkinTone::Medium => "1F3FD",
            SkinTone::MediumDark => "1F3FE",
            SkinTone::Dark => "1F3FF",
        }
    }

    /// Human-readable tone name.
    pub fn label(self) -> &'static str {
        match self {
            SkinTone::Light => "light",
            SkinTone::MediumLight => "medium-light",
            SkinTone::Medium => "medium",
            SkinTone::MediumDark => "medium-dark",
            SkinTone::Dark => "dark",
        }
    }

    /// Label for the variant stored at `position`.
    ///
    /// Positions past the canonical five get a synthetic `tone-{n}` label.
    ///
    /// ```
    /// use emojiscript_core::SkinTone;
    ///
    /// assert_eq!(SkinTone::label_at(1), "medium-light");
    /// assert_eq!(SkinTone::label_at(5), "tone-6");
    /// ```
    pub fn label_at(position: usize) -> String {
        match Self::ALL.get(position) {
            Some(tone) => tone.label().to_string(),
            None => format!("tone-{}", position + 1),
        }
    }
}

impl fmt::Display for SkinTone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One skin-tone variation of a raw record.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawSkinVariation {
    /// Full codepoint token of the toned emoji (e.g. `"1F44D-1F3FB"`).
    pub unified: String,
}

/// A record of the upstream emoji dataset.
///
/// Only the fields the transform needs are modeled; everything else in the
/// source document is ignored during deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawEmoji {
    /// Full descriptive name, upper-cased in the source (e.g. `"THUMBS UP SIGN"`).
    #[serde(default)]
    pub name: Option<String>,
    /// Base codepoint token.
    pub unified: String,
    /// Editorial category (e.g. `"Smileys & Emotion"`).
    pub category: String,
    /// Display order inside the category.
    pub sort_order: i64,
    /// Short aliases (e.g. `["+1", "thumbsup"]`).
    #[serde(default)]
    pub short_names: Vec<String>,
    /// Skin-tone variations keyed by modifier token.
    #[serde(default)]
    pub skin_variations: Option<BTreeMap<String, RawSkinVariation>>,
}

/// Compact, persisted emoji record.
///
/// Serialized with single-letter keys (`n`, `u`, `v`) to keep the data file
/// small. `v` is omitted entirely when the emoji has no skin tones.
///
/// # Examples
///
/// ```
/// use emojiscript_core::CompactEmoji;
///
/// let emoji = CompactEmoji::new(vec!["thumbs up sign".into(), "+1".into()], "1F44D");
/// assert_eq!(emoji.primary_name(), "thumbs up sign");
/// assert!(emoji.matches("thumbs"));
/// assert!(!emoji.has_variants());
///
/// let json = serde_json::to_string(&emoji).unwrap();
/// assert_eq!(json, r#"{"n":["thumbs up sign","+1"],"u":"1F44D"}"#);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompactEmoji {
    /// Searchable names; the first entry is the full name.
    #[serde(rename = "n")]
    pub names: Vec<String>,
    /// Base codepoint token.
    #[serde(rename = "u")]
    pub unified: String,
    /// Skin-tone variants in [`SkinTone::ALL`] order.
    #[serde(rename = "v", default, skip_serializing_if = "Option::is_none")]
    pub variants: Option<Vec<String>>,
}

impl CompactEmoji {
    /// Creates a record without skin-tone variants.
    pub fn new(names: Vec<String>, unified: impl Into<String>) -> Self {
        Self {
            names,
            unified: unified.into(),
            variants: None,
        }
    }

    /// Attaches skin-tone variants. An empty list clears them.
    pub fn with_variants(mut self, variants: Vec<String>) -> Self {
        self.variants = if variants.is_empty() {
            None
        } else {
            Some(variants)
        };
        self
    }

    /// The full name, or an empty string for a record without names.
    pub fn primary_name(&self) -> &str {
        self.names.first().map(String::as_str).unwrap_or_default()
    }

    /// Returns `true` if at least one skin-tone variant is stored.
    pub fn has_variants(&self) -> bool {
        self.variants.as_ref().is_some_and(|v| !v.is_empty())
    }

    /// Returns `true` if any name contains `term`, ignoring case.
    pub fn matches(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.names
            .iter()
            .any(|name| name.to_lowercase().contains(&term))
    }
}

/// A named group of emoji inside a [`CategoryIndex`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    /// Category name as found in the source dataset.
    pub name: String,
    /// Emoji in display order.
    pub emojis: Vec<CompactEmoji>,
}

/// Ordered mapping from category name to its emoji.
///
/// Category order is significant: it drives the scan order of name searches,
/// so it is preserved through serialization. The JSON form is a plain object
/// whose key order matches the stored order.
///
/// # Examples
///
/// ```
/// use emojiscript_core::{CategoryIndex, CompactEmoji};
///
/// let mut index = CategoryIndex::new();
/// index.push_category("Smileys & Emotion", vec![CompactEmoji::new(vec!["grinning face".into()], "1F600")]);
/// index.push_category("Animals & Nature", Vec::new());
///
/// assert_eq!(index.names().collect::<Vec<_>>(), vec!["Smileys & Emotion", "Animals & Nature"]);
/// assert_eq!(index.emoji_count(), 1);
/// assert!(index.get("Food & Drink").is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryIndex {
    categories: Vec<Category>,
}

impl CategoryIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends emoji to `name`, creating the category at the end of the
    /// index if it does not exist yet.
    pub fn push_category(&mut self, name: impl Into<String>, emojis: Vec<CompactEmoji>) {
        let name = name.into();
        match self.categories.iter_mut().find(|c| c.name == name) {
            Some(existing) => existing.emojis.extend(emojis),
            None => self.categories.push(Category { name, emojis }),
        }
    }

    /// Emoji of the category named `name`.
    pub fn get(&self, name: &str) -> Option<&[CompactEmoji]> {
        self.categories
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.emojis.as_slice())
    }

    /// Returns `true` if a category named `name` exists.
    pub fn contains(&self, name: &str) -> bool {
        self.categories.iter().any(|c| c.name == name)
    }

    /// Category names in stored order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|c| c.name.as_str())
    }

    /// Categories in stored order.
    pub fn iter(&self) -> std::slice::Iter<'_, Category> {
        self.categories.iter()
    }

    /// Number of categories.
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// Returns `true` if the index has no categories.
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Total number of emoji across all categories.
    pub fn emoji_count(&self) -> usize {
        self.categories.iter().map(|c| c.emojis.len()).sum()
    }
}

impl<'a> IntoIterator for &'a CategoryIndex {
    type Item = &'a Category;
    type IntoIter = std::slice::Iter<'a, Category>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Serialize for CategoryIndex {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.categories.len()))?;
        for category in &self.categories {
            map.serialize_entry(&category.name, &category.emojis)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for CategoryIndex {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct IndexVisitor;

        impl<'de> Visitor<'de> for IndexVisitor {
            type Value = CategoryIndex;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of category names to emoji lists")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut categories: Vec<Category> = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((name, emojis)) = access.next_entry::<String, Vec<CompactEmoji>>()? {
                    if categories.iter().any(|c| c.name == name) {
                        return Err(de::Error::custom(format!("duplicate category: {name}")));
                    }
                    categories.push(Category { name, emojis });
                }
                Ok(CategoryIndex { categories })
            }
        }

        deserializer.deserialize_map(IndexVisitor)
    }
}
