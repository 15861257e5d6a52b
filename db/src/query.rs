//! Accessor API over a loaded [`EmojiDatabase`].
//!
//! All queries are reads. Searches scan categories in stored order and
//! records in stored order, so the first match is deterministic.
//!
//! Misses (no matching name, unknown category, no such tone) are `None` or
//! empty results. Only a stored codepoint token that fails to decode is an
//! error.

use emojiscript_core::{CompactEmoji, SkinTone, compose_skin_tone, unicode_to_char};
use rand::Rng;
use rand::seq::SliceRandom;

use crate::error::Result;
use crate::loader::EmojiDatabase;

/// A search hit together with the category it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmojiMatch<'a> {
    pub emoji: &'a CompactEmoji,
    pub category: &'a str,
}

/// A rendered skin-tone variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToneRendering {
    /// Tone name (`light` … `dark`, or `tone-{n}` past the fifth variant).
    pub tone: String,
    /// Rendered characters.
    pub emoji: String,
}

impl EmojiDatabase {
    /// Returns the first emoji with a name containing `term`, ignoring case.
    ///
    /// # Examples
    ///
    /// ```
    /// use emojiscript_core::{CategoryIndex, CompactEmoji};
    /// use emojiscript_db::EmojiDatabase;
    ///
    /// let mut index = CategoryIndex::new();
    /// index.push_category("People & Body", vec![
    ///     CompactEmoji::new(vec!["thumbs up sign".into(), "+1".into()], "1F44D"),
    /// ]);
    /// let db = EmojiDatabase::new(index);
    ///
    /// assert_eq!(db.find_first_by_name("Thumbs Up").unwrap().unified, "1F44D");
    /// assert!(db.find_first_by_name("rocket").is_none());
    /// ```
    pub fn find_first_by_name(&self, term: &str) -> Option<&CompactEmoji> {
        let term = term.to_lowercase();
        self.index
            .iter()
            .flat_map(|category| category.emojis.iter())
            .find(|emoji| emoji.matches(&term))
    }

    /// Returns every emoji with a name containing `term`, ignoring case,
    /// annotated with its category.
    pub fn find_all_by_name(&self, term: &str) -> Vec<EmojiMatch<'_>> {
        let term = term.to_lowercase();
        self.index
            .iter()
            .flat_map(|category| {
                category.emojis.iter().map(move |emoji| EmojiMatch {
                    emoji,
                    category: category.name.as_str(),
                })
            })
            .filter(|hit| hit.emoji.matches(&term))
            .collect()
    }

    /// Emoji of `category` in display order; empty for an unknown category.
    pub fn list_by_category(&self, category: &str) -> &[CompactEmoji] {
        if !self.index.contains(category) {
            return &[];
        }
        self.index.get(category).unwrap_or_default()
    }

    /// Category names in stored order.
    pub fn list_categories(&self) -> Vec<&str> {
        self.index.names().collect()
    }

    /// Picks a random emoji using the thread-local generator.
    ///
    /// See [`pick_random_with`](Self::pick_random_with) for the distribution.
    pub fn pick_random(&self) -> Option<&CompactEmoji> {
        self.pick_random_with(&mut rand::thread_rng())
    }

    /// Picks a random emoji: first a category uniformly, then a record within
    /// it uniformly.
    ///
    /// Every category is equally likely regardless of size, so emoji in small
    /// categories come up more often than emoji in large ones. Empty
    /// categories are never selected; returns `None` only when the index
    /// holds no emoji at all.
    pub fn pick_random_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&CompactEmoji> {
        let populated: Vec<_> = self.index.iter().filter(|c| !c.emojis.is_empty()).collect();
        let category = populated.choose(rng)?;
        category.emojis.choose(rng)
    }

    /// Total number of emoji across all categories.
    pub fn total_count(&self) -> usize {
        self.index.emoji_count()
    }

    /// Renders a codepoint token.
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError::Codec`](crate::DatabaseError::Codec) if the
    /// token does not decode.
    pub fn render(&self, token: &str) -> Result<String> {
        Ok(unicode_to_char(token)?)
    }

    /// Renders the variant of `emoji` at `tone_index`.
    ///
    /// Returns `Ok(None)` if the emoji has no variants or the index is out of
    /// range.
    ///
    /// # Examples
    ///
    /// ```
    /// use emojiscript_core::CompactEmoji;
    /// use emojiscript_db::EmojiDatabase;
    ///
    /// let db = EmojiDatabase::new(Default::default());
    /// let wave = CompactEmoji::new(vec!["wave".into()], "1F44B")
    ///     .with_variants(vec!["1F3FB".into(), "1F3FC".into()]);
    ///
    /// assert_eq!(db.render_skin_tone(&wave, 1).unwrap().unwrap(), "\u{1F44B}\u{1F3FC}");
    /// assert_eq!(db.render_skin_tone(&wave, 2).unwrap(), None);
    /// ```
    pub fn render_skin_tone(&self, emoji: &CompactEmoji, tone_index: usize) -> Result<Option<String>> {
        let Some(variant) = emoji.variants.as_ref().and_then(|v| v.get(tone_index)) else {
            return Ok(None);
        };
        let token = compose_skin_tone(&emoji.unified, variant);
        Ok(Some(unicode_to_char(&token)?))
    }

    /// Renders every variant of `emoji`, labeled with its tone name.
    ///
    /// Returns `Ok(None)` if the emoji has no variants.
    pub fn render_all_skin_tones(&self, emoji: &CompactEmoji) -> Result<Option<Vec<ToneRendering>>> {
        let Some(variants) = emoji.variants.as_ref().filter(|v| !v.is_empty()) else {
            return Ok(None);
        };

        let renderings = variants
            .iter()
            .enumerate()
            .map(|(position, variant)| -> Result<ToneRendering> {
                let token = compose_skin_tone(&emoji.unified, variant);
                Ok(ToneRendering {
                    tone: SkinTone::label_at(position),
                    emoji: unicode_to_char(&token)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Some(renderings))
    }
}

#[cfg(test)]
mod tests {
    use emojiscript_core::CategoryIndex;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::DatabaseError;

    fn emoji(names: &[&str], unified: &str) -> CompactEmoji {
        CompactEmoji::new(names.iter().map(|n| n.to_string()).collect(), unified)
    }

    fn fixture() -> EmojiDatabase {
        let mut index = CategoryIndex::new();
        index.push_category(
            "Smileys & Emotion",
            vec![
                emoji(&["grinning face", "grinning"], "1F600"),
                emoji(&["smiling face with open mouth", "smiley"], "1F603"),
                emoji(&["smiling face with smiling eyes", "blush"], "1F60A"),
            ],
        );
        index.push_category(
            "People & Body",
            vec![
                emoji(&["thumbs up sign", "+1", "thumbsup"], "1F44D").with_variants(
                    SkinTone::ALL.iter().map(|t| t.modifier().to_string()).collect(),
                ),
                emoji(&["smiling person", "person smiling"], "1F9D1"),
            ],
        );
        index.push_category("Flags", vec![emoji(&["chequered flag"], "1F3C1")]);
        EmojiDatabase::new(index)
    }

    #[test]
    fn test_find_first_respects_category_order() {
        let db = fixture();
        assert_eq!(db.find_first_by_name("smiling").unwrap().unified, "1F603");
        assert_eq!(db.find_first_by_name("THUMBSUP").unwrap().unified, "1F44D");
        assert!(db.find_first_by_name("rocket").is_none());
    }

    #[test]
    fn test_find_all_annotates_category() {
        let db = fixture();
        let hits: Vec<(&str, &str)> = db
            .find_all_by_name("smiling")
            .iter()
            .map(|hit| (hit.emoji.unified.as_str(), hit.category))
            .collect();
        assert_eq!(
            hits,
            vec![
                ("1F603", "Smileys & Emotion"),
                ("1F60A", "Smileys & Emotion"),
                ("1F9D1", "People & Body"),
            ]
        );
    }

    #[test]
    fn test_list_by_category_unknown_is_empty() {
        let db = fixture();
        assert_eq!(db.list_by_category("Smileys & Emotion").len(), 3);
        assert!(db.list_by_category("NonexistentCategory").is_empty());
        assert!(db.list_by_category("smileys & emotion").is_empty());
    }

    #[test]
    fn test_total_count_matches_categories() {
        let db = fixture();
        let summed: usize = db
            .list_categories()
            .iter()
            .map(|c| db.list_by_category(c).len())
            .sum();
        assert_eq!(db.total_count(), summed);
        assert_eq!(db.total_count(), 6);
    }

    #[test]
    fn test_pick_random_is_category_uniform() {
        let db = fixture();
        let mut rng = StdRng::seed_from_u64(7);
        let mut flags = 0;
        let draws = 3000;
        for _ in 0..draws {
            let picked = db.pick_random_with(&mut rng).unwrap();
            if picked.unified == "1F3C1" {
                flags += 1;
            }
        }
        // single-emoji category is picked about a third of the time
        assert!((800..1200).contains(&flags), "flags picked {flags} times");
    }

    #[test]
    fn test_pick_random_empty_index() {
        let db = EmojiDatabase::new(CategoryIndex::new());
        assert!(db.pick_random().is_none());
    }

    #[test]
    fn test_pick_random_skips_empty_categories() {
        let mut index = CategoryIndex::new();
        index.push_category("Symbols", Vec::new());
        index.push_category("Flags", vec![emoji(&["chequered flag"], "1F3C1")]);
        let db = EmojiDatabase::new(index);
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..20 {
            assert_eq!(db.pick_random_with(&mut rng).unwrap().unified, "1F3C1");
        }
    }

    #[test]
    fn test_render() {
        let db = fixture();
        assert_eq!(db.render("1F44D").unwrap(), "👍");
        assert!(matches!(db.render("XYZ"), Err(DatabaseError::Codec(_))));
    }

    #[test]
    fn test_render_skin_tone_bounds() {
        let db = fixture();
        let thumbs = db.find_first_by_name("thumbs up").unwrap();
        assert_eq!(db.render_skin_tone(thumbs, 0).unwrap().unwrap(), "👍🏻");
        assert_eq!(db.render_skin_tone(thumbs, 4).unwrap().unwrap(), "👍🏿");
        assert_eq!(db.render_skin_tone(thumbs, 5).unwrap(), None);

        let grinning = db.find_first_by_name("grinning").unwrap();
        assert_eq!(db.render_skin_tone(grinning, 0).unwrap(), None);
    }

    #[test]
    fn test_render_skin_tone_legacy_formats() {
        let db = fixture();
        let legacy = emoji(&["ok hand sign"], "1F44C")
            .with_variants(vec!["u-1F3FB".into(), "1F44C-1F3FC".into()]);
        assert_eq!(db.render_skin_tone(&legacy, 0).unwrap().unwrap(), "👌🏻");
        assert_eq!(db.render_skin_tone(&legacy, 1).unwrap().unwrap(), "👌🏼");
    }

    #[test]
    fn test_render_skin_tone_corrupt_variant() {
        let db = fixture();
        let corrupt = emoji(&["wave"], "1F44B").with_variants(vec!["NOPE".into()]);
        assert!(matches!(
            db.render_skin_tone(&corrupt, 0),
            Err(DatabaseError::Codec(_))
        ));
    }

    #[test]
    fn test_render_all_skin_tones_labels() {
        let db = fixture();
        let thumbs = db.find_first_by_name("+1").unwrap();
        let tones = db.render_all_skin_tones(thumbs).unwrap().unwrap();
        let labels: Vec<&str> = tones.iter().map(|t| t.tone.as_str()).collect();
        assert_eq!(labels, ["light", "medium-light", "medium", "medium-dark", "dark"]);
        assert_eq!(tones[2].emoji, "👍🏽");

        let two = emoji(&["wave"], "1F44B").with_variants(vec!["1F3FB".into(), "1F3FC".into()]);
        let tones = db.render_all_skin_tones(&two).unwrap().unwrap();
        let labels: Vec<&str> = tones.iter().map(|t| t.tone.as_str()).collect();
        assert_eq!(labels, ["light", "medium-light"]);

        let plain = emoji(&["chequered flag"], "1F3C1");
        assert_eq!(db.render_all_skin_tones(&plain).unwrap(), None);
    }

    #[test]
    fn test_render_all_skin_tones_synthetic_labels() {
        let db = fixture();
        let many = emoji(&["wave"], "1F44B").with_variants(vec!["1F3FB".into(); 7]);
        let tones = db.render_all_skin_tones(&many).unwrap().unwrap();
        assert_eq!(tones[5].tone, "tone-6");
        assert_eq!(tones[6].tone, "tone-7");
    }
}
