//! Emoji database loading with builder pattern and fallback chains.
//!
//! Provides [`EmojiDatabase`], the read-only handle the accessor API runs on,
//! and [`DatabaseBuilder`] for loading from the first available of several
//! sources.
//!
//! # Loading patterns
//!
//! ```no_run
//! use emojiscript_db::EmojiDatabase;
//!
//! // Load the compact index written by `clean`
//! let db = EmojiDatabase::from_file("EmojiData.json").unwrap();
//!
//! // Transform the upstream dataset in memory
//! let db = EmojiDatabase::from_raw("RawEmojiData.json").unwrap();
//!
//! // Prefer the compact file, fall back to the raw dataset
//! let db = EmojiDatabase::builder()
//!     .from_file("EmojiData.json")
//!     .from_raw("RawEmojiData.json")
//!     .build()
//!     .unwrap();
//! ```

use std::path::{Path, PathBuf};

use emojiscript_core::{CategoryIndex, build_index_from_values};
use tracing::{debug, info};

use crate::error::{DatabaseError, Result};
use crate::pipeline::read_raw_records;

/// Describes where an [`EmojiDatabase`] was loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseSource {
    /// Built directly from an in-memory index.
    Memory,
    /// Loaded from a compact category index JSON file.
    Compact(PathBuf),
    /// Transformed from an upstream raw dataset file.
    Raw(PathBuf),
    /// Loaded via a fallback chain of multiple sources.
    Multiple(Vec<DatabaseSource>),
}

/// Read-only emoji collection with the accessor API.
///
/// The index is injected at construction and never mutated afterwards, so
/// tests can run every query against small fixture indexes.
///
/// # Examples
///
/// ```
/// use emojiscript_core::{CategoryIndex, CompactEmoji};
/// use emojiscript_db::EmojiDatabase;
///
/// let mut index = CategoryIndex::new();
/// index.push_category("Smileys & Emotion", vec![CompactEmoji::new(vec!["grinning face".into()], "1F600")]);
///
/// let db = EmojiDatabase::new(index);
/// assert_eq!(db.total_count(), 1);
/// assert_eq!(db.list_categories(), vec!["Smileys & Emotion"]);
/// ```
#[derive(Debug, Clone)]
pub struct EmojiDatabase {
    pub(crate) index: CategoryIndex,
    source: DatabaseSource,
}

impl EmojiDatabase {
    /// Wraps an already-built index.
    pub fn new(index: CategoryIndex) -> Self {
        Self {
            index,
            source: DatabaseSource::Memory,
        }
    }

    /// Returns a new [`DatabaseBuilder`] for configuring a fallback chain.
    pub fn builder() -> DatabaseBuilder {
        DatabaseBuilder::new()
    }

    /// Loads a compact category index file.
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError::IoError`] if the file cannot be read, or
    /// [`DatabaseError::JsonError`] if it is not a valid index.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        let index: CategoryIndex = serde_json::from_reader(reader)?;

        debug!(
            path = %path.display(),
            categories = index.len(),
            emojis = index.emoji_count(),
            "loaded compact emoji index"
        );

        Ok(Self {
            index,
            source: DatabaseSource::Compact(path.to_path_buf()),
        })
    }

    /// Loads the upstream dataset and transforms it in memory.
    ///
    /// Malformed records are skipped the same way `clean` skips them.
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError::IoError`] if the file cannot be read,
    /// [`DatabaseError::JsonError`] if it is not JSON, or
    /// [`DatabaseError::NotAnArray`] if the document is not an array.
    pub fn from_raw(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let values = read_raw_records(path)?;
        let (index, skipped) = build_index_from_values(&values);

        info!(
            path = %path.display(),
            emojis = index.emoji_count(),
            skipped,
            "transformed raw emoji data"
        );

        Ok(Self {
            index,
            source: DatabaseSource::Raw(path.to_path_buf()),
        })
    }

    /// The underlying category index.
    pub fn index(&self) -> &CategoryIndex {
        &self.index
    }

    /// Returns a reference to the source metadata.
    pub fn source(&self) -> &DatabaseSource {
        &self.source
    }
}

/// Builder for constructing an [`EmojiDatabase`] with a fallback chain.
///
/// Sources are tried in the order they are added. The first successful load
/// wins; if all fail, [`DatabaseError::NoSourcesAvailable`] is returned.
///
/// # Example
///
/// ```no_run
/// use emojiscript_db::EmojiDatabase;
///
/// let db = EmojiDatabase::builder()
///     .from_file("/opt/emoji/EmojiData.json")
///     .from_raw("/opt/emoji/RawEmojiData.json")
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Default)]
pub struct DatabaseBuilder {
    sources: Vec<DatabaseSource>,
}

impl DatabaseBuilder {
    /// Creates a new builder with no sources.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a compact category index file as a source.
    pub fn from_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.sources.push(DatabaseSource::Compact(path.into()));
        self
    }

    /// Adds an upstream raw dataset file as a source.
    pub fn from_raw(mut self, path: impl Into<PathBuf>) -> Self {
        self.sources.push(DatabaseSource::Raw(path.into()));
        self
    }

    /// Attempts to load from configured sources in order.
    ///
    /// Returns the first successfully loaded database. If all sources fail,
    /// returns [`DatabaseError::NoSourcesAvailable`].
    pub fn build(self) -> Result<EmojiDatabase> {
        if self.sources.is_empty() {
            return Err(DatabaseError::NoSourcesAvailable);
        }

        let all_sources = self.sources.clone();

        for source in &self.sources {
            let result = match source {
                DatabaseSource::Compact(path) => EmojiDatabase::from_file(path),
                DatabaseSource::Raw(path) => EmojiDatabase::from_raw(path),
                DatabaseSource::Memory | DatabaseSource::Multiple(_) => continue,
            };

            match result {
                Ok(mut db) => {
                    db.source = DatabaseSource::Multiple(all_sources);
                    return Ok(db);
                }
                Err(err) => debug!(?source, error = %err, "emoji source unavailable"),
            }
        }

        Err(DatabaseError::NoSourcesAvailable)
    }
}
