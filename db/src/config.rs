//! File locations for the emoji pipeline.
//!
//! Every path has a default matching the conventional layout, so a config
//! file is optional. When present it is YAML:
//!
//! ```yaml
//! raw_path: data/RawEmojiData.json
//! output_path: data/EmojiData.json
//! types_path: src/emojiTypes.ts
//! ```

use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Default location of the upstream dataset.
pub const DEFAULT_RAW_PATH: &str = "RawEmojiData.json";
/// Default location of the compact category index.
pub const DEFAULT_OUTPUT_PATH: &str = "EmojiData.json";
/// Default location of the generated type declarations.
pub const DEFAULT_TYPES_PATH: &str = "emojiTypes.ts";

/// Paths used by the `clean`, `info` and `types` stages.
///
/// Missing keys fall back to their defaults.
///
/// # Examples
///
/// ```
/// use emojiscript_db::EmojiConfig;
///
/// let config = EmojiConfig::default();
/// assert_eq!(config.output_path.to_str(), Some("EmojiData.json"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmojiConfig {
    /// Upstream dataset (JSON array of raw records).
    pub raw_path: PathBuf,
    /// Compact category index written by `clean`.
    pub output_path: PathBuf,
    /// TypeScript declarations written by `types`.
    pub types_path: PathBuf,
}

impl Default for EmojiConfig {
    fn default() -> Self {
        Self {
            raw_path: PathBuf::from(DEFAULT_RAW_PATH),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            types_path: PathBuf::from(DEFAULT_TYPES_PATH),
        }
    }
}

impl EmojiConfig {
    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](crate::DatabaseError::IoError) if the file cannot
    /// be read, or [`YamlError`](crate::DatabaseError::YamlError) if parsing
    /// fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let reader = BufReader::new(file);
        let config = serde_yaml::from_reader(reader)?;
        Ok(config)
    }

    /// Saves the configuration as YAML.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](crate::DatabaseError::IoError) if the file cannot
    /// be written, or [`YamlError`](crate::DatabaseError::YamlError) if
    /// serialization fails.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = BufWriter::new(file);
        serde_yaml::to_writer(writer, self)?;
        Ok(())
    }

    /// Resolves relative paths against `base`.
    ///
    /// Used so that paths in a config file are relative to the file itself
    /// rather than the working directory.
    pub fn relative_to(mut self, base: &Path) -> Self {
        for path in [&mut self.raw_path, &mut self.output_path, &mut self.types_path] {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
        self
    }
}
