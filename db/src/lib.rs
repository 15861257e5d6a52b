//! Loading, querying and regenerating compact emoji data.
//!
//! This crate wraps the pure transform of [`emojiscript_core`] with file
//! handling and the read-side API:
//!
//! - [`EmojiDatabase`]: a loaded index plus the accessor API (name search,
//!   category listing, random pick, skin-tone rendering).
//! - [`clean`]: upstream dataset to minimized compact index file.
//! - [`DataInfo`]: size and count statistics for both files.
//! - [`generate_types`]: TypeScript declarations for the category set.
//! - [`EmojiConfig`]: file locations, optionally loaded from YAML.
//!
//! # Quick start
//!
//! ```no_run
//! use emojiscript_db::{EmojiDatabase, clean};
//!
//! let report = clean("RawEmojiData.json", "EmojiData.json").unwrap();
//! println!("{} emoji in {} categories", report.emoji_count, report.category_count);
//!
//! let db = EmojiDatabase::from_file("EmojiData.json").unwrap();
//! if let Some(thumbs) = db.find_first_by_name("thumbs up") {
//!     println!("{}", db.render(&thumbs.unified).unwrap());
//! }
//! ```

mod config;
mod error;
mod loader;
mod pipeline;
mod query;
mod reflect;
mod stats;

pub use config::{DEFAULT_OUTPUT_PATH, DEFAULT_RAW_PATH, DEFAULT_TYPES_PATH, EmojiConfig};
pub use error::{DatabaseError, Result};
pub use loader::{DatabaseBuilder, DatabaseSource, EmojiDatabase};
pub use pipeline::{CleanReport, calculate_checksum, clean, encode_index, read_raw_records};
pub use query::{EmojiMatch, ToneRendering};
pub use reflect::{TypeDeclaration, escape_ts_string, generate_types};
pub use stats::{CompactDataInfo, DataInfo, RawDataInfo, format_file_size, reduction_percent};
