//! File statistics for the `info` command.

use std::io::ErrorKind;
use std::path::Path;

use emojiscript_core::{ValidationError, validate_index};
use serde::Serialize;

use crate::error::Result;
use crate::loader::EmojiDatabase;
use crate::pipeline::{calculate_checksum, read_raw_records};

const KIB: f64 = 1024.0;
const MIB: f64 = 1024.0 * 1024.0;

/// Formats a byte count as KB below one mebibyte and MB above, with two
/// decimals.
///
/// ```
/// use emojiscript_db::format_file_size;
///
/// assert_eq!(format_file_size(512), "0.50KB");
/// assert_eq!(format_file_size(3 * 1024 * 1024 / 2), "1.50MB");
/// ```
pub fn format_file_size(bytes: u64) -> String {
    let bytes = bytes as f64;
    if bytes < MIB {
        format!("{:.2}KB", bytes / KIB)
    } else {
        format!("{:.2}MB", bytes / MIB)
    }
}

/// Percentage by which `compact` is smaller than `original`.
///
/// Negative when the compact file is larger; zero for an empty original.
pub fn reduction_percent(original: u64, compact: u64) -> f64 {
    if original == 0 {
        return 0.0;
    }
    (original as f64 - compact as f64) / original as f64 * 100.0
}

/// Statistics about the upstream dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RawDataInfo {
    pub bytes: u64,
    pub emoji_count: usize,
}

/// Statistics about the compact index.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompactDataInfo {
    pub bytes: u64,
    /// Size reduction relative to the raw file, when it exists.
    pub reduction_percent: Option<f64>,
    pub emoji_count: usize,
    pub category_count: usize,
    pub checksum: String,
    #[serde(serialize_with = "serialize_issues")]
    pub issues: Vec<ValidationError>,
}

/// Everything `info` reports. A side is `None` when its file does not exist.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataInfo {
    pub raw: Option<RawDataInfo>,
    pub compact: Option<CompactDataInfo>,
}

impl DataInfo {
    /// Collects statistics for both files.
    ///
    /// # Errors
    ///
    /// Missing files are reported as `None`; any other read or parse failure
    /// is returned as an error.
    pub fn collect(raw_path: impl AsRef<Path>, compact_path: impl AsRef<Path>) -> Result<Self> {
        let raw_path = raw_path.as_ref();
        let compact_path = compact_path.as_ref();

        let raw = match file_size(raw_path)? {
            Some(bytes) => Some(RawDataInfo {
                bytes,
                emoji_count: read_raw_records(raw_path)?.len(),
            }),
            None => None,
        };

        let compact = match file_size(compact_path)? {
            Some(bytes) => {
                let db = EmojiDatabase::from_file(compact_path)?;
                Some(CompactDataInfo {
                    bytes,
                    reduction_percent: raw.as_ref().map(|r| reduction_percent(r.bytes, bytes)),
                    emoji_count: db.total_count(),
                    category_count: db.index().len(),
                    checksum: calculate_checksum(compact_path)?,
                    issues: validate_index(db.index()),
                })
            }
            None => None,
        };

        Ok(Self { raw, compact })
    }
}

fn file_size(path: &Path) -> Result<Option<u64>> {
    match std::fs::metadata(path) {
        Ok(meta) => Ok(Some(meta.len())),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err.into()),
    }
}

fn serialize_issues<S: serde::Serializer>(
    issues: &[ValidationError],
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_seq(issues.iter().map(ToString::to_string))
}
