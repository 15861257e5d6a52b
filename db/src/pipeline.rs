//! The `clean` stage: upstream dataset to compact category index file.
//!
//! Reading or parsing the input is all-or-nothing; a broken input file aborts
//! the run before anything is written. Individual malformed records are
//! skipped and counted in the [`CleanReport`].

use std::path::Path;

use emojiscript_core::{CategoryIndex, build_index_from_values};
use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing::info;

use crate::error::{DatabaseError, Result};

/// Outcome of a `clean` run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CleanReport {
    /// Elements in the raw input array.
    pub raw_records: usize,
    /// Elements skipped as malformed or lacking short names.
    pub skipped_records: usize,
    /// Emoji written to the compact index.
    pub emoji_count: usize,
    /// Categories written to the compact index.
    pub category_count: usize,
    /// Size of the raw input file in bytes.
    pub original_bytes: u64,
    /// Size of the written compact file in bytes.
    pub compact_bytes: u64,
    /// SHA-256 hex digest of the compact file.
    pub checksum: String,
}

/// Reads the upstream dataset as untyped JSON records.
///
/// # Errors
///
/// Returns [`DatabaseError::IoError`] if the file cannot be read,
/// [`DatabaseError::JsonError`] if it is not JSON, or
/// [`DatabaseError::NotAnArray`] if the top-level value is not an array.
pub fn read_raw_records(path: impl AsRef<Path>) -> Result<Vec<serde_json::Value>> {
    let file = std::fs::File::open(path)?;
    let reader = std::io::BufReader::new(file);
    let value: serde_json::Value = serde_json::from_reader(reader)?;
    match value {
        serde_json::Value::Array(values) => Ok(values),
        _ => Err(DatabaseError::NotAnArray),
    }
}

/// Serializes an index in its persisted form: minimized JSON, no trailing
/// newline.
pub fn encode_index(index: &CategoryIndex) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(index)?)
}

/// Runs the transform from `raw_path` and writes the compact index to
/// `output_path`, creating its parent directory if needed.
///
/// Identical input always produces byte-identical output.
///
/// # Errors
///
/// Fails on any input read/parse error or output write error. Nothing is
/// written when the input cannot be read.
pub fn clean(raw_path: impl AsRef<Path>, output_path: impl AsRef<Path>) -> Result<CleanReport> {
    let raw_path = raw_path.as_ref();
    let output_path = output_path.as_ref();

    let values = read_raw_records(raw_path)?;
    let (index, skipped_records) = build_index_from_values(&values);
    let encoded = encode_index(&index)?;

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(output_path, &encoded)?;

    let report = CleanReport {
        raw_records: values.len(),
        skipped_records,
        emoji_count: index.emoji_count(),
        category_count: index.len(),
        original_bytes: std::fs::metadata(raw_path)?.len(),
        compact_bytes: std::fs::metadata(output_path)?.len(),
        checksum: sha256_hex(&encoded),
    };

    info!(
        output = %output_path.display(),
        emojis = report.emoji_count,
        categories = report.category_count,
        skipped = report.skipped_records,
        "wrote compact emoji index"
    );

    Ok(report)
}

/// Computes the SHA-256 hex digest of a file.
///
/// # Errors
///
/// Returns [`IoError`](crate::DatabaseError::IoError) if the file cannot be
/// read.
pub fn calculate_checksum(path: impl AsRef<Path>) -> Result<String> {
    let bytes = std::fs::read(path)?;
    Ok(sha256_hex(&bytes))
}

fn sha256_hex(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn write_raw(dir: &Path, value: serde_json::Value) -> std::path::PathBuf {
        let path = dir.join("RawEmojiData.json");
        std::fs::write(&path, serde_json::to_string_pretty(&value).unwrap()).unwrap();
        path
    }

    #[test]
    fn test_clean_writes_minimized_index() {
        let dir = tempfile::tempdir().unwrap();
        let raw = write_raw(
            dir.path(),
            json!([
                {"name": "DOG FACE", "unified": "1F436", "category": "Animals & Nature",
                 "sort_order": 2, "short_names": ["dog"]},
                {"name": "MONKEY FACE", "unified": "1F435", "category": "Animals & Nature",
                 "sort_order": 1, "short_names": ["monkey_face"]}
            ]),
        );
        let output = dir.path().join("out").join("EmojiData.json");

        let report = clean(&raw, &output).unwrap();
        let written = std::fs::read_to_string(&output).unwrap();
        assert_eq!(
            written,
            r#"{"Animals & Nature":[{"n":["monkey face"],"u":"1F435"},{"n":["dog face","dog"],"u":"1F436"}]}"#
        );
        assert_eq!(report.raw_records, 2);
        assert_eq!(report.skipped_records, 0);
        assert_eq!(report.emoji_count, 2);
        assert_eq!(report.compact_bytes, written.len() as u64);
        assert!(report.original_bytes > report.compact_bytes);
        assert_eq!(report.checksum, calculate_checksum(&output).unwrap());
    }

    #[test]
    fn test_clean_rejects_non_array() {
        let dir = tempfile::tempdir().unwrap();
        let raw = write_raw(dir.path(), json!({"emoji": []}));
        let output = dir.path().join("EmojiData.json");

        assert!(matches!(clean(&raw, &output), Err(DatabaseError::NotAnArray)));
        assert!(!output.exists());
    }

    #[test]
    fn test_clean_missing_input_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("EmojiData.json");
        let result = clean(dir.path().join("missing.json"), &output);
        assert!(matches!(result, Err(DatabaseError::IoError(_))));
        assert!(!output.exists());
    }

    #[test]
    fn test_clean_corrupt_json_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let raw = dir.path().join("RawEmojiData.json");
        std::fs::write(&raw, "[{\"name\": ").unwrap();
        let result = clean(&raw, dir.path().join("EmojiData.json"));
        assert!(matches!(result, Err(DatabaseError::JsonError(_))));
    }
}
