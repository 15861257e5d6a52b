//! TypeScript declarations derived from a compact category index.
//!
//! The category names of the index become a string-literal union type so
//! that consuming codebases get type-checked category access. The output is
//! consumed only by static tooling.
//!
//! # Examples
//!
//! ```
//! use emojiscript_core::CategoryIndex;
//! use emojiscript_db::TypeDeclaration;
//!
//! let mut index = CategoryIndex::new();
//! index.push_category("Smileys & Emotion", Vec::new());
//! index.push_category("People & Body", Vec::new());
//!
//! let decl = TypeDeclaration::from_index(&index);
//! assert_eq!(decl.category_union(), "'Smileys & Emotion' | 'People & Body'");
//! ```

use std::fmt::Write as _;
use std::path::Path;

use emojiscript_core::CategoryIndex;
use tracing::info;

use crate::error::Result;
use crate::loader::EmojiDatabase;

const RECORD_TYPE: &str = r#"/**
 * CompactEmoji represents a single emoji with all its metadata in a compact format
 * - n: Array of names, with the primary name as the first element
 * - u: Unicode representation (e.g., "1F44C")
 * - v: Optional array of skin tone variations
 */
export type CompactEmoji = {
  /**
   * Names array - contains all searchable terms for this emoji
   * First item is always the primary/full name, followed by short names
   * Example: ["ok hand sign", "ok hand"]
   */
  n: string[];

  /**
   * Unicode representation of the emoji
   * Example: "1F44C"
   */
  u: string;

  /**
   * Variations array - skin tone variations in fixed order:
   * light, medium-light, medium, medium-dark, dark.
   * A single modifier code (e.g. "1F3FB") is appended to `u`;
   * a hyphenated code is a complete sequence on its own.
   * Example: ["1F3FB", "1F3FC", "1F3FD", "1F3FE", "1F3FF"]
   */
  v?: string[];
};
"#;

const USAGE: &str = r#"/**
 * Usage example:
 *
 * import emojiData from './EmojiData.json';
 * import { EmojiCategories, EmojiCategoryType } from './emojiTypes';
 *
 * const data = emojiData as EmojiCategories;
 * const category: EmojiCategoryType = 'Smileys & Emotion';
 * const smileys = data[category];
 */
"#;

/// Category names captured from an index, ready to render as declarations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDeclaration {
    categories: Vec<String>,
}

impl TypeDeclaration {
    /// Captures the category names of `index` in stored order.
    pub fn from_index(index: &CategoryIndex) -> Self {
        Self {
            categories: index.names().map(String::from).collect(),
        }
    }

    /// Category names in declaration order.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// The `EmojiCategoryType` union body; `never` for an empty index.
    pub fn category_union(&self) -> String {
        if self.categories.is_empty() {
            return "never".to_string();
        }
        self.categories
            .iter()
            .map(|c| format!("'{}'", escape_ts_string(c)))
            .collect::<Vec<_>>()
            .join(" | ")
    }

    /// Renders the complete declaration file.
    ///
    /// `generated_at` goes into the header banner verbatim.
    pub fn render(&self, generated_at: &str) -> String {
        let mut out = String::new();

        out.push_str("/**\n");
        out.push_str(" * Type definitions for emoji data structure\n");
        out.push_str(" *\n");
        out.push_str(" * AUTOMATICALLY GENERATED - DO NOT EDIT MANUALLY\n");
        let _ = writeln!(out, " * Generated on: {generated_at}");
        out.push_str(" */\n\n");

        out.push_str(RECORD_TYPE);
        out.push('\n');

        out.push_str("/**\n * EmojiCategoryType - A union type of all available category names\n */\n");
        let _ = writeln!(out, "export type EmojiCategoryType = {};\n", self.category_union());

        out.push_str("/**\n * EmojiCategories - category name to emoji list\n */\n");
        out.push_str("export type EmojiCategories = {\n  [K in EmojiCategoryType]: CompactEmoji[];\n};\n\n");

        out.push_str(USAGE);
        out
    }
}

/// Escapes a value for a single-quoted TypeScript string literal.
///
/// ```
/// use emojiscript_db::escape_ts_string;
///
/// assert_eq!(escape_ts_string("Kids' Stuff"), r"Kids\' Stuff");
/// ```
pub fn escape_ts_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            _ => out.push(ch),
        }
    }
    out
}

/// Reads the compact index at `compact_path` and writes its declarations to
/// `output_path`, stamped with the current UTC time.
///
/// # Errors
///
/// Fails if the index cannot be read or parsed, or the output cannot be
/// written.
pub fn generate_types(compact_path: impl AsRef<Path>, output_path: impl AsRef<Path>) -> Result<TypeDeclaration> {
    let output_path = output_path.as_ref();
    let db = EmojiDatabase::from_file(compact_path)?;
    let declaration = TypeDeclaration::from_index(db.index());

    let generated_at = chrono::Utc::now().to_rfc3339();
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(output_path, declaration.render(&generated_at))?;

    info!(
        output = %output_path.display(),
        categories = declaration.categories().len(),
        "wrote emoji type declarations"
    );

    Ok(declaration)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn declaration(names: &[&str]) -> TypeDeclaration {
        let mut index = CategoryIndex::new();
        for name in names {
            index.push_category(*name, Vec::new());
        }
        TypeDeclaration::from_index(&index)
    }

    #[test]
    fn test_union_escapes_quotes() {
        let decl = declaration(&["Food & Drink", "Kids' Corner", r"Back\slash"]);
        assert_eq!(
            decl.category_union(),
            r"'Food & Drink' | 'Kids\' Corner' | 'Back\\slash'"
        );
    }

    #[test]
    fn test_empty_index_is_never() {
        assert_eq!(declaration(&[]).category_union(), "never");
    }

    #[test]
    fn test_render_contains_types() {
        let rendered = declaration(&["Flags", "Symbols"]).render("2026-01-01T00:00:00+00:00");
        assert!(rendered.contains(" * Generated on: 2026-01-01T00:00:00+00:00\n"));
        assert!(rendered.contains("export type CompactEmoji = {"));
        assert!(rendered.contains("export type EmojiCategoryType = 'Flags' | 'Symbols';\n"));
        assert!(rendered.contains("  [K in EmojiCategoryType]: CompactEmoji[];"));
    }

    #[test]
    fn test_render_is_stable_for_fixed_timestamp() {
        let decl = declaration(&["Flags"]);
        assert_eq!(decl.render("t"), decl.render("t"));
    }

    #[test]
    fn test_generate_types_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let compact = dir.path().join("EmojiData.json");
        std::fs::write(&compact, r#"{"Travel & Places":[],"Objects":[]}"#).unwrap();
        let output = dir.path().join("types").join("emojiTypes.ts");

        let decl = generate_types(&compact, &output).unwrap();
        assert_eq!(decl.categories(), ["Travel & Places", "Objects"]);
        let written = std::fs::read_to_string(&output).unwrap();
        assert!(written.contains("'Travel & Places' | 'Objects'"));
    }
}
