//! Ordered archive metadata mapping

use crate::size::human_size;
use std::fs;
use std::path::Path;

/// Ordered key/value description of a whole archive
///
/// Keys keep first-seen order; inserting an existing key updates its value in
/// place. The field set varies by tool build, so nothing here is
/// schema-checked, but `"File name"` and `"File size"` can be backfilled from
/// the filesystem when the tool leaves them out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArchiveMetadata {
    fields: Vec<(String, String)>,
}

impl ArchiveMetadata {
    /// Create an empty metadata mapping
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from two-column table rows
    ///
    /// Rows with fewer than two cells are skipped; surplus cells are ignored.
    pub fn from_rows<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut metadata = Self::new();
        for (key, value) in rows {
            metadata.insert(key, value);
        }
        metadata
    }

    /// Insert a field, updating the value in place if the key already exists
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        if let Some(field) = self.fields.iter_mut().find(|(k, _)| *k == key) {
            field.1 = value;
        } else {
            self.fields.push((key, value));
        }
    }

    /// Look up a field value by key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Whether a field with this key is present
    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.iter().any(|(k, _)| k == key)
    }

    /// Iterate fields in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the mapping has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Backfill file-level fields the tool did not report
    ///
    /// Adds `"File name"` when missing, and `"File size"` (human-scaled) when
    /// missing and the archive file exists on disk.
    pub fn ensure_file_fields(&mut self, archive_path: &Path) {
        if !self.contains_key("File name") {
            self.insert("File name", archive_path.display().to_string());
        }
        if !self.contains_key("File size") {
            if let Ok(file_meta) = fs::metadata(archive_path) {
                if file_meta.is_file() {
                    self.insert("File size", human_size(i128::from(file_meta.len())));
                }
            }
        }
    }

    /// Rewrite `"<digits> bytes"` values into their human-scaled form
    ///
    /// Only values that end in the literal suffix `"bytes"` with an all-digit
    /// remainder are touched; everything else is left verbatim.
    pub fn humanize_byte_values(&mut self) {
        for (_, value) in &mut self.fields {
            if let Some(stripped) = value.strip_suffix("bytes") {
                let digits = stripped.trim();
                if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) {
                    if let Ok(count) = digits.parse::<i128>() {
                        *value = human_size(count);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_insert_keeps_first_seen_order() {
        let mut metadata = ArchiveMetadata::new();
        metadata.insert("File name", "model.img");
        metadata.insert("Version", "VER2");
        metadata.insert("File name", "other.img");

        let keys: Vec<&str> = metadata.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["File name", "Version"]);
        assert_eq!(metadata.get("File name"), Some("other.img"));
    }

    #[test]
    fn test_humanize_byte_values() {
        let mut metadata = ArchiveMetadata::from_rows([
            ("File size".to_string(), "1310720 bytes".to_string()),
            ("Version".to_string(), "VER2".to_string()),
            ("Comment".to_string(), "about bytes".to_string()),
            ("Free space".to_string(), " bytes".to_string()),
        ]);
        metadata.humanize_byte_values();

        assert_eq!(metadata.get("File size"), Some("1MB"));
        // Non-numeric and empty remainders stay verbatim
        assert_eq!(metadata.get("Version"), Some("VER2"));
        assert_eq!(metadata.get("Comment"), Some("about bytes"));
        assert_eq!(metadata.get("Free space"), Some(" bytes"));
    }

    #[test]
    fn test_ensure_file_fields_for_missing_file() {
        let mut metadata = ArchiveMetadata::new();
        metadata.ensure_file_fields(Path::new("/nonexistent/model.img"));

        assert_eq!(metadata.get("File name"), Some("/nonexistent/model.img"));
        assert!(!metadata.contains_key("File size"));
    }

    #[test]
    fn test_ensure_file_fields_does_not_overwrite() {
        let mut metadata = ArchiveMetadata::new();
        metadata.insert("File name", "reported.img");
        metadata.ensure_file_fields(Path::new("/nonexistent/model.img"));

        assert_eq!(metadata.get("File name"), Some("reported.img"));
    }
}
