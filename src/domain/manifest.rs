//! The label manifest consumed by recognition training.

use crate::core::errors::{ExtractError, ExtractResult};
use serde::{Deserialize, Serialize};
use std::io::{BufWriter, Write};
use std::path::Path;

/// One extracted line: its transcription and the path of its crop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelRecord {
    pub text: String,
    pub image_path: String,
}

impl LabelRecord {
    pub fn new(text: impl Into<String>, image_path: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            image_path: image_path.into(),
        }
    }
}

/// Ordered collection of label records for a whole run.
///
/// Records are only ever appended, one page at a time, so the order is pages
/// in processing order and lines in document order within a page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Manifest {
    records: Vec<LabelRecord>,
}

impl Manifest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the records of one completed page.
    pub fn extend_page(&mut self, records: Vec<LabelRecord>) {
        self.records.extend(records);
    }

    pub fn records(&self) -> &[LabelRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Writes the manifest as an indented UTF-8 JSON array.
    ///
    /// Non-ASCII text is written literally. Missing parent directories are
    /// created and an existing file is overwritten.
    pub fn save(&self, path: &Path) -> ExtractResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| ExtractError::path_io(parent, e))?;
        }
        let file = std::fs::File::create(path).map_err(|e| ExtractError::path_io(path, e))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush().map_err(|e| ExtractError::path_io(path, e))?;
        Ok(())
    }

    /// Reads a manifest previously written by [`Manifest::save`].
    pub fn load(path: &Path) -> ExtractResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ExtractError::path_io(path, e))?;
        Ok(serde_json::from_str(&content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_extend_page_preserves_order() {
        let mut manifest = Manifest::new();
        manifest.extend_page(vec![
            LabelRecord::new("a", "p1/L1.png"),
            LabelRecord::new("b", "p1/L2.png"),
        ]);
        manifest.extend_page(Vec::new());
        manifest.extend_page(vec![LabelRecord::new("c", "p2/L1.png")]);

        let paths: Vec<&str> = manifest
            .records()
            .iter()
            .map(|r| r.image_path.as_str())
            .collect();
        assert_eq!(paths, vec!["p1/L1.png", "p1/L2.png", "p2/L1.png"]);
    }

    #[test]
    fn test_save_writes_indented_array_with_literal_unicode() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out").join("labels.json");
        let mut manifest = Manifest::new();
        manifest.extend_page(vec![LabelRecord::new("Ærø «ſtraße»", "images/p/L1.png")]);

        manifest.save(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("[\n  {\n    \"text\": \"Ærø «ſtraße»\""));
        assert!(content.contains("\"image_path\": \"images/p/L1.png\""));
        assert!(!content.contains("\\u"));
    }

    #[test]
    fn test_save_empty_manifest() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("labels.json");

        Manifest::new().save(&path).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]");
        assert!(Manifest::load(&path).unwrap().is_empty());
    }

    #[test]
    fn test_save_overwrites_and_loads_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("labels.json");
        std::fs::write(&path, "stale content that is longer than the new manifest").unwrap();

        let mut manifest = Manifest::new();
        manifest.extend_page(vec![LabelRecord::new("x", "a.png")]);
        manifest.save(&path).unwrap();

        assert_eq!(Manifest::load(&path).unwrap(), manifest);
    }
}
