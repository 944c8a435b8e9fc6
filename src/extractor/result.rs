//! Result types for extraction runs.

use crate::core::errors::{ExtractError, LineSkip};
use serde::{Serialize, Serializer};
use std::fmt;
use std::path::PathBuf;

/// A text line that produced no crop, with the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedLine {
    /// The line's label (its `ID` or positional fallback).
    pub label: String,
    /// Why the line was dropped.
    #[serde(serialize_with = "serialize_display")]
    pub reason: LineSkip,
}

/// Outcome of one successfully processed page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageReport {
    /// The page basename shared by the image and the annotation.
    pub basename: String,
    /// Number of `TextLine` elements found on the page.
    pub total_lines: usize,
    /// Number of lines written as crops and label records.
    pub extracted: usize,
    /// Lines dropped without output, in document order.
    pub skipped: Vec<SkippedLine>,
}

impl PageReport {
    pub fn new(basename: impl Into<String>, total_lines: usize) -> Self {
        Self {
            basename: basename.into(),
            total_lines,
            extracted: 0,
            skipped: Vec::new(),
        }
    }
}

/// A page that could not be processed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageFailure {
    /// The page basename.
    pub basename: String,
    /// The pipeline stage that failed.
    pub stage: String,
    /// The error with its source chain.
    pub error: String,
}

impl PageFailure {
    pub fn from_error(basename: impl Into<String>, error: &ExtractError) -> Self {
        Self {
            basename: basename.into(),
            stage: error.stage().to_string(),
            error: error.chain_message(),
        }
    }
}

/// Summary of a whole extraction run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Reports of the pages that were processed, in processing order.
    pub pages: Vec<PageReport>,
    /// Pages that were skipped because of a page-level error.
    pub failed_pages: Vec<PageFailure>,
    /// Number of records in the written manifest.
    pub records_written: usize,
    /// Where the manifest was written.
    pub manifest_path: PathBuf,
}

impl RunSummary {
    pub fn new(manifest_path: impl Into<PathBuf>) -> Self {
        Self {
            pages: Vec::new(),
            failed_pages: Vec::new(),
            records_written: 0,
            manifest_path: manifest_path.into(),
        }
    }

    /// Total number of lines skipped across all processed pages.
    pub fn skipped_lines(&self) -> usize {
        self.pages.iter().map(|p| p.skipped.len()).sum()
    }

    /// Returns true if every page was processed.
    pub fn is_complete(&self) -> bool {
        self.failed_pages.is_empty()
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} page(s) processed, {} failed, {} line(s) extracted, {} skipped; manifest: {}",
            self.pages.len(),
            self.failed_pages.len(),
            self.records_written,
            self.skipped_lines(),
            self.manifest_path.display()
        )
    }
}

fn serialize_display<T: fmt::Display, S: Serializer>(
    value: &T,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_display_and_counts() {
        let mut summary = RunSummary::new("labels.json");
        let mut page = PageReport::new("P_0001", 3);
        page.extracted = 2;
        page.skipped.push(SkippedLine {
            label: "line3".to_string(),
            reason: LineSkip::MissingPolygon,
        });
        summary.pages.push(page);
        summary.records_written = 2;
        summary.failed_pages.push(PageFailure::from_error(
            "P_0002",
            &ExtractError::MissingImage {
                basename: "P_0002".to_string(),
                searched: vec!["jpg".to_string()],
            },
        ));

        assert_eq!(summary.skipped_lines(), 1);
        assert!(!summary.is_complete());
        assert_eq!(
            summary.to_string(),
            "1 page(s) processed, 1 failed, 2 line(s) extracted, 1 skipped; manifest: labels.json"
        );
    }

    #[test]
    fn test_summary_serializes_skip_reasons_as_text() {
        let mut summary = RunSummary::new("labels.json");
        let mut page = PageReport::new("P_0001", 1);
        page.skipped.push(SkippedLine {
            label: "L1".to_string(),
            reason: LineSkip::DegenerateRegion {
                width: 3,
                height: 40,
            },
        });
        summary.pages.push(page);

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(
            json["pages"][0]["skipped"][0]["reason"],
            "degenerate region 3x40"
        );
        assert_eq!(json["failed_pages"].as_array().unwrap().len(), 0);
    }
}
