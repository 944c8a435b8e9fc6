//! The text-line extraction pipeline.
//!
//! This module provides [`LineExtractorBuilder`] for constructing a
//! [`LineExtractor`], the [`Targets`] it runs over, and the per-page and
//! per-run reports it returns.
//!
//! # Example
//!
//! ```no_run
//! use alto_lines::extractor::{LineExtractorBuilder, Targets};
//!
//! let extractor = LineExtractorBuilder::new()
//!     .image_dir("scans")
//!     .output_dir("images")
//!     .manifest_path("labels.json")
//!     .build()
//!     .expect("valid configuration");
//!
//! let summary = extractor
//!     .run(&Targets::Directory("annotations".into()))
//!     .expect("manifest written");
//! println!("{} lines extracted", summary.records_written);
//! ```

pub mod lines;
pub mod result;
pub mod targets;

pub use lines::{LineExtractor, LineExtractorBuilder, LineOutcome};
pub use result::{PageFailure, PageReport, RunSummary, SkippedLine};
pub use targets::Targets;
