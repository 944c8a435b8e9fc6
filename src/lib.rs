//! # ALTO Lines
//!
//! Builds line-level training data for text recognition from ALTO page
//! annotations. For every annotated text line the page image is masked with
//! the line's polygon, cropped to the polygon's bounding box onto a white
//! background and written as a PNG. A JSON manifest pairs each crop with the
//! line's transcription.
//!
//! ## Modules
//!
//! * [`core`] - Configuration, constants and error handling
//! * [`domain`] - ALTO pages and the label manifest
//! * [`extractor`] - Page and line extraction
//! * [`processors`] - Polygon geometry and mask rasterization
//! * [`utils`] - Image loading, saving and masked cropping
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use alto_lines::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let extractor = LineExtractorBuilder::new()
//!     .image_dir("scans")
//!     .output_dir("images")
//!     .manifest_path("labels.json")
//!     .build()?;
//!
//! let summary = extractor.run(&Targets::Directory("annotations".into()))?;
//! println!("{summary}");
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod domain;
pub mod extractor;
pub mod processors;
pub mod utils;

/// Prelude module for convenient imports.
///
/// ```rust
/// use alto_lines::prelude::*;
/// ```
pub mod prelude {
    pub use crate::core::{ExtractConfig, ExtractError, ExtractResult};
    pub use crate::domain::{AltoPage, LabelRecord, Manifest, TextLine};
    pub use crate::extractor::{LineExtractor, LineExtractorBuilder, RunSummary, Targets};
}
