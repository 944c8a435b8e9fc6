//! Error types for the extraction pipeline.
//!
//! Page-level failures are reported as [`ExtractError`]; single lines that are
//! dropped without failing their page are described by [`LineSkip`].
//!
//! # Usage
//!
//! ```rust
//! use alto_lines::core::errors::{ExtractError, ProcessingStage};
//!
//! let error = ExtractError::config_error_detailed("image extensions", "list is empty");
//! assert_eq!(error.stage(), ProcessingStage::Generic);
//! ```

pub mod constructors;
pub mod types;

pub use types::{ExtractError, ImageProcessError, LineSkip, PolygonError, ProcessingStage};

/// Convenient result alias for extraction operations.
pub type ExtractResult<T> = Result<T, ExtractError>;
