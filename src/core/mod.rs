//! The core module of the extractor.
//!
//! This module contains the fundamental components shared by every stage:
//! - Configuration management
//! - Constants used throughout the pipeline
//! - Error handling
//!
//! It also provides re-exports of commonly used types for convenience.

pub mod config;
pub mod constants;
pub mod errors;

pub use config::{ConfigError, ConfigValidator, ExtractConfig};
pub use constants::*;
pub use errors::{ExtractError, ExtractResult, LineSkip, PolygonError, ProcessingStage};
