//! Configuration management for the extractor.
//!
//! This module provides the extraction configuration, its validation trait,
//! and the configuration error type.

pub mod errors;
pub mod extract;

pub use errors::{ConfigError, ConfigValidator};
pub use extract::ExtractConfig;
