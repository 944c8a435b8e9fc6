//! Configuration error types and validation traits.

use thiserror::Error;

/// Errors that can occur while loading or validating a configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config file '{}'", .path.display())]
    Read {
        /// Path of the configuration file.
        path: std::path::PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid JSON for this configuration.
    #[error("failed to parse config file '{}'", .path.display())]
    Parse {
        /// Path of the configuration file.
        path: std::path::PathBuf,
        /// The underlying deserialization error.
        #[source]
        source: serde_json::Error,
    },

    /// Error indicating that validation failed.
    #[error("validation failed: {message}")]
    ValidationFailed { message: String },
}

/// A trait for validating configuration parameters.
pub trait ConfigValidator {
    /// Validates the configuration.
    fn validate(&self) -> Result<(), ConfigError>;

    /// Returns the default configuration.
    fn get_defaults() -> Self
    where
        Self: Sized;

    /// Validates that a value is strictly positive.
    fn validate_positive(&self, field: &str, value: u32) -> Result<(), ConfigError> {
        if value == 0 {
            Err(ConfigError::ValidationFailed {
                message: format!("{field} must be greater than 0"),
            })
        } else {
            Ok(())
        }
    }

    /// Validates that a string value is not empty or whitespace.
    fn validate_non_empty(&self, field: &str, value: &str) -> Result<(), ConfigError> {
        if value.trim().is_empty() {
            Err(ConfigError::ValidationFailed {
                message: format!("{field} must not be empty"),
            })
        } else {
            Ok(())
        }
    }
}
