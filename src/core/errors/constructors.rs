//! Helper constructors for [`ExtractError`].

use super::types::{ExtractError, ProcessingStage};
use std::path::Path;

impl ExtractError {
    /// Creates a configuration error with context and details.
    ///
    /// # Example
    ///
    /// ```rust
    /// # use alto_lines::core::errors::ExtractError;
    /// let err = ExtractError::config_error_detailed("namespace", "must not be empty");
    /// assert!(matches!(err, ExtractError::ConfigError { .. }));
    /// ```
    pub fn config_error_detailed(context: impl Into<String>, details: impl Into<String>) -> Self {
        Self::ConfigError {
            message: format!("{}: {}", context.into(), details.into()),
        }
    }

    /// Creates a configuration error for invalid field values.
    pub fn invalid_field(
        field: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::ConfigError {
            message: format!(
                "invalid value for field '{}': expected {}, got {}",
                field.into(),
                expected.into(),
                actual.into()
            ),
        }
    }

    /// Creates a staged processing error.
    pub fn processing(
        kind: ProcessingStage,
        context: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Processing {
            kind,
            context: context.into(),
            source: Box::new(source),
        }
    }

    /// Wraps an IO error with the path it happened on.
    pub fn path_io(path: &Path, source: std::io::Error) -> Self {
        Self::PathIo {
            path: path.to_path_buf(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_field_message() {
        let err = ExtractError::invalid_field("min_region_size", "a value > 0", "0");
        assert_eq!(
            err.to_string(),
            "configuration: invalid value for field 'min_region_size': expected a value > 0, got 0"
        );
    }

    #[test]
    fn test_processing_error_keeps_stage_and_source() {
        let io = std::io::Error::new(std::io::ErrorKind::InvalidData, "bad mask");
        let err = ExtractError::processing(ProcessingStage::Crop, "line L1", io);
        assert_eq!(err.stage(), ProcessingStage::Crop);
        assert_eq!(err.to_string(), "crop failed: line L1");
        assert_eq!(err.chain_message(), "crop failed: line L1: bad mask");
    }

    #[test]
    fn test_missing_image_lists_extensions() {
        let err = ExtractError::MissingImage {
            basename: "P_0001".to_string(),
            searched: vec!["jpg".to_string(), "png".to_string()],
        };
        assert_eq!(err.to_string(), "image not found for 'P_0001' (tried: jpg, png)");
        assert_eq!(err.stage(), ProcessingStage::ImageLoad);
    }

    #[test]
    fn test_path_io_display() {
        let err = ExtractError::path_io(
            Path::new("out/P_0001"),
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(err.to_string(), "io error on 'out/P_0001'");
        assert_eq!(err.chain_message(), "io error on 'out/P_0001': denied");
    }
}
