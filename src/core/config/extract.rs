//! Extraction configuration.

use super::errors::{ConfigError, ConfigValidator};
use crate::core::constants::{
    ALTO_V4_NAMESPACE, DEFAULT_IMAGE_EXTENSIONS, DEFAULT_MANIFEST_PATH, DEFAULT_MIN_REGION_SIZE,
    DEFAULT_OUTPUT_DIR,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration of a text-line extraction run.
///
/// Every field has a default, so a JSON config file only needs to name the
/// values it changes:
///
/// ```json
/// { "image_dir": "scans", "manifest_prefix": "test/images" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractConfig {
    /// Directory searched for page images.
    /// Default: the current directory
    #[serde(default = "ExtractConfig::default_image_dir")]
    pub image_dir: PathBuf,

    /// Root directory receiving one sub-directory of crops per page.
    /// Default: `images`
    #[serde(default = "ExtractConfig::default_output_dir")]
    pub output_dir: PathBuf,

    /// Path of the JSON manifest written at the end of the run.
    /// Default: `labels.json`
    #[serde(default = "ExtractConfig::default_manifest_path")]
    pub manifest_path: PathBuf,

    /// Prefix used for `image_path` in the manifest instead of `output_dir`.
    ///
    /// Useful when the manifest is consumed from a different working directory
    /// than the one the crops were written from.
    /// Default: None (manifest paths are the written paths)
    #[serde(default)]
    pub manifest_prefix: Option<PathBuf>,

    /// XML namespace qualifying every ALTO element query.
    /// Default: the ALTO v4 namespace
    #[serde(default = "ExtractConfig::default_namespace")]
    pub namespace: String,

    /// Image extensions probed for each page basename, in priority order.
    /// Default: jpg, jpeg, png, tif, tiff
    #[serde(default = "ExtractConfig::default_image_extensions")]
    pub image_extensions: Vec<String>,

    /// Minimum width and height of a line's bounding rectangle.
    /// Default: 5
    #[serde(default = "ExtractConfig::default_min_region_size")]
    pub min_region_size: u32,
}

impl ExtractConfig {
    /// Create a new ExtractConfig with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a configuration from a JSON file.
    ///
    /// Fields missing from the file take their default values.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Set the image directory.
    pub fn with_image_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.image_dir = dir.into();
        self
    }

    /// Set the crop output directory.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Set the manifest path.
    pub fn with_manifest_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.manifest_path = path.into();
        self
    }

    /// Set the prefix written into manifest image paths.
    pub fn with_manifest_prefix(mut self, prefix: Option<PathBuf>) -> Self {
        self.manifest_prefix = prefix;
        self
    }

    /// Set the ALTO namespace.
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Set the probed image extensions.
    pub fn with_image_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.image_extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    /// Set the minimum region size.
    pub fn with_min_region_size(mut self, size: u32) -> Self {
        self.min_region_size = size;
        self
    }

    fn default_image_dir() -> PathBuf {
        PathBuf::from(".")
    }

    fn default_output_dir() -> PathBuf {
        PathBuf::from(DEFAULT_OUTPUT_DIR)
    }

    fn default_manifest_path() -> PathBuf {
        PathBuf::from(DEFAULT_MANIFEST_PATH)
    }

    fn default_namespace() -> String {
        ALTO_V4_NAMESPACE.to_string()
    }

    fn default_image_extensions() -> Vec<String> {
        DEFAULT_IMAGE_EXTENSIONS
            .iter()
            .map(|ext| ext.to_string())
            .collect()
    }

    fn default_min_region_size() -> u32 {
        DEFAULT_MIN_REGION_SIZE
    }
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            image_dir: Self::default_image_dir(),
            output_dir: Self::default_output_dir(),
            manifest_path: Self::default_manifest_path(),
            manifest_prefix: None,
            namespace: Self::default_namespace(),
            image_extensions: Self::default_image_extensions(),
            min_region_size: Self::default_min_region_size(),
        }
    }
}

impl ConfigValidator for ExtractConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        self.validate_non_empty("namespace", &self.namespace)?;
        self.validate_positive("min_region_size", self.min_region_size)?;
        self.validate_non_empty("manifest_path", &self.manifest_path.to_string_lossy())?;

        if self.image_extensions.is_empty() {
            return Err(ConfigError::ValidationFailed {
                message: "image_extensions must contain at least one extension".to_string(),
            });
        }
        for ext in &self.image_extensions {
            self.validate_non_empty("image_extensions entry", ext)?;
            if ext.starts_with('.') {
                return Err(ConfigError::ValidationFailed {
                    message: format!("image extension '{ext}' must not start with '.'"),
                });
            }
        }
        Ok(())
    }

    fn get_defaults() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_are_valid() {
        let config = ExtractConfig::get_defaults();
        assert!(config.validate().is_ok());
        assert_eq!(config.namespace, ALTO_V4_NAMESPACE);
        assert_eq!(
            config.image_extensions,
            vec!["jpg", "jpeg", "png", "tif", "tiff"]
        );
        assert_eq!(config.min_region_size, 5);
        assert_eq!(config.manifest_prefix, None);
    }

    #[test]
    fn test_from_json_file_fills_missing_fields() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "image_dir": "scans", "manifest_prefix": "test/images", "min_region_size": 8 }}"#
        )
        .unwrap();

        let config = ExtractConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.image_dir, PathBuf::from("scans"));
        assert_eq!(config.manifest_prefix, Some(PathBuf::from("test/images")));
        assert_eq!(config.min_region_size, 8);
        assert_eq!(config.output_dir, PathBuf::from("images"));
        assert_eq!(config.manifest_path, PathBuf::from("labels.json"));
    }

    #[test]
    fn test_from_json_file_rejects_bad_json() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();

        let err = ExtractConfig::from_json_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_from_json_file_missing_file() {
        let err = ExtractConfig::from_json_file("/nonexistent/extract.json").unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_validate_rejects_zero_region_size() {
        let config = ExtractConfig::new().with_min_region_size(0);
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("min_region_size"));
    }

    #[test]
    fn test_validate_rejects_empty_extension_list() {
        let config = ExtractConfig::new().with_image_extensions(Vec::<String>::new());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_dotted_extension() {
        let config = ExtractConfig::new().with_image_extensions([".png"]);
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("'.png'"));
    }

    #[test]
    fn test_validate_rejects_blank_namespace() {
        let config = ExtractConfig::new().with_namespace("  ");
        assert!(config.validate().is_err());
    }
}
