//! Configuration arguments shared by the CLI subcommands.

use alto_lines::core::ExtractConfig;
use clap::Args;
use std::path::PathBuf;

/// Options common to page and batch extraction.
///
/// Values given on the command line override the config file, which overrides
/// the built-in defaults.
#[derive(Args, Clone, Debug, Default)]
pub struct ExtractArgs {
    /// JSON configuration file
    #[arg(long, env = "ALTO_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory containing the page images
    #[arg(long = "image-dir", env = "ALTO_IMAGE_DIR")]
    pub image_dir: Option<PathBuf>,

    /// Directory receiving one sub-directory of crops per page
    #[arg(long = "output-dir", env = "ALTO_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Path of the JSON manifest
    #[arg(long = "manifest", env = "ALTO_MANIFEST")]
    pub manifest_path: Option<PathBuf>,

    /// Prefix written into manifest image paths instead of the output directory
    #[arg(long = "manifest-prefix", env = "ALTO_MANIFEST_PREFIX")]
    pub manifest_prefix: Option<PathBuf>,

    /// XML namespace of the ALTO elements
    #[arg(long, env = "ALTO_NAMESPACE")]
    pub namespace: Option<String>,

    /// Image extensions to probe, in order (comma separated)
    #[arg(long = "image-ext", value_delimiter = ',')]
    pub image_extensions: Option<Vec<String>>,

    /// Minimum width and height of an extracted line region
    #[arg(long = "min-region-size")]
    pub min_region_size: Option<u32>,
}

impl ExtractArgs {
    /// Builds the effective configuration.
    pub fn resolve(&self) -> Result<ExtractConfig, Box<dyn std::error::Error + Send + Sync>> {
        let base = match &self.config {
            Some(path) => ExtractConfig::from_json_file(path)?,
            None => ExtractConfig::default(),
        };
        Ok(self.apply(base))
    }

    fn apply(&self, mut config: ExtractConfig) -> ExtractConfig {
        if let Some(dir) = &self.image_dir {
            config = config.with_image_dir(dir);
        }
        if let Some(dir) = &self.output_dir {
            config = config.with_output_dir(dir);
        }
        if let Some(path) = &self.manifest_path {
            config = config.with_manifest_path(path);
        }
        if self.manifest_prefix.is_some() {
            config = config.with_manifest_prefix(self.manifest_prefix.clone());
        }
        if let Some(namespace) = &self.namespace {
            config = config.with_namespace(namespace);
        }
        if let Some(extensions) = &self.image_extensions {
            config = config.with_image_extensions(extensions.iter().cloned());
        }
        if let Some(size) = self.min_region_size {
            config = config.with_min_region_size(size);
        }
        config
    }
}
