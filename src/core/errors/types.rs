//! Core error types for the extraction pipeline.
//!
//! This module defines the error types used throughout the extractor:
//! the run/page-level [`ExtractError`], the [`ProcessingStage`] tag attached
//! to staged failures, and the line-level outcomes ([`LineSkip`],
//! [`PolygonError`]) that drop a single line without failing its page.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while parsing an ALTO `POINTS` attribute.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolygonError {
    /// A token of the point list is not an integer.
    #[error("invalid coordinate '{token}'")]
    InvalidCoordinate {
        /// The offending token.
        token: String,
    },
    /// The point list cannot be grouped into (x, y) pairs.
    #[error("odd number of coordinates ({count})")]
    OddCoordinateCount {
        /// Number of coordinates found.
        count: usize,
    },
    /// The polygon has fewer than three vertices.
    #[error("polygon needs at least 3 points, got {count}")]
    TooFewPoints {
        /// Number of vertices found.
        count: usize,
    },
}

/// Errors that can occur during image processing operations.
#[derive(Debug, Error)]
pub enum ImageProcessError {
    /// The crop rectangle does not fit inside the image.
    #[error(
        "crop ({x}, {y}, {width}x{height}) is out of bounds for a {image_width}x{image_height} image",
        image_width = .image_size.0,
        image_height = .image_size.1
    )]
    CropOutOfBounds {
        /// Left edge of the crop.
        x: i32,
        /// Top edge of the crop.
        y: i32,
        /// Width of the crop.
        width: u32,
        /// Height of the crop.
        height: u32,
        /// The size of the image.
        image_size: (u32, u32),
    },
    /// The mask and the image have different dimensions.
    #[error(
        "mask size {mask_width}x{mask_height} does not match image size {image_width}x{image_height}",
        mask_width = .mask_size.0,
        mask_height = .mask_size.1,
        image_width = .image_size.0,
        image_height = .image_size.1
    )]
    MaskSizeMismatch {
        /// The size of the mask.
        mask_size: (u32, u32),
        /// The size of the image.
        image_size: (u32, u32),
    },
}

/// Reasons a single text line produces no crop and no label record.
///
/// These are not failures of the page: the line is skipped and the page
/// continues with the next line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LineSkip {
    /// The line has no `Polygon` element.
    #[error("no polygon")]
    MissingPolygon,
    /// The polygon's point list is malformed.
    #[error("malformed polygon: {0}")]
    MalformedPolygon(#[from] PolygonError),
    /// The bounding rectangle is smaller than the minimum region size.
    #[error("degenerate region {width}x{height}")]
    DegenerateRegion {
        /// Width of the (page-clipped) bounding rectangle.
        width: u32,
        /// Height of the (page-clipped) bounding rectangle.
        height: u32,
    },
}

/// Enum representing the stages of the extraction pipeline.
///
/// Used to identify where a staged [`ExtractError::Processing`] error occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessingStage {
    /// Locating or decoding the page image.
    ImageLoad,
    /// Reading or parsing the ALTO annotation.
    AnnotationParse,
    /// Cropping and compositing a line image.
    Crop,
    /// Writing a crop to storage.
    Persist,
    /// Serializing or writing the manifest.
    Manifest,
    /// Generic processing error.
    Generic,
}

impl std::fmt::Display for ProcessingStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProcessingStage::ImageLoad => write!(f, "image load"),
            ProcessingStage::AnnotationParse => write!(f, "annotation parse"),
            ProcessingStage::Crop => write!(f, "crop"),
            ProcessingStage::Persist => write!(f, "persist"),
            ProcessingStage::Manifest => write!(f, "manifest"),
            ProcessingStage::Generic => write!(f, "processing"),
        }
    }
}

/// Enum representing the errors that can occur while extracting a page or a run.
///
/// Page-scoped variants (missing image, undecodable image, malformed XML) are
/// caught by the run loop and reported; they never abort the remaining pages.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// No image exists for the page basename under any probed extension.
    #[error("image not found for '{basename}' (tried: {})", .searched.join(", "))]
    MissingImage {
        /// The page basename.
        basename: String,
        /// The extensions that were probed, in order.
        searched: Vec<String>,
    },

    /// The page image exists but could not be decoded.
    #[error("failed to load image '{}'", .path.display())]
    ImageLoad {
        /// Path of the image.
        path: PathBuf,
        /// The underlying decoder error.
        #[source]
        source: image::ImageError,
    },

    /// A crop could not be encoded or written.
    #[error("failed to save image '{}'", .path.display())]
    ImageSave {
        /// Destination path.
        path: PathBuf,
        /// The underlying encoder error.
        #[source]
        source: image::ImageError,
    },

    /// The ALTO annotation is not well-formed XML.
    #[error("failed to parse annotation '{}'", .path.display())]
    XmlParse {
        /// Path of the annotation.
        path: PathBuf,
        /// The underlying parser error.
        #[source]
        source: roxmltree::Error,
    },

    /// IO error with the path that caused it.
    #[error("io error on '{}'", .path.display())]
    PathIo {
        /// The path being read or written.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Manifest serialization error.
    #[error("manifest serialization")]
    Manifest(#[from] serde_json::Error),

    /// Error occurred during a processing stage.
    #[error("{kind} failed: {context}")]
    Processing {
        /// The stage of processing where the error occurred.
        kind: ProcessingStage,
        /// Additional context about the error.
        context: String,
        /// The underlying error that caused this error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Error indicating a configuration problem.
    #[error("configuration: {message}")]
    ConfigError {
        /// A message describing the configuration error.
        message: String,
    },
}

impl From<crate::core::config::ConfigError> for ExtractError {
    /// Converts a ConfigError to ExtractError::ConfigError.
    fn from(error: crate::core::config::ConfigError) -> Self {
        Self::ConfigError {
            message: error.to_string(),
        }
    }
}

impl ExtractError {
    /// Returns the processing stage this error belongs to.
    pub fn stage(&self) -> ProcessingStage {
        match self {
            Self::MissingImage { .. } | Self::ImageLoad { .. } => ProcessingStage::ImageLoad,
            Self::XmlParse { .. } => ProcessingStage::AnnotationParse,
            Self::ImageSave { .. } => ProcessingStage::Persist,
            Self::Manifest(_) => ProcessingStage::Manifest,
            Self::Processing { kind, .. } => *kind,
            Self::PathIo { .. } | Self::ConfigError { .. } => ProcessingStage::Generic,
        }
    }

    /// Renders the error together with its source chain on one line.
    pub fn chain_message(&self) -> String {
        let mut message = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(err) = source {
            message.push_str(": ");
            message.push_str(&err.to_string());
            source = err.source();
        }
        message
    }
}
