//! Constants used throughout the extraction pipeline.
//!
//! This module defines the default values shared by the configuration layer,
//! the ALTO reader and the crop writer.

/// The XML namespace of ALTO v4 documents.
///
/// Every element query against a page annotation is qualified with a namespace;
/// this is the one used unless the configuration overrides it.
pub const ALTO_V4_NAMESPACE: &str = "http://www.loc.gov/standards/alto/ns-v4#";

/// Image extensions probed for a page basename, in priority order.
///
/// The first existing file wins.
pub const DEFAULT_IMAGE_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "tif", "tiff"];

/// The minimum width and height, in pixels, of a line's bounding rectangle.
///
/// Lines with a smaller rectangle on either axis are dropped without output.
pub const DEFAULT_MIN_REGION_SIZE: u32 = 5;

/// Value written into the polygon mask for pixels inside a line polygon.
pub const MASK_FILL: u8 = 255;

/// Pixel value used for everything outside the polygon in a crop.
pub const BACKGROUND_RGB: [u8; 3] = [255, 255, 255];

/// File extension of written line crops.
pub const CROP_EXTENSION: &str = "png";

/// Default directory receiving the per-page crop folders.
pub const DEFAULT_OUTPUT_DIR: &str = "images";

/// Default location of the label manifest.
pub const DEFAULT_MANIFEST_PATH: &str = "labels.json";

/// Prefix of the positional label given to lines without an `ID` attribute.
pub const FALLBACK_LINE_PREFIX: &str = "line";
