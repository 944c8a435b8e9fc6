//! Image processing components for line extraction.
//!
//! * [`geometry`] - points, polygons and bounding rectangles
//! * [`mask`] - polygon mask rasterization

pub mod geometry;
pub mod mask;

pub use geometry::{Point, Polygon};
pub use mask::{fill_polygon, fill_polygon_mask};
