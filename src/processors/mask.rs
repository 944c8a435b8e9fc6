//! Polygon mask rasterization.

use crate::core::constants::MASK_FILL;
use crate::processors::geometry::{Polygon, ScanlineBuffer};
use image::{GrayImage, Luma};

/// Rasterizes a polygon into a page-sized binary mask.
///
/// The mask starts at 0 everywhere and every pixel whose centre lies inside
/// the polygon (even-odd rule) is set to [`MASK_FILL`]. Vertices may lie
/// outside the page; only in-page pixels are written.
pub fn fill_polygon_mask(width: u32, height: u32, polygon: &Polygon) -> GrayImage {
    let mut mask = GrayImage::new(width, height);
    fill_polygon(&mut mask, polygon, MASK_FILL);
    mask
}

/// Fills the interior of `polygon` in `mask` with `value`.
///
/// Pixel `(x, y)` is filled when `(x + 0.5, y + 0.5)` is inside the polygon.
/// Polygons with fewer than three vertices fill nothing.
pub fn fill_polygon(mask: &mut GrayImage, polygon: &Polygon, value: u8) {
    if polygon.points.len() < 3 || mask.width() == 0 || mask.height() == 0 {
        return;
    }

    let row_start = first_pixel_at_or_after(polygon.y_min(), mask.height());
    let row_end = first_pixel_at_or_after(polygon.y_max(), mask.height());

    let mut buffer = ScanlineBuffer::new(polygon.points.len());
    for row in row_start..row_end {
        let y = row as f32 + 0.5;
        for span in buffer.intersections_at(y, polygon).chunks_exact(2) {
            let x_start = first_pixel_at_or_after(span[0], mask.width());
            let x_end = first_pixel_at_or_after(span[1], mask.width());
            for x in x_start..x_end {
                mask.put_pixel(x, row, Luma([value]));
            }
        }
    }
}

/// Index of the first pixel whose centre is at or after `coord`, clamped to `[0, limit]`.
fn first_pixel_at_or_after(coord: f32, limit: u32) -> u32 {
    let index = (coord - 0.5).ceil();
    if index <= 0.0 {
        0
    } else {
        (index as u32).min(limit)
    }
}
