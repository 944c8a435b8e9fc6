//! Bounding box based image cropping utilities.

use crate::core::constants::{BACKGROUND_RGB, MASK_FILL};
use crate::core::errors::{ExtractError, ExtractResult, ImageProcessError, ProcessingStage};
use image::{GrayImage, Rgb, RgbImage, imageops};
use imageproc::rect::Rect;

/// Bounding box based image cropping utilities.
pub struct BBoxCrop;

impl BBoxCrop {
    /// Crops a masked region of an image onto a white background.
    ///
    /// The result has exactly the size of `rect`. Pixels whose mask value at
    /// the same page position is [`MASK_FILL`] are copied from `image`; every
    /// other pixel is [`BACKGROUND_RGB`].
    ///
    /// # Arguments
    ///
    /// * `image` - The source page image
    /// * `mask` - A page-sized mask, as produced by
    ///   [`fill_polygon_mask`](crate::processors::fill_polygon_mask)
    /// * `rect` - The region to crop, which must lie inside the page
    ///
    /// # Errors
    ///
    /// Returns a [`ProcessingStage::Crop`] error if the mask size differs from
    /// the image size or the rectangle is out of bounds.
    pub fn crop_masked(image: &RgbImage, mask: &GrayImage, rect: Rect) -> ExtractResult<RgbImage> {
        if mask.dimensions() != image.dimensions() {
            return Err(ExtractError::processing(
                ProcessingStage::Crop,
                "masked crop",
                ImageProcessError::MaskSizeMismatch {
                    mask_size: mask.dimensions(),
                    image_size: image.dimensions(),
                },
            ));
        }
        let (x, y) = Self::validate_rect(image, rect)?;

        let mut out = Self::slice_rgb_image(image, (x, y, rect.width(), rect.height()));
        for (dx, dy, pixel) in out.enumerate_pixels_mut() {
            if mask.get_pixel(x + dx, y + dy)[0] != MASK_FILL {
                *pixel = Rgb(BACKGROUND_RGB);
            }
        }
        Ok(out)
    }

    /// Checks that `rect` lies inside `image` and returns its unsigned origin.
    fn validate_rect(image: &RgbImage, rect: Rect) -> ExtractResult<(u32, u32)> {
        let out_of_bounds = || {
            ExtractError::processing(
                ProcessingStage::Crop,
                "masked crop",
                ImageProcessError::CropOutOfBounds {
                    x: rect.left(),
                    y: rect.top(),
                    width: rect.width(),
                    height: rect.height(),
                    image_size: image.dimensions(),
                },
            )
        };

        let x = u32::try_from(rect.left()).map_err(|_| out_of_bounds())?;
        let y = u32::try_from(rect.top()).map_err(|_| out_of_bounds())?;
        let fits_x = x
            .checked_add(rect.width())
            .is_some_and(|right| right <= image.width());
        let fits_y = y
            .checked_add(rect.height())
            .is_some_and(|bottom| bottom <= image.height());
        if !(fits_x && fits_y) {
            return Err(out_of_bounds());
        }
        Ok((x, y))
    }

    /// Slices an RGB image based on coordinates given as (x, y, width, height).
    fn slice_rgb_image(img: &RgbImage, coords: (u32, u32, u32, u32)) -> RgbImage {
        let (x, y, width, height) = coords;
        // Use library-provided immutable crop (zero-copy view) and then materialize
        imageops::crop_imm(img, x, y, width, height).to_image()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processors::{Polygon, fill_polygon_mask};
    use image::ImageBuffer;

    fn create_test_image(width: u32, height: u32) -> RgbImage {
        let mut img = ImageBuffer::new(width, height);
        for y in 0..height {
            for x in 0..width {
                // Never pure white, so masked-out pixels are distinguishable
                let r = (x * 200 / width.max(1)) as u8;
                let g = (y * 200 / height.max(1)) as u8;
                let b = 128;
                img.put_pixel(x, y, Rgb([r, g, b]));
            }
        }
        img
    }

    #[test]
    fn test_crop_masked_square_keeps_all_pixels() {
        let img = create_test_image(40, 40);
        let polygon = Polygon::parse_points("10 10 20 10 20 20 10 20").unwrap();
        let mask = fill_polygon_mask(40, 40, &polygon);
        let rect = polygon.clipped_rect(40, 40).unwrap();

        let cropped = BBoxCrop::crop_masked(&img, &mask, rect).unwrap();

        assert_eq!(cropped.dimensions(), (10, 10));
        for (x, y, pixel) in cropped.enumerate_pixels() {
            assert_eq!(pixel, img.get_pixel(x + 10, y + 10));
        }
    }

    #[test]
    fn test_crop_masked_triangle_whitens_exterior() {
        let img = create_test_image(50, 50);
        let polygon = Polygon::parse_points("5 5 25 5 5 25").unwrap();
        let mask = fill_polygon_mask(50, 50, &polygon);
        let rect = polygon.clipped_rect(50, 50).unwrap();

        let cropped = BBoxCrop::crop_masked(&img, &mask, rect).unwrap();

        assert_eq!(cropped.dimensions(), (20, 20));
        for (x, y, pixel) in cropped.enumerate_pixels() {
            if mask.get_pixel(x + 5, y + 5)[0] == MASK_FILL {
                assert_eq!(pixel, img.get_pixel(x + 5, y + 5));
            } else {
                assert_eq!(pixel, &Rgb(BACKGROUND_RGB));
            }
        }
        assert_eq!(cropped.get_pixel(0, 0), img.get_pixel(5, 5));
        assert_eq!(cropped.get_pixel(19, 19), &Rgb(BACKGROUND_RGB));
    }

    #[test]
    fn test_crop_masked_rejects_mismatched_mask() {
        let img = create_test_image(20, 20);
        let mask = GrayImage::new(10, 10);
        let rect = Rect::at(0, 0).of_size(5, 5);

        let err = BBoxCrop::crop_masked(&img, &mask, rect).unwrap_err();
        assert_eq!(err.stage(), ProcessingStage::Crop);
        assert!(err.chain_message().contains("does not match image size 20x20"));
    }

    #[test]
    fn test_crop_masked_rejects_out_of_bounds_rect() {
        let img = create_test_image(20, 20);
        let mask = GrayImage::new(20, 20);

        let err = BBoxCrop::crop_masked(&img, &mask, Rect::at(15, 0).of_size(10, 5)).unwrap_err();
        assert!(err.chain_message().contains("out of bounds"));

        let err = BBoxCrop::crop_masked(&img, &mask, Rect::at(-1, 0).of_size(5, 5)).unwrap_err();
        assert_eq!(err.stage(), ProcessingStage::Crop);
    }

    #[test]
    fn test_slice_rgb_image() {
        let img = create_test_image(100, 100);

        let sliced = BBoxCrop::slice_rgb_image(&img, (10, 20, 40, 40));
        assert_eq!(sliced.width(), 40);
        assert_eq!(sliced.height(), 40);

        // Check that the pixel values are correctly copied
        assert_eq!(img.get_pixel(10, 20), sliced.get_pixel(0, 0));
    }
}
