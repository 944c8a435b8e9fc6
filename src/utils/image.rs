//! Utility functions for locating, loading and saving images.

use crate::core::errors::{ExtractError, ExtractResult, ProcessingStage};
use image::{ImageFormat, RgbImage};
use std::path::{Path, PathBuf};

/// Finds the image belonging to a page basename.
///
/// Probes `<dir>/<basename>.<ext>` for each extension in order and returns the
/// first path that exists as a file.
///
/// # Arguments
///
/// * `dir` - Directory holding the page images
/// * `basename` - Page basename shared with the annotation file
/// * `extensions` - Extensions to try, without the leading dot
pub fn find_image<S: AsRef<str>>(dir: &Path, basename: &str, extensions: &[S]) -> Option<PathBuf> {
    extensions
        .iter()
        .map(|ext| dir.join(format!("{basename}.{}", ext.as_ref())))
        .find(|candidate| candidate.is_file())
}

/// Loads an image from a file path and converts it to RgbImage.
///
/// # Errors
///
/// Returns [`ExtractError::ImageLoad`] if the file cannot be opened or decoded.
pub fn load_image(path: &Path) -> ExtractResult<RgbImage> {
    let img = image::open(path).map_err(|source| ExtractError::ImageLoad {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(img.to_rgb8())
}

/// Writes an image as PNG, creating missing parent directories.
///
/// An existing file at `path` is overwritten. Every failure is reported at
/// [`ProcessingStage::Persist`].
pub fn save_png(image: &RgbImage, path: &Path) -> ExtractResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            ExtractError::processing(
                ProcessingStage::Persist,
                format!("creating '{}'", parent.display()),
                e,
            )
        })?;
    }
    image
        .save_with_format(path, ImageFormat::Png)
        .map_err(|source| ExtractError::ImageSave {
            path: path.to_path_buf(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;
    use tempfile::tempdir;

    #[test]
    fn test_find_image_respects_extension_order() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("page.png"), b"").unwrap();
        std::fs::write(dir.path().join("page.tif"), b"").unwrap();

        let found = find_image(dir.path(), "page", &["jpg", "jpeg", "png", "tif", "tiff"]);
        assert_eq!(found, Some(dir.path().join("page.png")));

        let found = find_image(dir.path(), "page", &["tif", "png"]);
        assert_eq!(found, Some(dir.path().join("page.tif")));
    }

    #[test]
    fn test_find_image_missing() {
        let dir = tempdir().unwrap();
        std::fs::create_dir(dir.path().join("page.jpg")).unwrap();

        assert_eq!(find_image(dir.path(), "page", &["jpg", "png"]), None);
    }

    #[test]
    fn test_load_image_reports_decode_failure() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"definitely not a png").unwrap();

        let err = load_image(&path).unwrap_err();
        assert!(matches!(err, ExtractError::ImageLoad { .. }));
        assert!(err.to_string().contains("broken.png"));
    }

    #[test]
    fn test_save_png_creates_parents_and_round_trips() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("page").join("L1.png");
        let image = RgbImage::from_pixel(7, 5, Rgb([10, 20, 30]));

        save_png(&image, &path).unwrap();

        let loaded = load_image(&path).unwrap();
        assert_eq!(loaded.dimensions(), (7, 5));
        assert_eq!(loaded.get_pixel(3, 2), &Rgb([10, 20, 30]));
    }

    #[test]
    fn test_save_png_unwritable_directory_is_persist_stage() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("P_0001");
        std::fs::write(&blocker, b"").unwrap();
        let image = RgbImage::from_pixel(2, 2, Rgb([0, 0, 0]));

        let err = save_png(&image, &blocker.join("L1.png")).unwrap_err();

        assert_eq!(err.stage(), ProcessingStage::Persist);
        assert!(err.chain_message().contains("P_0001"));
    }
}
