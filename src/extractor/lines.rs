//! Page and line extraction.

use super::result::{PageFailure, PageReport, RunSummary, SkippedLine};
use super::targets::Targets;
use crate::core::config::{ConfigValidator, ExtractConfig};
use crate::core::constants::CROP_EXTENSION;
use crate::core::errors::{ExtractError, ExtractResult, LineSkip, ProcessingStage};
use crate::domain::{AltoPage, LabelRecord, Manifest, TextLine};
use crate::processors::{Polygon, fill_polygon_mask};
use crate::utils::{BBoxCrop, find_image, load_image, save_png};
use image::RgbImage;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, trace, warn};

/// Outcome of extracting a single text line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    /// The crop was written and this record describes it.
    Extracted(LabelRecord),
    /// The line was dropped without output.
    Skipped(LineSkip),
}

/// Builder for [`LineExtractor`].
///
/// Starts from [`ExtractConfig::default`] or an existing configuration and
/// validates it in [`build`](Self::build).
#[derive(Debug, Clone, Default)]
pub struct LineExtractorBuilder {
    config: ExtractConfig,
}

impl LineExtractorBuilder {
    /// Creates a builder with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder from an existing configuration.
    pub fn from_config(config: ExtractConfig) -> Self {
        Self { config }
    }

    /// Sets the directory searched for page images.
    pub fn image_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config = self.config.with_image_dir(dir);
        self
    }

    /// Sets the root directory for crops.
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config = self.config.with_output_dir(dir);
        self
    }

    /// Sets the manifest path.
    pub fn manifest_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config = self.config.with_manifest_path(path);
        self
    }

    /// Sets the prefix written into manifest image paths.
    pub fn manifest_prefix(mut self, prefix: impl Into<PathBuf>) -> Self {
        self.config = self.config.with_manifest_prefix(Some(prefix.into()));
        self
    }

    /// Sets the ALTO namespace.
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.config = self.config.with_namespace(namespace);
        self
    }

    /// Sets the image extensions probed for each page, in priority order.
    pub fn image_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config = self.config.with_image_extensions(extensions);
        self
    }

    /// Sets the minimum width and height of an extracted region.
    pub fn min_region_size(mut self, size: u32) -> Self {
        self.config = self.config.with_min_region_size(size);
        self
    }

    /// Validates the configuration and builds the extractor.
    pub fn build(self) -> ExtractResult<LineExtractor> {
        self.config.validate()?;
        Ok(LineExtractor {
            config: self.config,
        })
    }
}

/// Extracts polygon-masked line crops and label records from ALTO pages.
///
/// Pages and lines are processed strictly in order on the calling thread.
#[derive(Debug, Clone)]
pub struct LineExtractor {
    config: ExtractConfig,
}

impl LineExtractor {
    /// Returns the validated configuration.
    pub fn config(&self) -> &ExtractConfig {
        &self.config
    }

    /// Processes every target and writes the manifest once at the end.
    ///
    /// Page-level errors (missing or undecodable image, malformed XML,
    /// unwritable crop) are logged and recorded in the summary; the run
    /// continues with the next page. The manifest is written even when no
    /// line was extracted.
    ///
    /// # Errors
    ///
    /// Fails only if the targets cannot be resolved or the manifest cannot be
    /// written.
    pub fn run(&self, targets: &Targets) -> ExtractResult<RunSummary> {
        let xml_files = targets.resolve()?;
        info!("Found {} annotation file(s)", xml_files.len());

        let mut manifest = Manifest::new();
        let mut summary = RunSummary::new(&self.config.manifest_path);

        for xml_path in &xml_files {
            match self.process_page(xml_path, &mut manifest) {
                Ok(report) => summary.pages.push(report),
                Err(err @ ExtractError::MissingImage { .. }) => {
                    warn!("{}", err);
                    summary
                        .failed_pages
                        .push(PageFailure::from_error(page_basename(xml_path), &err));
                }
                Err(err) => {
                    error!(
                        "Skipping page '{}': {}",
                        xml_path.display(),
                        err.chain_message()
                    );
                    summary
                        .failed_pages
                        .push(PageFailure::from_error(page_basename(xml_path), &err));
                }
            }
        }

        manifest.save(&self.config.manifest_path)?;
        summary.records_written = manifest.len();
        info!("Completed. {}", summary);
        Ok(summary)
    }

    /// Processes one page and appends its records to `manifest`.
    ///
    /// The page's records are appended together, after every line of the page
    /// has been handled; a page that fails leaves `manifest` untouched.
    pub fn process_page(&self, xml_path: &Path, manifest: &mut Manifest) -> ExtractResult<PageReport> {
        let basename = page_basename(xml_path);

        let image_path =
            find_image(&self.config.image_dir, &basename, &self.config.image_extensions)
                .ok_or_else(|| ExtractError::MissingImage {
                    basename: basename.clone(),
                    searched: self.config.image_extensions.clone(),
                })?;
        let image = load_image(&image_path)?;
        let page = AltoPage::from_file(xml_path, &self.config.namespace)?;

        let out_dir = self.config.output_dir.join(&basename);
        std::fs::create_dir_all(&out_dir).map_err(|e| {
            ExtractError::processing(
                ProcessingStage::Persist,
                format!("creating '{}'", out_dir.display()),
                e,
            )
        })?;

        info!("Processing {}: {} lines", basename, page.len());

        let mut report = PageReport::new(&basename, page.len());
        let mut page_records = Vec::new();
        for line in &page.lines {
            match self.extract_line(&image, line, &out_dir, &basename)? {
                LineOutcome::Extracted(record) => {
                    debug!("Line {} | Text: {}", line.label, record.text);
                    page_records.push(record);
                }
                LineOutcome::Skipped(reason) => {
                    match &reason {
                        LineSkip::MalformedPolygon(_) => {
                            warn!("{}: skipping line {}: {}", basename, line.label, reason)
                        }
                        LineSkip::MissingPolygon => {
                            debug!("{}: skipping line {}: {}", basename, line.label, reason)
                        }
                        LineSkip::DegenerateRegion { .. } => {
                            trace!("{}: skipping line {}: {}", basename, line.label, reason)
                        }
                    }
                    report.skipped.push(SkippedLine {
                        label: line.label.clone(),
                        reason,
                    });
                }
            }
        }

        report.extracted = page_records.len();
        info!("Saved {} crops and labels for {}", report.extracted, basename);
        manifest.extend_page(page_records);
        Ok(report)
    }

    /// Extracts one text line from a decoded page.
    ///
    /// On success the crop has been written to `<out_dir>/<label>.png` before
    /// the record is returned.
    ///
    /// # Errors
    ///
    /// Only failures to crop or write the image are errors; lines without a
    /// usable polygon are reported as [`LineOutcome::Skipped`].
    pub fn extract_line(
        &self,
        image: &RgbImage,
        line: &TextLine,
        out_dir: &Path,
        basename: &str,
    ) -> ExtractResult<LineOutcome> {
        let Some(points) = line.polygon_points.as_deref() else {
            return Ok(LineOutcome::Skipped(LineSkip::MissingPolygon));
        };
        let polygon = match Polygon::parse_points(points) {
            Ok(polygon) => polygon,
            Err(err) => return Ok(LineOutcome::Skipped(err.into())),
        };

        let (width, height) = image.dimensions();
        let min_size = self.config.min_region_size;
        let rect = match polygon.clipped_rect(width, height) {
            Some(rect) if rect.width() >= min_size && rect.height() >= min_size => rect,
            other => {
                let (width, height) = other.map_or((0, 0), |r| (r.width(), r.height()));
                return Ok(LineOutcome::Skipped(LineSkip::DegenerateRegion {
                    width,
                    height,
                }));
            }
        };

        let mask = fill_polygon_mask(width, height, &polygon);
        let crop = BBoxCrop::crop_masked(image, &mask, rect)?;

        let file_name = format!("{}.{}", line.label, CROP_EXTENSION);
        save_png(&crop, &out_dir.join(&file_name))?;

        Ok(LineOutcome::Extracted(LabelRecord::new(
            line.transcription.clone(),
            self.manifest_image_path(basename, &file_name),
        )))
    }

    /// Path recorded in the manifest for a crop.
    fn manifest_image_path(&self, basename: &str, file_name: &str) -> String {
        let root = self
            .config
            .manifest_prefix
            .as_deref()
            .unwrap_or(&self.config.output_dir);
        root.join(basename)
            .join(file_name)
            .to_string_lossy()
            .into_owned()
    }
}

/// The basename shared by a page's annotation and image.
fn page_basename(xml_path: &Path) -> String {
    xml_path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}
