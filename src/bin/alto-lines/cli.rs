//! CLI mode for line extraction.

use alto_lines::core::ExtractConfig;
use alto_lines::extractor::{LineExtractorBuilder, RunSummary, Targets};
use std::time::Instant;
use tracing::info;

/// Runs an extraction over `targets` and prints the summary.
pub fn process_targets(
    targets: &Targets,
    config: ExtractConfig,
    output_format: &str,
) -> Result<RunSummary, Box<dyn std::error::Error + Send + Sync>> {
    let start = Instant::now();

    let extractor = LineExtractorBuilder::from_config(config).build()?;
    let summary = extractor.run(targets)?;

    let elapsed = start.elapsed();
    info!("Extraction finished in {:.2}ms", elapsed.as_secs_f64() * 1000.0);

    output_result(&summary, output_format)?;
    Ok(summary)
}

/// Output the run summary in the specified format
fn output_result(
    summary: &RunSummary,
    format: &str,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(summary)?);
        }
        _ => {
            println!("\n=== Extraction Results ===");
            println!("Pages processed: {}", summary.pages.len());
            println!("Lines extracted: {}", summary.records_written);
            println!("Lines skipped: {}", summary.skipped_lines());
            println!("Manifest: {}", summary.manifest_path.display());

            if !summary.failed_pages.is_empty() {
                println!();
                println!("--- Failed Pages ---");
                for failure in &summary.failed_pages {
                    println!("[{}] {}: {}", failure.stage, failure.basename, failure.error);
                }
            }
        }
    }
    Ok(())
}
