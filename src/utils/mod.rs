//! Utility functions for the extraction pipeline.
//!
//! This module provides image loading and saving helpers, the masked
//! bounding-box crop, and logging setup.

pub mod bbox_crop;
pub mod image;

// Re-export image helpers
pub use self::image::{find_image, load_image, save_png};

// Re-export crop utilities
pub use bbox_crop::BBoxCrop;

/// Initializes the tracing subscriber for logging.
///
/// This function sets up the tracing subscriber with environment filter and formatting layer.
/// It's typically called at the start of an application to enable logging.
pub fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();
}
