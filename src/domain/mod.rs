//! Domain types of the extractor.
//!
//! * [`alto`] - text lines read from ALTO page annotations
//! * [`manifest`] - label records and the JSON manifest

pub mod alto;
pub mod manifest;

pub use alto::{AltoPage, TextLine};
pub use manifest::{LabelRecord, Manifest};
