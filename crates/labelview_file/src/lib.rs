//! Sidecar annotation file codec for labelview.
//!
//! A label file is a JSON document that lives next to an image (same stem,
//! `.json` suffix) or in a configured output directory. It carries the
//! shapes, flags and default colors of the annotation, and optionally the
//! image bytes themselves encoded as base64.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use labelview_file::LabelFile;
//!
//! if LabelFile::is_label_file(path) {
//!     let record = LabelFile::load(path)?;
//!     println!("{} shapes for {:?}", record.shapes.len(), record.image_path);
//! }
//! ```

mod error;
mod label_file;
mod shape;

pub use error::LabelFileError;
pub use label_file::{LabelFile, LabelRecord, SaveOptions};
pub use shape::{Rgba, Shape};
