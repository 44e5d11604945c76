//! Collaborators that turn files into document data.
//!
//! This module provides:
//! - `ImageDecoder`: raw bytes to a `Bitmap` (`RasterDecoder` uses the `image` crate)
//! - `AnnotationLoader`: sidecar label files (`JsonLabelCodec` wraps `labelview_file`)
//!
//! Both are trait objects on the controller so tests and other frontends can
//! swap them out.

mod annotation;
mod decoder;

pub use annotation::{AnnotationLoader, JsonLabelCodec};
pub use decoder::{Bitmap, ImageDecoder, RasterDecoder};
