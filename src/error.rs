//! Error types for document loading, saving and view geometry.

use std::path::PathBuf;

use labelview_file::LabelFileError;
use thiserror::Error;

use crate::zoom_math::Size;

/// Errors that abort a document load.
///
/// Every variant names the path involved so the message can be shown as-is.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The requested path does not exist.
    #[error("No such file: {path:?}")]
    FileNotFound {
        /// Path that was requested
        path: PathBuf,
    },

    /// A sidecar label file exists but could not be loaded.
    #[error("Error opening file {path:?}: {source}")]
    LabelFile {
        /// Path of the sidecar file
        path: PathBuf,
        /// Underlying codec error
        source: LabelFileError,
    },

    /// The image bytes could not be read from disk.
    #[error("Error reading {path:?}: {source}")]
    ImageRead {
        /// Path of the image
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The bytes do not decode to a non-empty image.
    #[error("Error opening file {path:?}: make sure it is a valid image file. Supported image formats: {}", .formats.join(","))]
    InvalidImage {
        /// Path of the image that failed to decode
        path: PathBuf,
        /// Extensions the decoder understands
        formats: Vec<String>,
    },
}

impl LoadError {
    /// Create an invalid image error.
    pub fn invalid_image(path: impl Into<PathBuf>, formats: Vec<String>) -> Self {
        Self::InvalidImage {
            path: path.into(),
            formats,
        }
    }
}

/// Errors that abort a save.
#[derive(Error, Debug)]
pub enum SaveError {
    /// Nothing is loaded, so there is nothing to save.
    #[error("No document is open")]
    NoDocument,

    /// The codec failed to write the sidecar.
    #[error("Error saving label data to {path:?}: {source}")]
    LabelFile {
        /// Sidecar path being written
        path: PathBuf,
        /// Underlying codec error
        source: LabelFileError,
    },
}

/// Fit-mode scale computation was given unusable geometry.
///
/// Callers must not recompute a fit scale before an image is loaded and the
/// container has a real size.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum GeometryError {
    /// Container (after the fit epsilon) or image has no area.
    #[error("Degenerate geometry: container {container:?}, image {image:?}")]
    Degenerate {
        /// Container size as given
        container: Size,
        /// Image size as given
        image: Size,
    },
}
