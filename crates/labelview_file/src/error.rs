//! Error types for label file operations.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading or writing a label file.
#[derive(Error, Debug)]
pub enum LabelFileError {
    /// The label file itself could not be read or written.
    #[error("I/O error on {path:?}: {source}")]
    Io {
        /// Path of the label file
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The file is not valid label JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The embedded `imageData` field is not valid base64.
    #[error("Invalid embedded image data: {0}")]
    ImageData(#[from] base64::DecodeError),

    /// No embedded image data and the referenced image could not be read.
    #[error("Image {path:?} referenced by label file could not be read: {source}")]
    MissingImage {
        /// Resolved path of the referenced image
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The path does not carry the label file suffix.
    #[error("Not a label file: {path:?}")]
    NotALabelFile {
        /// The rejected path
        path: PathBuf,
    },
}

impl LabelFileError {
    /// Create an I/O error tied to a label file path.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
