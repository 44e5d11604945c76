//! Reading and writing label files.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::LabelFileError;
use crate::shape::{Rgba, Shape};

/// On-disk layout of a label file.
///
/// Keys not listed here are collected into `other` and written back as-is.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawLabelFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    version: Option<String>,

    #[serde(default)]
    flags: BTreeMap<String, bool>,

    #[serde(default)]
    shapes: Vec<Shape>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    line_color: Option<Rgba>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    fill_color: Option<Rgba>,

    image_path: String,

    #[serde(default)]
    image_data: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    image_height: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    image_width: Option<u32>,

    #[serde(flatten)]
    other: Map<String, Value>,
}

/// Decoded contents of a label file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LabelRecord {
    /// Raw (still encoded) image bytes, embedded or read from `image_path`.
    pub image_data: Vec<u8>,
    /// Image path exactly as stored, usually relative to the label file.
    pub image_path: PathBuf,
    /// Annotation shapes
    pub shapes: Vec<Shape>,
    /// Image-level flags
    pub flags: BTreeMap<String, bool>,
    /// Default line color, if the file sets one
    pub line_color: Option<Rgba>,
    /// Default fill color, if the file sets one
    pub fill_color: Option<Rgba>,
    /// Any other top-level keys, passed through untouched
    pub other_data: Map<String, Value>,
}

/// Options controlling how a record is written.
#[derive(Debug, Clone, Copy, Default)]
pub struct SaveOptions {
    /// Embed the image bytes as base64 in `imageData`.
    pub store_image_data: bool,
    /// Image dimensions (width, height) to record alongside the shapes.
    pub image_size: Option<(u32, u32)>,
}

/// The JSON label file format.
pub struct LabelFile;

impl LabelFile {
    /// Suffix appended to the image stem to form the sidecar name.
    pub const SUFFIX: &'static str = ".json";

    /// Extension (without the dot) of label files.
    pub const EXTENSION: &'static str = "json";

    /// Format version written into saved files.
    pub const VERSION: &'static str = env!("CARGO_PKG_VERSION");

    /// Check whether a path names a label file, by extension only.
    pub fn is_label_file(path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(Self::EXTENSION))
    }

    /// Load a label file.
    ///
    /// When the file has no embedded image data, the image is read from
    /// `imagePath` resolved against the label file's directory.
    pub fn load(path: &Path) -> Result<LabelRecord, LabelFileError> {
        if !Self::is_label_file(path) {
            return Err(LabelFileError::NotALabelFile {
                path: path.to_path_buf(),
            });
        }

        let bytes = std::fs::read(path).map_err(|e| LabelFileError::io(path, e))?;
        let raw: RawLabelFile = serde_json::from_slice(&bytes)?;
        let image_path = PathBuf::from(&raw.image_path);

        let image_data = match raw.image_data.as_deref() {
            Some(encoded) if !encoded.is_empty() => STANDARD.decode(encoded)?,
            _ => {
                let base = path.parent().unwrap_or_else(|| Path::new(""));
                let resolved = base.join(&image_path);
                std::fs::read(&resolved).map_err(|source| LabelFileError::MissingImage {
                    path: resolved,
                    source,
                })?
            }
        };

        log::debug!(
            "Loaded label file {:?}: {} shapes, image {:?} ({} bytes)",
            path,
            raw.shapes.len(),
            image_path,
            image_data.len()
        );

        Ok(LabelRecord {
            image_data,
            image_path,
            shapes: raw.shapes,
            flags: raw.flags,
            line_color: raw.line_color,
            fill_color: raw.fill_color,
            other_data: raw.other,
        })
    }

    /// Write a record to `path`, creating parent directories as needed.
    pub fn save(
        path: &Path,
        record: &LabelRecord,
        options: SaveOptions,
    ) -> Result<(), LabelFileError> {
        if !Self::is_label_file(path) {
            return Err(LabelFileError::NotALabelFile {
                path: path.to_path_buf(),
            });
        }

        let raw = RawLabelFile {
            version: Some(Self::VERSION.to_string()),
            flags: record.flags.clone(),
            shapes: record.shapes.clone(),
            line_color: record.line_color,
            fill_color: record.fill_color,
            image_path: record.image_path.to_string_lossy().into_owned(),
            image_data: options
                .store_image_data
                .then(|| STANDARD.encode(&record.image_data)),
            image_width: options.image_size.map(|(w, _)| w),
            image_height: options.image_size.map(|(_, h)| h),
            other: record.other_data.clone(),
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| LabelFileError::io(parent, e))?;
        }

        let json = serde_json::to_string_pretty(&raw)?;
        std::fs::write(path, json).map_err(|e| LabelFileError::io(path, e))?;
        log::info!("Saved {} shapes to {:?}", record.shapes.len(), path);
        Ok(())
    }
}
