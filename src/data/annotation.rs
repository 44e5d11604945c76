//! Sidecar annotation loading.

use std::path::Path;

use labelview_file::{LabelFile, LabelFileError, LabelRecord, SaveOptions};

/// Reads and writes sidecar annotation files.
pub trait AnnotationLoader {
    /// Cheap format check; doesn't open the file.
    fn is_label_file(&self, path: &Path) -> bool;

    /// Extension of sidecar files, without the dot.
    fn extension(&self) -> &'static str;

    fn load(&self, path: &Path) -> Result<LabelRecord, LabelFileError>;

    fn save(
        &self,
        path: &Path,
        record: &LabelRecord,
        options: SaveOptions,
    ) -> Result<(), LabelFileError>;
}

/// The JSON label format from `labelview_file`.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonLabelCodec;

impl AnnotationLoader for JsonLabelCodec {
    fn is_label_file(&self, path: &Path) -> bool {
        LabelFile::is_label_file(path)
    }

    fn extension(&self) -> &'static str {
        LabelFile::EXTENSION
    }

    fn load(&self, path: &Path) -> Result<LabelRecord, LabelFileError> {
        LabelFile::load(path)
    }

    fn save(
        &self,
        path: &Path,
        record: &LabelRecord,
        options: SaveOptions,
    ) -> Result<(), LabelFileError> {
        LabelFile::save(path, record, options)
    }
}
