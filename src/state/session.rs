//! The open document and its dirty/clean lifecycle.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use labelview_file::{LabelRecord, Rgba, Shape};
use serde_json::{Map, Value};

use crate::constants::{DEFAULT_FILL_COLOR, DEFAULT_LINE_COLOR};
use crate::data::Bitmap;

/// Sidecar path for `image`: same stem with `extension`, relocated into
/// `output_dir` (file name only) when one is configured.
pub fn sidecar_path_for(image: &Path, extension: &str, output_dir: Option<&Path>) -> PathBuf {
    let candidate = image.with_extension(extension);
    match (output_dir, candidate.file_name()) {
        (Some(dir), Some(name)) => dir.join(name),
        _ => candidate,
    }
}

/// Everything a successful load produces, applied to the session in one step.
#[derive(Debug)]
pub struct LoadedDocument {
    /// Path the user asked to open
    pub filename: PathBuf,
    /// Path of the image actually decoded
    pub image_path: PathBuf,
    /// Encoded image bytes, kept for saving with embedded data
    pub image_data: Vec<u8>,
    pub image: Bitmap,
    /// Sidecar contents, if a sidecar was found (its `image_data` is moved out)
    pub label: Option<LabelRecord>,
}

/// State of the currently open document.
///
/// `image` is `Some` exactly when `filename` is; both are set together by
/// [`Session::install`] and cleared together by [`Session::reset`].
#[derive(Debug)]
pub struct Session {
    filename: Option<PathBuf>,
    image_path: Option<PathBuf>,
    image_data: Vec<u8>,
    image: Option<Bitmap>,
    label: Option<LabelRecord>,
    shapes: Vec<Shape>,
    flags: BTreeMap<String, bool>,
    line_color: Rgba,
    fill_color: Rgba,
    other_data: Map<String, Value>,
    dirty: bool,
    output_dir: Option<PathBuf>,
}

impl Session {
    /// An empty session writing sidecars to `output_dir` (or next to images).
    pub fn new(output_dir: Option<PathBuf>) -> Self {
        Self {
            filename: None,
            image_path: None,
            image_data: Vec::new(),
            image: None,
            label: None,
            shapes: Vec::new(),
            flags: BTreeMap::new(),
            line_color: DEFAULT_LINE_COLOR,
            fill_color: DEFAULT_FILL_COLOR,
            other_data: Map::new(),
            dirty: false,
            output_dir,
        }
    }

    /// Drop the document. The output directory survives.
    pub fn reset(&mut self) {
        *self = Self::new(self.output_dir.take());
    }

    /// Apply a completed load.
    ///
    /// Colors from the sidecar replace the defaults only when present.
    pub fn install(&mut self, doc: LoadedDocument) {
        self.reset();
        self.filename = Some(doc.filename);
        self.image_path = Some(doc.image_path);
        self.image_data = doc.image_data;
        self.image = Some(doc.image);

        if let Some(label) = &doc.label {
            self.shapes = label.shapes.clone();
            self.flags = label.flags.clone();
            if let Some(color) = label.line_color {
                self.line_color = color;
            }
            if let Some(color) = label.fill_color {
                self.fill_color = color;
            }
            self.other_data = label.other_data.clone();
        }
        self.label = doc.label;
    }

    pub fn is_loaded(&self) -> bool {
        self.image.is_some()
    }

    pub fn filename(&self) -> Option<&Path> {
        self.filename.as_deref()
    }

    pub fn image_path(&self) -> Option<&Path> {
        self.image_path.as_deref()
    }

    pub fn image(&self) -> Option<&Bitmap> {
        self.image.as_ref()
    }

    /// The sidecar record as loaded, if the document had one.
    pub fn label(&self) -> Option<&LabelRecord> {
        self.label.as_ref()
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn set_shapes(&mut self, shapes: Vec<Shape>) {
        self.shapes = shapes;
    }

    /// Move the shapes out, leaving none.
    pub fn take_shapes(&mut self) -> Vec<Shape> {
        std::mem::take(&mut self.shapes)
    }

    pub fn flags(&self) -> &BTreeMap<String, bool> {
        &self.flags
    }

    pub fn line_color(&self) -> Rgba {
        self.line_color
    }

    pub fn fill_color(&self) -> Rgba {
        self.fill_color
    }

    pub fn other_data(&self) -> &Map<String, Value> {
        &self.other_data
    }

    pub fn output_dir(&self) -> Option<&Path> {
        self.output_dir.as_deref()
    }

    /// Unsaved changes exist. Always false with no document.
    pub fn is_dirty(&self) -> bool {
        self.dirty && self.is_loaded()
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Window title: `"<app> - <file>"`, with a trailing `*` while dirty.
    pub fn title(&self, app_name: &str) -> String {
        match &self.filename {
            Some(filename) if self.is_dirty() => {
                format!("{} - {}*", app_name, filename.display())
            }
            Some(filename) => format!("{} - {}", app_name, filename.display()),
            None => app_name.to_string(),
        }
    }

    /// Sidecar path for the open document.
    pub fn sidecar_path(&self, extension: &str) -> Option<PathBuf> {
        self.filename
            .as_deref()
            .map(|f| sidecar_path_for(f, extension, self.output_dir()))
    }

    /// Snapshot the document as a record to be written at `sidecar`.
    ///
    /// The image path is stored relative to the sidecar's directory when the
    /// image lives below it. Colors are written only if the loaded sidecar
    /// had them.
    pub fn to_record(&self, sidecar: &Path) -> Option<LabelRecord> {
        let image_path = self.image_path.as_deref()?;
        let base = sidecar.parent().unwrap_or_else(|| Path::new(""));
        let absolute = |p: &Path| std::path::absolute(p).unwrap_or_else(|_| p.to_path_buf());
        let image_abs = absolute(image_path);
        let relative = image_abs
            .strip_prefix(absolute(base))
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| image_abs.clone());

        Some(LabelRecord {
            image_data: self.image_data.clone(),
            image_path: relative,
            shapes: self.shapes.clone(),
            flags: self.flags.clone(),
            line_color: self.label.as_ref().and_then(|l| l.line_color),
            fill_color: self.label.as_ref().and_then(|l| l.fill_color),
            other_data: self.other_data.clone(),
        })
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(None)
    }
}
