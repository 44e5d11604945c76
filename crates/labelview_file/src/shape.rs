//! Annotation shapes as stored in label files.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// RGBA color as stored in label files.
pub type Rgba = [u8; 4];

fn default_shape_type() -> String {
    "polygon".to_string()
}

/// A single labelled shape.
///
/// Geometry is carried through untouched; keys this codec doesn't know about
/// (e.g. `group_id`) are preserved in `extra` so a load/save cycle is lossless.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    /// Label text
    pub label: String,

    /// Vertices in image pixel coordinates
    #[serde(default)]
    pub points: Vec<[f64; 2]>,

    /// Shape kind ("polygon", "rectangle", "point", ...)
    #[serde(default = "default_shape_type")]
    pub shape_type: String,

    /// Per-shape line color, overriding the file default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_color: Option<Rgba>,

    /// Per-shape fill color, overriding the file default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill_color: Option<Rgba>,

    /// Per-shape boolean flags
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub flags: BTreeMap<String, bool>,

    /// Unrecognized keys, kept verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Shape {
    /// Create a polygon shape with the given label and vertices.
    pub fn new(label: impl Into<String>, points: Vec<[f64; 2]>) -> Self {
        Self {
            label: label.into(),
            points,
            shape_type: default_shape_type(),
            line_color: None,
            fill_color: None,
            flags: BTreeMap::new(),
            extra: Map::new(),
        }
    }

    /// Set the shape kind.
    pub fn with_type(mut self, shape_type: impl Into<String>) -> Self {
        self.shape_type = shape_type.into();
        self
    }
}
