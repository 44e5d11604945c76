//! Labelview - image and annotation viewer core
//!
//! Loads an image together with its JSON label sidecar, keeps track of
//! unsaved changes, and derives the canvas scale from the zoom mode. The
//! hosting window is abstracted behind the traits in [`frontend`].

pub mod config;
pub mod constants;
pub mod controller;
pub mod data;
pub mod error;
pub mod event;
pub mod frontend;
pub mod state;
pub mod zoom_math;

pub use config::AppConfig;
pub use controller::DocumentController;
pub use error::{GeometryError, LoadError, SaveError};
pub use event::{Event, Outcome};
pub use frontend::{Axis, DiscardChoice, Frontend, RenderSink, ScrollSurface, Shell};
pub use zoom_math::{Point, Size, ZoomMode};
