//! Traits the document controller drives.
//!
//! The controller never talks to a toolkit directly. A frontend (a real
//! window, the console shell in `main.rs`, or a test recorder) implements
//! these three traits and gets [`Frontend`] for free.

use std::path::{Path, PathBuf};

use crate::data::Bitmap;

/// Scroll-bar axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Answer to the unsaved-changes question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscardChoice {
    /// Save, then continue
    Save,
    /// Continue without saving
    Discard,
    /// Stay on the current document
    Cancel,
}

/// Receives the image and scale to paint. Read-only consumer of both.
pub trait RenderSink {
    /// New scale as a whole percentage.
    fn set_scale(&mut self, percent: i32);
    /// New image to paint.
    fn set_image(&mut self, image: &Bitmap);
    /// Repaint with the current image and scale.
    fn repaint(&mut self);
    /// Drop the image; nothing is painted until the next `set_image`.
    fn clear(&mut self);
}

/// The scroll area hosting the canvas.
pub trait ScrollSurface {
    fn offset(&self, axis: Axis) -> f64;
    fn set_offset(&mut self, axis: Axis, value: f64);
    /// Size of one scroll-bar step in pixels.
    fn single_step(&self, axis: Axis) -> f64;
}

/// Window-level interaction: prompts, status and chrome.
pub trait Shell {
    /// Ask what to do with unsaved changes to `filename`.
    fn confirm_discard(&mut self, filename: &str) -> DiscardChoice;
    /// Ask for a file to open. `None` when the user cancels.
    fn choose_file(&mut self, start_dir: &Path, filter: &str) -> Option<PathBuf>;
    /// Show a blocking error message.
    fn report_error(&mut self, title: &str, message: &str);
    /// Show a transient status message.
    fn show_status(&mut self, message: &str);
    fn set_title(&mut self, title: &str);
    /// Enable or disable the actions that need a loaded document.
    fn set_actions_enabled(&mut self, enabled: bool);
}

/// Everything the controller needs from its host.
pub trait Frontend: RenderSink + ScrollSurface + Shell {}

impl<T: RenderSink + ScrollSurface + Shell> Frontend for T {}
