//! Input events and their outcomes.
//!
//! Every user action reaches the controller as one [`Event`] through
//! [`DocumentController::handle`](crate::DocumentController::handle).

use std::path::PathBuf;

use crate::frontend::Axis;
use crate::zoom_math::{Point, Size};

/// A discrete input to the document controller.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Open a path directly. `None` reopens the last-session path.
    Open(Option<PathBuf>),
    /// Ask the shell for a file, then open it.
    OpenDialog,
    /// Open an entry of the recent-files list.
    OpenRecent(PathBuf),
    /// Write the current annotations to the sidecar.
    Save,
    /// Close the window / quit.
    Close,
    /// The scroll area's viewport changed size.
    Resized(Size),
    /// Mouse wheel over the canvas.
    Wheel {
        delta: f64,
        position: Point,
        axis: Axis,
        /// Zoom modifier (Ctrl) held: zoom instead of scroll
        zoom: bool,
    },
    /// Set the zoom percentage directly.
    SetZoom(i32),
    /// Multiply the zoom percentage.
    AddZoom(f64),
    /// Zoom to 100%.
    ZoomOriginal,
    /// Toggle fit-to-window.
    FitWindow(bool),
    /// Toggle fit-to-width.
    FitWidth(bool),
    /// The annotations were edited in memory.
    Modified,
}

/// What happened to an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Applied (or nothing to do)
    Handled,
    /// The user cancelled
    Aborted,
    /// Failed; the error was reported through the shell
    Failed,
    /// The window may close
    Quit,
}
