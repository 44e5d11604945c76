//! Scale and zoom-to-cursor mathematics.
//!
//! Pure functions mapping container and image geometry to a view scale,
//! plus the scroll arithmetic that keeps the point under the cursor fixed
//! across a zoom step. Kept free of any state so it can be tested directly.

use crate::constants::{FIT_EPSILON, SCROLL_STEP_FACTOR, ZOOM_IN_FACTOR, ZOOM_OUT_FACTOR};
use crate::error::GeometryError;

/// Width and height in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    /// Create a new size.
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// True unless both dimensions are strictly positive (NaN counts as empty).
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

/// A position in view (canvas) pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Create a new point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// How the view scale is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ZoomMode {
    /// Whole image visible inside the container
    #[default]
    FitWindow,
    /// Image width matches container width
    FitWidth,
    /// Scale only changes on explicit request
    Manual,
}

/// Scale that fits the whole image inside the container.
///
/// The binding dimension is picked by comparing aspect ratios.
pub fn fit_window_scale(container: Size, image: Size) -> Result<f64, GeometryError> {
    let w1 = container.width - FIT_EPSILON;
    let h1 = container.height - FIT_EPSILON;
    if Size::new(w1, h1).is_empty() || image.is_empty() {
        return Err(GeometryError::Degenerate { container, image });
    }

    let a1 = w1 / h1;
    let a2 = image.width / image.height;
    Ok(if a2 >= a1 {
        w1 / image.width
    } else {
        h1 / image.height
    })
}

/// Scale that matches the image width to the container width.
pub fn fit_width_scale(container: Size, image: Size) -> Result<f64, GeometryError> {
    let w = container.width - FIT_EPSILON;
    if w.is_nan() || w <= 0.0 || image.is_empty() {
        return Err(GeometryError::Degenerate { container, image });
    }
    Ok(w / image.width)
}

/// Scale for `mode`. Manual returns `current` untouched and never fails.
pub fn scale_for(
    mode: ZoomMode,
    container: Size,
    image: Size,
    current: f64,
) -> Result<f64, GeometryError> {
    match mode {
        ZoomMode::FitWindow => fit_window_scale(container, image),
        ZoomMode::FitWidth => fit_width_scale(container, image),
        ZoomMode::Manual => Ok(current),
    }
}

/// Convert a fractional scale into a whole percentage.
pub fn to_percent(scale: f64) -> i32 {
    (scale * 100.0).round() as i32
}

/// Zoom factor for a wheel delta: one 10% step in the delta's direction.
pub fn zoom_factor(delta: f64) -> f64 {
    if delta < 0.0 {
        ZOOM_OUT_FACTOR
    } else {
        ZOOM_IN_FACTOR
    }
}

/// Scroll adjustment keeping `pointer` stationary when content grows by `ratio`.
pub fn anchor_shift(pointer: f64, ratio: f64) -> f64 {
    (pointer * ratio).round() - pointer
}

/// Scroll-bar offset change for a plain wheel delta.
pub fn scroll_delta(delta: f64, single_step: f64) -> f64 {
    single_step * delta * SCROLL_STEP_FACTOR
}
