//! Global constants for the labelview core

/// Application name, used in the window title and status messages
pub const APP_NAME: &str = "Labelview";

/// Pixels shaved off the container in fit modes so no scrollbars appear
pub const FIT_EPSILON: f64 = 2.0;

/// Scale factor for one zoom-in notch
pub const ZOOM_IN_FACTOR: f64 = 1.1;

/// Scale factor for one zoom-out notch
pub const ZOOM_OUT_FACTOR: f64 = 0.9;

/// Zoom percentage for "original size"
pub const ORIGINAL_ZOOM_PERCENT: i32 = 100;

/// Wheel delta to scroll-step multiplier (natural scrolling, hence the sign)
pub const SCROLL_STEP_FACTOR: f64 = -0.1;

/// Maximum number of entries in the recent-files list
pub const MAX_RECENT_FILES: usize = 7;

/// Default annotation line color (RGBA)
pub const DEFAULT_LINE_COLOR: [u8; 4] = [0, 255, 0, 128];

/// Default annotation fill color (RGBA)
pub const DEFAULT_FILL_COLOR: [u8; 4] = [255, 0, 0, 128];
