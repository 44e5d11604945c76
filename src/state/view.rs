//! View-transform state: zoom mode and the active scale.

use crate::constants::ORIGINAL_ZOOM_PERCENT;
use crate::error::GeometryError;
use crate::zoom_math::{self, Point, Size, ZoomMode};

/// Scroll adjustment requested after a zoom step, in pixels per axis.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollShift {
    pub dx: f64,
    pub dy: f64,
}

/// Zoom mode and scale for the canvas.
///
/// `scale_percent` is the single source of truth for the active scale. In the
/// fit modes it is rederived whenever the container or image changes; in
/// manual mode only explicit zoom requests change it.
#[derive(Debug, Clone)]
pub struct ViewTransform {
    mode: ZoomMode,
    scale_percent: i32,
    container: Size,
    /// An initial fit was requested before the container had a size.
    pending_initial_fit: bool,
}

impl ViewTransform {
    /// Fit-to-window at 100% with no container yet.
    pub fn new() -> Self {
        Self {
            mode: ZoomMode::FitWindow,
            scale_percent: ORIGINAL_ZOOM_PERCENT,
            container: Size::default(),
            pending_initial_fit: false,
        }
    }

    pub fn mode(&self) -> ZoomMode {
        self.mode
    }

    pub fn scale_percent(&self) -> i32 {
        self.scale_percent
    }

    /// Pixel-to-view multiplier.
    pub fn scale(&self) -> f64 {
        f64::from(self.scale_percent) / 100.0
    }

    pub fn container(&self) -> Size {
        self.container
    }

    /// Whether the fit-to-window toggle should show as checked.
    pub fn fit_window_checked(&self) -> bool {
        self.mode == ZoomMode::FitWindow
    }

    /// Whether the fit-to-width toggle should show as checked.
    pub fn fit_width_checked(&self) -> bool {
        self.mode == ZoomMode::FitWidth
    }

    /// Record a new container size. Does not recompute.
    pub fn set_container(&mut self, size: Size) {
        self.container = size;
    }

    /// Switch to manual mode at `percent`.
    ///
    /// The value is taken as-is; clamping belongs to the zoom control. Any
    /// deferred initial fit is dropped.
    pub fn set_manual(&mut self, percent: i32) {
        self.pending_initial_fit = false;
        self.mode = ZoomMode::Manual;
        self.scale_percent = percent;
        log::trace!("Manual zoom: {}%", percent);
    }

    /// Multiply the current scale by `factor` and switch to manual mode.
    pub fn add_zoom(&mut self, factor: f64) {
        let percent = (f64::from(self.scale_percent) * factor).round() as i32;
        self.set_manual(percent);
    }

    /// Enable or disable fit-to-window, then recompute for `image` if given.
    ///
    /// Enabling unchecks fit-to-width; disabling falls back to manual.
    pub fn set_fit_window(
        &mut self,
        enabled: bool,
        image: Option<Size>,
    ) -> Result<i32, GeometryError> {
        self.pending_initial_fit = false;
        self.mode = if enabled {
            ZoomMode::FitWindow
        } else {
            ZoomMode::Manual
        };
        self.recompute_for(image)
    }

    /// Enable or disable fit-to-width, then recompute for `image` if given.
    pub fn set_fit_width(
        &mut self,
        enabled: bool,
        image: Option<Size>,
    ) -> Result<i32, GeometryError> {
        self.pending_initial_fit = false;
        self.mode = if enabled {
            ZoomMode::FitWidth
        } else {
            ZoomMode::Manual
        };
        self.recompute_for(image)
    }

    fn recompute_for(&mut self, image: Option<Size>) -> Result<i32, GeometryError> {
        match image {
            Some(image) => self.recompute(image),
            None => Ok(self.scale_percent),
        }
    }

    /// Rederive the scale for the current mode.
    ///
    /// On error the stored scale is left unchanged.
    pub fn recompute(&mut self, image: Size) -> Result<i32, GeometryError> {
        let scale = zoom_math::scale_for(self.mode, self.container, image, self.scale())?;
        self.scale_percent = zoom_math::to_percent(scale);
        log::debug!(
            "Recomputed scale ({:?}, container {:?}, image {:?}): {}%",
            self.mode,
            self.container,
            image,
            self.scale_percent
        );
        Ok(self.scale_percent)
    }

    /// Scale for a freshly loaded image: always fit-to-window, whatever the mode.
    ///
    /// The mode itself is kept. If the container has no size yet the fit is
    /// deferred to the next [`ViewTransform::on_resize`].
    pub fn recompute_initial(&mut self, image: Size) -> Result<i32, GeometryError> {
        match zoom_math::fit_window_scale(self.container, image) {
            Ok(scale) => {
                self.pending_initial_fit = false;
                self.scale_percent = zoom_math::to_percent(scale);
                log::debug!("Initial fit for {:?}: {}%", image, self.scale_percent);
                Ok(self.scale_percent)
            }
            Err(e) if self.container.is_empty() => {
                log::debug!("Container not realized yet, deferring initial fit");
                self.pending_initial_fit = true;
                Err(e)
            }
            Err(e) => Err(e),
        }
    }

    /// React to a new container size.
    ///
    /// Returns the new scale if it changed or was recomputed, `None` in
    /// manual mode with no pending initial fit.
    pub fn on_resize(
        &mut self,
        container: Size,
        image: Option<Size>,
    ) -> Result<Option<i32>, GeometryError> {
        self.set_container(container);
        let Some(image) = image else {
            return Ok(None);
        };

        if self.pending_initial_fit {
            return self.recompute_initial(image).map(Some);
        }
        if self.mode == ZoomMode::Manual {
            return Ok(None);
        }
        self.recompute(image).map(Some)
    }

    /// Width of the image as painted at the current scale.
    pub fn rendered_width(&self, image: Size) -> f64 {
        (image.width * self.scale()).round()
    }

    /// One wheel notch of zoom around `pointer` (canvas coordinates).
    ///
    /// Switches to manual mode. The returned shift, if any, must be added to
    /// the scroll offsets so the content under the pointer stays put.
    pub fn on_zoom_request(
        &mut self,
        delta: f64,
        pointer: Point,
        image: Size,
    ) -> Option<ScrollShift> {
        let width_before = self.rendered_width(image);
        self.add_zoom(zoom_math::zoom_factor(delta));
        let width_after = self.rendered_width(image);

        if width_before <= 0.0 || width_before == width_after {
            return None;
        }

        let ratio = width_after / width_before;
        let shift = ScrollShift {
            dx: zoom_math::anchor_shift(pointer.x, ratio),
            dy: zoom_math::anchor_shift(pointer.y, ratio),
        };
        log::trace!("Zoom around {:?}: ratio {:.4}, shift {:?}", pointer, ratio, shift);
        Some(shift)
    }

    /// Scroll-bar offset change for a plain wheel delta.
    pub fn on_scroll_request(&self, delta: f64, single_step: f64) -> f64 {
        zoom_math::scroll_delta(delta, single_step)
    }
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::new()
    }
}
