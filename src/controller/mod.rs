//! Document session controller.
//!
//! Owns the [`Session`], the [`ViewTransform`] and the [`RecentFiles`] list,
//! and turns [`Event`]s into loads, saves, zoom changes and scroll requests
//! against a [`Frontend`].
//!
//! All entry points run to completion on the caller's thread; the controller
//! must not be re-entered while handling an event.

use std::path::{Path, PathBuf};

use labelview_file::SaveOptions;

use crate::config::{AppConfig, UserPreferences};
use crate::constants::ORIGINAL_ZOOM_PERCENT;
use crate::data::{AnnotationLoader, Bitmap, ImageDecoder, JsonLabelCodec, RasterDecoder};
use crate::error::{GeometryError, LoadError, SaveError};
use crate::event::{Event, Outcome};
use crate::frontend::{Axis, DiscardChoice, Frontend};
use crate::state::{LoadedDocument, RecentFiles, Session, ViewTransform, sidecar_path_for};
use crate::zoom_math::{Point, Size};

#[cfg(test)]
mod tests;

/// Drives one document window.
pub struct DocumentController {
    app_name: String,
    preferences: UserPreferences,
    session: Session,
    view: ViewTransform,
    recent: RecentFiles,
    decoder: Box<dyn ImageDecoder>,
    codec: Box<dyn AnnotationLoader>,
}

impl DocumentController {
    /// Controller with the stock image decoder and JSON label codec.
    pub fn new(config: &AppConfig) -> Self {
        Self::with_collaborators(config, Box::new(RasterDecoder), Box::new(JsonLabelCodec))
    }

    /// Controller with custom collaborators.
    pub fn with_collaborators(
        config: &AppConfig,
        decoder: Box<dyn ImageDecoder>,
        codec: Box<dyn AnnotationLoader>,
    ) -> Self {
        Self {
            app_name: config.app_name.clone(),
            preferences: config.preferences.clone(),
            session: Session::new(config.preferences.output_dir.clone()),
            view: ViewTransform::new(),
            recent: RecentFiles::from_paths(config.recent_files.iter().cloned()),
            decoder,
            codec,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn view(&self) -> &ViewTransform {
        &self.view
    }

    pub fn recent_files(&self) -> &RecentFiles {
        &self.recent
    }

    /// Recent entries worth showing right now.
    pub fn recent_menu(&self) -> Vec<PathBuf> {
        self.recent
            .list_for(self.session.filename())
            .map(Path::to_path_buf)
            .collect()
    }

    /// Write session-derived state back into `config` for persistence.
    pub fn store_into(&self, config: &mut AppConfig) {
        config.recent_files = self.recent.paths().to_vec();
        config.preferences.last_file = self.preferences.last_file.clone();
    }

    /// Greet and set the initial title.
    pub fn start(&mut self, ui: &mut dyn Frontend) {
        ui.set_title(&self.session.title(&self.app_name));
        ui.set_actions_enabled(false);
        ui.show_status(&format!("{} started.", self.app_name));
    }

    /// Single entry point for all input.
    pub fn handle(&mut self, event: Event, ui: &mut dyn Frontend) -> Outcome {
        log::trace!("Handling {:?}", event);
        match event {
            Event::Open(path) => self.open(path.as_deref(), ui),
            Event::OpenDialog => self.open_dialog(ui),
            Event::OpenRecent(path) => self.open(Some(&path), ui),
            Event::Save => match self.save_document(ui) {
                Ok(_) => Outcome::Handled,
                Err(_) => Outcome::Failed,
            },
            Event::Close => self.close(ui),
            Event::Resized(size) => self.resize(size, ui),
            Event::Wheel {
                delta,
                position,
                axis,
                zoom,
            } => {
                if zoom {
                    self.zoom_request(delta, position, ui)
                } else {
                    self.scroll_request(delta, axis, ui)
                }
            }
            Event::SetZoom(percent) => {
                self.view.set_manual(percent);
                self.paint(ui)
            }
            Event::AddZoom(factor) => {
                self.view.add_zoom(factor);
                self.paint(ui)
            }
            Event::ZoomOriginal => {
                self.view.set_manual(ORIGINAL_ZOOM_PERCENT);
                self.paint(ui)
            }
            Event::FitWindow(enabled) => {
                let result = self.view.set_fit_window(enabled, self.image_size());
                self.after_recompute(result, ui)
            }
            Event::FitWidth(enabled) => {
                let result = self.view.set_fit_width(enabled, self.image_size());
                self.after_recompute(result, ui)
            }
            Event::Modified => {
                self.mark_dirty(ui);
                Outcome::Handled
            }
        }
    }

    fn image_size(&self) -> Option<Size> {
        self.session.image().map(Bitmap::size)
    }

    // ---- Dirty/clean lifecycle ----

    /// Flag unsaved changes and update the title.
    pub fn mark_dirty(&mut self, ui: &mut dyn Frontend) {
        if !self.session.is_loaded() {
            return;
        }
        self.session.mark_dirty();
        ui.set_title(&self.session.title(&self.app_name));
    }

    /// Clear the unsaved flag and update the title.
    pub fn mark_clean(&mut self, ui: &mut dyn Frontend) {
        self.session.mark_clean();
        ui.set_title(&self.session.title(&self.app_name));
    }

    /// Gate for anything that replaces the current document.
    ///
    /// Returns `true` if the caller may go ahead. Asks only when dirty; a
    /// failed save counts as "stay".
    pub fn confirm_discard(&mut self, ui: &mut dyn Frontend) -> bool {
        if !self.session.is_dirty() {
            return true;
        }

        let name = self
            .session
            .filename()
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        match ui.confirm_discard(&name) {
            DiscardChoice::Save => self.save_document(ui).is_ok(),
            DiscardChoice::Discard => true,
            DiscardChoice::Cancel => {
                log::debug!("Discard of {:?} cancelled", name);
                false
            }
        }
    }

    // ---- Opening ----

    fn open(&mut self, path: Option<&Path>, ui: &mut dyn Frontend) -> Outcome {
        if !self.confirm_discard(ui) {
            return Outcome::Aborted;
        }
        match self.load_document(path, ui) {
            Ok(()) => Outcome::Handled,
            Err(_) => Outcome::Failed,
        }
    }

    fn open_dialog(&mut self, ui: &mut dyn Frontend) -> Outcome {
        if !self.confirm_discard(ui) {
            return Outcome::Aborted;
        }

        let start_dir = self
            .session
            .filename()
            .and_then(Path::parent)
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        let filter = self.open_filter();

        match ui.choose_file(&start_dir, &filter) {
            Some(path) => match self.load_document(Some(&path), ui) {
                Ok(()) => Outcome::Handled,
                Err(_) => Outcome::Failed,
            },
            None => Outcome::Aborted,
        }
    }

    /// File-dialog filter covering every readable image and label files.
    pub fn open_filter(&self) -> String {
        let patterns: Vec<String> = self
            .decoder
            .supported_formats()
            .iter()
            .map(|ext| format!("*.{}", ext))
            .chain(std::iter::once(format!("*.{}", self.codec.extension())))
            .collect();
        format!("Image & Label files ({})", patterns.join(" "))
    }

    /// Load `path` (or the last-session path when `None`/empty) as the document.
    ///
    /// The caller must have cleared [`DocumentController::confirm_discard`].
    /// The session is reset first. On failure it stays reset and the frontend
    /// is cleared to match; the error is reported through `ui` and returned.
    ///
    /// Shapes carried over from the previous document (`keep_previous`) leave
    /// the new document dirty, since its sidecar does not have them yet.
    pub fn load_document(
        &mut self,
        path: Option<&Path>,
        ui: &mut dyn Frontend,
    ) -> Result<(), LoadError> {
        let previous_shapes = if self.preferences.keep_previous {
            self.session.take_shapes()
        } else {
            Vec::new()
        };
        self.session.reset();

        let path = match path.filter(|p| !p.as_os_str().is_empty()) {
            Some(path) => path.to_path_buf(),
            None => self.preferences.last_file.clone().unwrap_or_default(),
        };

        let doc = match self.read_document(&path) {
            Ok(doc) => doc,
            Err(e) => {
                log::error!("{}", e);
                let title = match &e {
                    LoadError::FileNotFound { .. } => "Error opening file",
                    LoadError::LabelFile { .. } => "Error opening label file",
                    _ => "Error opening image",
                };
                self.show_empty(ui);
                ui.report_error(title, &e.to_string());
                ui.show_status(&format!("Error reading {}", path.display()));
                return Err(e);
            }
        };

        let image_size = doc.image.size();
        let has_label_shapes = doc.label.as_ref().is_some_and(|l| !l.shapes.is_empty());
        ui.set_image(&doc.image);
        self.session.install(doc);

        if let Err(e) = self.view.recompute_initial(image_size) {
            log::warn!("Initial fit skipped: {}", e);
        }

        let carried = !has_label_shapes && !previous_shapes.is_empty();
        if carried {
            log::debug!("Carrying {} shapes over to {:?}", previous_shapes.len(), path);
            self.session.set_shapes(previous_shapes);
            self.mark_dirty(ui);
        } else {
            self.mark_clean(ui);
        }

        ui.set_actions_enabled(true);
        ui.set_scale(self.view.scale_percent());
        ui.repaint();

        self.recent.record(&path);
        self.preferences.last_file = Some(path.clone());

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        ui.show_status(&format!("Loaded {}", name));
        log::info!(
            "Loaded {:?} ({}x{}, {} shapes) at {}%",
            path,
            image_size.width,
            image_size.height,
            self.session.shapes().len(),
            self.view.scale_percent()
        );
        Ok(())
    }

    /// Bring the frontend in line with an empty session.
    fn show_empty(&mut self, ui: &mut dyn Frontend) {
        ui.clear();
        ui.set_actions_enabled(false);
        self.mark_clean(ui);
    }

    /// Resolve, read and decode without touching the session.
    fn read_document(&self, path: &Path) -> Result<LoadedDocument, LoadError> {
        if path.as_os_str().is_empty() || !path.exists() {
            return Err(LoadError::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let sidecar = if self.codec.is_label_file(path) {
            path.to_path_buf()
        } else {
            sidecar_path_for(path, self.codec.extension(), self.session.output_dir())
        };

        let (image_path, image_data, label) =
            if sidecar.is_file() && self.codec.is_label_file(&sidecar) {
                let mut record =
                    self.codec
                        .load(&sidecar)
                        .map_err(|source| LoadError::LabelFile {
                            path: sidecar.clone(),
                            source,
                        })?;
                let base = sidecar.parent().unwrap_or_else(|| Path::new(""));
                let image_path = base.join(&record.image_path);
                let image_data = std::mem::take(&mut record.image_data);
                log::debug!("Using sidecar {:?} for image {:?}", sidecar, image_path);
                (image_path, image_data, Some(record))
            } else {
                let image_data = std::fs::read(path).map_err(|source| LoadError::ImageRead {
                    path: path.to_path_buf(),
                    source,
                })?;
                (path.to_path_buf(), image_data, None)
            };

        let image = self
            .decoder
            .decode(&image_data)
            .filter(|image| !image.is_empty())
            .ok_or_else(|| {
                LoadError::invalid_image(image_path.clone(), self.decoder.supported_formats())
            })?;

        Ok(LoadedDocument {
            filename: path.to_path_buf(),
            image_path,
            image_data,
            image,
            label,
        })
    }

    // ---- Saving and closing ----

    /// Write the current annotations to the sidecar and mark clean.
    pub fn save_document(&mut self, ui: &mut dyn Frontend) -> Result<PathBuf, SaveError> {
        let sidecar = self
            .session
            .sidecar_path(self.codec.extension())
            .ok_or(SaveError::NoDocument)?;
        let record = self
            .session
            .to_record(&sidecar)
            .ok_or(SaveError::NoDocument)?;
        let options = SaveOptions {
            store_image_data: self.preferences.store_image_data,
            image_size: self.session.image().map(|i| (i.width(), i.height())),
        };

        if let Err(source) = self.codec.save(&sidecar, &record, options) {
            let e = SaveError::LabelFile {
                path: sidecar,
                source,
            };
            log::error!("{}", e);
            ui.report_error("Error saving label data", &e.to_string());
            return Err(e);
        }

        self.mark_clean(ui);
        ui.show_status(&format!("Saved to {}", sidecar.display()));
        Ok(sidecar)
    }

    fn close(&mut self, ui: &mut dyn Frontend) -> Outcome {
        if !self.confirm_discard(ui) {
            return Outcome::Aborted;
        }
        log::info!("Closing {}", self.app_name);
        Outcome::Quit
    }

    // ---- View ----

    fn resize(&mut self, size: Size, ui: &mut dyn Frontend) -> Outcome {
        let result = self.view.on_resize(size, self.image_size());
        match result {
            Ok(None) => Outcome::Handled,
            Ok(Some(_)) => self.paint(ui),
            Err(e) => self.geometry_failed(e),
        }
    }

    fn after_recompute(
        &mut self,
        result: Result<i32, GeometryError>,
        ui: &mut dyn Frontend,
    ) -> Outcome {
        match result {
            Ok(_) => self.paint(ui),
            Err(e) => self.geometry_failed(e),
        }
    }

    fn geometry_failed(&self, e: GeometryError) -> Outcome {
        log::error!("Scale not recomputed: {}", e);
        Outcome::Failed
    }

    fn paint(&mut self, ui: &mut dyn Frontend) -> Outcome {
        if !self.session.is_loaded() {
            return Outcome::Handled;
        }
        ui.set_scale(self.view.scale_percent());
        ui.repaint();
        Outcome::Handled
    }

    fn zoom_request(&mut self, delta: f64, position: Point, ui: &mut dyn Frontend) -> Outcome {
        let Some(image) = self.image_size() else {
            return Outcome::Handled;
        };

        let shift = self.view.on_zoom_request(delta, position, image);
        self.paint(ui);

        if let Some(shift) = shift {
            for (axis, d) in [(Axis::Horizontal, shift.dx), (Axis::Vertical, shift.dy)] {
                let offset = ui.offset(axis);
                ui.set_offset(axis, offset + d);
            }
        }
        Outcome::Handled
    }

    fn scroll_request(&mut self, delta: f64, axis: Axis, ui: &mut dyn Frontend) -> Outcome {
        let change = self.view.on_scroll_request(delta, ui.single_step(axis));
        let offset = ui.offset(axis);
        ui.set_offset(axis, offset + change);
        log::trace!("Scroll {:?} by {}", axis, change);
        Outcome::Handled
    }
}
