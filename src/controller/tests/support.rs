//! Test doubles and fixtures shared by the controller tests.

use std::collections::{HashMap, VecDeque};
use std::io::Cursor;
use std::path::{Path, PathBuf};

use labelview_file::{LabelFile, LabelRecord, SaveOptions, Shape};

use crate::config::AppConfig;
use crate::controller::DocumentController;
use crate::data::Bitmap;
use crate::event::{Event, Outcome};
use crate::frontend::{Axis, DiscardChoice, RenderSink, ScrollSurface, Shell};
use crate::zoom_math::Size;

/// Frontend that records every call and answers prompts from a script.
#[derive(Debug, Default)]
pub struct RecordingFrontend {
    pub scales: Vec<i32>,
    pub images: Vec<(u32, u32)>,
    pub repaints: usize,
    pub clears: usize,
    pub offsets: HashMap<Axis, f64>,
    pub step: f64,
    pub titles: Vec<String>,
    pub statuses: Vec<String>,
    pub errors: Vec<(String, String)>,
    pub actions_enabled: Option<bool>,
    pub discard_answers: VecDeque<DiscardChoice>,
    pub discard_prompts: Vec<String>,
    pub chosen_file: Option<PathBuf>,
    pub dialog_filters: Vec<String>,
}

impl RecordingFrontend {
    pub fn new() -> Self {
        Self {
            step: 1.0,
            ..Default::default()
        }
    }

    /// Queue the answer for the next unsaved-changes prompt.
    pub fn answer(mut self, choice: DiscardChoice) -> Self {
        self.discard_answers.push_back(choice);
        self
    }

    pub fn last_scale(&self) -> Option<i32> {
        self.scales.last().copied()
    }

    pub fn last_title(&self) -> Option<&str> {
        self.titles.last().map(String::as_str)
    }

    pub fn offset_of(&self, axis: Axis) -> f64 {
        self.offsets.get(&axis).copied().unwrap_or(0.0)
    }
}

impl RenderSink for RecordingFrontend {
    fn set_scale(&mut self, percent: i32) {
        self.scales.push(percent);
    }

    fn set_image(&mut self, image: &Bitmap) {
        self.images.push((image.width(), image.height()));
    }

    fn repaint(&mut self) {
        self.repaints += 1;
    }

    fn clear(&mut self) {
        self.clears += 1;
    }
}

impl ScrollSurface for RecordingFrontend {
    fn offset(&self, axis: Axis) -> f64 {
        self.offset_of(axis)
    }

    fn set_offset(&mut self, axis: Axis, value: f64) {
        self.offsets.insert(axis, value);
    }

    fn single_step(&self, _axis: Axis) -> f64 {
        self.step
    }
}

impl Shell for RecordingFrontend {
    fn confirm_discard(&mut self, filename: &str) -> DiscardChoice {
        self.discard_prompts.push(filename.to_string());
        self.discard_answers
            .pop_front()
            .expect("unexpected unsaved-changes prompt")
    }

    fn choose_file(&mut self, _start_dir: &Path, filter: &str) -> Option<PathBuf> {
        self.dialog_filters.push(filter.to_string());
        self.chosen_file.take()
    }

    fn report_error(&mut self, title: &str, message: &str) {
        self.errors.push((title.to_string(), message.to_string()));
    }

    fn show_status(&mut self, message: &str) {
        self.statuses.push(message.to_string());
    }

    fn set_title(&mut self, title: &str) {
        self.titles.push(title.to_string());
    }

    fn set_actions_enabled(&mut self, enabled: bool) {
        self.actions_enabled = Some(enabled);
    }
}

/// Encode a solid-color PNG.
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba([200, 100, 50, 255]));
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();
    bytes
}

/// Write a PNG named `name` into `dir`.
pub fn write_png(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, png_bytes(width, height)).unwrap();
    path
}

/// Write a label file referencing `image_path`, optionally embedding `image_data`.
pub fn write_label(
    path: &Path,
    image_path: &str,
    shapes: Vec<Shape>,
    image_data: Option<Vec<u8>>,
) -> LabelRecord {
    let record = LabelRecord {
        image_path: PathBuf::from(image_path),
        image_data: image_data.clone().unwrap_or_default(),
        shapes,
        ..Default::default()
    };
    let options = SaveOptions {
        store_image_data: image_data.is_some(),
        image_size: None,
    };
    LabelFile::save(path, &record, options).unwrap();
    record
}

pub fn triangle(label: &str) -> Shape {
    Shape::new(label, vec![[10.0, 10.0], [50.0, 10.0], [30.0, 40.0]])
}

/// Controller with a realized 800x600 container.
pub fn controller_with(config: &AppConfig, ui: &mut RecordingFrontend) -> DocumentController {
    let mut controller = DocumentController::new(config);
    controller.start(ui);
    assert_eq!(
        controller.handle(Event::Resized(Size::new(800.0, 600.0)), ui),
        Outcome::Handled
    );
    controller
}

pub fn controller(ui: &mut RecordingFrontend) -> DocumentController {
    controller_with(&AppConfig::new(), ui)
}

/// Open `path`, asserting success.
pub fn open(controller: &mut DocumentController, path: &Path, ui: &mut RecordingFrontend) {
    let outcome = controller.handle(Event::Open(Some(path.to_path_buf())), ui);
    assert_eq!(outcome, Outcome::Handled, "errors: {:?}", ui.errors);
}
