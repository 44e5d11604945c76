//! Tests for opening documents.

use std::path::{Path, PathBuf};

use super::support::{
    RecordingFrontend, controller, controller_with, open, png_bytes, triangle, write_label,
    write_png,
};
use crate::config::AppConfig;
use crate::controller::DocumentController;
use crate::error::LoadError;
use crate::event::{Event, Outcome};
use crate::zoom_math::{Size, ZoomMode};

#[test]
fn test_image_without_sidecar() {
    let dir = tempfile::tempdir().unwrap();
    let image = write_png(dir.path(), "scene.png", 1600, 1200);
    let mut ui = RecordingFrontend::new();
    let mut controller = controller(&mut ui);

    open(&mut controller, &image, &mut ui);

    let session = controller.session();
    assert_eq!(session.filename(), Some(image.as_path()));
    assert_eq!(session.image_path(), Some(image.as_path()));
    assert!(session.label().is_none());
    assert!(!session.is_dirty());
    assert_eq!(session.image().map(|i| (i.width(), i.height())), Some((1600, 1200)));

    // 798x598 container vs 1600x1200 image: height binds, 598/1200 -> 50%
    assert_eq!(controller.view().scale_percent(), 50);
    assert_eq!(ui.last_scale(), Some(50));
    assert_eq!(ui.images, vec![(1600, 1200)]);
    assert!(ui.repaints > 0);
    assert_eq!(ui.actions_enabled, Some(true));
    assert_eq!(
        ui.last_title(),
        Some(format!("Labelview - {}", image.display()).as_str())
    );
    assert_eq!(ui.statuses.last().map(String::as_str), Some("Loaded scene.png"));
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.png");
    let mut ui = RecordingFrontend::new();
    let mut controller = controller(&mut ui);

    let result = controller.load_document(Some(&missing), &mut ui);

    assert!(matches!(result, Err(LoadError::FileNotFound { path }) if path == missing));
    assert!(controller.session().filename().is_none());
    assert!(controller.session().image().is_none());
    assert_eq!(ui.errors.len(), 1);
    assert!(ui.errors[0].1.contains("nope.png"));
    assert_eq!(ui.last_title(), Some("Labelview"));
    assert_eq!(ui.actions_enabled, Some(false));
    assert_eq!(ui.clears, 1);
}

#[test]
fn test_missing_file_through_handle() {
    let mut ui = RecordingFrontend::new();
    let mut controller = controller(&mut ui);

    let outcome = controller.handle(Event::Open(Some(PathBuf::from("/no/such/file.png"))), &mut ui);

    assert_eq!(outcome, Outcome::Failed);
    assert!(controller.recent_files().is_empty());
}

#[test]
fn test_sidecar_image_path_resolved_against_sidecar_dir() {
    let dir = tempfile::tempdir().unwrap();
    let opened = write_png(dir.path(), "photo.png", 10, 10);
    let real = write_png(dir.path(), "imgs/real.png", 40, 20);
    write_label(
        &dir.path().join("photo.json"),
        "imgs/real.png",
        vec![triangle("cat")],
        None,
    );
    let mut ui = RecordingFrontend::new();
    let mut controller = controller(&mut ui);

    open(&mut controller, &opened, &mut ui);

    let session = controller.session();
    assert_eq!(session.filename(), Some(opened.as_path()));
    assert_eq!(session.image_path(), Some(real.as_path()));
    assert_eq!(ui.images, vec![(40, 20)]);
    assert_eq!(session.shapes().len(), 1);
    assert_eq!(session.shapes()[0].label, "cat");
    assert!(session.label().is_some());
    assert!(!session.is_dirty());
}

#[test]
fn test_embedded_image_data_wins_over_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let opened = dir.path().join("photo.png");
    std::fs::write(&opened, b"placeholder").unwrap();
    write_label(
        &dir.path().join("photo.json"),
        "elsewhere/gone.png",
        Vec::new(),
        Some(png_bytes(30, 60)),
    );
    let mut ui = RecordingFrontend::new();
    let mut controller = controller(&mut ui);

    open(&mut controller, &opened, &mut ui);

    assert_eq!(ui.images, vec![(30, 60)]);
    assert_eq!(
        controller.session().image_path(),
        Some(dir.path().join("elsewhere/gone.png").as_path())
    );
}

#[test]
fn test_sidecar_colors_adopted_when_present() {
    let dir = tempfile::tempdir().unwrap();
    let image = write_png(dir.path(), "a.png", 8, 8);
    std::fs::write(
        dir.path().join("a.json"),
        r#"{"imagePath": "a.png", "imageData": null, "shapes": [], "lineColor": [1, 2, 3, 4]}"#,
    )
    .unwrap();
    let mut ui = RecordingFrontend::new();
    let mut controller = controller(&mut ui);

    open(&mut controller, &image, &mut ui);

    assert_eq!(controller.session().line_color(), [1, 2, 3, 4]);
    assert_eq!(
        controller.session().fill_color(),
        crate::constants::DEFAULT_FILL_COLOR
    );
}

#[test]
fn test_corrupt_sidecar_aborts_and_leaves_session_reset() {
    let dir = tempfile::tempdir().unwrap();
    let good = write_png(dir.path(), "good.png", 100, 100);
    let bad = write_png(dir.path(), "bad.png", 100, 100);
    std::fs::write(dir.path().join("bad.json"), "{ broken").unwrap();
    let mut ui = RecordingFrontend::new();
    let mut controller = controller(&mut ui);
    open(&mut controller, &good, &mut ui);

    let result = controller.load_document(Some(&bad), &mut ui);

    match result {
        Err(LoadError::LabelFile { path, .. }) => assert_eq!(path, dir.path().join("bad.json")),
        other => panic!("expected LabelFile error, got {:?}", other),
    }
    assert!(controller.session().filename().is_none());
    assert!(controller.session().image().is_none());
    assert!(controller.session().label().is_none());
    assert_eq!(ui.images.len(), 1);
    assert!(ui.errors[0].1.contains("bad.json"));
    // The window no longer shows good.png
    assert_eq!(ui.last_title(), Some("Labelview"));
    assert_eq!(ui.actions_enabled, Some(false));
    assert_eq!(ui.clears, 1);
}

#[test]
fn test_undecodable_image() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fake.png");
    std::fs::write(&path, b"this is not a png").unwrap();
    let mut ui = RecordingFrontend::new();
    let mut controller = controller(&mut ui);

    let result = controller.load_document(Some(&path), &mut ui);

    match result {
        Err(LoadError::InvalidImage { path: failed, formats }) => {
            assert_eq!(failed, path);
            assert!(formats.iter().any(|f| f == "png"));
        }
        other => panic!("expected InvalidImage, got {:?}", other),
    }
    assert!(controller.session().filename().is_none());
    let (title, message) = &ui.errors[0];
    assert_eq!(title, "Error opening image");
    assert!(message.contains("fake.png"));
    assert!(message.contains("Supported image formats"));
}

#[test]
fn test_sidecar_with_empty_image_is_invalid() {
    let dir = tempfile::tempdir().unwrap();
    let label = dir.path().join("empty.json");
    std::fs::write(dir.path().join("empty.png"), b"").unwrap();
    write_label(&label, "empty.png", Vec::new(), None);
    let mut ui = RecordingFrontend::new();
    let mut controller = controller(&mut ui);

    let result = controller.load_document(Some(&label), &mut ui);

    assert!(matches!(result, Err(LoadError::InvalidImage { .. })));
    assert!(controller.session().filename().is_none());
}

#[test]
fn test_open_label_file_directly() {
    let dir = tempfile::tempdir().unwrap();
    let image = write_png(dir.path(), "shot.png", 64, 32);
    let label = dir.path().join("shot.json");
    write_label(&label, "shot.png", vec![triangle("dog")], None);
    let mut ui = RecordingFrontend::new();
    let mut controller = controller(&mut ui);

    open(&mut controller, &label, &mut ui);

    assert_eq!(controller.session().filename(), Some(label.as_path()));
    assert_eq!(controller.session().image_path(), Some(image.as_path()));
    assert_eq!(controller.session().shapes().len(), 1);
}

#[test]
fn test_output_dir_relocates_sidecar() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("labels");
    let image = write_png(dir.path(), "img.png", 20, 20);
    // Ignored: lives next to the image, not in the output dir
    write_label(&dir.path().join("img.json"), "img.png", vec![triangle("near")], None);
    write_label(
        &out.join("img.json"),
        "../img.png",
        vec![triangle("far"), triangle("far")],
        None,
    );

    let mut config = AppConfig::new();
    config.preferences.output_dir = Some(out.clone());
    let mut ui = RecordingFrontend::new();
    let mut controller = controller_with(&config, &mut ui);

    open(&mut controller, &image, &mut ui);

    let session = controller.session();
    assert_eq!(session.shapes().len(), 2);
    assert_eq!(session.shapes()[0].label, "far");
    assert_eq!(session.image_path(), Some(out.join("../img.png").as_path()));
}

#[test]
fn test_empty_path_reopens_last_file() {
    let dir = tempfile::tempdir().unwrap();
    let image = write_png(dir.path(), "last.png", 16, 16);
    let mut config = AppConfig::new();
    config.preferences.last_file = Some(image.clone());
    let mut ui = RecordingFrontend::new();
    let mut controller = controller_with(&config, &mut ui);

    assert_eq!(controller.handle(Event::Open(None), &mut ui), Outcome::Handled);
    assert_eq!(controller.session().filename(), Some(image.as_path()));

    assert_eq!(
        controller.handle(Event::Open(Some(PathBuf::new())), &mut ui),
        Outcome::Handled
    );
    assert_eq!(controller.session().filename(), Some(image.as_path()));
}

#[test]
fn test_empty_path_without_history() {
    let mut ui = RecordingFrontend::new();
    let mut controller = controller(&mut ui);

    let result = controller.load_document(None, &mut ui);

    assert!(matches!(result, Err(LoadError::FileNotFound { .. })));
    assert!(controller.session().filename().is_none());
}

#[test]
fn test_initial_load_fits_window_even_in_manual_mode() {
    let dir = tempfile::tempdir().unwrap();
    let image = write_png(dir.path(), "big.png", 1600, 1200);
    let mut ui = RecordingFrontend::new();
    let mut controller = controller(&mut ui);
    controller.handle(Event::SetZoom(300), &mut ui);

    open(&mut controller, &image, &mut ui);

    assert_eq!(controller.view().scale_percent(), 50);
    assert_eq!(controller.view().mode(), ZoomMode::Manual);
}

#[test]
fn test_load_before_container_is_realized() {
    let dir = tempfile::tempdir().unwrap();
    let image = write_png(dir.path(), "big.png", 1600, 1200);
    let mut ui = RecordingFrontend::new();
    let mut controller = DocumentController::new(&AppConfig::new());

    open(&mut controller, &image, &mut ui);
    assert_eq!(controller.view().scale_percent(), 100);

    controller.handle(Event::Resized(Size::new(800.0, 600.0)), &mut ui);
    assert_eq!(controller.view().scale_percent(), 50);
    assert_eq!(ui.last_scale(), Some(50));
}

#[test]
fn test_manual_zoom_before_container_survives_resize() {
    let dir = tempfile::tempdir().unwrap();
    let image = write_png(dir.path(), "big.png", 1600, 1200);
    let mut ui = RecordingFrontend::new();
    let mut controller = DocumentController::new(&AppConfig::new());
    open(&mut controller, &image, &mut ui);

    controller.handle(Event::SetZoom(200), &mut ui);
    controller.handle(Event::Resized(Size::new(800.0, 600.0)), &mut ui);

    assert_eq!(controller.view().scale_percent(), 200);
    assert_eq!(controller.view().mode(), ZoomMode::Manual);
    assert_eq!(ui.last_scale(), Some(200));
}

#[test]
fn test_successful_load_recorded_in_recent_files() {
    let dir = tempfile::tempdir().unwrap();
    let a = write_png(dir.path(), "a.png", 4, 4);
    let b = write_png(dir.path(), "b.png", 4, 4);
    let mut ui = RecordingFrontend::new();
    let mut controller = controller(&mut ui);

    open(&mut controller, &a, &mut ui);
    open(&mut controller, &b, &mut ui);

    assert_eq!(controller.recent_files().paths(), &[b.clone(), a.clone()]);
    // The open file is never offered
    assert_eq!(controller.recent_menu(), vec![a.clone()]);

    std::fs::remove_file(&a).unwrap();
    assert!(controller.recent_menu().is_empty());

    let outcome = controller.handle(Event::OpenRecent(b.clone()), &mut ui);
    assert_eq!(outcome, Outcome::Handled);
    assert_eq!(controller.session().filename(), Some(Path::new(&b)));
}
