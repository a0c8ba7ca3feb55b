//! Session state: file selection and the source color registry.

mod common;

use colorswap::error::messages;
use colorswap::services::image_io;
use colorswap::{Session, SessionError};
use common::fixtures::colors;
use common::{assert_validation, TestWorkspace};
use pixel_swap::{ColorMode, Tolerance};
use pretty_assertions::assert_eq;

#[test]
fn test_select_folder_is_flat_and_sorted() {
    let ws = TestWorkspace::new();
    let b = ws.write_filled("b.png", 2, 2, colors::WHITE);
    let a = ws.write_filled("a.png", 2, 2, colors::WHITE);
    std::fs::write(ws.path().join("readme.md"), "skip me").unwrap();
    std::fs::create_dir(ws.path().join("nested")).unwrap();
    std::fs::copy(&a, ws.path().join("nested").join("c.png")).unwrap();

    let mut session = Session::new();
    assert_eq!(session.select_folder(ws.path()).unwrap(), 2);
    assert_eq!(session.file_paths(), vec![a, b]);
}

#[test]
fn test_select_files_skips_duplicates_and_unsupported() {
    let ws = TestWorkspace::new();
    let image = ws.write_diagonal("diagonal.png");
    let text = ws.path().join("notes.txt");
    std::fs::write(&text, "text").unwrap();

    let mut session = Session::new();
    assert_eq!(session.select_files([&image, &text, &image]).unwrap(), 1);

    let record = session.record(&image).unwrap();
    assert_eq!((record.width, record.height, record.weight), (2, 2, 1));
    assert_eq!(record.mode, ColorMode::Rgb);

    assert!(session.remove_file(&image));
    assert!(!session.remove_file(&image));
    assert_eq!(session.file_count(), 0);
}

#[test]
fn test_unreadable_image_is_an_error() {
    let ws = TestWorkspace::new();
    let broken = ws.path().join("broken.png");
    std::fs::write(&broken, b"not a png").unwrap();

    let mut session = Session::new();
    let err = session.select_files([&broken]).unwrap_err();
    assert!(matches!(err, SessionError::ImageIo(_)), "got {err:?}");
    assert_eq!(session.file_count(), 0);
}

#[test]
fn test_sample_source_from_image() {
    let ws = TestWorkspace::new();
    let image = ws.write_diagonal("diagonal.png");
    let matrix = image_io::load_matrix(&image).unwrap();

    let mut session = Session::new();
    assert!(session.sample_source(&matrix, 0, 0).unwrap());
    // Same color again is not registered twice
    assert!(!session.sample_source(&matrix, 1, 1).unwrap());
    assert!(session.sample_source(&matrix, 1, 0).unwrap());

    let ids: Vec<&str> = session.sources().iter().map(|e| e.identifier()).collect();
    assert_eq!(ids, vec!["#6496c8", "#ffffff"]);

    let err = session.sample_source(&matrix, 2, 0).unwrap_err();
    assert!(err.is_validation());
}

#[test]
fn test_edit_registered_source() {
    let ws = TestWorkspace::new();
    let matrix = image_io::load_matrix(&ws.write_diagonal("diagonal.png")).unwrap();

    let mut session = Session::new();
    session.sample_source(&matrix, 0, 0).unwrap();

    assert!(session.add_target("#6496c8", colors::RED).unwrap());
    assert!(!session.add_target("#6496c8", colors::RED).unwrap());
    session.set_tolerance("#6496c8", Tolerance::spherical(10)).unwrap();
    session.set_preserve_difference("#6496c8", true).unwrap();

    let entry = session.source("#6496c8").unwrap();
    assert_eq!(entry.targets(), &[colors::RED]);
    assert_eq!(entry.tolerance(), Tolerance::spherical(10));
    assert!(entry.keeps_difference());

    let err = session.add_target("#000000", colors::RED).unwrap_err();
    assert!(matches!(err, SessionError::UnknownSource(_)));

    assert_eq!(session.remove_target("#6496c8", 0).unwrap(), Some(colors::RED));
    assert_eq!(session.purge_untargeted().len(), 1);
    assert!(session.sources().is_empty());
}

#[test]
fn test_weight_updates_only_selected_files() {
    let ws = TestWorkspace::new();
    let a = ws.write_filled("a.png", 2, 2, colors::WHITE);
    let other = ws.path().join("other.png");

    let mut session = Session::new();
    session.select_files([&a]).unwrap();

    assert_eq!(session.set_weight(&[&a, &other], 4).unwrap(), 1);
    assert_eq!(session.record(&a).unwrap().weight, 4);

    let err = session.set_weight(&[&a], 0).unwrap_err();
    assert_validation(&err, messages::WEIGHT_AT_LEAST_ONE);
}
