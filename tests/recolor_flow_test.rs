//! Recoloring flow: select one image, register colors, generate every combination.

mod common;

use colorswap::error::messages;
use colorswap::models::{AppConfig, Recipe};
use colorswap::services::{generate_images, generate_images_with_cancel, image_io, FixedDirectory};
use colorswap::{Session, SessionError};
use common::fixtures::{colors, png_config};
use common::{assert_pixel_at, assert_validation, TestWorkspace};
use pixel_swap::{CancelToken, Pixel, SourceColorEntry, SwapError, Tolerance};
use pretty_assertions::assert_eq;

fn session_with(path: &std::path::Path, entries: Vec<SourceColorEntry>) -> Session {
    let mut session = Session::new();
    assert_eq!(session.select_files([path]).unwrap(), 1);
    for entry in entries {
        assert!(session.add_source(entry));
    }
    session
}

#[test]
fn test_one_color_two_targets_writes_two_files() {
    let ws = TestWorkspace::new();
    let image = ws.write_diagonal("diagonal.png");
    let mut session = session_with(
        &image,
        vec![SourceColorEntry::new(colors::BLUE).with_targets([colors::RED, colors::GREEN])],
    );

    let report = generate_images(&mut session, &png_config(), &mut ws.picker())
        .unwrap()
        .expect("not cancelled");

    assert_eq!(report.count, 2);
    assert_eq!(report.matched_pixels, 2);
    assert_eq!(ws.output_names(), vec!["combination_0.png", "combination_1.png"]);

    let first = ws.out_dir().join("combination_0.png");
    assert_pixel_at(&first, 0, 0, colors::RED);
    assert_pixel_at(&first, 1, 1, colors::RED);
    assert_pixel_at(&first, 0, 1, colors::WHITE);

    let second = ws.out_dir().join("combination_1.png");
    assert_pixel_at(&second, 0, 0, colors::GREEN);
    assert_pixel_at(&second, 1, 0, colors::WHITE);

    // Success clears the session
    assert_eq!(session.file_count(), 0);
    assert!(session.sources().is_empty());

    // Source image is untouched
    assert_pixel_at(&image, 0, 0, colors::BLUE);
}

#[test]
fn test_two_colors_last_entry_varies_fastest() {
    let ws = TestWorkspace::new();
    let image = ws.write_diagonal("diagonal.png");
    let mut session = session_with(
        &image,
        vec![
            SourceColorEntry::new(colors::BLUE).with_targets([colors::RED, colors::GREEN]),
            SourceColorEntry::new(colors::WHITE).with_targets([colors::BLACK, colors::BLUE]),
        ],
    );

    let report = generate_images(&mut session, &png_config(), &mut ws.picker())
        .unwrap()
        .expect("not cancelled");
    assert_eq!(report.count, 4);

    let expected = [
        (colors::RED, colors::BLACK),
        (colors::RED, colors::BLUE),
        (colors::GREEN, colors::BLACK),
        (colors::GREEN, colors::BLUE),
    ];
    for (index, (diagonal, other)) in expected.into_iter().enumerate() {
        let path = ws.out_dir().join(format!("combination_{index}.png"));
        assert_pixel_at(&path, 0, 0, diagonal);
        // White pixels turned blue are not picked up by the blue entry
        assert_pixel_at(&path, 0, 1, other);
    }
}

#[test]
fn test_tolerance_with_preserved_difference() {
    let ws = TestWorkspace::new();
    let near_blue = Pixel::rgb(103, 150, 200);
    let image = ws.write_filled("near.png", 3, 2, near_blue);
    let mut session = session_with(
        &image,
        vec![SourceColorEntry::new(colors::BLUE)
            .with_targets([colors::GREEN])
            .with_tolerance(Tolerance::cubic(4))
            .preserve_difference(true)],
    );

    generate_images(&mut session, &png_config(), &mut ws.picker())
        .unwrap()
        .expect("not cancelled");

    assert_pixel_at(&ws.out_dir().join("combination_0.png"), 1, 2, Pixel::rgb(3, 255, 0));
}

#[test]
fn test_default_config_writes_jpeg() {
    let ws = TestWorkspace::new();
    let image = ws.write_filled("flat.png", 4, 4, colors::BLUE);
    let mut session = session_with(
        &image,
        vec![SourceColorEntry::new(colors::BLUE).with_targets([colors::RED])],
    );

    generate_images(&mut session, &AppConfig::default(), &mut ws.picker())
        .unwrap()
        .expect("not cancelled");

    assert_eq!(ws.output_names(), vec!["combination_0.jpg"]);
    let record = image_io::probe(&ws.out_dir().join("combination_0.jpg")).unwrap();
    assert_eq!((record.width, record.height), (4, 4));
}

#[test]
fn test_requires_exactly_one_image() {
    let ws = TestWorkspace::new();
    let entry = SourceColorEntry::new(colors::BLUE).with_targets([colors::RED]);

    let mut empty = Session::new();
    empty.add_source(entry.clone());
    let err = generate_images(&mut empty, &png_config(), &mut ws.picker()).unwrap_err();
    assert_validation(&err, messages::SELECT_ONE_IMAGE);

    let a = ws.write_diagonal("a.png");
    let b = ws.write_diagonal("b.png");
    let mut two = Session::new();
    two.select_files([&a, &b]).unwrap();
    two.add_source(entry);
    let err = generate_images(&mut two, &png_config(), &mut ws.picker()).unwrap_err();
    assert_validation(&err, messages::SELECT_ONE_IMAGE);
    assert!(ws.output_names().is_empty());
}

#[test]
fn test_untargeted_colors_are_dropped_before_validation() {
    let ws = TestWorkspace::new();
    let image = ws.write_diagonal("diagonal.png");
    let mut session = session_with(&image, vec![SourceColorEntry::new(colors::BLUE)]);

    let err = generate_images(&mut session, &png_config(), &mut ws.picker()).unwrap_err();

    assert_validation(&err, messages::SELECT_ONE_COLOR);
    assert!(session.sources().is_empty());
    assert_eq!(session.file_count(), 1);
}

#[test]
fn test_cancelled_picker_is_a_no_op() {
    let ws = TestWorkspace::new();
    let image = ws.write_diagonal("diagonal.png");
    let mut session = session_with(
        &image,
        vec![SourceColorEntry::new(colors::BLUE).with_targets([colors::RED])],
    );

    let mut cancelled = FixedDirectory::cancelled();
    let result = generate_images(&mut session, &png_config(), &mut cancelled).unwrap();

    assert!(result.is_none());
    assert!(!ws.out_dir().exists());
    assert_eq!(session.file_count(), 1);
    assert_eq!(session.sources().len(), 1);
}

#[test]
fn test_cancel_token_stops_with_partial_generation() {
    let ws = TestWorkspace::new();
    let image = ws.write_diagonal("diagonal.png");
    let mut session = session_with(
        &image,
        vec![SourceColorEntry::new(colors::BLUE).with_targets([colors::RED, colors::GREEN])],
    );
    let token = CancelToken::new();
    token.cancel();

    let err = generate_images_with_cancel(
        &mut session,
        &png_config(),
        &mut ws.picker(),
        Some(token),
    )
    .unwrap_err();

    match err {
        SessionError::PartialGeneration {
            completed,
            total,
            failed_index,
            source,
        } => {
            assert_eq!((completed, total, failed_index), (0, 2, 0));
            assert!(matches!(*source, SessionError::Swap(SwapError::Cancelled)));
        }
        other => panic!("expected PartialGeneration, got {other:?}"),
    }
    // Nothing is reset on failure
    assert_eq!(session.file_count(), 1);
    assert_eq!(session.sources().len(), 1);
}

#[test]
fn test_recipe_sample_drives_generation() {
    let ws = TestWorkspace::new();
    let image = ws.write_diagonal("diagonal.png");
    let recipe = Recipe::from_yaml(
        r##"
sources:
  - sample: [1, 0]
    targets: ["#000000"]
"##,
    )
    .unwrap();

    let matrix = image_io::load_matrix(&image).unwrap();
    let entries = recipe.entries(Some(&matrix)).unwrap();
    assert_eq!(entries[0].identifier(), "#ffffff");

    let mut session = session_with(&image, entries);
    generate_images(&mut session, &png_config(), &mut ws.picker())
        .unwrap()
        .expect("not cancelled");

    let out = ws.out_dir().join("combination_0.png");
    assert_pixel_at(&out, 0, 1, colors::BLACK);
    assert_pixel_at(&out, 0, 0, colors::BLUE);
}
