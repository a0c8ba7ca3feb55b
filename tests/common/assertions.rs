//! Assertion helpers for tests.

use pixel_swap::{Pixel, PixelMatrix};
use pretty_assertions::assert_eq;
use std::path::Path;

use colorswap::services::image_io;
use colorswap::SessionError;

/// Load an image and assert it has the given size.
pub fn assert_image_size(path: &Path, width: usize, height: usize) -> PixelMatrix {
    let matrix = image_io::load_matrix(path)
        .unwrap_or_else(|e| panic!("failed to load {}: {e}", path.display()));
    assert_eq!(
        (matrix.width(), matrix.height()),
        (width, height),
        "unexpected size for {}",
        path.display()
    );
    matrix
}

/// Assert the pixel at (row, column) of the image at `path`.
pub fn assert_pixel_at(path: &Path, row: usize, column: usize, expected: Pixel) {
    let matrix = image_io::load_matrix(path)
        .unwrap_or_else(|e| panic!("failed to load {}: {e}", path.display()));
    assert_eq!(
        matrix.pixel(row, column),
        Some(expected),
        "pixel ({row}, {column}) of {}",
        path.display()
    );
}

/// Assert the error is a validation failure with exactly `message`.
pub fn assert_validation(error: &SessionError, message: &str) {
    match error {
        SessionError::Validation(actual) => assert_eq!(actual, message),
        other => panic!("expected validation error '{message}', got {other:?}"),
    }
}
