//! Rendering one combination onto a copy of the source matrix.

use crate::api::SwapError;
use crate::color::Pixel;
use crate::combination::Combination;
use crate::lookup::{LookupTable, MatchRecord};
use crate::matrix::PixelMatrix;

/// File stem prefix of rendered combinations.
pub const COMBINATION_FILE_PREFIX: &str = "combination_";

/// Apply one combination to a working copy of `matrix`.
///
/// For every assignment, each pixel recorded in the table under the
/// assignment's identifier becomes the target color. Records flagged with
/// preserve-difference keep their deviation from the source color:
/// `clamp(target + delta, 0, 255)` per channel.
///
/// `matrix` is left untouched. Assignments are applied in order, so when two
/// source colors matched the same pixel the later assignment wins.
///
/// # Errors
///
/// - [`SwapError::UnknownIdentifier`] if an assignment is missing from `table`
/// - [`SwapError::IncompatibleColor`] if a target cannot be expressed in the
///   matrix layout
///
/// # Example
///
/// ```
/// use pixel_swap::{
///     apply_combination, build_table, generate, Pixel, PixelMatrix, SourceColorEntry,
/// };
///
/// let matrix = PixelMatrix::filled(2, 1, Pixel::rgb(10, 10, 10));
/// let entries = [SourceColorEntry::new(Pixel::rgb(10, 10, 10))
///     .with_targets([Pixel::rgb(255, 0, 0)])];
///
/// let table = build_table(&matrix, &entries).unwrap();
/// let combo = generate(&entries).unwrap().next().unwrap();
/// let out = apply_combination(&matrix, &table, &combo).unwrap();
///
/// assert_eq!(out.pixel(0, 1), Some(Pixel::rgb(255, 0, 0)));
/// assert_eq!(matrix.pixel(0, 1), Some(Pixel::rgb(10, 10, 10)));
/// ```
pub fn apply_combination(
    matrix: &PixelMatrix,
    table: &LookupTable,
    combination: &Combination<'_>,
) -> Result<PixelMatrix, SwapError> {
    let mut working = matrix.clone();

    for assignment in combination.assignments() {
        let records = table
            .get(assignment.identifier)
            .ok_or_else(|| SwapError::UnknownIdentifier {
                identifier: assignment.identifier.to_string(),
            })?;
        let target = assignment
            .target
            .conform_to(matrix.layout())
            .map_err(|error| SwapError::IncompatibleColor {
                identifier: assignment.identifier.to_string(),
                error,
            })?;

        for record in records {
            paint(&mut working, record, target);
        }
    }

    Ok(working)
}

#[inline]
fn paint(matrix: &mut PixelMatrix, record: &MatchRecord, target: Pixel) {
    let pixel = matrix.channels_at_mut(record.row, record.column);
    if record.preserve_difference {
        let delta = record.delta.components();
        for (i, (out, &base)) in pixel.iter_mut().zip(target.channels()).enumerate() {
            let shift = delta.get(i).copied().unwrap_or(0);
            *out = (i16::from(base) + shift).clamp(0, 255) as u8;
        }
    } else {
        pixel.copy_from_slice(target.channels());
    }
}

/// Output file name for the combination at `index`: `combination_<index>.<ext>`.
///
/// ```
/// assert_eq!(pixel_swap::output_file_name(3, "jpg"), "combination_3.jpg");
/// ```
pub fn output_file_name(index: usize, extension: &str) -> String {
    format!("{}{}.{}", COMBINATION_FILE_PREFIX, index, extension)
}
