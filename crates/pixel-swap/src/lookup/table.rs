//! Lookup table construction: which pixels match which source color.

use std::collections::HashMap;
use std::collections::HashSet;

use crate::api::SwapError;
use crate::cancel::CancelToken;
use crate::color::Pixel;
use crate::matching::{match_channels, Delta, Tolerance};
use crate::matrix::PixelMatrix;
use crate::source::SourceColorEntry;

/// One matched pixel of a source color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchRecord {
    pub row: usize,
    pub column: usize,
    /// Copied from the entry's preserve-difference flag at build time.
    pub preserve_difference: bool,
    /// `pixel - reference` per channel; zero under exact matching.
    pub delta: Delta,
}

impl MatchRecord {
    pub fn new(row: usize, column: usize, preserve_difference: bool, delta: Delta) -> Self {
        Self {
            row,
            column,
            preserve_difference,
            delta,
        }
    }
}

/// How the matrix is traversed while building a table.
///
/// Both strategies produce identical tables; they differ only in cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanStrategy {
    /// One full matrix scan per source color (entries x pixels passes).
    PerEntry,
    /// One scan checking every source color at each pixel.
    #[default]
    SinglePass,
}

/// Source color identifier to its matched pixels, in row-major order.
///
/// Built fresh for one matrix. Every entry present at build time owns a
/// slot, empty when nothing matched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LookupTable {
    slots: HashMap<String, Vec<MatchRecord>>,
    order: Vec<String>,
}

impl LookupTable {
    /// Matches recorded for `identifier`.
    pub fn get(&self, identifier: &str) -> Option<&[MatchRecord]> {
        self.slots.get(identifier).map(Vec::as_slice)
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.slots.contains_key(identifier)
    }

    /// Identifiers in the order the entries were given.
    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Number of slots (source colors).
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Total number of match records across all slots.
    pub fn total_matches(&self) -> usize {
        self.slots.values().map(Vec::len).sum()
    }

    fn with_slots(prepared: &[PreparedEntry<'_>]) -> Self {
        let mut table = Self::default();
        for entry in prepared {
            table.slots.insert(entry.identifier.to_string(), Vec::new());
            table.order.push(entry.identifier.to_string());
        }
        table
    }

    fn push(&mut self, identifier: &str, record: MatchRecord) {
        if let Some(slot) = self.slots.get_mut(identifier) {
            slot.push(record);
        }
    }
}

/// Entry settings with the reference pixel conformed to the matrix layout.
struct PreparedEntry<'a> {
    identifier: &'a str,
    reference: Pixel,
    tolerance: Tolerance,
    preserve_difference: bool,
}

fn prepare<'a>(
    matrix: &PixelMatrix,
    entries: &'a [SourceColorEntry],
) -> Result<Vec<PreparedEntry<'a>>, SwapError> {
    let mut seen = HashSet::new();
    entries
        .iter()
        .map(|entry| {
            if !seen.insert(entry.identifier()) {
                return Err(SwapError::DuplicateIdentifier {
                    identifier: entry.identifier().to_string(),
                });
            }
            let reference = entry.reference().conform_to(matrix.layout()).map_err(|error| {
                SwapError::IncompatibleColor {
                    identifier: entry.identifier().to_string(),
                    error,
                }
            })?;
            Ok(PreparedEntry {
                identifier: entry.identifier(),
                reference,
                tolerance: entry.tolerance(),
                preserve_difference: entry.keeps_difference(),
            })
        })
        .collect()
}

fn check_cancel(cancel: Option<&CancelToken>) -> Result<(), SwapError> {
    match cancel {
        Some(token) if token.is_cancelled() => Err(SwapError::Cancelled),
        _ => Ok(()),
    }
}

/// Build a lookup table with one full matrix scan per entry.
///
/// # Errors
///
/// - [`SwapError::DuplicateIdentifier`] when two entries share an identifier
/// - [`SwapError::IncompatibleColor`] when a reference color cannot be
///   expressed in the matrix layout
///
/// # Example
///
/// ```
/// use pixel_swap::{build_table, Pixel, PixelMatrix, SourceColorEntry};
///
/// let matrix = PixelMatrix::from_pixels(
///     2,
///     2,
///     &[
///         Pixel::rgb(100, 150, 200),
///         Pixel::rgb(100, 150, 200),
///         Pixel::rgb(50, 50, 50),
///         Pixel::rgb(200, 200, 200),
///     ],
/// )
/// .unwrap();
/// let entries = [SourceColorEntry::new(Pixel::rgb(100, 150, 200)).with_identifier("#6496C8")];
///
/// let table = build_table(&matrix, &entries).unwrap();
/// let coords: Vec<_> = table
///     .get("#6496C8")
///     .unwrap()
///     .iter()
///     .map(|m| (m.row, m.column))
///     .collect();
/// assert_eq!(coords, [(0, 0), (0, 1)]);
/// ```
pub fn build_table(
    matrix: &PixelMatrix,
    entries: &[SourceColorEntry],
) -> Result<LookupTable, SwapError> {
    build_table_with(matrix, entries, ScanStrategy::PerEntry, None)
}

/// Build a lookup table in a single matrix scan.
///
/// Same result as [`build_table`], in `O(pixels)` passes instead of
/// `O(entries x pixels)`.
pub fn build_table_single_pass(
    matrix: &PixelMatrix,
    entries: &[SourceColorEntry],
) -> Result<LookupTable, SwapError> {
    build_table_with(matrix, entries, ScanStrategy::SinglePass, None)
}

/// Build a lookup table with an explicit strategy and optional cancellation.
///
/// The token is checked once per scanned row; a cancelled build returns
/// [`SwapError::Cancelled`] and no table.
pub fn build_table_with(
    matrix: &PixelMatrix,
    entries: &[SourceColorEntry],
    strategy: ScanStrategy,
    cancel: Option<&CancelToken>,
) -> Result<LookupTable, SwapError> {
    let prepared = prepare(matrix, entries)?;
    let mut table = LookupTable::with_slots(&prepared);

    match strategy {
        ScanStrategy::PerEntry => {
            for entry in &prepared {
                for row in 0..matrix.height() {
                    check_cancel(cancel)?;
                    for column in 0..matrix.width() {
                        scan_pixel(matrix, row, column, entry, &mut table);
                    }
                }
            }
        }
        ScanStrategy::SinglePass => {
            for row in 0..matrix.height() {
                check_cancel(cancel)?;
                for column in 0..matrix.width() {
                    for entry in &prepared {
                        scan_pixel(matrix, row, column, entry, &mut table);
                    }
                }
            }
        }
    }

    Ok(table)
}

#[inline]
fn scan_pixel(
    matrix: &PixelMatrix,
    row: usize,
    column: usize,
    entry: &PreparedEntry<'_>,
    table: &mut LookupTable,
) {
    let result = match_channels(
        entry.reference.channels(),
        matrix.channels_at(row, column),
        &entry.tolerance,
    );
    if result.matched {
        table.push(
            entry.identifier,
            MatchRecord::new(row, column, entry.preserve_difference, result.delta),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::ChannelLayout;

    fn sample_matrix() -> PixelMatrix {
        PixelMatrix::from_pixels(
            2,
            2,
            &[
                Pixel::rgb(100, 150, 200),
                Pixel::rgb(100, 150, 200),
                Pixel::rgb(50, 50, 50),
                Pixel::rgb(200, 200, 200),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_exact_table_row_major() {
        let entries =
            [SourceColorEntry::new(Pixel::rgb(100, 150, 200)).with_identifier("#6496C8")];
        let table = build_table(&sample_matrix(), &entries).unwrap();

        assert_eq!(table.len(), 1);
        assert_eq!(
            table.get("#6496C8").unwrap(),
            &[
                MatchRecord::new(0, 0, false, Delta::zero(3)),
                MatchRecord::new(0, 1, false, Delta::zero(3)),
            ]
        );
    }

    #[test]
    fn test_unmatched_entry_gets_empty_slot() {
        let entries = [
            SourceColorEntry::new(Pixel::rgb(1, 2, 3)),
            SourceColorEntry::new(Pixel::rgb(50, 50, 50)),
        ];
        let table = build_table(&sample_matrix(), &entries).unwrap();

        assert_eq!(table.get("#010203"), Some(&[][..]));
        assert_eq!(table.get("#323232").map(<[_]>::len), Some(1));
        assert_eq!(table.identifiers().collect::<Vec<_>>(), ["#010203", "#323232"]);
    }

    #[test]
    fn test_tolerance_records_delta_and_flag() {
        let entries = [SourceColorEntry::new(Pixel::rgb(55, 45, 50))
            .with_tolerance(Tolerance::cubic(6))
            .preserve_difference(true)];
        let table = build_table(&sample_matrix(), &entries).unwrap();

        assert_eq!(
            table.get("#372d32").unwrap(),
            &[MatchRecord::new(
                1,
                0,
                true,
                Delta::from_components(&[-5, 5, 0])
            )]
        );
    }

    #[test]
    fn test_strategies_agree() {
        let mut pixels = Vec::new();
        for i in 0..64u8 {
            pixels.push(Pixel::rgb(i * 3, 255 - i * 2, (i % 7) * 30));
        }
        let matrix = PixelMatrix::from_pixels(8, 8, &pixels).unwrap();
        let entries = [
            SourceColorEntry::new(Pixel::rgb(30, 200, 60)).with_tolerance(Tolerance::cubic(40)),
            SourceColorEntry::new(Pixel::rgb(90, 150, 90))
                .with_tolerance(Tolerance::spherical(50))
                .preserve_difference(true),
            SourceColorEntry::new(Pixel::rgb(0, 255, 0)),
        ];

        let per_entry = build_table(&matrix, &entries).unwrap();
        let single = build_table_single_pass(&matrix, &entries).unwrap();
        assert_eq!(per_entry, single);
        assert!(per_entry.total_matches() > 0);
    }

    #[test]
    fn test_overlapping_entries_keep_independent_deltas() {
        let matrix = PixelMatrix::filled(1, 1, Pixel::rgb(100, 100, 100));
        let entries = [
            SourceColorEntry::new(Pixel::rgb(98, 100, 100)).with_tolerance(Tolerance::cubic(5)),
            SourceColorEntry::new(Pixel::rgb(100, 103, 100)).with_tolerance(Tolerance::cubic(5)),
        ];
        let table = build_table_single_pass(&matrix, &entries).unwrap();

        assert_eq!(table.get("#626464").unwrap()[0].delta.components(), &[2, 0, 0]);
        assert_eq!(table.get("#646764").unwrap()[0].delta.components(), &[0, -3, 0]);
    }

    #[test]
    fn test_duplicate_identifier_rejected() {
        let entries = [
            SourceColorEntry::new(Pixel::rgb(1, 1, 1)).with_identifier("same"),
            SourceColorEntry::new(Pixel::rgb(2, 2, 2)).with_identifier("same"),
        ];
        assert_eq!(
            build_table(&sample_matrix(), &entries),
            Err(SwapError::DuplicateIdentifier {
                identifier: "same".into()
            })
        );
    }

    #[test]
    fn test_reference_conformed_to_gray_matrix() {
        let matrix =
            PixelMatrix::from_raw(vec![10, 20, 10, 30], 2, 2, ChannelLayout::Gray).unwrap();
        let table = build_table(&matrix, &[SourceColorEntry::new(Pixel::rgb(10, 10, 10))]).unwrap();
        let coords: Vec<_> = table
            .get("#0a0a0a")
            .unwrap()
            .iter()
            .map(|m| (m.row, m.column))
            .collect();
        assert_eq!(coords, [(0, 0), (1, 0)]);

        let err = build_table(&matrix, &[SourceColorEntry::new(Pixel::rgb(1, 2, 3))]);
        assert!(matches!(err, Err(SwapError::IncompatibleColor { .. })));
    }

    #[test]
    fn test_cancelled_build() {
        let token = CancelToken::new();
        token.cancel();
        let entries = [SourceColorEntry::new(Pixel::rgb(1, 1, 1))];
        for strategy in [ScanStrategy::PerEntry, ScanStrategy::SinglePass] {
            assert_eq!(
                build_table_with(&sample_matrix(), &entries, strategy, Some(&token)),
                Err(SwapError::Cancelled)
            );
        }
    }
}
