//! Recolorer builder -- the primary entry point for recoloring an image.
//!
//! [`Recolorer`] ties table building, combination generation and rendering
//! together with a scan strategy and an optional cancel token.

use crate::cancel::CancelToken;
use crate::combination::{generate, Combination, Combinations};
use crate::lookup::{build_table_with, LookupTable, ScanStrategy};
use crate::matrix::PixelMatrix;
use crate::recolor::apply_combination;
use crate::source::SourceColorEntry;

use super::SwapError;

/// High-level recoloring builder.
///
/// # Design
///
/// - Constructor takes the source color entries; configuration methods
///   consume and return `self`
/// - [`render_all()`](Self::render_all) takes `&self`, so one recolorer can
///   process several images
/// - The lookup table is built once per image and shared by every
///   combination rendered from it
///
/// # Example
///
/// ```
/// use pixel_swap::{Pixel, PixelMatrix, Recolorer, SourceColorEntry};
///
/// let entries = vec![SourceColorEntry::new(Pixel::rgb(0, 0, 0))
///     .with_targets([Pixel::rgb(255, 0, 0), Pixel::rgb(0, 0, 255)])];
/// let recolorer = Recolorer::new(entries);
///
/// let image = PixelMatrix::filled(2, 2, Pixel::rgb(0, 0, 0));
/// let mut outputs = Vec::new();
/// let written = recolorer
///     .render_all(&image, |combo, matrix| -> Result<(), pixel_swap::SwapError> {
///         outputs.push((combo.index(), matrix));
///         Ok(())
///     })
///     .unwrap();
///
/// assert_eq!(written, 2);
/// assert_eq!(outputs[1].1.pixel(0, 0), Some(Pixel::rgb(0, 0, 255)));
/// ```
#[derive(Debug, Clone)]
pub struct Recolorer {
    entries: Vec<SourceColorEntry>,
    strategy: ScanStrategy,
    cancel: Option<CancelToken>,
}

impl Recolorer {
    /// Create a recolorer for the given source colors.
    ///
    /// Defaults to [`ScanStrategy::SinglePass`] and no cancellation.
    pub fn new(entries: Vec<SourceColorEntry>) -> Self {
        Self {
            entries,
            strategy: ScanStrategy::default(),
            cancel: None,
        }
    }

    /// Set the table scan strategy.
    #[inline]
    pub fn strategy(mut self, strategy: ScanStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Observe `token` during table builds and between combinations.
    #[inline]
    pub fn cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    #[inline]
    pub fn entries(&self) -> &[SourceColorEntry] {
        &self.entries
    }

    /// Build the lookup table for `matrix`.
    pub fn build_table(&self, matrix: &PixelMatrix) -> Result<LookupTable, SwapError> {
        build_table_with(matrix, &self.entries, self.strategy, self.cancel.as_ref())
    }

    /// Enumerate the target combinations.
    pub fn combinations(&self) -> Result<Combinations<'_>, SwapError> {
        generate(&self.entries)
    }

    /// Render a single combination using a prebuilt table.
    pub fn render(
        &self,
        matrix: &PixelMatrix,
        table: &LookupTable,
        combination: &Combination<'_>,
    ) -> Result<PixelMatrix, SwapError> {
        apply_combination(matrix, table, combination)
    }

    /// Render every combination of `matrix`, handing each result to `sink`.
    ///
    /// Combinations are produced in generation order. The first error from
    /// rendering or from `sink` stops the run. Returns the number of
    /// combinations handed to `sink`.
    ///
    /// # Errors
    ///
    /// Any [`SwapError`] from table building or rendering (including
    /// [`SwapError::Cancelled`], checked before each combination), converted
    /// into `E`, or the sink's own error.
    pub fn render_all<E, F>(&self, matrix: &PixelMatrix, mut sink: F) -> Result<usize, E>
    where
        E: From<SwapError>,
        F: FnMut(&Combination<'_>, PixelMatrix) -> Result<(), E>,
    {
        let combinations = self.combinations()?;
        let table = self.build_table(matrix)?;

        let mut rendered = 0;
        for combination in combinations {
            if self.cancel.as_ref().is_some_and(CancelToken::is_cancelled) {
                return Err(SwapError::Cancelled.into());
            }
            let output = self.render(matrix, &table, &combination)?;
            sink(&combination, output)?;
            rendered += 1;
        }
        Ok(rendered)
    }
}
