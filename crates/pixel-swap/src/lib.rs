//! pixel-swap: Tolerance-aware color replacement and weighted mean images
//!
//! This library finds the pixels of an image that match a set of source
//! colors, renders every combination of replacement colors for them, and
//! averages same-sized images with integer weights.
//!
//! # Quick Start
//!
//! The [`Recolorer`] builder is the primary entry point:
//!
//! ```
//! use pixel_swap::{Pixel, PixelMatrix, Recolorer, SourceColorEntry, SwapError, Tolerance};
//!
//! let entries = vec![SourceColorEntry::new(Pixel::rgb(100, 150, 200))
//!     .with_tolerance(Tolerance::cubic(8))
//!     .preserve_difference(true)
//!     .with_targets([Pixel::rgb(255, 0, 0), Pixel::rgb(0, 255, 0)])];
//!
//! let image = PixelMatrix::filled(4, 4, Pixel::rgb(102, 148, 200));
//! let mut rendered = Vec::new();
//! Recolorer::new(entries)
//!     .render_all(&image, |combo, matrix| -> Result<(), SwapError> {
//!         rendered.push((combo.index(), matrix));
//!         Ok(())
//!     })
//!     .unwrap();
//!
//! assert_eq!(rendered.len(), 2);
//! assert_eq!(rendered[0].1.pixel(0, 0), Some(Pixel::rgb(255, 0, 0)));
//! assert_eq!(rendered[1].1.pixel(3, 3), Some(Pixel::rgb(2, 253, 0)));
//! ```
//!
//! # Building Blocks
//!
//! The builder composes four steps that are also usable on their own:
//!
//! 1. [`matches`]: compare one pixel against a reference color under a
//!    [`Tolerance`] and report the per-channel [`Delta`]
//! 2. [`build_table`] / [`build_table_single_pass`]: record every matching
//!    coordinate per source color in a [`LookupTable`]
//! 3. [`generate`]: enumerate [`Combinations`] of one target per source color
//! 4. [`apply_combination`]: render one combination onto a copy of the image
//!
//! ## Tolerance Modes
//!
//! | Mode | Matches when | Delta |
//! |------|--------------|-------|
//! | Exact | every channel is equal | always zero |
//! | Cubic | every `abs(candidate - reference) < value` | `candidate - reference` |
//! | Spherical | `sum((candidate - reference)^2) < value^2` | `candidate - reference` |
//!
//! Both bounds are strict. A disabled tolerance or a value of 0 is exact.
//!
//! ## Combination Order
//!
//! Combinations run over the entries' target lists with the last entry
//! varying fastest. With entries `A = [a1, a2]` and `B = [b1, b2, b3]` the
//! order is `a1b1, a1b2, a1b3, a2b1, a2b2, a2b3`, and output `n` is written
//! as `combination_<n>`.
//!
//! # Mean Images
//!
//! ```
//! use pixel_swap::{
//!     compose, validate_records, ColorMode, ImageRecord, MeanError, Pixel, PixelMatrix,
//! };
//!
//! let records = [
//!     ImageRecord::new("white.png", 1, 1, ColorMode::L),
//!     ImageRecord::new("black.png", 1, 1, ColorMode::L).with_weight(3),
//! ];
//! let resolution = validate_records(&records).unwrap();
//!
//! let mean = compose(&records, resolution, |record| -> Result<_, MeanError> {
//!     let value = if record.path.ends_with("white.png") { 255 } else { 0 };
//!     Ok(PixelMatrix::filled(1, 1, Pixel::gray(value)))
//! })
//! .unwrap();
//!
//! // 255 / 4, truncated
//! assert_eq!(mean.pixel(0, 0), Some(Pixel::gray(63)));
//! ```

pub mod api;
pub mod cancel;
pub mod color;
pub mod combination;
pub mod lookup;
pub mod matching;
pub mod matrix;
pub mod mean;
pub mod recolor;
pub mod source;


pub use api::{Recolorer, SwapError};
pub use cancel::CancelToken;
pub use color::{ChannelLayout, ColorError, Pixel};
pub use combination::{generate, Assignment, Combination, Combinations};
pub use lookup::{
    build_table, build_table_single_pass, build_table_with, LookupTable, MatchRecord,
    ScanStrategy,
};
pub use matching::{match_channels, matches, Delta, MatchResult, Tolerance, ToleranceMode};
pub use matrix::PixelMatrix;
pub use mean::{
    compose, mean_file_name, validate_records, ColorMode, ImageRecord, MeanAccumulator,
    MeanError, Resolution, MEAN_FILE_STEM,
};
pub use recolor::{apply_combination, output_file_name, COMBINATION_FILE_PREFIX};
pub use source::{purge_untargeted, SourceColorEntry};
