//! Weighted per-pixel mean of same-shaped images.

use crate::color::ChannelLayout;
use crate::matrix::PixelMatrix;

use super::error::MeanError;
use super::record::{ImageRecord, Resolution};

/// File stem of the composed mean image.
pub const MEAN_FILE_STEM: &str = "mean_image_result";

/// `mean_image_result.<ext>`
pub fn mean_file_name(extension: &str) -> String {
    format!("{}.{}", MEAN_FILE_STEM, extension)
}

/// Integer accumulator for a weighted mean.
///
/// Each added image contributes `weight` times its channel values; the
/// result divides by the weight sum and truncates toward zero, so a mean of
/// 255 and 0 is 127.
///
/// # Example
///
/// ```
/// use pixel_swap::{MeanAccumulator, Pixel, PixelMatrix, Resolution};
///
/// let mut acc = MeanAccumulator::new(Resolution::new(1, 1, 3)).unwrap();
/// acc.add(&PixelMatrix::filled(1, 1, Pixel::rgb(255, 0, 0)), 1).unwrap();
/// acc.add(&PixelMatrix::filled(1, 1, Pixel::rgb(0, 0, 0)), 1).unwrap();
///
/// let mean = acc.finish().unwrap();
/// assert_eq!(mean.pixel(0, 0), Some(Pixel::rgb(127, 0, 0)));
/// ```
#[derive(Debug, Clone)]
pub struct MeanAccumulator {
    resolution: Resolution,
    layout: ChannelLayout,
    sums: Vec<u64>,
    weight_sum: u64,
}

impl MeanAccumulator {
    /// Zeroed accumulator for images of `resolution`.
    ///
    /// # Errors
    ///
    /// [`MeanError::UnsupportedChannels`] when the channel count has no
    /// [`ChannelLayout`] (2-channel modes such as `LA`).
    pub fn new(resolution: Resolution) -> Result<Self, MeanError> {
        let layout = ChannelLayout::from_channels(resolution.channels)
            .map_err(|_| MeanError::UnsupportedChannels(resolution.channels))?;
        let len = resolution.height * resolution.width * resolution.channels;
        Ok(Self {
            resolution,
            layout,
            sums: vec![0; len],
            weight_sum: 0,
        })
    }

    /// Add `matrix` with the given weight.
    ///
    /// Equivalent to adding the matrix `weight` times.
    ///
    /// # Errors
    ///
    /// - [`MeanError::ShapeMismatch`] (without a path) when the matrix shape
    ///   differs from the accumulator's resolution
    /// - [`MeanError::ZeroWeight`] for weight 0
    pub fn add(&mut self, matrix: &PixelMatrix, weight: u32) -> Result<(), MeanError> {
        let found = Resolution::from(matrix.shape());
        if found != self.resolution || matrix.layout() != self.layout {
            return Err(MeanError::ShapeMismatch {
                path: None,
                expected: self.resolution,
                found,
            });
        }
        if weight == 0 {
            return Err(MeanError::ZeroWeight {
                path: Default::default(),
            });
        }

        let weight = u64::from(weight);
        for (sum, &value) in self.sums.iter_mut().zip(matrix.as_bytes()) {
            *sum += u64::from(value) * weight;
        }
        self.weight_sum += weight;
        Ok(())
    }

    /// Sum of the weights added so far.
    pub fn weight_sum(&self) -> u64 {
        self.weight_sum
    }

    /// Divide by the weight sum and produce the mean image.
    ///
    /// # Errors
    ///
    /// [`MeanError::TooFewImages`] when nothing was added.
    pub fn finish(self) -> Result<PixelMatrix, MeanError> {
        if self.weight_sum == 0 {
            return Err(MeanError::TooFewImages { count: 0 });
        }
        let divisor = self.weight_sum as f64;
        let data = self
            .sums
            .iter()
            .map(|&sum| (sum as f64 / divisor) as u8)
            .collect();

        PixelMatrix::from_raw(
            data,
            self.resolution.width,
            self.resolution.height,
            self.layout,
        )
        .ok_or(MeanError::UnsupportedChannels(self.resolution.channels))
    }
}

/// Compose the weighted mean of `records`.
///
/// `load` decodes one record into a matrix; each record is loaded exactly
/// once, in order. Call [`validate_records`](crate::validate_records) first
/// to obtain `resolution`.
///
/// # Errors
///
/// Errors from `load` are returned as-is. A matrix whose shape differs from
/// `resolution` fails with [`MeanError::ShapeMismatch`] naming the record.
pub fn compose<E, F>(
    records: &[ImageRecord],
    resolution: Resolution,
    mut load: F,
) -> Result<PixelMatrix, E>
where
    E: From<MeanError>,
    F: FnMut(&ImageRecord) -> Result<PixelMatrix, E>,
{
    let mut accumulator = MeanAccumulator::new(resolution)?;
    for record in records {
        let matrix = load(record)?;
        accumulator
            .add(&matrix, record.weight)
            .map_err(|err| match err {
                MeanError::ZeroWeight { .. } => MeanError::ZeroWeight {
                    path: record.path.clone(),
                },
                other => other.with_path(&record.path),
            })?;
    }
    Ok(accumulator.finish()?)
}
