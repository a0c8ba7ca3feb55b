use pixel_swap::{compose, mean_file_name, validate_records};
use serde::Serialize;
use std::path::PathBuf;

use crate::error::SessionError;
use crate::models::{AppConfig, Session};
use crate::services::image_io;
use crate::services::picker::DirectoryPicker;

/// Outcome of a completed mean-image run.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MeanReport {
    pub output: PathBuf,
    pub images: usize,
    pub weight_sum: u64,
    pub width: usize,
    pub height: usize,
    pub channels: usize,
}

/// Average the selected images with their weights and save the result.
///
/// Validates the selection first (at least two files sharing one
/// resolution), then asks `picker` for the output directory; a cancel
/// returns `Ok(None)`. On success the selection is cleared.
pub fn generate_mean_image(
    session: &mut Session,
    config: &AppConfig,
    picker: &mut dyn DirectoryPicker,
) -> Result<Option<MeanReport>, SessionError> {
    let resolution = validate_records(session.records())?;

    let Some(output_dir) = picker.pick_directory()? else {
        tracing::info!("Output directory selection cancelled");
        return Ok(None);
    };
    std::fs::create_dir_all(&output_dir)?;

    let records = session.records();
    let weight_sum: u64 = records.iter().map(|r| u64::from(r.weight)).sum();
    tracing::info!(
        images = records.len(),
        weight_sum,
        resolution = %resolution,
        "Composing mean image"
    );

    let mean = compose(records, resolution, |record| {
        tracing::debug!(path = %record.path.display(), weight = record.weight, "Adding image");
        image_io::load_matrix(&record.path).map_err(SessionError::from)
    })?;

    let output = output_dir.join(mean_file_name(config.output.format.extension()));
    image_io::save_matrix(&mean, &output, &config.output)?;
    tracing::info!(path = %output.display(), "Wrote mean image");

    let report = MeanReport {
        output,
        images: records.len(),
        weight_sum,
        width: resolution.width,
        height: resolution.height,
        channels: resolution.channels,
    };
    session.reset();
    Ok(Some(report))
}
