use pixel_swap::{output_file_name, CancelToken, Combination, LookupTable, PixelMatrix, Recolorer};
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::error::{messages, SessionError};
use crate::models::{AppConfig, Session};
use crate::services::image_io;
use crate::services::picker::DirectoryPicker;

/// Outcome of a completed recoloring run.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GenerationReport {
    pub source: PathBuf,
    pub output_dir: PathBuf,
    /// Written files in combination order
    pub files: Vec<PathBuf>,
    pub count: usize,
    pub matched_pixels: usize,
}

/// Render every target combination of the selected image.
///
/// Steps, in order:
/// 1. drop source colors without targets from the session
/// 2. require exactly one selected file and at least one source color
/// 3. ask `picker` for the output directory; a cancel returns `Ok(None)`
/// 4. decode the image and build the lookup table once
/// 5. write `combination_<n>.<ext>` for every combination
/// 6. clear the selection and the source colors
///
/// A failure while rendering or saving returns
/// [`SessionError::PartialGeneration`] and leaves the session untouched.
pub fn generate_images(
    session: &mut Session,
    config: &AppConfig,
    picker: &mut dyn DirectoryPicker,
) -> Result<Option<GenerationReport>, SessionError> {
    generate_images_with_cancel(session, config, picker, None)
}

/// [`generate_images`] observing a cancel token between combinations.
pub fn generate_images_with_cancel(
    session: &mut Session,
    config: &AppConfig,
    picker: &mut dyn DirectoryPicker,
    cancel: Option<CancelToken>,
) -> Result<Option<GenerationReport>, SessionError> {
    let purged = session.purge_untargeted();
    if !purged.is_empty() {
        tracing::info!(count = purged.len(), "Dropped source colors without targets");
    }

    if session.file_count() != 1 {
        return Err(SessionError::validation(messages::SELECT_ONE_IMAGE));
    }
    if session.sources().is_empty() {
        return Err(SessionError::validation(messages::SELECT_ONE_COLOR));
    }

    let Some(output_dir) = picker.pick_directory()? else {
        tracing::info!("Output directory selection cancelled");
        return Ok(None);
    };
    std::fs::create_dir_all(&output_dir)?;

    let source = session.file_paths().remove(0);
    let matrix = image_io::load_matrix(&source)?;

    let mut recolorer = Recolorer::new(session.sources().to_vec())
        .strategy(config.matching.strategy.into());
    if let Some(token) = cancel.clone() {
        recolorer = recolorer.cancel_token(token);
    }

    let table = recolorer.build_table(&matrix)?;
    let matched_pixels = table.total_matches();
    let combinations = recolorer.combinations()?;
    let total = combinations.len();

    tracing::info!(
        source = %source.display(),
        colors = recolorer.entries().len(),
        matched_pixels,
        combinations = total,
        "Generating images"
    );

    let extension = config.output.format.extension();
    let mut files = Vec::with_capacity(total);
    for combination in combinations {
        let index = combination.index();
        let path = output_dir.join(output_file_name(index, extension));

        let step = write_combination(
            &recolorer,
            &matrix,
            &table,
            &combination,
            &path,
            config,
            cancel.as_ref(),
        );
        if let Err(e) = step {
            tracing::error!(index, error = %e, "Combination failed");
            return Err(SessionError::PartialGeneration {
                completed: files.len(),
                total,
                failed_index: index,
                source: Box::new(e),
            });
        }
        tracing::debug!(index, path = %path.display(), "Wrote combination");
        files.push(path);
    }

    tracing::info!(count = files.len(), dir = %output_dir.display(), "Finished");

    session.clear_selection();
    session.clear_sources();

    Ok(Some(GenerationReport {
        source,
        output_dir,
        count: files.len(),
        files,
        matched_pixels,
    }))
}

fn write_combination(
    recolorer: &Recolorer,
    matrix: &PixelMatrix,
    table: &LookupTable,
    combination: &Combination<'_>,
    path: &Path,
    config: &AppConfig,
    cancel: Option<&CancelToken>,
) -> Result<(), SessionError> {
    if cancel.is_some_and(CancelToken::is_cancelled) {
        return Err(pixel_swap::SwapError::Cancelled.into());
    }
    let output = recolorer.render(matrix, table, combination)?;
    image_io::save_matrix(&output, path, &config.output)?;
    Ok(())
}
