use pixel_swap::{ImageRecord, Pixel, PixelMatrix, SourceColorEntry, Tolerance};
use std::path::{Path, PathBuf};

use crate::error::{messages, ImageIoError, SessionError};
use crate::services::image_io;

/// State of one working session: the file selection with its mean-image
/// metadata, and the registry of source colors.
///
/// Each selected file owns exactly one [`ImageRecord`]; adding a file creates
/// it with weight 1 and removing the file drops it.
#[derive(Debug, Default, Clone)]
pub struct Session {
    records: Vec<ImageRecord>,
    sources: Vec<SourceColorEntry>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    // -- file selection ---------------------------------------------------

    /// Add image files to the selection.
    ///
    /// Paths without a `.png`, `.jpg` or `.jpeg` extension and paths already
    /// selected are skipped. Returns the number of files added.
    pub fn select_files<I, P>(&mut self, paths: I) -> Result<usize, SessionError>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        self.select_files_with(paths, image_io::probe)
    }

    /// [`select_files`](Self::select_files) with a custom metadata probe.
    pub fn select_files_with<I, P, F>(
        &mut self,
        paths: I,
        mut probe: F,
    ) -> Result<usize, SessionError>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
        F: FnMut(&Path) -> Result<ImageRecord, ImageIoError>,
    {
        let mut added = 0;
        for path in paths {
            let path = path.as_ref();
            if !image_io::is_supported(path) {
                tracing::debug!(path = %path.display(), "Skipping unsupported file");
                continue;
            }
            if self.is_selected(path) {
                tracing::debug!(path = %path.display(), "Skipping already selected file");
                continue;
            }
            let record = probe(path)?;
            tracing::info!(
                path = %path.display(),
                width = record.width,
                height = record.height,
                mode = %record.mode,
                "Selected file"
            );
            self.records.push(record);
            added += 1;
        }
        Ok(added)
    }

    /// Add every supported file directly inside `dir`, sorted by name.
    pub fn select_folder(&mut self, dir: &Path) -> Result<usize, SessionError> {
        let mut paths = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_file() && image_io::is_supported(&path) {
                paths.push(path);
            }
        }
        paths.sort();
        self.select_files(paths)
    }

    /// Drop a file and its metadata. Returns `false` if it was not selected.
    pub fn remove_file(&mut self, path: &Path) -> bool {
        let before = self.records.len();
        self.records.retain(|record| record.path != path);
        before != self.records.len()
    }

    /// Drop every selected file and its metadata.
    pub fn clear_selection(&mut self) {
        self.records.clear();
    }

    /// Set the mean-image weight of the given files.
    ///
    /// Unselected paths are ignored. Returns the number of records changed.
    pub fn set_weight<P: AsRef<Path>>(
        &mut self,
        paths: &[P],
        weight: u32,
    ) -> Result<usize, SessionError> {
        if weight == 0 {
            return Err(SessionError::validation(messages::WEIGHT_AT_LEAST_ONE));
        }
        let mut changed = 0;
        for path in paths {
            if let Some(record) = self.records.iter_mut().find(|r| r.path == path.as_ref()) {
                record.weight = weight;
                changed += 1;
            }
        }
        Ok(changed)
    }

    pub fn is_selected(&self, path: &Path) -> bool {
        self.records.iter().any(|record| record.path == path)
    }

    /// Selected files in selection order.
    pub fn files(&self) -> impl Iterator<Item = &Path> {
        self.records.iter().map(|record| record.path.as_path())
    }

    pub fn file_count(&self) -> usize {
        self.records.len()
    }

    /// Mean-image metadata, one record per selected file.
    pub fn records(&self) -> &[ImageRecord] {
        &self.records
    }

    pub fn record(&self, path: &Path) -> Option<&ImageRecord> {
        self.records.iter().find(|record| record.path == path)
    }

    // -- source registry --------------------------------------------------

    /// Register a source color. A duplicate identifier is ignored and
    /// returns `false`.
    pub fn add_source(&mut self, entry: SourceColorEntry) -> bool {
        if self.source(entry.identifier()).is_some() {
            tracing::debug!(id = entry.identifier(), "Source color already registered");
            return false;
        }
        tracing::info!(id = entry.identifier(), "Registered source color");
        self.sources.push(entry);
        true
    }

    /// Register the color at column `x`, row `y` of `image`.
    pub fn sample_source(
        &mut self,
        image: &PixelMatrix,
        x: usize,
        y: usize,
    ) -> Result<bool, SessionError> {
        let pixel = image.pixel(y, x).ok_or_else(|| {
            SessionError::Validation(format!(
                "Point ({x}, {y}) is outside the {}x{} image.",
                image.width(),
                image.height()
            ))
        })?;
        Ok(self.add_source(SourceColorEntry::new(pixel)))
    }

    pub fn remove_source(&mut self, id: &str) -> Option<SourceColorEntry> {
        let index = self.sources.iter().position(|e| e.identifier() == id)?;
        Some(self.sources.remove(index))
    }

    /// Add a target color; duplicates are ignored and return `false`.
    pub fn add_target(&mut self, id: &str, target: Pixel) -> Result<bool, SessionError> {
        Ok(self.source_mut(id)?.add_target(target))
    }

    pub fn remove_target(&mut self, id: &str, index: usize) -> Result<Option<Pixel>, SessionError> {
        Ok(self.source_mut(id)?.remove_target(index))
    }

    pub fn set_tolerance(&mut self, id: &str, tolerance: Tolerance) -> Result<(), SessionError> {
        self.source_mut(id)?.set_tolerance(tolerance);
        Ok(())
    }

    pub fn set_preserve_difference(&mut self, id: &str, enabled: bool) -> Result<(), SessionError> {
        self.source_mut(id)?.set_preserve_difference(enabled);
        Ok(())
    }

    /// Drop source colors without targets, returning them.
    pub fn purge_untargeted(&mut self) -> Vec<SourceColorEntry> {
        let removed = pixel_swap::purge_untargeted(&mut self.sources);
        for entry in &removed {
            tracing::debug!(id = entry.identifier(), "Dropped source color without targets");
        }
        removed
    }

    pub fn sources(&self) -> &[SourceColorEntry] {
        &self.sources
    }

    pub fn source(&self, id: &str) -> Option<&SourceColorEntry> {
        self.sources.iter().find(|e| e.identifier() == id)
    }

    fn source_mut(&mut self, id: &str) -> Result<&mut SourceColorEntry, SessionError> {
        self.sources
            .iter_mut()
            .find(|e| e.identifier() == id)
            .ok_or_else(|| SessionError::UnknownSource(id.to_string()))
    }

    pub fn clear_sources(&mut self) {
        self.sources.clear();
    }

    /// Clear the file selection and its metadata.
    pub fn reset(&mut self) {
        self.clear_selection();
    }

    /// Paths of the selection, owned.
    pub fn file_paths(&self) -> Vec<PathBuf> {
        self.files().map(Path::to_path_buf).collect()
    }
}
