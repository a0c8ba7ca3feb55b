//! Test fixtures: small images written into a temporary directory.

use std::path::{Path, PathBuf};

use colorswap::models::{AppConfig, OutputConfig, OutputFormat};
use colorswap::services::{image_io, FixedDirectory};
use pixel_swap::{Pixel, PixelMatrix};
use tempfile::TempDir;

/// Colors used by the fixture images
pub mod colors {
    use pixel_swap::Pixel;

    pub const BLUE: Pixel = Pixel::rgb(100, 150, 200);
    pub const WHITE: Pixel = Pixel::rgb(255, 255, 255);
    pub const RED: Pixel = Pixel::rgb(255, 0, 0);
    pub const GREEN: Pixel = Pixel::rgb(0, 255, 0);
    pub const BLACK: Pixel = Pixel::rgb(0, 0, 0);
}

/// Config writing lossless PNG so pixel values survive the round trip.
pub fn png_config() -> AppConfig {
    AppConfig {
        output: OutputConfig {
            format: OutputFormat::Png,
            ..OutputConfig::default()
        },
        ..AppConfig::default()
    }
}

/// Temporary directory holding input images and an output folder.
pub struct TestWorkspace {
    dir: TempDir,
}

impl TestWorkspace {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Output directory (not created yet).
    pub fn out_dir(&self) -> PathBuf {
        self.dir.path().join("out")
    }

    /// Picker answering with [`out_dir`](Self::out_dir).
    pub fn picker(&self) -> FixedDirectory {
        FixedDirectory::new(self.out_dir())
    }

    /// Write `matrix` as PNG under `name` and return its path.
    pub fn write_png(&self, name: &str, matrix: &PixelMatrix) -> PathBuf {
        let path = self.dir.path().join(name);
        image_io::save_matrix(matrix, &path, &png_config().output).expect("write fixture png");
        path
    }

    /// Write a `width`x`height` image filled with `pixel`.
    pub fn write_filled(&self, name: &str, width: usize, height: usize, pixel: Pixel) -> PathBuf {
        self.write_png(name, &PixelMatrix::filled(width, height, pixel))
    }

    /// 2x2 image: blue on the diagonal, white elsewhere.
    pub fn write_diagonal(&self, name: &str) -> PathBuf {
        let matrix = PixelMatrix::from_pixels(
            2,
            2,
            &[colors::BLUE, colors::WHITE, colors::WHITE, colors::BLUE],
        )
        .expect("2x2 pixels");
        self.write_png(name, &matrix)
    }

    /// Sorted names of the files in the output directory.
    pub fn output_names(&self) -> Vec<String> {
        let Ok(entries) = std::fs::read_dir(self.out_dir()) else {
            return Vec::new();
        };
        let mut names: Vec<String> = entries
            .filter_map(Result::ok)
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }
}
