//! Weighted mean image composition.
//!
//! [`validate_records`] checks the probed metadata of the selected images,
//! [`compose`] loads each image once and averages them with integer weights.

mod compositor;
mod error;
mod record;

pub use compositor::{compose, mean_file_name, MeanAccumulator, MEAN_FILE_STEM};
pub use error::MeanError;
pub use record::{validate_records, ColorMode, ImageRecord, Resolution};
