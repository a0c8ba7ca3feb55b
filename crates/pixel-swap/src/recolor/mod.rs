//! Recoloring a matrix according to one combination.

mod apply;

pub use apply::{apply_combination, output_file_name, COMBINATION_FILE_PREFIX};
