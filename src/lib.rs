//! Colorswap - recolor images by swapping picked source colors
//!
//! Builds every combination of replacement colors for one image, and
//! averages several same-sized images into a weighted mean image.
//! The pixel work lives in the `pixel_swap` crate; this library adds
//! image files, configuration, recipes and the session state the CLI drives.

pub mod error;
pub mod models;
pub mod services;

pub use error::{ImageIoError, SessionError};
pub use models::{AppConfig, Recipe, Session};
pub use services::{generate_images, generate_mean_image, DirectoryPicker, FixedDirectory};
