use std::path::PathBuf;

use pixel_swap::{ColorError, MeanError, SwapError};
use thiserror::Error;

/// User-facing validation messages.
pub mod messages {
    pub const SELECT_ONE_IMAGE: &str = "Select 1 image in \"File selection\".";
    pub const SELECT_ONE_COLOR: &str = "Select at least 1 color to switch.";
    pub const SELECT_TWO_IMAGES: &str = "Select at least 2 images in \"File selection\"";
    pub const DIFFERENT_RESOLUTIONS: &str = "Selected files have different resolutions.";
    pub const WEIGHT_AT_LEAST_ONE: &str = "Weight must be at least 1.";
}

#[derive(Debug, Error)]
pub enum SessionError {
    /// Input rejected before any work was done; the message is shown as-is.
    #[error("{0}")]
    Validation(String),

    #[error("Color swap error: {0}")]
    Swap(#[from] SwapError),

    #[error("Image error: {0}")]
    ImageIo(#[from] ImageIoError),

    #[error("Recipe error: {0}")]
    Recipe(String),

    #[error("Unknown source color: {0}")]
    UnknownSource(String),

    #[error(
        "Generation stopped after {completed} of {total} files; combination {failed_index} failed: {source}"
    )]
    PartialGeneration {
        completed: usize,
        total: usize,
        failed_index: usize,
        #[source]
        source: Box<SessionError>,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ColorError> for SessionError {
    fn from(e: ColorError) -> Self {
        SessionError::Swap(SwapError::Color(e))
    }
}

impl From<MeanError> for SessionError {
    fn from(e: MeanError) -> Self {
        match e {
            MeanError::TooFewImages { .. } => {
                SessionError::Validation(messages::SELECT_TWO_IMAGES.to_string())
            }
            MeanError::MixedResolutions { .. } => {
                SessionError::Validation(messages::DIFFERENT_RESOLUTIONS.to_string())
            }
            MeanError::ZeroWeight { .. } => {
                SessionError::Validation(messages::WEIGHT_AT_LEAST_ONE.to_string())
            }
            other => SessionError::Swap(SwapError::Mean(other)),
        }
    }
}

impl SessionError {
    pub fn validation(message: &str) -> Self {
        SessionError::Validation(message.to_string())
    }

    /// True for errors that only reject the current input.
    pub fn is_validation(&self) -> bool {
        matches!(self, SessionError::Validation(_))
    }
}

#[derive(Debug, Error)]
pub enum ImageIoError {
    #[error("Failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode {}: {message}", path.display())]
    Decode { path: PathBuf, message: String },

    #[error("Failed to encode {}: {message}", path.display())]
    Encode { path: PathBuf, message: String },

    #[error("Unsupported image format: {0}")]
    UnsupportedFormat(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
