//! Mean-image error types.

use std::fmt;
use std::path::PathBuf;

use super::record::Resolution;

/// Error raised while validating or composing a mean image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MeanError {
    /// Fewer than two images were selected
    TooFewImages {
        /// Number of records given
        count: usize,
    },
    /// The records do not share one `(height, width, channels)` resolution
    MixedResolutions {
        expected: Resolution,
        found: Resolution,
        /// First record whose resolution differs
        path: PathBuf,
    },
    /// A record has weight 0
    ZeroWeight { path: PathBuf },
    /// A decoded image does not have the declared resolution
    ShapeMismatch {
        /// Image the matrix was loaded from, when known
        path: Option<PathBuf>,
        expected: Resolution,
        found: Resolution,
    },
    /// The color mode name is not recognised
    UnknownMode(String),
    /// No pixel layout exists for this channel count
    UnsupportedChannels(usize),
}

impl MeanError {
    /// Attach the image path to a [`MeanError::ShapeMismatch`].
    pub fn with_path(self, image: impl Into<PathBuf>) -> Self {
        match self {
            MeanError::ShapeMismatch {
                path: None,
                expected,
                found,
            } => MeanError::ShapeMismatch {
                path: Some(image.into()),
                expected,
                found,
            },
            other => other,
        }
    }
}

impl fmt::Display for MeanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeanError::TooFewImages { count } => {
                write!(f, "at least 2 images are required, got {}", count)
            }
            MeanError::MixedResolutions {
                expected,
                found,
                path,
            } => write!(
                f,
                "{} has resolution {}, expected {}",
                path.display(),
                found,
                expected
            ),
            MeanError::ZeroWeight { path } => {
                write!(f, "{} has weight 0; weights start at 1", path.display())
            }
            MeanError::ShapeMismatch {
                path: Some(path),
                expected,
                found,
            } => write!(
                f,
                "{} decoded to {}, expected {}",
                path.display(),
                found,
                expected
            ),
            MeanError::ShapeMismatch {
                path: None,
                expected,
                found,
            } => write!(f, "image has shape {}, expected {}", found, expected),
            MeanError::UnknownMode(mode) => write!(f, "unknown color mode '{}'", mode),
            MeanError::UnsupportedChannels(n) => {
                write!(f, "no pixel layout with {} channels", n)
            }
        }
    }
}

impl std::error::Error for MeanError {}
