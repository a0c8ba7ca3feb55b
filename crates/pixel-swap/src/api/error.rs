//! Unified error type for the pixel-swap public API.
//!
//! [`SwapError`] covers table building, combination generation and
//! recoloring, and wraps the module-level [`ColorError`] and [`MeanError`]
//! for convenient `?` propagation.

use crate::color::ColorError;
use crate::mean::MeanError;
use std::fmt;

/// Unified error type for the pixel-swap public API.
///
/// # Example
///
/// ```
/// use pixel_swap::{Pixel, SwapError};
///
/// fn parse_target(hex: &str) -> Result<Pixel, SwapError> {
///     Ok(hex.parse::<Pixel>()?)
/// }
///
/// assert!(parse_target("#ff0000").is_ok());
/// assert!(matches!(parse_target("#ff00"), Err(SwapError::Color(_))));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum SwapError {
    /// Pixel construction or parsing failed
    Color(ColorError),
    /// Mean-image validation or composition failed
    Mean(MeanError),
    /// No source colors are registered
    NoSourceColors,
    /// A source color reached generation without target candidates
    MissingTargets {
        /// Identifier of the untargeted entry
        identifier: String,
    },
    /// Two source colors share an identifier
    DuplicateIdentifier {
        /// The repeated identifier
        identifier: String,
    },
    /// A combination refers to an identifier the lookup table does not know
    UnknownIdentifier {
        /// The missing identifier
        identifier: String,
    },
    /// A source or target color does not fit the image's channel layout
    IncompatibleColor {
        /// Identifier of the source color involved
        identifier: String,
        /// The conversion failure
        error: ColorError,
    },
    /// The number of combinations does not fit in `usize`
    TooManyCombinations,
    /// The operation was cancelled through a [`CancelToken`](crate::CancelToken)
    Cancelled,
}

impl fmt::Display for SwapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SwapError::Color(err) => write!(f, "color error: {}", err),
            SwapError::Mean(err) => write!(f, "mean image error: {}", err),
            SwapError::NoSourceColors => write!(f, "no colors to switch"),
            SwapError::MissingTargets { identifier } => {
                write!(f, "source color {} has no target colors", identifier)
            }
            SwapError::DuplicateIdentifier { identifier } => {
                write!(f, "source color {} is registered twice", identifier)
            }
            SwapError::UnknownIdentifier { identifier } => {
                write!(f, "source color {} is not in the lookup table", identifier)
            }
            SwapError::IncompatibleColor { identifier, error } => {
                write!(f, "source color {}: {}", identifier, error)
            }
            SwapError::TooManyCombinations => {
                write!(f, "too many target combinations to enumerate")
            }
            SwapError::Cancelled => write!(f, "operation cancelled"),
        }
    }
}

impl std::error::Error for SwapError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SwapError::Color(err) => Some(err),
            SwapError::Mean(err) => Some(err),
            SwapError::IncompatibleColor { error, .. } => Some(error),
            _ => None,
        }
    }
}

impl From<ColorError> for SwapError {
    fn from(err: ColorError) -> Self {
        SwapError::Color(err)
    }
}

impl From<MeanError> for SwapError {
    fn from(err: MeanError) -> Self {
        SwapError::Mean(err)
    }
}
