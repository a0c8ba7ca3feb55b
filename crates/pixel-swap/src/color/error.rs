//! Error types for pixel construction and conversion.

use std::fmt;
use std::num::ParseIntError;

use super::pixel::ChannelLayout;

/// Error type for building, parsing and converting pixels.
#[derive(Debug, Clone, PartialEq)]
pub enum ColorError {
    /// A channel value lies outside `0..=255`.
    InvalidPixel {
        /// Zero-based channel index
        channel: usize,
        /// The offending value
        value: i64,
    },
    /// Pixels carry 1 (gray), 3 (RGB) or 4 (RGBA) channels.
    InvalidChannelCount(usize),
    /// Hex string has invalid length (3, 6 or 8 digits after stripping '#')
    InvalidLength,
    /// Invalid hexadecimal character encountered
    InvalidHex(ParseIntError),
    /// The pixel cannot be expressed in the requested layout without loss.
    IncompatibleLayout {
        /// Layout of the pixel being converted
        from: ChannelLayout,
        /// Requested layout
        to: ChannelLayout,
    },
}

impl From<ParseIntError> for ColorError {
    fn from(err: ParseIntError) -> Self {
        ColorError::InvalidHex(err)
    }
}

impl fmt::Display for ColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorError::InvalidPixel { channel, value } => {
                write!(
                    f,
                    "invalid pixel: channel {} has value {} (expected 0..=255)",
                    channel, value
                )
            }
            ColorError::InvalidChannelCount(count) => {
                write!(f, "invalid channel count {} (expected 1, 3 or 4)", count)
            }
            ColorError::InvalidLength => {
                write!(f, "invalid hex color length (expected 3, 6 or 8 characters)")
            }
            ColorError::InvalidHex(err) => {
                write!(f, "invalid hex character: {}", err)
            }
            ColorError::IncompatibleLayout { from, to } => {
                write!(f, "cannot convert {} pixel to {} without loss", from, to)
            }
        }
    }
}

impl std::error::Error for ColorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ColorError::InvalidHex(err) => Some(err),
            _ => None,
        }
    }
}
