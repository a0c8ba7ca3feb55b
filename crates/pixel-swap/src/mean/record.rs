//! Image metadata records and resolution validation.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use super::error::MeanError;

/// Pixel mode of an image, named the way Pillow names them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorMode {
    /// `1`: bilevel
    Bilevel,
    /// `L`: 8-bit luminance
    L,
    /// `P`: palette-indexed
    P,
    /// `I`: 32-bit integer
    I,
    /// `F`: 32-bit float
    F,
    /// `I;16` and its byte-order variants
    I16,
    /// `LA`: luminance with alpha
    La,
    /// `PA`: palette with alpha
    Pa,
    /// `RGB`
    Rgb,
    /// `YCbCr`
    YCbCr,
    /// `LAB`
    Lab,
    /// `HSV`
    Hsv,
    /// `RGBA`
    Rgba,
    /// `RGBX`: RGB with padding
    Rgbx,
    /// `CMYK`
    Cmyk,
}

impl ColorMode {
    /// Channels per pixel in this mode.
    ///
    /// ```
    /// use pixel_swap::ColorMode;
    ///
    /// assert_eq!(ColorMode::L.channel_count(), 1);
    /// assert_eq!(ColorMode::Rgb.channel_count(), 3);
    /// assert_eq!(ColorMode::Cmyk.channel_count(), 4);
    /// ```
    pub fn channel_count(self) -> usize {
        match self {
            ColorMode::Bilevel
            | ColorMode::L
            | ColorMode::P
            | ColorMode::I
            | ColorMode::F
            | ColorMode::I16 => 1,
            ColorMode::La | ColorMode::Pa => 2,
            ColorMode::Rgb | ColorMode::YCbCr | ColorMode::Lab | ColorMode::Hsv => 3,
            ColorMode::Rgba | ColorMode::Rgbx | ColorMode::Cmyk => 4,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ColorMode::Bilevel => "1",
            ColorMode::L => "L",
            ColorMode::P => "P",
            ColorMode::I => "I",
            ColorMode::F => "F",
            ColorMode::I16 => "I;16",
            ColorMode::La => "LA",
            ColorMode::Pa => "PA",
            ColorMode::Rgb => "RGB",
            ColorMode::YCbCr => "YCbCr",
            ColorMode::Lab => "LAB",
            ColorMode::Hsv => "HSV",
            ColorMode::Rgba => "RGBA",
            ColorMode::Rgbx => "RGBX",
            ColorMode::Cmyk => "CMYK",
        }
    }
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColorMode {
    type Err = MeanError;

    /// Mode names are case-sensitive, as in Pillow (`La` is not `LA`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mode = match s {
            "1" => ColorMode::Bilevel,
            "L" => ColorMode::L,
            "P" => ColorMode::P,
            "I" => ColorMode::I,
            "F" => ColorMode::F,
            "I;16" | "I;16B" | "I;16L" | "I;16N" => ColorMode::I16,
            "LA" => ColorMode::La,
            "PA" => ColorMode::Pa,
            "RGB" => ColorMode::Rgb,
            "YCbCr" => ColorMode::YCbCr,
            "LAB" => ColorMode::Lab,
            "HSV" => ColorMode::Hsv,
            "RGBA" => ColorMode::Rgba,
            "RGBX" => ColorMode::Rgbx,
            "CMYK" => ColorMode::Cmyk,
            other => return Err(MeanError::UnknownMode(other.to_string())),
        };
        Ok(mode)
    }
}

/// `(height, width, channels)` of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Resolution {
    pub height: usize,
    pub width: usize,
    pub channels: usize,
}

impl Resolution {
    pub fn new(height: usize, width: usize, channels: usize) -> Self {
        Self {
            height,
            width,
            channels,
        }
    }
}

impl From<(usize, usize, usize)> for Resolution {
    fn from((height, width, channels): (usize, usize, usize)) -> Self {
        Self::new(height, width, channels)
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}x{}", self.height, self.width, self.channels)
    }
}

/// Metadata of one selected image, probed when the file is added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRecord {
    pub path: PathBuf,
    /// How many times the image counts toward the mean; at least 1.
    pub weight: u32,
    pub width: usize,
    pub height: usize,
    pub mode: ColorMode,
}

impl ImageRecord {
    /// A record with weight 1.
    pub fn new(path: impl Into<PathBuf>, width: usize, height: usize, mode: ColorMode) -> Self {
        Self {
            path: path.into(),
            weight: 1,
            width,
            height,
            mode,
        }
    }

    pub fn with_weight(mut self, weight: u32) -> Self {
        self.weight = weight;
        self
    }

    pub fn resolution(&self) -> Resolution {
        Resolution::new(self.height, self.width, self.mode.channel_count())
    }
}

/// Check that the records can be averaged and return their shared resolution.
///
/// # Errors
///
/// - [`MeanError::TooFewImages`] for fewer than two records
/// - [`MeanError::ZeroWeight`] for the first record with weight 0
/// - [`MeanError::MixedResolutions`] unless every record has the first
///   record's `(height, width, channels)`
///
/// # Example
///
/// ```
/// use pixel_swap::{validate_records, ColorMode, ImageRecord, MeanError};
///
/// let a = ImageRecord::new("a.png", 4, 3, ColorMode::Rgb);
/// let b = ImageRecord::new("b.png", 4, 3, ColorMode::Rgb);
/// let resolution = validate_records(&[a.clone(), b]).unwrap();
/// assert_eq!((resolution.height, resolution.width, resolution.channels), (3, 4, 3));
///
/// let c = ImageRecord::new("c.png", 4, 3, ColorMode::Rgba);
/// assert!(matches!(
///     validate_records(&[a, c]),
///     Err(MeanError::MixedResolutions { .. })
/// ));
/// ```
pub fn validate_records(records: &[ImageRecord]) -> Result<Resolution, MeanError> {
    if records.len() < 2 {
        return Err(MeanError::TooFewImages {
            count: records.len(),
        });
    }

    if let Some(record) = records.iter().find(|r| r.weight == 0) {
        return Err(MeanError::ZeroWeight {
            path: record.path.clone(),
        });
    }

    let expected = records[0].resolution();
    if let Some(record) = records.iter().find(|r| r.resolution() != expected) {
        return Err(MeanError::MixedResolutions {
            expected,
            found: record.resolution(),
            path: record.path.clone(),
        });
    }

    Ok(expected)
}
