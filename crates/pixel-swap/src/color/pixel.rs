//! Pixel value type and its hex encoding.

use std::fmt;
use std::str::FromStr;

use super::error::ColorError;

/// Channel layout of a pixel or an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ChannelLayout {
    /// Single luminance channel
    Gray,
    /// Red, green, blue
    #[default]
    Rgb,
    /// Red, green, blue, alpha
    Rgba,
}

impl ChannelLayout {
    /// Number of channels stored per pixel.
    #[inline]
    pub fn channels(self) -> usize {
        match self {
            ChannelLayout::Gray => 1,
            ChannelLayout::Rgb => 3,
            ChannelLayout::Rgba => 4,
        }
    }

    /// Layout for a channel count.
    ///
    /// # Errors
    ///
    /// [`ColorError::InvalidChannelCount`] for anything but 1, 3 or 4.
    pub fn from_channels(count: usize) -> Result<Self, ColorError> {
        match count {
            1 => Ok(ChannelLayout::Gray),
            3 => Ok(ChannelLayout::Rgb),
            4 => Ok(ChannelLayout::Rgba),
            n => Err(ColorError::InvalidChannelCount(n)),
        }
    }
}

impl fmt::Display for ChannelLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ChannelLayout::Gray => "gray",
            ChannelLayout::Rgb => "rgb",
            ChannelLayout::Rgba => "rgba",
        };
        f.write_str(name)
    }
}

/// An 8-bit pixel with 1, 3 or 4 channels.
///
/// Channel values are `u8`, so the `0..=255` range holds by construction.
/// Values arriving as wider integers (recipes, user input) go through
/// [`Pixel::try_from_channels`], which rejects anything out of range.
///
/// # Example
///
/// ```
/// use pixel_swap::Pixel;
///
/// let pixel = Pixel::rgb(10, 5, 255);
/// assert_eq!(pixel.to_hex(), "#0a05ff");
/// assert_eq!(pixel.channels(), &[10, 5, 255]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pixel {
    values: [u8; 4],
    layout: ChannelLayout,
}

impl Pixel {
    /// Single-channel gray pixel.
    #[inline]
    pub const fn gray(value: u8) -> Self {
        Self {
            values: [value, 0, 0, 0],
            layout: ChannelLayout::Gray,
        }
    }

    /// Opaque RGB pixel.
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self {
            values: [r, g, b, 0],
            layout: ChannelLayout::Rgb,
        }
    }

    /// RGB pixel with alpha.
    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            values: [r, g, b, a],
            layout: ChannelLayout::Rgba,
        }
    }

    /// Build a pixel from a channel slice of length 1, 3 or 4.
    pub fn from_slice(channels: &[u8]) -> Result<Self, ColorError> {
        let layout = ChannelLayout::from_channels(channels.len())?;
        let mut values = [0u8; 4];
        values[..channels.len()].copy_from_slice(channels);
        Ok(Self { values, layout })
    }

    /// Build a pixel from integer channel values, validating the range.
    ///
    /// # Errors
    ///
    /// - [`ColorError::InvalidChannelCount`] unless 1, 3 or 4 values are given
    /// - [`ColorError::InvalidPixel`] for the first value outside `0..=255`
    ///
    /// # Example
    ///
    /// ```
    /// use pixel_swap::{ColorError, Pixel};
    ///
    /// assert_eq!(Pixel::try_from_channels(&[1, 2, 3]), Ok(Pixel::rgb(1, 2, 3)));
    /// assert_eq!(
    ///     Pixel::try_from_channels(&[1, 256, 3]),
    ///     Err(ColorError::InvalidPixel { channel: 1, value: 256 })
    /// );
    /// ```
    pub fn try_from_channels(channels: &[i64]) -> Result<Self, ColorError> {
        let layout = ChannelLayout::from_channels(channels.len())?;
        let mut values = [0u8; 4];
        for (i, &value) in channels.iter().enumerate() {
            values[i] = u8::try_from(value)
                .map_err(|_| ColorError::InvalidPixel { channel: i, value })?;
        }
        Ok(Self { values, layout })
    }

    /// The channel values, `layout().channels()` long.
    #[inline]
    pub fn channels(&self) -> &[u8] {
        &self.values[..self.layout.channels()]
    }

    #[inline]
    pub fn layout(&self) -> ChannelLayout {
        self.layout
    }

    /// Hex identifier of the color: `#rrggbb`, lowercase and zero-padded.
    ///
    /// Alpha does not take part in the identifier. A gray value `v` renders
    /// as `#vvvvvv`.
    pub fn to_hex(&self) -> String {
        let [r, g, b] = match self.layout {
            ChannelLayout::Gray => [self.values[0]; 3],
            ChannelLayout::Rgb | ChannelLayout::Rgba => {
                [self.values[0], self.values[1], self.values[2]]
            }
        };
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    }

    /// Convert the pixel to another channel layout.
    ///
    /// Widening conversions always succeed (gray repeats into RGB, RGB gains
    /// an opaque alpha). Narrowing conversions only succeed when nothing is
    /// lost: RGB to gray needs equal channels, RGBA to anything narrower
    /// needs alpha 255.
    ///
    /// # Example
    ///
    /// ```
    /// use pixel_swap::{ChannelLayout, Pixel};
    ///
    /// let opaque = Pixel::rgb(1, 2, 3).conform_to(ChannelLayout::Rgba).unwrap();
    /// assert_eq!(opaque, Pixel::rgba(1, 2, 3, 255));
    /// assert!(Pixel::rgb(1, 2, 3).conform_to(ChannelLayout::Gray).is_err());
    /// ```
    pub fn conform_to(self, layout: ChannelLayout) -> Result<Self, ColorError> {
        let [r, g, b, a] = self.values;
        let incompatible = ColorError::IncompatibleLayout {
            from: self.layout,
            to: layout,
        };
        match (self.layout, layout) {
            (from, to) if from == to => Ok(self),
            (ChannelLayout::Gray, ChannelLayout::Rgb) => Ok(Self::rgb(r, r, r)),
            (ChannelLayout::Gray, ChannelLayout::Rgba) => Ok(Self::rgba(r, r, r, 255)),
            (ChannelLayout::Rgb, ChannelLayout::Rgba) => Ok(Self::rgba(r, g, b, 255)),
            (ChannelLayout::Rgb, ChannelLayout::Gray) if r == g && g == b => Ok(Self::gray(r)),
            (ChannelLayout::Rgba, ChannelLayout::Rgb) if a == 255 => Ok(Self::rgb(r, g, b)),
            (ChannelLayout::Rgba, ChannelLayout::Gray) if a == 255 && r == g && g == b => {
                Ok(Self::gray(r))
            }
            _ => Err(incompatible),
        }
    }
}

impl From<[u8; 3]> for Pixel {
    fn from(bytes: [u8; 3]) -> Self {
        Self::rgb(bytes[0], bytes[1], bytes[2])
    }
}

impl From<[u8; 4]> for Pixel {
    fn from(bytes: [u8; 4]) -> Self {
        Self::rgba(bytes[0], bytes[1], bytes[2], bytes[3])
    }
}

impl fmt::Display for Pixel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.layout {
            ChannelLayout::Rgba => write!(f, "{}{:02x}", self.to_hex(), self.values[3]),
            _ => f.write_str(&self.to_hex()),
        }
    }
}

impl FromStr for Pixel {
    type Err = ColorError;

    /// Parse a pixel from a hex string.
    ///
    /// Accepts `#RGB`, `#RRGGBB` and `#RRGGBBAA`, with or without the hash.
    /// Parsing is case-insensitive and trims surrounding whitespace.
    ///
    /// ```
    /// use pixel_swap::Pixel;
    ///
    /// let red: Pixel = "#F00".parse().unwrap();
    /// assert_eq!(red, Pixel::rgb(255, 0, 0));
    ///
    /// let half: Pixel = "00ff0080".parse().unwrap();
    /// assert_eq!(half, Pixel::rgba(0, 255, 0, 128));
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);
        if !s.is_ascii() {
            return Err(ColorError::InvalidLength);
        }
        // from_str_radix accepts a leading sign; a lone non-digit fails it
        if let Some(bad) = s.find(|c: char| !c.is_ascii_hexdigit()) {
            u8::from_str_radix(&s[bad..bad + 1], 16)?;
        }

        let byte = |range: std::ops::Range<usize>| u8::from_str_radix(&s[range], 16);

        match s.len() {
            3 => {
                let r = u8::from_str_radix(&s[0..1], 16)? * 17;
                let g = u8::from_str_radix(&s[1..2], 16)? * 17;
                let b = u8::from_str_radix(&s[2..3], 16)? * 17;
                Ok(Self::rgb(r, g, b))
            }
            6 => Ok(Self::rgb(byte(0..2)?, byte(2..4)?, byte(4..6)?)),
            8 => Ok(Self::rgba(
                byte(0..2)?,
                byte(2..4)?,
                byte(4..6)?,
                byte(6..8)?,
            )),
            _ => Err(ColorError::InvalidLength),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_hex_zero_pads_lowercase() {
        assert_eq!(Pixel::rgb(10, 5, 255).to_hex(), "#0a05ff");
        assert_eq!(Pixel::rgb(0, 0, 0).to_hex(), "#000000");
        assert_eq!(Pixel::rgb(100, 150, 200).to_hex(), "#6496c8");
    }

    #[test]
    fn test_to_hex_ignores_alpha_and_expands_gray() {
        assert_eq!(Pixel::rgba(1, 2, 3, 4).to_hex(), "#010203");
        assert_eq!(Pixel::gray(0x80).to_hex(), "#808080");
    }

    #[test]
    fn test_try_from_channels_rejects_out_of_range() {
        assert_eq!(
            Pixel::try_from_channels(&[-1, 0, 0]),
            Err(ColorError::InvalidPixel {
                channel: 0,
                value: -1
            })
        );
        assert_eq!(
            Pixel::try_from_channels(&[0, 0, 300]),
            Err(ColorError::InvalidPixel {
                channel: 2,
                value: 300
            })
        );
        assert_eq!(
            Pixel::try_from_channels(&[1, 2]),
            Err(ColorError::InvalidChannelCount(2))
        );
        assert_eq!(Pixel::try_from_channels(&[7]), Ok(Pixel::gray(7)));
    }

    #[test]
    fn test_parse_hex_formats() {
        assert_eq!("#6496C8".parse::<Pixel>(), Ok(Pixel::rgb(100, 150, 200)));
        assert_eq!(" 6496c8 ".parse::<Pixel>(), Ok(Pixel::rgb(100, 150, 200)));
        assert_eq!("#fff".parse::<Pixel>(), Ok(Pixel::rgb(255, 255, 255)));
        assert_eq!(
            "#01020304".parse::<Pixel>(),
            Ok(Pixel::rgba(1, 2, 3, 4))
        );
        assert_eq!("#12345".parse::<Pixel>(), Err(ColorError::InvalidLength));
        assert!(matches!(
            "#zzzzzz".parse::<Pixel>(),
            Err(ColorError::InvalidHex(_))
        ));
        assert_eq!("#ééé".parse::<Pixel>(), Err(ColorError::InvalidLength));
    }

    #[test]
    fn test_parse_rejects_signs() {
        for input in ["#+f+f+f", "+fffff", "#-1-1-1", "#ff+f", "+0a05ff0"] {
            assert!(
                matches!(input.parse::<Pixel>(), Err(ColorError::InvalidHex(_))),
                "{input} should be rejected"
            );
        }
    }

    #[test]
    fn test_hex_round_trip() {
        let pixel = Pixel::rgb(18, 52, 86);
        assert_eq!(pixel.to_hex().parse::<Pixel>(), Ok(pixel));
    }

    #[test]
    fn test_conform_to() {
        assert_eq!(
            Pixel::gray(9).conform_to(ChannelLayout::Rgb),
            Ok(Pixel::rgb(9, 9, 9))
        );
        assert_eq!(
            Pixel::rgb(9, 9, 9).conform_to(ChannelLayout::Gray),
            Ok(Pixel::gray(9))
        );
        assert_eq!(
            Pixel::rgba(1, 2, 3, 255).conform_to(ChannelLayout::Rgb),
            Ok(Pixel::rgb(1, 2, 3))
        );
        assert_eq!(
            Pixel::rgba(1, 2, 3, 10).conform_to(ChannelLayout::Rgb),
            Err(ColorError::IncompatibleLayout {
                from: ChannelLayout::Rgba,
                to: ChannelLayout::Rgb
            })
        );
    }

    #[test]
    fn test_display_includes_alpha() {
        assert_eq!(Pixel::rgba(255, 0, 0, 128).to_string(), "#ff000080");
        assert_eq!(Pixel::rgb(255, 0, 0).to_string(), "#ff0000");
    }
}
