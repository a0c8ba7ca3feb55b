//! Row-major pixel buffer with dimension and layout metadata.

use crate::color::{ChannelLayout, Pixel};

/// An owned image: `height` rows of `width` pixels, interleaved channels.
///
/// Coordinates are `(row, column)` with `(0, 0)` in the top-left corner,
/// matching the order lookup tables record matches in.
///
/// # Example
///
/// ```
/// use pixel_swap::{ChannelLayout, Pixel, PixelMatrix};
///
/// let mut matrix = PixelMatrix::filled(3, 2, Pixel::rgb(0, 0, 0));
/// matrix.put_pixel(1, 2, Pixel::rgb(255, 0, 0));
///
/// assert_eq!(matrix.shape(), (2, 3, 3));
/// assert_eq!(matrix.pixel(1, 2), Some(Pixel::rgb(255, 0, 0)));
/// assert_eq!(matrix.pixel(2, 0), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelMatrix {
    data: Vec<u8>,
    width: usize,
    height: usize,
    layout: ChannelLayout,
}

impl PixelMatrix {
    /// Wrap raw interleaved bytes.
    ///
    /// Returns `None` when `data.len()` is not `width * height * channels`.
    pub fn from_raw(
        data: Vec<u8>,
        width: usize,
        height: usize,
        layout: ChannelLayout,
    ) -> Option<Self> {
        let expected = width.checked_mul(height)?.checked_mul(layout.channels())?;
        if data.len() != expected {
            return None;
        }
        Some(Self {
            data,
            width,
            height,
            layout,
        })
    }

    /// Build a matrix from row-major pixels sharing one layout.
    ///
    /// Returns `None` on a count mismatch or when the pixels mix layouts.
    pub fn from_pixels(width: usize, height: usize, pixels: &[Pixel]) -> Option<Self> {
        let layout = pixels.first().map(Pixel::layout).unwrap_or_default();
        if pixels.iter().any(|p| p.layout() != layout) {
            return None;
        }
        let data = pixels
            .iter()
            .flat_map(|p| p.channels().iter().copied())
            .collect();
        Self::from_raw(data, width, height, layout)
    }

    /// A `width` x `height` matrix where every pixel is `pixel`.
    pub fn filled(width: usize, height: usize, pixel: Pixel) -> Self {
        let data = pixel.channels().repeat(width * height);
        Self {
            data,
            width,
            height,
            layout: pixel.layout(),
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn layout(&self) -> ChannelLayout {
        self.layout
    }

    /// `(height, width, channels)`, the order mean-image validation compares.
    #[inline]
    pub fn shape(&self) -> (usize, usize, usize) {
        (self.height, self.width, self.layout.channels())
    }

    /// Interleaved channel bytes, row-major.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Consume the matrix, returning the interleaved bytes.
    #[inline]
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Channel slice of the pixel at `(row, column)`.
    ///
    /// # Panics
    ///
    /// When the coordinates are outside the matrix.
    #[inline]
    pub fn channels_at(&self, row: usize, column: usize) -> &[u8] {
        let start = self.offset(row, column);
        &self.data[start..start + self.layout.channels()]
    }

    /// Pixel at `(row, column)`, or `None` outside the matrix.
    pub fn pixel(&self, row: usize, column: usize) -> Option<Pixel> {
        if row >= self.height || column >= self.width {
            return None;
        }
        Pixel::from_slice(self.channels_at(row, column)).ok()
    }

    /// Overwrite the pixel at `(row, column)`.
    ///
    /// # Panics
    ///
    /// When the coordinates are outside the matrix. Debug-asserts that the
    /// pixel layout matches the matrix layout.
    pub fn put_pixel(&mut self, row: usize, column: usize, pixel: Pixel) {
        debug_assert_eq!(
            pixel.layout(),
            self.layout,
            "pixel layout must match matrix layout"
        );
        let start = self.offset(row, column);
        let channels = self.layout.channels();
        self.data[start..start + channels].copy_from_slice(&pixel.channels()[..channels]);
    }

    /// Mutable channel slice of the pixel at `(row, column)`.
    #[inline]
    pub(crate) fn channels_at_mut(&mut self, row: usize, column: usize) -> &mut [u8] {
        let start = self.offset(row, column);
        let channels = self.layout.channels();
        &mut self.data[start..start + channels]
    }

    /// Iterate over the rows as channel slices.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        let stride = (self.width * self.layout.channels()).max(1);
        self.data.chunks_exact(stride).take(self.height)
    }

    #[inline]
    fn offset(&self, row: usize, column: usize) -> usize {
        assert!(
            row < self.height && column < self.width,
            "({}, {}) is outside a {}x{} matrix",
            row,
            column,
            self.height,
            self.width
        );
        (row * self.width + column) * self.layout.channels()
    }
}
