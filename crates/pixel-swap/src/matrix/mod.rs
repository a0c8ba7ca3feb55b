//! In-memory image buffers.
//!
//! [`PixelMatrix`] is the row-major 8-bit buffer every core operation reads.
//! Decoding and encoding files is left to the caller.

mod pixel_matrix;

pub use pixel_matrix::PixelMatrix;
