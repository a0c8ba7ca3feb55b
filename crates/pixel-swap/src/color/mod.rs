//! Pixel values and their hex encoding.
//!
//! [`Pixel`] holds 1 (gray), 3 (RGB) or 4 (RGBA) 8-bit channels. Its hex
//! form (`#rrggbb`) is the identifier source colors are registered under.
//!
//! ```
//! use pixel_swap::{ChannelLayout, Pixel};
//!
//! let sampled = Pixel::rgb(100, 150, 200);
//! assert_eq!(sampled.to_hex(), "#6496c8");
//! assert_eq!(sampled.layout(), ChannelLayout::Rgb);
//! ```

mod error;
mod pixel;

pub use error::ColorError;
pub use pixel::{ChannelLayout, Pixel};
