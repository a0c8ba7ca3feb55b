//! Public API for the pixel-swap crate.
//!
//! This module provides the high-level API: [`Recolorer`] builder and
//! [`SwapError`] unified error type.

mod builder;
mod error;

pub use builder::Recolorer;
pub use error::SwapError;
