//! Tolerance-aware color matching.
//!
//! A candidate pixel matches a reference color exactly, inside a cube
//! (every channel within the tolerance) or inside a sphere (Euclidean
//! distance within the tolerance). All comparisons are strict.

mod tolerance;

pub use tolerance::{match_channels, matches, Delta, MatchResult, Tolerance, ToleranceMode};
