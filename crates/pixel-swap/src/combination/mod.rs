//! Enumeration of target color combinations.

mod generator;

pub use generator::{generate, Assignment, Combination, Combinations};
