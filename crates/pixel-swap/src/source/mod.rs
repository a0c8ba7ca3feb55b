//! Source color entries.

mod entry;

pub use entry::{purge_untargeted, SourceColorEntry};
