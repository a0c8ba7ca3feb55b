//! Lookup tables mapping source colors to matched pixel coordinates.
//!
//! A table is built once per source image and reused for every
//! combination rendered from it. [`ScanStrategy`] picks between a scan per
//! source color and a single scan over the matrix; the resulting tables are
//! identical, records in row-major order.

mod table;

pub use table::{
    build_table, build_table_single_pass, build_table_with, LookupTable, MatchRecord,
    ScanStrategy,
};
