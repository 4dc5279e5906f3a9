// src/text/mod.rs
//! Parsers for the two ASCII blocks embedded in an SDT file
//!
//! - [`InfoBlock`] - `key : value` identification lines
//! - [`SetupBlock`] - instrument setup parameters and image dimension tags

mod info_block;
mod setup_block;

pub use info_block::InfoBlock;
pub use setup_block::{extract_pair, scan_dimension_tag, DimensionTag, SetupBlock, SetupDimensions};
