// src/metadata/mod.rs
mod meta_table;
mod record;

pub use meta_table::MetaTable;
pub use record::{MetadataRecord, MetadataSink};
