// src/reader/mod.rs
mod options;
mod sdt_header;
mod sdt_reader;

pub use options::ReadOptions;
pub use sdt_header::SdtHeader;
pub use sdt_reader::SdtReader;
