// src/lib.rs
//! # sdt-rs
//!
//! A Rust library for decoding the header region of Becker & Hickl SPC
//! `.sdt` files, the time-correlated single photon counting format written
//! by SPCM and the SPC DLLs.
//!
//! ## Features
//!
//! - **Full header decode**: file header, info and setup text, measurement
//!   descriptor sub-records and the first data block header
//! - **Flat metadata**: every decoded field lands in an ordered, namespaced table
//! - **Dimensions**: width, height, time bins, channels and timepoints recovered
//!   from setup text and measurement parameters
//! - **Block chain walking**: follow data block headers without reading pixel data
//! - **Optional mmap and async** loading behind the `mmap` and `async` features
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sdt_rs::*;
//!
//! fn main() -> Result<()> {
//!     let mut reader = SdtReader::open("lifetime.sdt")?;
//!
//!     let header = reader.header();
//!     println!(
//!         "{} x {} pixels, {} time bins, {} channels",
//!         header.width(),
//!         header.height(),
//!         header.time_bins(),
//!         header.channels()
//!     );
//!
//!     if let Some(date) = reader.metadata().get_text("MeasureInfo.date") {
//!         println!("Measured on {}", date);
//!     }
//!
//!     for block in reader.blocks() {
//!         let (offset, block) = block?;
//!         println!("Block {} at {}", block.block_number(), offset);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ### Decoding From Memory
//!
//! ```rust,no_run
//! use sdt_rs::*;
//!
//! fn main() -> Result<()> {
//!     let bytes = std::fs::read("lifetime.sdt")?;
//!     let (header, metadata) = SdtHeader::from_bytes(bytes, &ReadOptions::default())?;
//!     println!("{:?}, {} metadata entries", header.file_kind(), metadata.len());
//!     Ok(())
//! }
//! ```

// Modules
pub mod error;
pub mod types;
pub mod metadata;
pub mod raw_data;
pub mod header;
pub mod text;
pub mod descriptor;
pub mod reader;

mod utils;

// Re-export commonly used types at the crate root for convenience
pub use error::{SdtError, Result};

// Type exports
pub use types::{
    ByteOrder,
    Dimensions,
    FileKind,
    HeaderValidity,
    MetaValue,
};

// Metadata exports
pub use metadata::{
    MetaTable,
    MetadataRecord,
    MetadataSink,
};

// Header exports
pub use header::{
    read_block_header_at,
    BlockChain,
    BlockHeader,
    FileHeader,
};

// Text block exports
pub use text::{
    InfoBlock,
    SetupBlock,
};

// Descriptor exports
pub use descriptor::{
    MeasureInfo,
    MeasurementDescriptor,
    SubRecord,
};

// Reader exports
pub use reader::{
    ReadOptions,
    SdtHeader,
    SdtReader,
};

// Prelude module for glob imports
pub mod prelude {
    //! Convenient imports for common use cases.
    //!
    //! ```rust
    //! use sdt_rs::prelude::*;
    //! ```

    pub use crate::error::{SdtError, Result};
    pub use crate::metadata::{MetaTable, MetadataSink};
    pub use crate::reader::{ReadOptions, SdtHeader, SdtReader};
    pub use crate::types::{ByteOrder, Dimensions, MetaValue};
}

/// The library version
pub const LIBRARY_VERSION: &str = env!("CARGO_PKG_VERSION");
