// src/raw_data/mod.rs
//! Low-level field access for SDT files
//!
//! [`FieldReader`] performs every typed read the header decoder needs:
//! signed and unsigned integers, floats, fixed-length strings and text
//! blocks, with the stream's byte order applied consistently.
//!
//! # Example
//!
//! ```
//! use sdt_rs::raw_data::FieldReader;
//! use sdt_rs::types::ByteOrder;
//! use std::io::Cursor;
//!
//! let mut cursor = Cursor::new(vec![10u8, 0, 0x55, 0x55]);
//! let mut fields = FieldReader::new(&mut cursor, ByteOrder::Little);
//!
//! assert_eq!(fields.read_i16().unwrap(), 10);
//! assert_eq!(fields.read_u16().unwrap(), 0x5555);
//! ```

mod reader;

pub use reader::FieldReader;

use std::io::{Read, Seek};

/// Trait alias for Read + Seek
pub trait ReadSeek: Read + Seek {}
impl<T: Read + Seek> ReadSeek for T {}
