// src/header/file_header.rs
use crate::error::Result;
use crate::metadata::MetadataRecord;
use crate::raw_data::FieldReader;
use crate::types::{HeaderValidity, MetaValue};
use std::io::{Read, Seek};
use tracing::{debug, warn};

/// Fixed-size primary header at offset 0 of every SDT file
///
/// Offsets are stored as read (signed 32-bit); the `*_offset()` accessors
/// reinterpret them as unsigned file positions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FileHeader {
    /// Software revision number (lower 4 bits >= 10 decimal)
    pub revision: i16,
    /// Offset of the info text (title, date, time, contents)
    pub info_offs: i32,
    pub info_length: u16,
    /// Offset of the setup text (system, display and trace parameters)
    pub setup_offs: i32,
    pub setup_length: u16,
    /// Offset of the first data block header
    pub data_block_offs: i32,
    /// Valid only in `0..=0x7ffe`; `0x7fff` means the count lives in `reserved1`
    pub no_of_data_blocks: u16,
    /// Length of the longest block in the file
    pub data_block_length: i32,
    pub meas_desc_block_offs: i32,
    pub no_of_meas_desc_blocks: u16,
    pub meas_desc_block_length: u16,
    /// `0x5555` valid, `0x1111` not valid
    pub header_valid: u16,
    pub reserved1: i64,
    pub reserved2: u16,
    pub chksum: u16,
}

impl FileHeader {
    /// Size of the header on disk in bytes
    pub const SIZE: usize = 42;
    pub const CHECKSUM: u16 = 0x55aa;
    pub const EXTENDED_BLOCK_COUNT: u16 = 0x7fff;

    /// Read the header fields in file order from the current position
    pub fn read<R: Read + Seek>(fields: &mut FieldReader<'_, R>) -> Result<Self> {
        let header = FileHeader {
            revision: fields.read_i16()?,
            info_offs: fields.read_i32()?,
            info_length: fields.read_u16()?,
            setup_offs: fields.read_i32()?,
            setup_length: fields.read_u16()?,
            data_block_offs: fields.read_i32()?,
            no_of_data_blocks: fields.read_u16()?,
            data_block_length: fields.read_i32()?,
            meas_desc_block_offs: fields.read_i32()?,
            no_of_meas_desc_blocks: fields.read_u16()?,
            meas_desc_block_length: fields.read_u16()?,
            header_valid: fields.read_u16()?,
            reserved1: fields.read_u32_widened()?,
            reserved2: fields.read_u16()?,
            chksum: fields.read_u16()?,
        };

        debug!(
            revision = header.revision,
            info_offs = header.info_offs,
            setup_offs = header.setup_offs,
            data_block_offs = header.data_block_offs,
            meas_desc_blocks = header.no_of_meas_desc_blocks,
            meas_desc_block_length = header.meas_desc_block_length,
            header_valid = header.header_valid,
            "Read SDT file header"
        );
        if header.validity() != HeaderValidity::Valid {
            warn!(code = header.header_valid, "SDT file header is not marked valid");
        }

        Ok(header)
    }

    pub fn validity(&self) -> HeaderValidity {
        HeaderValidity::from_code(self.header_valid)
    }

    /// Number of data blocks, taking the extended count in `reserved1` into account
    pub fn data_block_count(&self) -> u64 {
        if self.no_of_data_blocks == Self::EXTENDED_BLOCK_COUNT {
            self.reserved1 as u64
        } else {
            self.no_of_data_blocks as u64
        }
    }

    pub fn info_offset(&self) -> u64 {
        self.info_offs as u32 as u64
    }

    pub fn setup_offset(&self) -> u64 {
        self.setup_offs as u32 as u64
    }

    pub fn data_block_offset(&self) -> u64 {
        self.data_block_offs as u32 as u64
    }

    pub fn meas_desc_block_offset(&self) -> u64 {
        self.meas_desc_block_offs as u32 as u64
    }

    /// Whether a measurement descriptor block follows
    pub fn has_meas_desc_block(&self) -> bool {
        self.no_of_meas_desc_blocks > 0
    }
}

impl MetadataRecord for FileHeader {
    const NAMESPACE: &'static str = "bhfileHeader";

    fn fields(&self) -> Vec<(&'static str, MetaValue)> {
        vec![
            ("revision", self.revision.into()),
            ("infoOffs", self.info_offs.into()),
            ("infoLength", self.info_length.into()),
            ("setupOffs", self.setup_offs.into()),
            ("setupLength", self.setup_length.into()),
            ("dataBlockOffs", self.data_block_offs.into()),
            ("noOfDataBlocks", self.no_of_data_blocks.into()),
            ("dataBlockLength", self.data_block_length.into()),
            ("measDescBlockOffs", self.meas_desc_block_offs.into()),
            ("noOfMeasDescBlocks", self.no_of_meas_desc_blocks.into()),
            ("measDescBlockLength", self.meas_desc_block_length.into()),
            ("headerValid", self.header_valid.into()),
            ("reserved1", self.reserved1.into()),
            ("reserved2", self.reserved2.into()),
            ("chksum", self.chksum.into()),
        ]
    }
}
