// src/header/block_header.rs
use crate::error::{Result, SdtError};
use crate::metadata::MetadataRecord;
use crate::raw_data::FieldReader;
use crate::types::{ByteOrder, MetaValue};
use std::collections::HashSet;
use std::io::{Read, Seek};
use tracing::{debug, trace};

/// Header preceding each data block
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlockHeader {
    /// Valid only in `0..0x7ffe`; otherwise see `lblock_no`
    pub block_no: i16,
    /// Offset of the block's data from the beginning of the file
    pub data_offs: i32,
    /// Offset of the next data block header, 0 when this is the last
    pub next_block_offs: i32,
    pub block_type: u16,
    /// Index of the measurement descriptor belonging to this block
    pub meas_desc_block_no: i16,
    pub lblock_no: i64,
    /// Block (set) length in bytes
    pub block_length: i64,
}

impl BlockHeader {
    /// Size of the header on disk in bytes
    pub const SIZE: usize = 22;
    pub const LONG_BLOCK_NO: i16 = 0x7ffe;

    /// Read the block header fields in file order from the current position
    pub fn read<R: Read + Seek>(fields: &mut FieldReader<'_, R>) -> Result<Self> {
        Ok(BlockHeader {
            block_no: fields.read_i16()?,
            data_offs: fields.read_i32()?,
            next_block_offs: fields.read_i32()?,
            block_type: fields.read_u16()?,
            meas_desc_block_no: fields.read_i16()?,
            lblock_no: fields.read_u32_widened()?,
            block_length: fields.read_u32_widened()?,
        })
    }

    /// Seek to `offset` and read the block header found there
    pub fn read_at<R: Read + Seek>(fields: &mut FieldReader<'_, R>, offset: u64) -> Result<Self> {
        fields.seek(offset)?;
        let header = Self::read(fields)?;
        debug!(
            offset,
            block_no = header.block_number(),
            block_type = header.block_type,
            block_length = header.block_length,
            next_block_offs = header.next_block_offs,
            "Read data block header"
        );
        Ok(header)
    }

    /// Full block number, falling back to `lblock_no` outside the short range
    pub fn block_number(&self) -> u64 {
        if (0..Self::LONG_BLOCK_NO).contains(&self.block_no) {
            self.block_no as u64
        } else {
            self.lblock_no as u64
        }
    }

    pub fn data_offset(&self) -> u64 {
        self.data_offs as u32 as u64
    }

    /// Offset of the next block header, or `None` at the end of the chain
    pub fn next_block_offset(&self) -> Option<u64> {
        match self.next_block_offs {
            0 => None,
            offs => Some(offs as u32 as u64),
        }
    }
}

impl MetadataRecord for BlockHeader {
    const NAMESPACE: &'static str = "BHFileBlockHeader";

    fn fields(&self) -> Vec<(&'static str, MetaValue)> {
        vec![
            ("blockNo", self.block_no.into()),
            ("dataOffs", self.data_offs.into()),
            ("nextBlockOffs", self.next_block_offs.into()),
            ("blockType", self.block_type.into()),
            ("measDescBlockNo", self.meas_desc_block_no.into()),
            ("lblockNo", self.lblock_no.into()),
            ("blockLength", self.block_length.into()),
        ]
    }
}

/// Read a block header at a caller-supplied offset
///
/// # Example
///
/// ```
/// use sdt_rs::header::read_block_header_at;
/// use sdt_rs::types::ByteOrder;
/// use std::io::Cursor;
///
/// let mut bytes = vec![0u8; 4];
/// bytes.extend_from_slice(&[1, 0]);                // blockNo
/// bytes.extend_from_slice(&[26, 0, 0, 0]);         // dataOffs
/// bytes.extend_from_slice(&[0, 0, 0, 0]);          // nextBlockOffs
/// bytes.extend_from_slice(&[1, 0]);                // blockType
/// bytes.extend_from_slice(&[0, 0]);                // measDescBlockNo
/// bytes.extend_from_slice(&[1, 0, 0, 0]);          // lblockNo
/// bytes.extend_from_slice(&[0, 2, 0, 0]);          // blockLength
///
/// let header = read_block_header_at(&mut Cursor::new(bytes), 4, ByteOrder::Little).unwrap();
/// assert_eq!(header.block_type, 1);
/// assert_eq!(header.block_length, 512);
/// ```
pub fn read_block_header_at<R: Read + Seek>(
    stream: &mut R,
    offset: u64,
    order: ByteOrder,
) -> Result<BlockHeader> {
    let mut fields = FieldReader::new(stream, order);
    BlockHeader::read_at(&mut fields, offset)
}

/// Iterator over the linked list of data block headers
///
/// Follows `next_block_offs` from a starting offset. Iteration ends when a
/// block has no successor, after `limit` blocks, or with
/// [`SdtError::BlockChainCycle`] when an offset repeats.
pub struct BlockChain<'a, R: Read + Seek> {
    fields: FieldReader<'a, R>,
    next: Option<u64>,
    remaining: u64,
    visited: HashSet<u64>,
}

impl<'a, R: Read + Seek> BlockChain<'a, R> {
    pub fn new(stream: &'a mut R, order: ByteOrder, first_offset: u64, limit: u64) -> Self {
        BlockChain {
            fields: FieldReader::new(stream, order),
            next: Some(first_offset),
            remaining: limit,
            visited: HashSet::new(),
        }
    }
}

impl<'a, R: Read + Seek> Iterator for BlockChain<'a, R> {
    type Item = Result<(u64, BlockHeader)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let offset = self.next.take()?;

        if !self.visited.insert(offset) {
            self.remaining = 0;
            return Some(Err(SdtError::BlockChainCycle { offset }));
        }

        match BlockHeader::read_at(&mut self.fields, offset) {
            Ok(header) => {
                self.remaining -= 1;
                self.next = header.next_block_offset();
                trace!(offset, next = ?self.next, "Advanced block chain");
                Some(Ok((offset, header)))
            }
            Err(e) => {
                self.remaining = 0;
                Some(Err(e))
            }
        }
    }
}
