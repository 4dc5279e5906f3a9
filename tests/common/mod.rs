// tests/common/mod.rs
//! Builders for synthetic SDT files
#![allow(dead_code)]

use byteorder::{LittleEndian, WriteBytesExt};

pub const FILE_HEADER_SIZE: usize = 42;
pub const BLOCK_HEADER_SIZE: usize = 22;
pub const MEASURE_INFO_SIZE: usize = 211;

/// One data block: its type and payload length
#[derive(Debug, Clone, Copy)]
pub struct BlockSpec {
    pub block_type: u16,
    pub data_len: usize,
}

/// Assembles a little-endian SDT file in memory
///
/// Layout: file header, info text, setup text, descriptor, then each block
/// header followed by its payload.
#[derive(Debug, Clone)]
pub struct SdtFileBuilder {
    pub revision: i16,
    pub info: String,
    pub setup: String,
    pub descriptor: Option<Vec<u8>>,
    pub blocks: Vec<BlockSpec>,
    pub header_valid: u16,
    pub reserved1: u32,
    /// Overrides the block count written to the header
    pub no_of_data_blocks: Option<u16>,
}

impl Default for SdtFileBuilder {
    fn default() -> Self {
        SdtFileBuilder {
            revision: 10,
            info: "*IDENTIFICATION\nID: SPC Setup & Data File\n*END".to_string(),
            setup: String::new(),
            descriptor: None,
            blocks: vec![BlockSpec { block_type: 1, data_len: 16 }],
            header_valid: 0x5555,
            reserved1: 0,
            no_of_data_blocks: None,
        }
    }
}

impl SdtFileBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn info(mut self, info: &str) -> Self {
        self.info = info.to_string();
        self
    }

    pub fn setup(mut self, setup: &str) -> Self {
        self.setup = setup.to_string();
        self
    }

    pub fn descriptor(mut self, bytes: Vec<u8>) -> Self {
        self.descriptor = Some(bytes);
        self
    }

    pub fn blocks(mut self, blocks: Vec<BlockSpec>) -> Self {
        self.blocks = blocks;
        self
    }

    pub fn reserved1(mut self, value: u32) -> Self {
        self.reserved1 = value;
        self
    }

    pub fn no_of_data_blocks(mut self, count: u16) -> Self {
        self.no_of_data_blocks = Some(count);
        self
    }

    pub fn info_offset(&self) -> usize {
        FILE_HEADER_SIZE
    }

    pub fn setup_offset(&self) -> usize {
        self.info_offset() + self.info.len()
    }

    pub fn descriptor_offset(&self) -> usize {
        self.setup_offset() + self.setup.len()
    }

    pub fn first_block_offset(&self) -> usize {
        self.descriptor_offset() + self.descriptor.as_ref().map_or(0, Vec::len)
    }

    /// Offsets of every block header, in chain order
    pub fn block_offsets(&self) -> Vec<usize> {
        let mut offsets = Vec::with_capacity(self.blocks.len());
        let mut offset = self.first_block_offset();
        for block in &self.blocks {
            offsets.push(offset);
            offset += BLOCK_HEADER_SIZE + block.data_len;
        }
        offsets
    }

    pub fn build(&self) -> Vec<u8> {
        let mut b = Vec::new();
        let desc_len = self.descriptor.as_ref().map_or(0, Vec::len);
        let longest = self.blocks.iter().map(|blk| blk.data_len).max().unwrap_or(0);

        b.write_i16::<LittleEndian>(self.revision).unwrap();
        b.write_i32::<LittleEndian>(self.info_offset() as i32).unwrap();
        b.write_u16::<LittleEndian>(self.info.len() as u16).unwrap();
        b.write_i32::<LittleEndian>(self.setup_offset() as i32).unwrap();
        b.write_u16::<LittleEndian>(self.setup.len() as u16).unwrap();
        b.write_i32::<LittleEndian>(self.first_block_offset() as i32).unwrap();
        b.write_u16::<LittleEndian>(self.no_of_data_blocks.unwrap_or(self.blocks.len() as u16))
            .unwrap();
        b.write_i32::<LittleEndian>(longest as i32).unwrap();
        b.write_i32::<LittleEndian>(self.descriptor_offset() as i32).unwrap();
        b.write_u16::<LittleEndian>(u16::from(self.descriptor.is_some())).unwrap();
        b.write_u16::<LittleEndian>(desc_len as u16).unwrap();
        b.write_u16::<LittleEndian>(self.header_valid).unwrap();
        b.write_u32::<LittleEndian>(self.reserved1).unwrap();
        b.write_u16::<LittleEndian>(0).unwrap();
        b.write_u16::<LittleEndian>(0x55aa).unwrap();
        assert_eq!(b.len(), FILE_HEADER_SIZE);

        b.extend_from_slice(self.info.as_bytes());
        b.extend_from_slice(self.setup.as_bytes());
        if let Some(desc) = &self.descriptor {
            b.extend_from_slice(desc);
        }

        let offsets = self.block_offsets();
        for (i, block) in self.blocks.iter().enumerate() {
            let next = offsets.get(i + 1).copied().unwrap_or(0);
            b.write_i16::<LittleEndian>(i as i16).unwrap();
            b.write_i32::<LittleEndian>((offsets[i] + BLOCK_HEADER_SIZE) as i32).unwrap();
            b.write_i32::<LittleEndian>(next as i32).unwrap();
            b.write_u16::<LittleEndian>(block.block_type).unwrap();
            b.write_i16::<LittleEndian>(0).unwrap();
            b.write_u32::<LittleEndian>(i as u32).unwrap();
            b.write_u32::<LittleEndian>(block.data_len as u32).unwrap();
            b.resize(b.len() + block.data_len, 0xab);
        }
        b
    }
}

/// Measurement parameters with only the dimension-bearing fields set
#[derive(Debug, Clone, Copy, Default)]
pub struct MeasureInfoSpec {
    pub scan_x: i32,
    pub scan_y: i32,
    pub scan_rx: i32,
    pub adc_re: i16,
    pub stopt: i16,
}

impl MeasureInfoSpec {
    const DATE_OFFSET: usize = 9;
    const ADC_RE_OFFSET: usize = 82;
    const STOPT_OFFSET: usize = 100;
    const SCAN_OFFSET: usize = 173;

    pub fn build(&self) -> Vec<u8> {
        let mut b = vec![0u8; MEASURE_INFO_SIZE];
        b[Self::DATE_OFFSET..Self::DATE_OFFSET + 10].copy_from_slice(b"2013-05-01");
        put_i16(&mut b, Self::ADC_RE_OFFSET, self.adc_re);
        put_i16(&mut b, Self::STOPT_OFFSET, self.stopt);
        put_i32(&mut b, Self::SCAN_OFFSET, self.scan_x);
        put_i32(&mut b, Self::SCAN_OFFSET + 4, self.scan_y);
        put_i32(&mut b, Self::SCAN_OFFSET + 8, self.scan_rx);
        b
    }
}

fn put_i16(b: &mut [u8], at: usize, v: i16) {
    b[at..at + 2].copy_from_slice(&v.to_le_bytes());
}

fn put_i32(b: &mut [u8], at: usize, v: i32) {
    b[at..at + 4].copy_from_slice(&v.to_le_bytes());
}
