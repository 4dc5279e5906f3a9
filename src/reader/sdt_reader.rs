// src/reader/sdt_reader.rs
use crate::error::Result;
use crate::header::{BlockChain, BlockHeader};
use crate::metadata::MetaTable;
use crate::raw_data::{FieldReader, ReadSeek};
use crate::reader::{ReadOptions, SdtHeader};
use std::fs::File;
use std::io::{BufReader, Seek, SeekFrom};
use std::path::Path;

#[cfg(feature = "mmap")]
use memmap2::Mmap;
#[cfg(feature = "mmap")]
use std::io::Cursor;

/// An opened SDT file with its decoded header and metadata
pub struct SdtReader<R: ReadSeek> {
    stream: R,
    options: ReadOptions,
    header: SdtHeader,
    metadata: MetaTable,
}

/// Constructor for standard file I/O
impl SdtReader<BufReader<File>> {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with(path, ReadOptions::default())
    }

    pub fn open_with(path: impl AsRef<Path>, options: ReadOptions) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::with_capacity(65536, file), options)
    }
}

/// Constructor for memory-mapped file I/O (requires "mmap" feature)
#[cfg(feature = "mmap")]
impl SdtReader<Cursor<Mmap>> {
    pub fn open_mmap(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let mmap = unsafe { Mmap::map(&file)? };
        Self::from_reader(Cursor::new(mmap), ReadOptions::default())
    }
}

/// Generic implementation for all SdtReader variants
impl<R: ReadSeek> SdtReader<R> {
    /// Decode the header of `stream`, starting from its beginning
    pub fn from_reader(mut stream: R, options: ReadOptions) -> Result<Self> {
        stream.seek(SeekFrom::Start(0))?;
        let mut metadata = MetaTable::new();
        let header = SdtHeader::read(&mut stream, options.byte_order, &mut metadata)?;
        Ok(SdtReader {
            stream,
            options,
            header,
            metadata,
        })
    }

    pub fn header(&self) -> &SdtHeader {
        &self.header
    }

    pub fn metadata(&self) -> &MetaTable {
        &self.metadata
    }

    pub fn options(&self) -> &ReadOptions {
        &self.options
    }

    /// Read the block header at an arbitrary offset
    pub fn read_block_header_at(&mut self, offset: u64) -> Result<BlockHeader> {
        let mut fields = FieldReader::new(&mut self.stream, self.options.byte_order);
        BlockHeader::read_at(&mut fields, offset)
    }

    /// Walk the data block chain from the first block header
    ///
    /// Visits at most the file's declared block count, capped by
    /// [`ReadOptions::max_chain_len`].
    pub fn blocks(&mut self) -> BlockChain<'_, R> {
        let limit = self
            .header
            .file_header
            .data_block_count()
            .min(self.options.max_chain_len);
        BlockChain::new(
            &mut self.stream,
            self.options.byte_order,
            self.header.file_header.data_block_offset(),
            limit,
        )
    }

    /// Give back the stream along with the decoded header and metadata
    pub fn into_parts(self) -> (R, SdtHeader, MetaTable) {
        (self.stream, self.header, self.metadata)
    }
}
