// src/reader/options.rs
use crate::types::ByteOrder;

/// Settings for decoding an SDT file
///
/// # Example
///
/// ```
/// use sdt_rs::reader::ReadOptions;
/// use sdt_rs::types::ByteOrder;
///
/// let options = ReadOptions::default()
///     .with_byte_order(ByteOrder::Big)
///     .with_max_chain_len(16);
/// assert_eq!(options.max_chain_len, 16);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadOptions {
    /// Byte order of every binary field in the file
    pub byte_order: ByteOrder,
    /// Upper bound on data block headers visited when walking the block chain
    pub max_chain_len: u64,
}

impl ReadOptions {
    pub const DEFAULT_MAX_CHAIN_LEN: u64 = 65_536;

    pub fn with_byte_order(mut self, byte_order: ByteOrder) -> Self {
        self.byte_order = byte_order;
        self
    }

    pub fn with_max_chain_len(mut self, max_chain_len: u64) -> Self {
        self.max_chain_len = max_chain_len;
        self
    }
}

impl Default for ReadOptions {
    fn default() -> Self {
        ReadOptions {
            byte_order: ByteOrder::Little,
            max_chain_len: Self::DEFAULT_MAX_CHAIN_LEN,
        }
    }
}
