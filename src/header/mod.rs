// src/header/mod.rs
mod block_header;
mod file_header;

pub use block_header::{read_block_header_at, BlockChain, BlockHeader};
pub use file_header::FileHeader;
