// src/error.rs
use std::io;
use std::num::ParseIntError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SdtError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Malformed setup line ({reason}): {line:?}")]
    MalformedSetupLine { line: String, reason: &'static str },

    #[error("Invalid value for dimension tag {tag:?}: {text:?}")]
    InvalidDimension {
        tag: &'static str,
        text: String,
        #[source]
        source: ParseIntError,
    },

    #[error("Block chain revisits offset {offset}")]
    BlockChainCycle { offset: u64 },
}

pub type Result<T> = std::result::Result<T, SdtError>;
