//! Error types for font container conversion.

use std::{io, result};

use allsorts::error::{ParseError, ReadWriteError};

/// Errors that can occur while converting font containers.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to parse font container: {0}")]
    Parse(#[from] ParseError),

    #[error("failed to read font container: {0}")]
    ReadWrite(#[from] ReadWriteError),

    #[error("font data is truncated")]
    Truncated,

    #[error("unsupported sfnt version 0x{0:08X}")]
    UnsupportedVersion(u32),

    #[error("font contains no tables")]
    NoTables,

    #[error("compression failed: {0}")]
    Compress(#[from] io::Error),
}

pub type Result<T> = result::Result<T, Error>;
