//! Error types for disk image inspection.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while reading a +3DOS/PCW disk image.
#[derive(Error, Debug)]
pub enum P3dError {
    #[error("couldn't open image file {}: {source}", .path.display())]
    OpenFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("truncated image reading {what} at offset {offset:#x}: needed {needed} bytes, got {available}")]
    TruncatedImage {
        what: &'static str,
        offset: u64,
        needed: usize,
        available: usize,
    },

    #[error("malformed geometry: {0}")]
    MalformedGeometry(String),

    #[error("unsupported geometry: {0}")]
    UnsupportedGeometry(String),

    #[error("no primary extent for {owner_code}:{name}.{file_type} (extents {extents:?})")]
    MissingPrimaryExtent {
        owner_code: u8,
        name: String,
        file_type: String,
        extents: Vec<u8>,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("decode error: {0}")]
    Decode(#[from] binrw::Error),
}

/// Result type for image inspection.
pub type P3dResult<T> = Result<T, P3dError>;
