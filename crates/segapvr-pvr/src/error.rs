//! Error types for PVR decoding.

use thiserror::Error;

/// Errors that can occur when working with PVR textures.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Common library error.
    #[error("{0}")]
    Common(#[from] segapvr_common::Error),

    /// The "PVRT" texture header was not found where it was expected.
    #[error("malformed PVR header: expected 'PVRT' at offset {offset}, got {actual:?}")]
    MalformedHeader { offset: usize, actual: Vec<u8> },

    /// The type mask in the texture attributes is not one we can decode.
    #[error("unsupported texture type mask: {0:#04x}")]
    UnsupportedTypeMask(u8),

    /// Destination buffer cannot hold the decoded image.
    #[error("destination buffer too small: expected {expected} bytes, got {actual}")]
    DestinationTooSmall { expected: usize, actual: usize },

    /// A computed texel position fell outside its buffer.
    #[error("texel position {position} out of bounds for buffer of {len} bytes")]
    TexelOutOfBounds { position: usize, len: usize },
}

/// Result type for PVR operations.
pub type Result<T> = std::result::Result<T, Error>;
