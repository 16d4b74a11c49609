use thiserror::Error;

/// Errors raised while building a [`crate::TextureImage`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TextureError {
    #[error("texture dimensions must be non-zero (got {width}x{height})")]
    EmptyDimensions { width: u32, height: u32 },

    #[error("RGBA8 buffer holds {actual} bytes, expected {expected} for {width}x{height}")]
    BufferSize {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
}
