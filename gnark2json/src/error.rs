//! conversion errors

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConvertError>;

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("malformed witness: {len} bytes is shorter than the {header_len}-byte header")]
    MalformedWitness { len: usize, header_len: usize },
    #[error("misaligned element stream: {len} bytes is not a multiple of {element_width}")]
    MisalignedElementStream { len: usize, element_width: usize },
    #[error("invalid field encoding at element {index}: value is not below the modulus")]
    InvalidFieldEncoding { index: usize },
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("unexpected end of input: needed {needed} bytes, {remaining} remaining")]
    UnexpectedEof { needed: usize, remaining: usize },
    #[error("{0} trailing bytes after the encoded value")]
    TrailingBytes(usize),
    #[error("compressed point encoding is not supported")]
    CompressedPoint,
    #[error("invalid decimal integer: {0}")]
    InvalidDecimal(String),
    #[error("unsupported curve: {0}")]
    UnsupportedCurve(String),
}
