//! Type-directed binary codec for item values.
//!
//! The store holds an opaque blob per item. How a value becomes that blob is
//! decided by its type:
//!
//! | Type | Blob |
//! |------|------|
//! | `i8`..`i64`, `isize` | 8-byte little-endian signed cell |
//! | `u8`..`u64`, `usize` | 8-byte little-endian unsigned cell |
//! | `bool` | the integer 0 or 1 as an 8-byte cell |
//! | `String` | UTF-8 bytes, no length prefix |
//! | `url::Url` | its string form |
//! | `Vec<u8>` | the bytes untouched |
//! | `f32`, `f64` | unsupported, fails immediately |
//! | [`Structured<T>`] | bitcode serde encoding |
//!
//! Integer decoding infers the stored width from the blob length alone
//! (1, 2, 4 or 8 bytes) and saturates into the requested type, so a blob
//! written by another producer with a narrower cell still decodes.

mod integer;
mod scalar;
mod structured;

use std::fmt;

pub use structured::Structured;
#[doc(hidden)]
pub use structured::{decode_structured, encode_structured};

/// A value that can be stored as an item's data blob.
pub trait ItemValue: Sized {
    fn encode(&self) -> Result<Vec<u8>, EncodeError>;

    fn decode(blob: &[u8]) -> Result<Self, DecodeError>;
}

/// Encode a value into its blob form.
pub fn encode<T: ItemValue>(value: &T) -> Result<Vec<u8>, EncodeError> {
    value.encode()
}

/// Decode a blob into the requested type.
pub fn decode<T: ItemValue>(blob: &[u8]) -> Result<T, DecodeError> {
    T::decode(blob)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// The type has no blob representation (floating point at top level).
    UnsupportedType(&'static str),
    StructuredEncodeFailure(String),
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodeError::UnsupportedType(ty) => {
                write!(f, "encoding root type {} is not supported", ty)
            }
            EncodeError::StructuredEncodeFailure(msg) => {
                write!(f, "structured encode failed: {}", msg)
            }
        }
    }
}

impl std::error::Error for EncodeError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Blob length or contents do not form a value of the requested type.
    InvalidEncoding,
    /// Integer cell held something other than 0 or 1.
    InvalidBoolean(i64),
    UnsupportedType(&'static str),
    StructuredDecodeFailure(String),
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::InvalidEncoding => write!(f, "blob is not a valid encoding"),
            DecodeError::InvalidBoolean(value) => {
                write!(f, "boolean cell holds {}, expected 0 or 1", value)
            }
            DecodeError::UnsupportedType(ty) => {
                write!(f, "decoding root type {} is not supported", ty)
            }
            DecodeError::StructuredDecodeFailure(msg) => {
                write!(f, "structured decode failed: {}", msg)
            }
        }
    }
}

impl std::error::Error for DecodeError {}
