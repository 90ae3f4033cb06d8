use url::Url;

use super::integer::{encode_signed, native_signed};
use super::{DecodeError, EncodeError, ItemValue};

impl ItemValue for bool {
    fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        Ok(encode_signed(i64::from(*self)))
    }

    fn decode(blob: &[u8]) -> Result<Self, DecodeError> {
        match native_signed(blob)? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(DecodeError::InvalidBoolean(other)),
        }
    }
}

impl ItemValue for String {
    fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        Ok(self.as_bytes().to_vec())
    }

    // ASCII is a subset of UTF-8, so a separate ASCII attempt cannot succeed
    // where UTF-8 failed.
    fn decode(blob: &[u8]) -> Result<Self, DecodeError> {
        String::from_utf8(blob.to_vec()).map_err(|_| DecodeError::InvalidEncoding)
    }
}

impl ItemValue for Url {
    fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        self.as_str().to_string().encode()
    }

    fn decode(blob: &[u8]) -> Result<Self, DecodeError> {
        let raw = String::decode(blob)?;
        Url::parse(&raw).map_err(|_| DecodeError::InvalidEncoding)
    }
}

/// Raw blobs pass through untouched so already-encoded foreign data can be
/// read and written as-is.
impl ItemValue for Vec<u8> {
    fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        Ok(self.clone())
    }

    fn decode(blob: &[u8]) -> Result<Self, DecodeError> {
        Ok(blob.to_vec())
    }
}

macro_rules! unsupported_item_value {
    ($($ty:ty),*) => {
        $(
            impl ItemValue for $ty {
                fn encode(&self) -> Result<Vec<u8>, EncodeError> {
                    Err(EncodeError::UnsupportedType(stringify!($ty)))
                }

                fn decode(_blob: &[u8]) -> Result<Self, DecodeError> {
                    Err(DecodeError::UnsupportedType(stringify!($ty)))
                }
            }
        )*
    };
}

unsupported_item_value!(f32, f64);
