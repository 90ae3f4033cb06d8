use super::{DecodeError, ItemValue};

/// Decode a signed cell of whatever width the blob length says.
pub(super) fn native_signed(blob: &[u8]) -> Result<i64, DecodeError> {
    match blob.len() {
        1 => Ok(i64::from(i8::from_le_bytes([blob[0]]))),
        2 => Ok(i64::from(i16::from_le_bytes([blob[0], blob[1]]))),
        4 => Ok(i64::from(i32::from_le_bytes(fixed(blob)?))),
        8 => Ok(i64::from_le_bytes(fixed(blob)?)),
        _ => Err(DecodeError::InvalidEncoding),
    }
}

/// Decode an unsigned cell of whatever width the blob length says.
pub(super) fn native_unsigned(blob: &[u8]) -> Result<u64, DecodeError> {
    match blob.len() {
        1 => Ok(u64::from(blob[0])),
        2 => Ok(u64::from(u16::from_le_bytes([blob[0], blob[1]]))),
        4 => Ok(u64::from(u32::from_le_bytes(fixed(blob)?))),
        8 => Ok(u64::from_le_bytes(fixed(blob)?)),
        _ => Err(DecodeError::InvalidEncoding),
    }
}

fn fixed<const N: usize>(blob: &[u8]) -> Result<[u8; N], DecodeError> {
    blob.try_into().map_err(|_| DecodeError::InvalidEncoding)
}

pub(super) fn encode_signed(value: i64) -> Vec<u8> {
    value.to_le_bytes().to_vec()
}

macro_rules! signed_item_value {
    ($($ty:ty),*) => {
        $(
            impl ItemValue for $ty {
                fn encode(&self) -> Result<Vec<u8>, super::EncodeError> {
                    Ok(encode_signed(*self as i64))
                }

                fn decode(blob: &[u8]) -> Result<Self, DecodeError> {
                    let wide = native_signed(blob)?;
                    Ok(<$ty>::try_from(wide).unwrap_or(if wide < 0 { <$ty>::MIN } else { <$ty>::MAX }))
                }
            }
        )*
    };
}

macro_rules! unsigned_item_value {
    ($($ty:ty),*) => {
        $(
            impl ItemValue for $ty {
                fn encode(&self) -> Result<Vec<u8>, super::EncodeError> {
                    Ok((*self as u64).to_le_bytes().to_vec())
                }

                fn decode(blob: &[u8]) -> Result<Self, DecodeError> {
                    let wide = native_unsigned(blob)?;
                    Ok(<$ty>::try_from(wide).unwrap_or(<$ty>::MAX))
                }
            }
        )*
    };
}

signed_item_value!(i8, i16, i32, i64, isize);
unsigned_item_value!(u8, u16, u32, u64, usize);
