use std::ops::{Deref, DerefMut};

use serde::{de::DeserializeOwned, Deserialize, Serialize};

use super::{DecodeError, EncodeError, ItemValue};

/// Wrapper that stores any serde type through the bitcode binary format.
///
/// ```ignore
/// #[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
/// struct OAuthToken { access: String, refresh: String, expires_in: u32 }
///
/// let mut item: GenericPassword<Structured<OAuthToken>, _> =
///     GenericPassword::new(store, "com.example.oauth", SyncPolicy::Manual)?;
/// item.set(Some(Structured(token)))?;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Structured<T>(pub T);

impl<T> Structured<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> From<T> for Structured<T> {
    fn from(value: T) -> Self {
        Structured(value)
    }
}

impl<T> Deref for Structured<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T> DerefMut for Structured<T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.0
    }
}

impl<T: Serialize + DeserializeOwned> ItemValue for Structured<T> {
    fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        encode_structured(&self.0)
    }

    fn decode(blob: &[u8]) -> Result<Self, DecodeError> {
        decode_structured(blob).map(Structured)
    }
}

#[doc(hidden)]
pub fn encode_structured<T: Serialize>(value: &T) -> Result<Vec<u8>, EncodeError> {
    bitcode::serialize(value).map_err(|e| EncodeError::StructuredEncodeFailure(e.to_string()))
}

#[doc(hidden)]
pub fn decode_structured<T: DeserializeOwned>(blob: &[u8]) -> Result<T, DecodeError> {
    bitcode::deserialize(blob).map_err(|e| DecodeError::StructuredDecodeFailure(e.to_string()))
}

/// Implement [`ItemValue`](crate::ItemValue) for serde types directly, without
/// the [`Structured`] wrapper.
///
/// ```ignore
/// #[derive(Serialize, Deserialize)]
/// struct Credentials { user: String, secret: String }
///
/// keychain_item::structured_item_value!(Credentials);
/// ```
#[macro_export]
macro_rules! structured_item_value {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::ItemValue for $ty {
                fn encode(&self) -> ::std::result::Result<::std::vec::Vec<u8>, $crate::EncodeError> {
                    $crate::codec::encode_structured(self)
                }

                fn decode(blob: &[u8]) -> ::std::result::Result<Self, $crate::DecodeError> {
                    $crate::codec::decode_structured(blob)
                }
            }
        )+
    };
}
