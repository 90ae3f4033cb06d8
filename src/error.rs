use std::fmt;

use crate::attribute::AttributeKey;
use crate::codec::{DecodeError, EncodeError};
use crate::query::ItemClass;
use crate::store::StoreStatus;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeychainError {
    /// The store answered with a non-success status.
    Store(StoreStatus),
    Encode(EncodeError),
    Decode(DecodeError),
    /// The store answered success but the response was not a single item
    /// carrying a data blob.
    UnexpectedFormat,
    /// A primary-key attribute is not declared by the item's attribute set.
    InvalidIdentity {
        class: ItemClass,
        key: AttributeKey,
    },
    Config(String),
}

impl KeychainError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, KeychainError::Store(StoreStatus::NotFound))
    }
}

impl fmt::Display for KeychainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeychainError::Store(status) => {
                write!(f, "store error {}: {}", status.code(), status)
            }
            KeychainError::Encode(err) => write!(f, "encode error: {}", err),
            KeychainError::Decode(err) => write!(f, "decode error: {}", err),
            KeychainError::UnexpectedFormat => {
                write!(f, "store returned an unexpected response format")
            }
            KeychainError::InvalidIdentity { class, key } => write!(
                f,
                "primary key attribute {} is not declared for {} items",
                key, class
            ),
            KeychainError::Config(message) => write!(f, "config error: {}", message),
        }
    }
}

impl std::error::Error for KeychainError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            KeychainError::Encode(err) => Some(err),
            KeychainError::Decode(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreStatus> for KeychainError {
    fn from(status: StoreStatus) -> Self {
        KeychainError::Store(status)
    }
}

impl From<EncodeError> for KeychainError {
    fn from(err: EncodeError) -> Self {
        KeychainError::Encode(err)
    }
}

impl From<DecodeError> for KeychainError {
    fn from(err: DecodeError) -> Self {
        KeychainError::Decode(err)
    }
}
