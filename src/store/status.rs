use std::fmt;

use crate::error::KeychainError;

pub const ERR_SUCCESS: i32 = 0;
pub const ERR_DUPLICATE_ITEM: i32 = -25299;
pub const ERR_ITEM_NOT_FOUND: i32 = -25300;
pub const ERR_DISK_FULL: i32 = -34;
pub const ERR_PARAM: i32 = -50;
pub const ERR_BAD_REQUEST: i32 = -909;
pub const ERR_USER_CANCELED: i32 = -128;
pub const ERR_MISSING_ENTITLEMENT: i32 = -34018;
pub const ERR_INTERNAL_COMPONENT: i32 = -2070;

/// Outcome of a store call, translated once from the platform status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreStatus {
    Success,
    DuplicateItem,
    NotFound,
    DiskFull,
    InvalidParameter,
    BadRequest,
    UserCancelledAuthentication,
    MissingEntitlement,
    Other(i32),
}

impl StoreStatus {
    pub fn from_code(code: i32) -> Self {
        match code {
            ERR_SUCCESS => StoreStatus::Success,
            ERR_DUPLICATE_ITEM => StoreStatus::DuplicateItem,
            ERR_ITEM_NOT_FOUND => StoreStatus::NotFound,
            ERR_DISK_FULL => StoreStatus::DiskFull,
            ERR_PARAM => StoreStatus::InvalidParameter,
            ERR_BAD_REQUEST => StoreStatus::BadRequest,
            ERR_USER_CANCELED => StoreStatus::UserCancelledAuthentication,
            ERR_MISSING_ENTITLEMENT => StoreStatus::MissingEntitlement,
            other => StoreStatus::Other(other),
        }
    }

    pub fn code(&self) -> i32 {
        match self {
            StoreStatus::Success => ERR_SUCCESS,
            StoreStatus::DuplicateItem => ERR_DUPLICATE_ITEM,
            StoreStatus::NotFound => ERR_ITEM_NOT_FOUND,
            StoreStatus::DiskFull => ERR_DISK_FULL,
            StoreStatus::InvalidParameter => ERR_PARAM,
            StoreStatus::BadRequest => ERR_BAD_REQUEST,
            StoreStatus::UserCancelledAuthentication => ERR_USER_CANCELED,
            StoreStatus::MissingEntitlement => ERR_MISSING_ENTITLEMENT,
            StoreStatus::Other(code) => *code,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, StoreStatus::Success)
    }

    /// `Ok(())` on success, the status wrapped as an error otherwise.
    pub fn into_result(self) -> Result<(), KeychainError> {
        match self {
            StoreStatus::Success => Ok(()),
            status => Err(KeychainError::Store(status)),
        }
    }
}

impl fmt::Display for StoreStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreStatus::Success => write!(f, "success"),
            StoreStatus::DuplicateItem => write!(f, "the item already exists"),
            StoreStatus::NotFound => write!(f, "the item could not be found"),
            StoreStatus::DiskFull => write!(f, "the disk is full"),
            StoreStatus::InvalidParameter => write!(f, "one or more parameters were not valid"),
            StoreStatus::BadRequest => write!(f, "bad request"),
            StoreStatus::UserCancelledAuthentication => {
                write!(f, "the user cancelled authentication")
            }
            StoreStatus::MissingEntitlement => write!(f, "missing entitlement for this feature"),
            StoreStatus::Other(code) => write!(f, "store status {}", code),
        }
    }
}
