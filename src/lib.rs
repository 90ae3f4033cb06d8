//! Typed items over an attributed secure key-value store.
//!
//! A [`CredentialItem`] holds one typed value, caches it in memory and keeps
//! it in sync with a [`SecureStore`] (a platform keychain, or
//! [`InMemorySecureStore`]). Three pieces do the work:
//!
//! - [`resolve`] turns an item's declared [`AttributeSet`] into the attribute
//!   dictionary sent to the store, dropping attributes that conflict.
//! - [`codec`] maps the value to and from the stored blob by its type.
//! - [`CredentialItem`] runs save (insert, then update on collision), load and
//!   delete against the store.
//!
//! ```ignore
//! use keychain_item::{GenericPassword, InMemorySecureStore, SyncPolicy};
//!
//! let store = InMemorySecureStore::new();
//! let mut token = GenericPassword::<String, _>::new(store.clone(), "api", SyncPolicy::Manual)?;
//! token.set(Some("s3cr3t".into()))?;
//! token.save()?;
//! ```

extern crate self as keychain_item;

mod attribute;
pub mod codec;
mod config;
mod error;
mod item;
mod query;
mod store;

pub use attribute::{
    AccessControl, AccessControlFlags, Accessible, AttrValue, AttributeElement, AttributeKey,
    AttributeSet, AttributeValue, AuthenticationType, CommonAttributes, Constraint, Element,
    Protocol,
};
pub use codec::{decode, encode, DecodeError, EncodeError, ItemValue, Structured};
pub use config::KeychainConfig;
pub use error::KeychainError;
pub use item::{
    CredentialItem, GenericPassword, GenericPasswordAttributes, InternetPassword,
    InternetPasswordAttributes, ItemState, SyncPolicy,
};
pub use query::{
    identify_query, insert_query, resolve, update_attributes_query, ItemClass, ItemIdentity,
    Query,
};
pub use store::{
    InMemorySecureStore, MatchLimit, MatchRequest, MatchResult, SecureStore, StoreStatus,
};

/// Derive [`AttributeSet`] for a struct of attribute slots.
///
/// Fields tagged `#[element]` are single slots; fields tagged
/// `#[element(flatten)]` are nested sets expanded in place.
pub use keychain_item_macros::AttributeSet;
