//! CredentialItem - a typed value cached in memory and synchronized with an
//! attributed secure store.
//!
//! An item owns one value of type `T`, a set of attribute slots `A` and a
//! handle to a [`SecureStore`]. The value is encoded into the item's data blob
//! with [`ItemValue`]; the attribute slots are resolved into queries with
//! [`resolve`](crate::query::resolve).
//!
//! ```text
//!            set(Some) [Manual]
//!   Empty ----------------------> CachedUnsynced
//!     ^   \                          |
//!     |    \ set(Some) [OnAccess]    | save
//!     |     \ load (found)           v
//!     +------ delete ---------- CachedSynced
//! ```
//!
//! Two items with the same identity on different handles are not
//! coordinated: a load followed by a save on one may overwrite a concurrent
//! save from the other.

mod generic_password;
mod internet_password;

pub use generic_password::{GenericPassword, GenericPasswordAttributes};
pub use internet_password::{InternetPassword, InternetPasswordAttributes};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::attribute::AttributeSet;
use crate::codec::ItemValue;
use crate::error::KeychainError;
use crate::query::{identify_query, insert_query, update_attributes_query, ItemIdentity};
use crate::store::{MatchRequest, MatchResult, SecureStore, StoreStatus};

/// When the item talks to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncPolicy {
    /// Only explicit `save`/`load`/`delete` reach the store.
    #[default]
    Manual,
    /// Reads load first; writes save or delete immediately.
    OnAccess,
}

/// Observable state of an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemState {
    /// No cached value: never loaded, not found, or deleted.
    Empty,
    /// A local change has not been saved yet.
    CachedUnsynced,
    CachedSynced,
}

pub struct CredentialItem<T, A, S> {
    store: S,
    identity: ItemIdentity,
    attributes: A,
    cached: Option<T>,
    default_value: Option<T>,
    policy: SyncPolicy,
    synced: bool,
}

impl<T, A, S> CredentialItem<T, A, S>
where
    T: ItemValue + Clone,
    A: AttributeSet,
    S: SecureStore,
{
    /// Build an item over any attribute set. Fails when a primary-key
    /// attribute is not declared by `attributes`.
    pub fn with_identity(
        store: S,
        identity: ItemIdentity,
        attributes: A,
        policy: SyncPolicy,
    ) -> Result<Self, KeychainError> {
        identity.validate(&attributes)?;
        Ok(Self {
            store,
            identity,
            attributes,
            cached: None,
            default_value: None,
            policy,
            synced: true,
        })
    }

    /// Value returned by reads while nothing is cached. Never stored.
    pub fn with_default(mut self, value: T) -> Self {
        self.default_value = Some(value);
        self
    }

    pub fn identity(&self) -> &ItemIdentity {
        &self.identity
    }

    pub fn policy(&self) -> SyncPolicy {
        self.policy
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn attributes(&self) -> &A {
        &self.attributes
    }

    pub fn is_synced(&self) -> bool {
        self.synced
    }

    pub fn state(&self) -> ItemState {
        match (&self.cached, self.synced) {
            (None, _) => ItemState::Empty,
            (Some(_), false) => ItemState::CachedUnsynced,
            (Some(_), true) => ItemState::CachedSynced,
        }
    }

    /// Cached value (or the default) without touching the store.
    pub fn value(&self) -> Option<&T> {
        self.cached.as_ref().or(self.default_value.as_ref())
    }

    /// Read the value. Under [`SyncPolicy::OnAccess`] the item is loaded
    /// first.
    pub fn get(&mut self) -> Result<Option<T>, KeychainError> {
        if self.policy == SyncPolicy::OnAccess {
            self.load()?;
        }
        Ok(self.value().cloned())
    }

    /// Replace the value. `None` deletes the item under both policies.
    pub fn set(&mut self, value: Option<T>) -> Result<(), KeychainError> {
        let Some(value) = value else {
            return self.delete();
        };
        self.cached = Some(value);
        self.synced = false;
        match self.policy {
            SyncPolicy::Manual => Ok(()),
            SyncPolicy::OnAccess => self.save(),
        }
    }

    /// Change attribute slots. Under [`SyncPolicy::OnAccess`] a cached value
    /// is saved right away.
    pub fn update_attributes<F>(&mut self, f: F) -> Result<(), KeychainError>
    where
        F: FnOnce(&mut A),
    {
        f(&mut self.attributes);
        match self.policy {
            SyncPolicy::Manual => {
                self.synced = false;
                Ok(())
            }
            SyncPolicy::OnAccess if self.cached.is_some() => {
                self.synced = false;
                self.save()
            }
            SyncPolicy::OnAccess => Ok(()),
        }
    }

    /// Write the cached value and attributes to the store. Inserts, and
    /// updates the existing item when the insert collides. Without a cached
    /// value this deletes.
    pub fn save(&mut self) -> Result<(), KeychainError> {
        let Some(value) = self.cached.as_ref() else {
            return self.delete();
        };
        let data = value.encode()?;
        let class = self.identity.item_class();

        let insert = insert_query(&self.identity, &self.attributes, data.clone());
        match self.store.add(&insert) {
            StoreStatus::Success => {
                debug!(target: "keychain_item::item", class = %class, "item inserted");
            }
            StoreStatus::DuplicateItem => {
                debug!(target: "keychain_item::item", class = %class, "item exists, updating");
                let identify = identify_query(&self.identity, &self.attributes);
                let attributes = update_attributes_query(&self.identity, &self.attributes, data);
                let status = self.store.update(&identify, &attributes);
                if !status.is_success() {
                    warn!(target: "keychain_item::item", class = %class, code = status.code(), "update failed");
                }
                status.into_result()?;
            }
            status => {
                warn!(target: "keychain_item::item", class = %class, code = status.code(), "insert failed");
                return Err(KeychainError::Store(status));
            }
        }

        self.synced = true;
        Ok(())
    }

    /// Fetch the item and repopulate the value and every attribute slot.
    ///
    /// A missing item empties the cache and resets every non-primary-key
    /// slot. A blob that does not decode leaves the cache empty and the slots
    /// untouched.
    pub fn load(&mut self) -> Result<Option<&T>, KeychainError> {
        let class = self.identity.item_class();
        let identify = identify_query(&self.identity, &self.attributes);

        let (status, result) = self.store.copy_matching(&identify, MatchRequest::single_item());
        match status {
            StoreStatus::Success => {}
            StoreStatus::NotFound => {
                debug!(target: "keychain_item::item", class = %class, "item not found");
                self.clear_local();
                return Ok(None);
            }
            status => {
                warn!(target: "keychain_item::item", class = %class, code = status.code(), "fetch failed");
                return Err(KeychainError::Store(status));
            }
        }

        let Some(MatchResult::One(found)) = result else {
            return Err(KeychainError::UnexpectedFormat);
        };
        let Some(blob) = found.data() else {
            return Err(KeychainError::UnexpectedFormat);
        };

        self.cached = None;
        let value = T::decode(blob)?;
        for element in self.attributes.elements_mut() {
            let key = element.key();
            element.configure(found.get(&key));
        }
        self.cached = Some(value);
        self.synced = true;

        debug!(target: "keychain_item::item", class = %class, "item loaded");
        Ok(self.cached.as_ref())
    }

    /// Remove the item from the store. Deleting a missing item succeeds.
    pub fn delete(&mut self) -> Result<(), KeychainError> {
        let class = self.identity.item_class();
        let identify = identify_query(&self.identity, &self.attributes);

        match self.store.delete(&identify) {
            StoreStatus::Success => {
                debug!(target: "keychain_item::item", class = %class, "item deleted");
            }
            StoreStatus::NotFound => {
                debug!(target: "keychain_item::item", class = %class, "nothing to delete");
            }
            status => {
                warn!(target: "keychain_item::item", class = %class, code = status.code(), "delete failed");
                return Err(KeychainError::Store(status));
            }
        }

        self.clear_local();
        Ok(())
    }

    fn clear_local(&mut self) {
        self.cached = None;
        for element in self.attributes.elements_mut() {
            if !self.identity.is_primary(&element.key()) {
                element.configure(None);
            }
        }
        self.synced = true;
    }
}

impl<T, A, S> std::fmt::Debug for CredentialItem<T, A, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialItem")
            .field("identity", &self.identity)
            .field("policy", &self.policy)
            .field("cached", &self.cached.is_some())
            .field("synced", &self.synced)
            .finish()
    }
}
