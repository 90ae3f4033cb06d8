//! InMemorySecureStore - an in-process attributed store for testing and for
//! hosts without a platform keychain.

use std::sync::{Arc, RwLock};

use chrono::Utc;
use tracing::debug;

use super::status::ERR_INTERNAL_COMPONENT;
use super::{MatchLimit, MatchRequest, MatchResult, SecureStore, StoreStatus};
use crate::attribute::{AttrValue, AttributeKey};
use crate::query::{ItemClass, Query};

const LOCK_POISONED: StoreStatus = StoreStatus::Other(ERR_INTERNAL_COMPONENT);

/// In-memory secure store.
///
/// Emulates the platform contract: items must carry a class, insert collides
/// on the class's uniqueness attributes, reads match every query attribute,
/// creation and modification dates are synthesized and cannot be written, and
/// an item cannot carry both an accessibility level and an access control.
///
/// Clone-friendly via Arc; clones share the same items.
#[derive(Clone)]
pub struct InMemorySecureStore {
    items: Arc<RwLock<Vec<Query>>>,
    simulated_status: Arc<RwLock<Option<StoreStatus>>>,
}

impl Default for InMemorySecureStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemorySecureStore {
    pub fn new() -> Self {
        Self {
            items: Arc::new(RwLock::new(Vec::new())),
            simulated_status: Arc::new(RwLock::new(None)),
        }
    }

    /// Make every subsequent call answer with `status` (or behave normally
    /// again with `None`). Used to exercise error handling.
    pub fn set_simulated_status(&self, status: Option<StoreStatus>) {
        if let Ok(mut simulated) = self.simulated_status.write() {
            *simulated = status;
        }
    }

    /// Number of stored items across all classes.
    pub fn len(&self) -> usize {
        self.items.read().map(|items| items.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn simulated(&self) -> Option<StoreStatus> {
        match self.simulated_status.read() {
            Ok(simulated) => *simulated,
            Err(_) => Some(LOCK_POISONED),
        }
    }

    fn matches(item: &Query, query: &Query) -> bool {
        query.iter().all(|(key, value)| item.get(key) == Some(value))
    }

    fn collides(class: ItemClass, a: &Query, b: &Query) -> bool {
        b.item_class() == Some(class)
            && class
                .uniqueness_keys()
                .iter()
                .all(|key| a.get(key) == b.get(key))
    }

    fn has_read_only(query: &Query) -> bool {
        query.contains_key(&AttributeKey::CREATION_DATE)
            || query.contains_key(&AttributeKey::MODIFICATION_DATE)
    }

    fn has_exclusive_pair(query: &Query) -> bool {
        query.contains_key(&AttributeKey::ACCESSIBLE)
            && query.contains_key(&AttributeKey::ACCESS_CONTROL)
    }

    fn project(item: &Query, request: &MatchRequest) -> Query {
        item.iter()
            .filter(|(key, _)| {
                if **key == AttributeKey::DATA {
                    request.return_data
                } else {
                    request.return_attributes
                }
            })
            .map(|(key, value)| (*key, value.clone()))
            .collect()
    }
}

impl SecureStore for InMemorySecureStore {
    fn add(&self, attributes: &Query) -> StoreStatus {
        if let Some(status) = self.simulated() {
            return status;
        }
        let Some(class) = attributes.item_class() else {
            return StoreStatus::InvalidParameter;
        };
        if Self::has_read_only(attributes) || Self::has_exclusive_pair(attributes) {
            return StoreStatus::InvalidParameter;
        }

        let Ok(mut items) = self.items.write() else {
            return LOCK_POISONED;
        };
        if items.iter().any(|item| Self::collides(class, attributes, item)) {
            debug!(target: "keychain_item::store", class = %class, "duplicate item on add");
            return StoreStatus::DuplicateItem;
        }

        let now = Utc::now();
        let mut item = attributes.clone();
        item.merge_missing(
            [
                (AttributeKey::DATA, AttrValue::Data(Vec::new())),
                (AttributeKey::CREATION_DATE, AttrValue::Date(now)),
                (AttributeKey::MODIFICATION_DATE, AttrValue::Date(now)),
            ]
            .into_iter()
            .collect(),
        );
        items.push(item);

        debug!(target: "keychain_item::store", class = %class, count = items.len(), "item added");
        StoreStatus::Success
    }

    fn copy_matching(&self, query: &Query, request: MatchRequest) -> (StoreStatus, Option<MatchResult>) {
        if let Some(status) = self.simulated() {
            return (status, None);
        }
        let Ok(items) = self.items.read() else {
            return (LOCK_POISONED, None);
        };

        let mut found = items
            .iter()
            .filter(|item| Self::matches(item, query))
            .map(|item| Self::project(item, &request));

        let result = match request.limit {
            MatchLimit::One => found.next().map(MatchResult::One),
            MatchLimit::All => {
                let all: Vec<Query> = found.collect();
                (!all.is_empty()).then_some(MatchResult::All(all))
            }
        };

        debug!(target: "keychain_item::store", found = result.is_some(), "copy matching");
        match result {
            Some(result) => (StoreStatus::Success, Some(result)),
            None => (StoreStatus::NotFound, None),
        }
    }

    fn update(&self, identify: &Query, attributes: &Query) -> StoreStatus {
        if let Some(status) = self.simulated() {
            return status;
        }
        if attributes.contains_key(&AttributeKey::CLASS)
            || Self::has_read_only(attributes)
            || Self::has_exclusive_pair(attributes)
        {
            return StoreStatus::InvalidParameter;
        }

        let Ok(mut items) = self.items.write() else {
            return LOCK_POISONED;
        };

        let mut updated: Vec<(usize, Query)> = Vec::new();
        for (index, item) in items.iter().enumerate() {
            if !Self::matches(item, identify) {
                continue;
            }
            let mut next = item.clone();
            // Protection is replaced as a whole.
            if attributes.contains_key(&AttributeKey::ACCESS_CONTROL) {
                next.remove(&AttributeKey::ACCESSIBLE);
            }
            if attributes.contains_key(&AttributeKey::ACCESSIBLE) {
                next.remove(&AttributeKey::ACCESS_CONTROL);
            }
            for (key, value) in attributes {
                next.insert(*key, value.clone());
            }
            next.insert(AttributeKey::MODIFICATION_DATE, AttrValue::Date(Utc::now()));
            updated.push((index, next));
        }

        if updated.is_empty() {
            return StoreStatus::NotFound;
        }

        for (index, next) in &updated {
            let Some(class) = next.item_class() else {
                continue;
            };
            let clash = items
                .iter()
                .enumerate()
                .filter(|(other, _)| updated.iter().all(|(i, _)| i != other))
                .any(|(_, item)| Self::collides(class, next, item));
            if clash {
                debug!(target: "keychain_item::store", index, "update would duplicate an item");
                return StoreStatus::DuplicateItem;
            }
        }

        let count = updated.len();
        for (index, next) in updated {
            items[index] = next;
        }
        debug!(target: "keychain_item::store", count, "items updated");
        StoreStatus::Success
    }

    fn delete(&self, identify: &Query) -> StoreStatus {
        if let Some(status) = self.simulated() {
            return status;
        }
        let Ok(mut items) = self.items.write() else {
            return LOCK_POISONED;
        };

        let before = items.len();
        items.retain(|item| !Self::matches(item, identify));
        let removed = before - items.len();

        debug!(target: "keychain_item::store", removed, "items deleted");
        if removed == 0 {
            StoreStatus::NotFound
        } else {
            StoreStatus::Success
        }
    }
}
