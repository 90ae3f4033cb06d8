//! Query composition - turning an item's attribute slots into the attribute
//! dictionaries the store consumes.
//!
//! Every store call takes a [`Query`]: a map from [`AttributeKey`] to
//! [`AttrValue`]. Queries are composed in two steps:
//!
//! 1. [`resolve`] walks the declared elements, keeps the populated writable
//!    ones and drops attributes invalidated by constraints.
//! 2. The builders in this module scope the resolved map for the operation at
//!    hand (insert, identify, update attributes), adding the reserved class
//!    and data keys.

mod builder;
mod identity;
mod resolver;

use std::collections::btree_map::{self, BTreeMap};

use crate::attribute::{AttrValue, AttributeKey};

pub use builder::{identify_query, insert_query, update_attributes_query};
pub use identity::{ItemClass, ItemIdentity};
pub use resolver::resolve;

/// Attribute dictionary sent to or received from the store.
///
/// Ordered by key so composed queries are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    entries: BTreeMap<AttributeKey, AttrValue>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &AttributeKey) -> Option<&AttrValue> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &AttributeKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Insert or replace a value, returning the previous one.
    pub fn insert(&mut self, key: AttributeKey, value: AttrValue) -> Option<AttrValue> {
        self.entries.insert(key, value)
    }

    pub fn remove(&mut self, key: &AttributeKey) -> Option<AttrValue> {
        self.entries.remove(key)
    }

    pub fn retain(&mut self, mut keep: impl FnMut(&AttributeKey, &AttrValue) -> bool) {
        self.entries.retain(|k, v| keep(k, v));
    }

    /// Add entries from `other` whose keys are not present yet. Existing
    /// entries win.
    pub fn merge_missing(&mut self, other: Query) {
        for (key, value) in other.entries {
            self.entries.entry(key).or_insert(value);
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &AttributeKey> {
        self.entries.keys()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, AttributeKey, AttrValue> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The item class tag, if present.
    pub fn item_class(&self) -> Option<ItemClass> {
        self.get(&AttributeKey::CLASS)
            .and_then(AttrValue::as_str)
            .and_then(ItemClass::from_code)
    }

    /// The value blob, if present.
    pub fn data(&self) -> Option<&[u8]> {
        self.get(&AttributeKey::DATA).and_then(AttrValue::as_data)
    }
}

impl FromIterator<(AttributeKey, AttrValue)> for Query {
    fn from_iter<I: IntoIterator<Item = (AttributeKey, AttrValue)>>(iter: I) -> Self {
        Query {
            entries: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Query {
    type Item = (AttributeKey, AttrValue);
    type IntoIter = btree_map::IntoIter<AttributeKey, AttrValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a Query {
    type Item = (&'a AttributeKey, &'a AttrValue);
    type IntoIter = btree_map::Iter<'a, AttributeKey, AttrValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
