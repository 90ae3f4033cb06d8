//! SecureStore - the boundary to the platform attributed store.
//!
//! The platform keychain is an external service: it adds, copies, updates and
//! deletes items addressed by attribute dictionaries and answers with a status
//! code. This module defines that boundary as a trait so items can be backed by
//! the platform, by a remote vault, or by [`InMemorySecureStore`] in tests.
//!
//! Calls are blocking. Implementations must be shareable across threads; they
//! decide themselves how conflicting writes are serialized.

mod in_memory;
mod status;

pub use in_memory::InMemorySecureStore;
pub use status::StoreStatus;

use crate::query::Query;

/// How many matches a copy should return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchLimit {
    One,
    All,
}

/// What a copy should return for each match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchRequest {
    pub return_attributes: bool,
    pub return_data: bool,
    pub limit: MatchLimit,
}

impl MatchRequest {
    /// Attributes and data of a single item, as used by `load`.
    pub fn single_item() -> Self {
        Self {
            return_attributes: true,
            return_data: true,
            limit: MatchLimit::One,
        }
    }
}

/// Copied matches.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchResult {
    One(Query),
    All(Vec<Query>),
}

/// Abstract attributed secure store.
///
/// The value blob travels under [`AttributeKey::DATA`](crate::AttributeKey::DATA),
/// the class under [`AttributeKey::CLASS`](crate::AttributeKey::CLASS).
pub trait SecureStore: Send + Sync {
    /// Add a new item. `DuplicateItem` if one already exists.
    fn add(&self, attributes: &Query) -> StoreStatus;

    /// Copy items matching every attribute of the query.
    fn copy_matching(&self, query: &Query, request: MatchRequest) -> (StoreStatus, Option<MatchResult>);

    /// Overwrite attributes of the items matching `identify`.
    fn update(&self, identify: &Query, attributes: &Query) -> StoreStatus;

    /// Delete the items matching `identify`. `NotFound` if there were none.
    fn delete(&self, identify: &Query) -> StoreStatus;
}

impl<S: SecureStore + ?Sized> SecureStore for &S {
    fn add(&self, attributes: &Query) -> StoreStatus {
        (**self).add(attributes)
    }

    fn copy_matching(&self, query: &Query, request: MatchRequest) -> (StoreStatus, Option<MatchResult>) {
        (**self).copy_matching(query, request)
    }

    fn update(&self, identify: &Query, attributes: &Query) -> StoreStatus {
        (**self).update(identify, attributes)
    }

    fn delete(&self, identify: &Query) -> StoreStatus {
        (**self).delete(identify)
    }
}

impl<S: SecureStore + ?Sized> SecureStore for std::sync::Arc<S> {
    fn add(&self, attributes: &Query) -> StoreStatus {
        (**self).add(attributes)
    }

    fn copy_matching(&self, query: &Query, request: MatchRequest) -> (StoreStatus, Option<MatchResult>) {
        (**self).copy_matching(query, request)
    }

    fn update(&self, identify: &Query, attributes: &Query) -> StoreStatus {
        (**self).update(identify, attributes)
    }

    fn delete(&self, identify: &Query) -> StoreStatus {
        (**self).delete(identify)
    }
}
