use std::sync::{Arc, Mutex};

use keychain_item::{InMemorySecureStore, MatchRequest, MatchResult, Query, SecureStore, StoreStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Call {
    Add,
    CopyMatching,
    Update,
    Delete,
}

/// Forwards to an in-memory store and records which operations were issued.
#[derive(Clone, Default)]
pub struct RecordingStore {
    pub inner: InMemorySecureStore,
    calls: Arc<Mutex<Vec<Call>>>,
}

impl RecordingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

impl SecureStore for RecordingStore {
    fn add(&self, attributes: &Query) -> StoreStatus {
        self.record(Call::Add);
        self.inner.add(attributes)
    }

    fn copy_matching(&self, query: &Query, request: MatchRequest) -> (StoreStatus, Option<MatchResult>) {
        self.record(Call::CopyMatching);
        self.inner.copy_matching(query, request)
    }

    fn update(&self, identify: &Query, attributes: &Query) -> StoreStatus {
        self.record(Call::Update);
        self.inner.update(identify, attributes)
    }

    fn delete(&self, identify: &Query) -> StoreStatus {
        self.record(Call::Delete);
        self.inner.delete(identify)
    }
}

/// Answers every fetch with success but a result of the wrong shape.
pub struct MalformedStore {
    pub response: Option<MatchResult>,
}

impl SecureStore for MalformedStore {
    fn add(&self, _attributes: &Query) -> StoreStatus {
        StoreStatus::Success
    }

    fn copy_matching(&self, _query: &Query, _request: MatchRequest) -> (StoreStatus, Option<MatchResult>) {
        (StoreStatus::Success, self.response.clone())
    }

    fn update(&self, _identify: &Query, _attributes: &Query) -> StoreStatus {
        StoreStatus::Success
    }

    fn delete(&self, _identify: &Query) -> StoreStatus {
        StoreStatus::Success
    }
}
