mod support;

use std::thread;

use keychain_item::{
    AccessControl, AccessControlFlags, Accessible, AttrValue, AttributeKey, DecodeError,
    GenericPassword, InMemorySecureStore, InternetPassword, ItemState, KeychainError, MatchResult,
    Query, StoreStatus, Structured, SyncPolicy,
};
use serde::{Deserialize, Serialize};
use support::{Call, MalformedStore, RecordingStore};

fn generic<T: keychain_item::ItemValue + Clone>(
    store: &InMemorySecureStore,
    service: &str,
) -> GenericPassword<T, InMemorySecureStore> {
    GenericPassword::new(store.clone(), service, SyncPolicy::Manual).unwrap()
}

#[test]
fn two_instances_converge_through_the_store() {
    let store = InMemorySecureStore::new();
    let mut first = generic::<i64>(&store, "x");
    let mut second = generic::<i64>(&store, "x");

    assert_eq!(first.load().unwrap(), None);
    assert_eq!(first.state(), ItemState::Empty);

    first.set(Some(42)).unwrap();
    first.save().unwrap();
    assert_eq!(second.load().unwrap(), Some(&42));

    // Second save on the same identity goes through the update path.
    first.set(Some(99)).unwrap();
    first.save().unwrap();
    assert_eq!(store.len(), 1);

    assert_eq!(second.load().unwrap(), Some(&99));
    assert_eq!(second.state(), ItemState::CachedSynced);
}

#[test]
fn existing_item_is_updated_after_insert_collides() {
    let store = RecordingStore::new();
    let mut item: GenericPassword<String, _> =
        GenericPassword::new(store.clone(), "api", SyncPolicy::Manual).unwrap();

    item.set(Some("one".into())).unwrap();
    item.save().unwrap();
    assert_eq!(store.calls(), vec![Call::Add]);

    store.clear_calls();
    item.set(Some("two".into())).unwrap();
    item.save().unwrap();
    assert_eq!(store.calls(), vec![Call::Add, Call::Update]);

    let mut reader: GenericPassword<String, _> =
        GenericPassword::new(store.inner.clone(), "api", SyncPolicy::Manual).unwrap();
    assert_eq!(reader.load().unwrap().map(String::as_str), Some("two"));
}

#[test]
fn delete_is_idempotent() {
    let store = InMemorySecureStore::new();
    let mut item = generic::<i64>(&store, "svc");
    item.set(Some(1)).unwrap();
    item.save().unwrap();

    item.delete().unwrap();
    item.delete().unwrap();
    assert_eq!(item.state(), ItemState::Empty);
    assert!(store.is_empty());

    let mut never_saved = generic::<i64>(&store, "other");
    never_saved.delete().unwrap();
}

#[test]
fn delete_resets_everything_but_the_primary_key() {
    let store = InMemorySecureStore::new();
    let mut item = generic::<i64>(&store, "svc");
    item.update_attributes(|a| {
        a.account.set(Some("alice".into()));
        a.common.label.set(Some("Label".into()));
    })
    .unwrap();
    item.set(Some(5)).unwrap();
    item.save().unwrap();
    item.load().unwrap();
    assert!(item.attributes().common.creation_date().is_some());

    item.delete().unwrap();
    let attrs = item.attributes();
    assert_eq!(attrs.service.get().map(String::as_str), Some("svc"));
    assert!(attrs.account.get().is_none());
    assert!(attrs.common.label.get().is_none());
    assert!(attrs.common.creation_date().is_none());
    assert_eq!(item.value(), None);
}

#[test]
fn load_of_missing_item_resets_non_key_attributes() {
    let store = InMemorySecureStore::new();
    let mut item = generic::<i64>(&store, "svc");
    item.update_attributes(|a| a.common.comment.set(Some("stale".into())))
        .unwrap();

    assert_eq!(item.load().unwrap(), None);
    assert!(item.attributes().common.comment.get().is_none());
    assert_eq!(item.attributes().service.get().map(String::as_str), Some("svc"));
    assert!(item.is_synced());
}

#[test]
fn load_populates_store_timestamps() {
    let store = InMemorySecureStore::new();
    let mut item = generic::<i64>(&store, "svc");
    item.set(Some(1)).unwrap();
    item.save().unwrap();
    assert!(item.attributes().common.creation_date().is_none());

    item.load().unwrap();
    let created = *item.attributes().common.creation_date().unwrap();
    let modified = *item.attributes().common.modification_date().unwrap();
    assert!(modified >= created);

    item.set(Some(2)).unwrap();
    item.save().unwrap();
    item.load().unwrap();
    assert_eq!(item.attributes().common.creation_date(), Some(&created));
    assert!(*item.attributes().common.modification_date().unwrap() >= modified);
}

fn biometric() -> AccessControl {
    AccessControl::new(
        Accessible::WhenPasscodeSetThisDeviceOnly,
        AccessControlFlags::BIOMETRY_ANY | AccessControlFlags::OR | AccessControlFlags::DEVICE_PASSCODE,
    )
}

#[test]
fn access_control_alone_is_stored() {
    let store = InMemorySecureStore::new();
    let mut item = generic::<String>(&store, "bio");
    item.update_attributes(|a| a.common.access_control.set(Some(biometric())))
        .unwrap();
    item.set(Some("secret".into())).unwrap();
    item.save().unwrap();

    item.load().unwrap();
    let attrs = item.attributes();
    assert!(attrs.common.accessible.get().is_none());
    let access = attrs.common.access_control.get().unwrap();
    assert_eq!(access.protection, Accessible::WhenPasscodeSetThisDeviceOnly);
    assert!(access.flags.contains(AccessControlFlags::BIOMETRY_ANY));
}

#[test]
fn accessible_and_access_control_together_store_neither() {
    let store = InMemorySecureStore::new();
    let mut item = generic::<String>(&store, "both");
    item.update_attributes(|a| {
        a.common.accessible.set(Some(Accessible::AfterFirstUnlock));
        a.common.access_control.set(Some(biometric()));
    })
    .unwrap();
    item.set(Some("secret".into())).unwrap();
    item.save().unwrap();

    let mut reader = generic::<String>(&store, "both");
    assert_eq!(reader.load().unwrap().map(String::as_str), Some("secret"));
    assert!(reader.attributes().common.accessible.get().is_none());
    assert!(reader.attributes().common.access_control.get().is_none());
}

#[test]
fn failed_on_access_write_is_reported_unsynced() {
    let store = InMemorySecureStore::new();
    let mut item: GenericPassword<i64, _> =
        GenericPassword::new(store.clone(), "svc", SyncPolicy::OnAccess).unwrap();
    item.set(Some(1)).unwrap();
    assert_eq!(item.state(), ItemState::CachedSynced);

    store.set_simulated_status(Some(StoreStatus::DiskFull));
    assert_eq!(item.set(Some(5)), Err(KeychainError::Store(StoreStatus::DiskFull)));
    assert_eq!(item.state(), ItemState::CachedUnsynced);
    assert!(!item.is_synced());

    assert_eq!(
        item.update_attributes(|a| a.common.label.set(Some("L".into()))),
        Err(KeychainError::Store(StoreStatus::DiskFull))
    );
    assert_eq!(item.state(), ItemState::CachedUnsynced);

    store.set_simulated_status(None);
    item.save().unwrap();
    assert_eq!(item.state(), ItemState::CachedSynced);
}

#[test]
fn on_access_reads_see_other_writers() {
    let store = InMemorySecureStore::new();
    let mut writer: GenericPassword<i64, _> =
        GenericPassword::new(store.clone(), "svc", SyncPolicy::OnAccess).unwrap();
    let mut reader: GenericPassword<i64, _> =
        GenericPassword::new(store.clone(), "svc", SyncPolicy::OnAccess).unwrap();

    writer.set(Some(10)).unwrap();
    assert_eq!(reader.get().unwrap(), Some(10));
    writer.set(Some(11)).unwrap();
    assert_eq!(reader.get().unwrap(), Some(11));
    writer.set(None).unwrap();
    assert_eq!(reader.get().unwrap(), None);
}

#[test]
fn store_errors_surface_and_keep_local_state() {
    let store = InMemorySecureStore::new();
    let mut item = generic::<i64>(&store, "svc");
    item.set(Some(3)).unwrap();

    store.set_simulated_status(Some(StoreStatus::DiskFull));
    assert_eq!(item.save(), Err(KeychainError::Store(StoreStatus::DiskFull)));
    assert_eq!(item.state(), ItemState::CachedUnsynced);
    assert_eq!(item.delete(), Err(KeychainError::Store(StoreStatus::DiskFull)));
    assert_eq!(item.value(), Some(&3));

    store.set_simulated_status(None);
    item.save().unwrap();
    assert_eq!(item.state(), ItemState::CachedSynced);
}

#[test]
fn undecodable_blob_leaves_cache_empty_and_attributes_untouched() {
    let store = InMemorySecureStore::new();
    let mut text = generic::<String>(&store, "svc");
    text.update_attributes(|a| a.common.label.set(Some("stored".into())))
        .unwrap();
    text.set(Some("abc".into())).unwrap();
    text.save().unwrap();

    let mut number = generic::<i64>(&store, "svc");
    number
        .update_attributes(|a| a.common.label.set(Some("local".into())))
        .unwrap();
    number.set(Some(1)).unwrap();

    assert_eq!(
        number.load().unwrap_err(),
        KeychainError::Decode(DecodeError::InvalidEncoding)
    );
    assert_eq!(number.value(), None);
    assert_eq!(number.attributes().common.label.get().map(String::as_str), Some("local"));
}

#[test]
fn malformed_fetch_response_is_unexpected_format() {
    let mut no_result: GenericPassword<i64, _> =
        GenericPassword::new(MalformedStore { response: None }, "svc", SyncPolicy::Manual).unwrap();
    assert_eq!(no_result.load().unwrap_err(), KeychainError::UnexpectedFormat);

    let without_data: Query = [(AttributeKey::SERVICE, AttrValue::String("svc".into()))]
        .into_iter()
        .collect();
    let mut no_data: GenericPassword<i64, _> = GenericPassword::new(
        MalformedStore {
            response: Some(MatchResult::One(without_data.clone())),
        },
        "svc",
        SyncPolicy::Manual,
    )
    .unwrap();
    assert_eq!(no_data.load().unwrap_err(), KeychainError::UnexpectedFormat);

    let mut many: GenericPassword<i64, _> = GenericPassword::new(
        MalformedStore {
            response: Some(MatchResult::All(vec![without_data])),
        },
        "svc",
        SyncPolicy::Manual,
    )
    .unwrap();
    assert_eq!(many.load().unwrap_err(), KeychainError::UnexpectedFormat);
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct OAuthToken {
    access: String,
    refresh: String,
    expires_in: u32,
}

#[test]
fn structured_values_round_trip() {
    let store = InMemorySecureStore::new();
    let token = OAuthToken {
        access: "a".into(),
        refresh: "r".into(),
        expires_in: 3600,
    };

    let mut item = generic::<Structured<OAuthToken>>(&store, "oauth");
    item.set(Some(Structured(token.clone()))).unwrap();
    item.save().unwrap();

    let mut other = generic::<Structured<OAuthToken>>(&store, "oauth");
    let loaded = other.load().unwrap().cloned().unwrap();
    assert_eq!(loaded.into_inner(), token);
}

#[test]
fn generic_and_internet_items_do_not_collide() {
    let store = InMemorySecureStore::new();
    let mut generic_item = generic::<String>(&store, "example.com");
    let mut internet_item: InternetPassword<String, _> =
        InternetPassword::new(store.clone(), "example.com", SyncPolicy::Manual).unwrap();

    generic_item.set(Some("g".into())).unwrap();
    generic_item.save().unwrap();
    internet_item.set(Some("i".into())).unwrap();
    internet_item.save().unwrap();
    assert_eq!(store.len(), 2);

    internet_item.delete().unwrap();
    assert_eq!(generic_item.load().unwrap().map(String::as_str), Some("g"));
}

#[test]
fn store_is_shared_across_threads() {
    let store = InMemorySecureStore::new();
    let writer_store = store.clone();

    thread::spawn(move || {
        let mut item: GenericPassword<u64, _> =
            GenericPassword::new(writer_store, "threaded", SyncPolicy::OnAccess).unwrap();
        item.set(Some(7)).unwrap();
    })
    .join()
    .unwrap();

    let mut item = generic::<u64>(&store, "threaded");
    assert_eq!(item.load().unwrap(), Some(&7));
}
