use keychain_item::{
    insert_query, resolve, AttrValue, AttributeElement, AttributeKey, AttributeSet, CommonAttributes,
    Constraint, CredentialItem, Element, InMemorySecureStore, ItemClass, ItemIdentity, KeychainError,
    SyncPolicy,
};

const TENANT: AttributeKey = AttributeKey::custom("tnnt");

#[derive(AttributeSet)]
struct TenantAttributes {
    #[element(flatten)]
    common: CommonAttributes,
    #[element]
    service: AttributeElement<String>,
    #[element]
    tenant: AttributeElement<String>,
    #[element]
    legacy_label: AttributeElement<String>,
    // Not an attribute.
    #[allow(dead_code)]
    note: String,
}

impl TenantAttributes {
    fn new(service: &str) -> Self {
        Self {
            common: CommonAttributes::new(),
            service: AttributeElement::new(AttributeKey::SERVICE).with_value(service.to_string()),
            tenant: AttributeElement::new(TENANT),
            legacy_label: AttributeElement::new(AttributeKey::LABEL),
            note: String::new(),
        }
    }
}

#[derive(AttributeSet)]
struct Wrapper<A: AttributeSet> {
    #[element(flatten)]
    inner: A,
    #[element]
    account: AttributeElement<String>,
}

#[test]
fn derive_walks_fields_in_declaration_order() {
    let attrs = TenantAttributes::new("svc");
    let keys = attrs.declared_keys();
    assert_eq!(keys.len(), 16);
    assert_eq!(keys[0], AttributeKey::DESCRIPTION);
    assert_eq!(&keys[13..], &[AttributeKey::SERVICE, TENANT, AttributeKey::LABEL]);
}

#[test]
fn flattened_label_wins_over_later_duplicate() {
    let mut attrs = TenantAttributes::new("svc");
    attrs.common.label.set(Some("first".into()));
    attrs.legacy_label.set(Some("second".into()));

    let query = resolve(attrs.elements());
    assert_eq!(query.get(&AttributeKey::LABEL), Some(&AttrValue::String("first".into())));
}

#[test]
fn elements_mut_reaches_nested_slots() {
    let mut attrs = TenantAttributes::new("svc");
    for element in attrs.elements_mut() {
        if element.key() == TENANT {
            element.configure(Some(&AttrValue::String("acme".into())));
        }
    }
    assert_eq!(attrs.tenant.get().map(String::as_str), Some("acme"));
}

#[test]
fn generic_sets_can_be_wrapped() {
    let mut wrapper = Wrapper {
        inner: TenantAttributes::new("svc"),
        account: AttributeElement::new(AttributeKey::ACCOUNT),
    };
    wrapper.account.set(Some("bob".into()));

    let identity = ItemIdentity::new(ItemClass::GenericPassword, [AttributeKey::SERVICE]);
    let query = insert_query(&identity, &wrapper, b"pw".to_vec());
    assert_eq!(query.get(&AttributeKey::ACCOUNT), Some(&AttrValue::String("bob".into())));
    assert_eq!(query.get(&AttributeKey::SERVICE), Some(&AttrValue::String("svc".into())));
    assert_eq!(wrapper.declared_keys().len(), 17);
}

#[test]
fn custom_constraints_take_part_in_resolution() {
    struct Pair {
        primary: AttributeElement<String>,
        fallback: AttributeElement<String>,
    }

    impl AttributeSet for Pair {
        fn elements(&self) -> Vec<&dyn Element> {
            vec![&self.fallback as &dyn Element, &self.primary]
        }

        fn elements_mut(&mut self) -> Vec<&mut dyn Element> {
            vec![&mut self.fallback as &mut dyn Element, &mut self.primary]
        }
    }

    let primary = AttributeKey::custom("prim");
    let fallback = AttributeKey::custom("fall");
    let pair = Pair {
        primary: AttributeElement::with_constraints(primary, vec![Constraint::Override(fallback)])
            .with_value("p".into()),
        fallback: AttributeElement::new(fallback).with_value("f".into()),
    };

    let query = resolve(pair.elements());
    assert!(query.contains_key(&primary));
    assert!(!query.contains_key(&fallback));
}

#[test]
fn custom_set_drives_an_item() {
    let store = InMemorySecureStore::new();
    let identity = ItemIdentity::new(ItemClass::GenericPassword, [AttributeKey::SERVICE, TENANT]);

    let mut attrs = TenantAttributes::new("svc");
    attrs.tenant.set(Some("acme".into()));
    let mut item: CredentialItem<String, _, _> =
        CredentialItem::with_identity(store.clone(), identity.clone(), attrs, SyncPolicy::Manual).unwrap();
    item.set(Some("secret".into())).unwrap();
    item.save().unwrap();

    let mut other_tenant = TenantAttributes::new("svc");
    other_tenant.tenant.set(Some("globex".into()));
    let mut other: CredentialItem<String, _, _> =
        CredentialItem::with_identity(store.clone(), identity, other_tenant, SyncPolicy::Manual).unwrap();
    assert_eq!(other.load().unwrap(), None);
}

#[test]
fn undeclared_primary_key_is_an_error() {
    let identity = ItemIdentity::new(ItemClass::InternetPassword, [AttributeKey::SERVER]);
    let result = CredentialItem::<String, _, _>::with_identity(
        InMemorySecureStore::new(),
        identity,
        TenantAttributes::new("svc"),
        SyncPolicy::Manual,
    );
    assert_eq!(
        result.err(),
        Some(KeychainError::InvalidIdentity {
            class: ItemClass::InternetPassword,
            key: AttributeKey::SERVER,
        })
    );
}
