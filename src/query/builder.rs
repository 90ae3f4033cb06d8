use crate::attribute::{AttrValue, AttributeKey, AttributeSet};

use super::{resolve, ItemIdentity, Query};

/// Query for adding a new item: every resolved attribute, the class and the
/// data blob.
pub fn insert_query(identity: &ItemIdentity, attributes: &dyn AttributeSet, data: Vec<u8>) -> Query {
    let mut query = resolve(attributes.elements());
    query.merge_missing(
        [
            (AttributeKey::CLASS, identity.item_class().to_attr()),
            (AttributeKey::DATA, AttrValue::Data(data)),
        ]
        .into_iter()
        .collect(),
    );
    query
}

/// Query scoping an operation to one logical item: the resolved primary-key
/// attributes plus the class. Used for fetch, update and delete.
pub fn identify_query(identity: &ItemIdentity, attributes: &dyn AttributeSet) -> Query {
    let mut query = resolve(attributes.elements());
    query.retain(|key, _| identity.is_primary(key));
    query.insert(AttributeKey::CLASS, identity.item_class().to_attr());
    query
}

/// Attributes to write on update: everything resolved plus the data blob,
/// minus whatever already identifies the item.
pub fn update_attributes_query(
    identity: &ItemIdentity,
    attributes: &dyn AttributeSet,
    data: Vec<u8>,
) -> Query {
    let identify = identify_query(identity, attributes);
    let mut query = resolve(attributes.elements());
    query.merge_missing([(AttributeKey::DATA, AttrValue::Data(data))].into_iter().collect());
    query.retain(|key, _| !identify.contains_key(key));
    query
}
