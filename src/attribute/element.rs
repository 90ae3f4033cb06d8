use super::value::{AttrValue, AttributeValue};
use super::{AttributeKey, Constraint};

/// Type-erased view of an attribute slot, used when composing queries and
/// when configuring slots from a fetch response.
pub trait Element {
    fn key(&self) -> AttributeKey;

    fn is_read_only(&self) -> bool;

    fn constraints(&self) -> &[Constraint];

    /// Current value in store form, `None` when the slot is empty.
    fn attr_value(&self) -> Option<AttrValue>;

    /// Overwrite the slot from a store response. A missing or mistyped
    /// value empties the slot.
    fn configure(&mut self, value: Option<&AttrValue>);
}

/// A typed, named slot bound to one keychain attribute.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeElement<T> {
    key: AttributeKey,
    value: Option<T>,
    read_only: bool,
    constraints: Vec<Constraint>,
}

impl<T> AttributeElement<T> {
    /// A writable slot without constraints.
    pub fn new(key: AttributeKey) -> Self {
        Self::with_constraints(key, Vec::new())
    }

    /// A writable slot that takes part in constraint resolution.
    pub fn with_constraints(key: AttributeKey, constraints: Vec<Constraint>) -> Self {
        Self {
            key,
            value: None,
            read_only: false,
            constraints,
        }
    }

    /// A slot synthesized by the store. Never written to outgoing queries.
    pub fn read_only(key: AttributeKey) -> Self {
        Self {
            key,
            value: None,
            read_only: true,
            constraints: Vec::new(),
        }
    }

    /// Builder-style initial value.
    pub fn with_value(mut self, value: T) -> Self {
        self.value = Some(value);
        self
    }

    pub fn get(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn set(&mut self, value: Option<T>) {
        self.value = value;
    }

    pub fn clear(&mut self) {
        self.value = None;
    }

    pub fn is_set(&self) -> bool {
        self.value.is_some()
    }
}

impl<T: AttributeValue> Element for AttributeElement<T> {
    fn key(&self) -> AttributeKey {
        self.key
    }

    fn is_read_only(&self) -> bool {
        self.read_only
    }

    fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    fn attr_value(&self) -> Option<AttrValue> {
        self.value.as_ref().map(AttributeValue::to_attr)
    }

    fn configure(&mut self, value: Option<&AttrValue>) {
        self.value = value.and_then(T::from_attr);
    }
}

/// Statically declared registry of the attribute slots of an item kind.
///
/// Elements are returned in declaration order; nested sets are expanded in
/// place. Usually derived with `#[derive(AttributeSet)]`.
pub trait AttributeSet {
    fn elements(&self) -> Vec<&dyn Element>;

    fn elements_mut(&mut self) -> Vec<&mut dyn Element>;

    /// Keys of every declared element, in declaration order.
    fn declared_keys(&self) -> Vec<AttributeKey> {
        self.elements().iter().map(|e| e.key()).collect()
    }
}
