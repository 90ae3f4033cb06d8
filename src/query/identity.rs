use std::collections::BTreeSet;
use std::fmt;

use crate::attribute::{AttrValue, AttributeKey, AttributeSet};
use crate::error::KeychainError;

/// Item category, sent under the reserved class key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemClass {
    GenericPassword,
    InternetPassword,
}

impl ItemClass {
    pub fn code(&self) -> &'static str {
        match self {
            ItemClass::GenericPassword => "genp",
            ItemClass::InternetPassword => "inet",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "genp" => Some(ItemClass::GenericPassword),
            "inet" => Some(ItemClass::InternetPassword),
            _ => None,
        }
    }

    pub fn to_attr(&self) -> AttrValue {
        AttrValue::String(self.code().to_string())
    }

    /// Attributes the platform uses to decide whether two items of this class
    /// collide on insert.
    pub fn uniqueness_keys(&self) -> &'static [AttributeKey] {
        match self {
            ItemClass::GenericPassword => &[
                AttributeKey::ACCOUNT,
                AttributeKey::SERVICE,
                AttributeKey::ACCESS_GROUP,
                AttributeKey::SYNCHRONIZABLE,
            ],
            ItemClass::InternetPassword => &[
                AttributeKey::ACCOUNT,
                AttributeKey::SECURITY_DOMAIN,
                AttributeKey::SERVER,
                AttributeKey::PROTOCOL,
                AttributeKey::AUTHENTICATION_TYPE,
                AttributeKey::PORT,
                AttributeKey::PATH,
                AttributeKey::ACCESS_GROUP,
                AttributeKey::SYNCHRONIZABLE,
            ],
        }
    }
}

impl fmt::Display for ItemClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Which store class an item lives in, and which of its attributes scope
/// fetch/update/delete to one logical item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemIdentity {
    item_class: ItemClass,
    primary_key: BTreeSet<AttributeKey>,
}

impl ItemIdentity {
    pub fn new(item_class: ItemClass, primary_key: impl IntoIterator<Item = AttributeKey>) -> Self {
        Self {
            item_class,
            primary_key: primary_key.into_iter().collect(),
        }
    }

    pub fn item_class(&self) -> ItemClass {
        self.item_class
    }

    pub fn primary_key(&self) -> &BTreeSet<AttributeKey> {
        &self.primary_key
    }

    pub fn is_primary(&self, key: &AttributeKey) -> bool {
        self.primary_key.contains(key)
    }

    /// Check that every primary-key attribute is declared by the set.
    pub fn validate(&self, attributes: &dyn AttributeSet) -> Result<(), KeychainError> {
        let declared = attributes.declared_keys();
        match self.primary_key.iter().find(|key| !declared.contains(key)) {
            Some(missing) => Err(KeychainError::InvalidIdentity {
                class: self.item_class,
                key: *missing,
            }),
            None => Ok(()),
        }
    }
}
