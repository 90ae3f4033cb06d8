use crate::attribute::{AttributeElement, AttributeKey, CommonAttributes};
use crate::codec::ItemValue;
use crate::error::KeychainError;
use crate::query::{ItemClass, ItemIdentity};
use crate::store::SecureStore;
use crate::AttributeSet;

use super::{CredentialItem, SyncPolicy};

/// Attribute slots of a generic password item, addressed by service.
#[derive(Debug, Clone, AttributeSet)]
pub struct GenericPasswordAttributes {
    #[element(flatten)]
    pub common: CommonAttributes,
    #[element]
    pub service: AttributeElement<String>,
    #[element]
    pub account: AttributeElement<String>,
    /// Free-form application data stored beside the secret.
    #[element]
    pub generic: AttributeElement<Vec<u8>>,
}

impl GenericPasswordAttributes {
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            common: CommonAttributes::new(),
            service: AttributeElement::new(AttributeKey::SERVICE).with_value(service.into()),
            account: AttributeElement::new(AttributeKey::ACCOUNT),
            generic: AttributeElement::new(AttributeKey::GENERIC),
        }
    }

    pub fn identity() -> ItemIdentity {
        ItemIdentity::new(ItemClass::GenericPassword, [AttributeKey::SERVICE])
    }
}

pub type GenericPassword<T, S> = CredentialItem<T, GenericPasswordAttributes, S>;

impl<T, S> CredentialItem<T, GenericPasswordAttributes, S>
where
    T: ItemValue + Clone,
    S: SecureStore,
{
    pub fn new(store: S, service: impl Into<String>, policy: SyncPolicy) -> Result<Self, KeychainError> {
        Self::with_identity(
            store,
            GenericPasswordAttributes::identity(),
            GenericPasswordAttributes::new(service),
            policy,
        )
    }
}
