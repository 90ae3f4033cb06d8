use crate::attribute::{AttributeElement, AttributeKey, AuthenticationType, CommonAttributes, Protocol};
use crate::codec::ItemValue;
use crate::error::KeychainError;
use crate::query::{ItemClass, ItemIdentity};
use crate::store::SecureStore;
use crate::AttributeSet;

use super::{CredentialItem, SyncPolicy};

/// Attribute slots of an internet password item, addressed by server.
#[derive(Debug, Clone, AttributeSet)]
pub struct InternetPasswordAttributes {
    #[element(flatten)]
    pub common: CommonAttributes,
    #[element]
    pub server: AttributeElement<String>,
    #[element]
    pub account: AttributeElement<String>,
    #[element]
    pub security_domain: AttributeElement<String>,
    #[element]
    pub protocol: AttributeElement<Protocol>,
    #[element]
    pub authentication_type: AttributeElement<AuthenticationType>,
    #[element]
    pub port: AttributeElement<u16>,
    #[element]
    pub path: AttributeElement<String>,
}

impl InternetPasswordAttributes {
    pub fn new(server: impl Into<String>) -> Self {
        Self {
            common: CommonAttributes::new(),
            server: AttributeElement::new(AttributeKey::SERVER).with_value(server.into()),
            account: AttributeElement::new(AttributeKey::ACCOUNT),
            security_domain: AttributeElement::new(AttributeKey::SECURITY_DOMAIN),
            protocol: AttributeElement::new(AttributeKey::PROTOCOL),
            authentication_type: AttributeElement::new(AttributeKey::AUTHENTICATION_TYPE),
            port: AttributeElement::new(AttributeKey::PORT),
            path: AttributeElement::new(AttributeKey::PATH),
        }
    }

    pub fn identity() -> ItemIdentity {
        ItemIdentity::new(ItemClass::InternetPassword, [AttributeKey::SERVER])
    }
}

pub type InternetPassword<T, S> = CredentialItem<T, InternetPasswordAttributes, S>;

impl<T, S> CredentialItem<T, InternetPasswordAttributes, S>
where
    T: ItemValue + Clone,
    S: SecureStore,
{
    pub fn new(store: S, server: impl Into<String>, policy: SyncPolicy) -> Result<Self, KeychainError> {
        Self::with_identity(
            store,
            InternetPasswordAttributes::identity(),
            InternetPasswordAttributes::new(server),
            policy,
        )
    }
}
