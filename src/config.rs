//! Item defaults loaded from configuration.
//!
//! ```json
//! {
//!   "policy": "on_access",
//!   "accessible": "after_first_unlock",
//!   "access_group": "TEAMID.shared",
//!   "synchronizable": false,
//!   "label": "My App"
//! }
//! ```
//!
//! Every field is optional. Items are built against an explicitly passed
//! store; there is no process-wide default store.

use serde::{Deserialize, Serialize};

use crate::attribute::{Accessible, CommonAttributes};
use crate::codec::ItemValue;
use crate::error::KeychainError;
use crate::item::{
    CredentialItem, GenericPassword, GenericPasswordAttributes, InternetPassword,
    InternetPasswordAttributes, SyncPolicy,
};
use crate::store::SecureStore;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeychainConfig {
    pub policy: SyncPolicy,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accessible: Option<Accessible>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub synchronizable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Default for KeychainConfig {
    fn default() -> Self {
        Self {
            policy: SyncPolicy::OnAccess,
            accessible: None,
            access_group: None,
            synchronizable: None,
            label: None,
        }
    }
}

impl KeychainConfig {
    pub fn from_json(json: &str) -> Result<Self, KeychainError> {
        serde_json::from_str(json).map_err(|e| KeychainError::Config(e.to_string()))
    }

    /// Copy the configured defaults into an attribute set. Unset fields leave
    /// the slots alone.
    pub fn apply(&self, common: &mut CommonAttributes) {
        if let Some(accessible) = self.accessible {
            common.accessible.set(Some(accessible));
        }
        if let Some(group) = &self.access_group {
            common.access_group.set(Some(group.clone()));
        }
        if let Some(sync) = self.synchronizable {
            common.synchronizable.set(Some(sync));
        }
        if let Some(label) = &self.label {
            common.label.set(Some(label.clone()));
        }
    }

    pub fn generic_password<T, S>(
        &self,
        store: S,
        service: impl Into<String>,
    ) -> Result<GenericPassword<T, S>, KeychainError>
    where
        T: ItemValue + Clone,
        S: SecureStore,
    {
        let mut attributes = GenericPasswordAttributes::new(service);
        self.apply(&mut attributes.common);
        CredentialItem::with_identity(store, GenericPasswordAttributes::identity(), attributes, self.policy)
    }

    pub fn internet_password<T, S>(
        &self,
        store: S,
        server: impl Into<String>,
    ) -> Result<InternetPassword<T, S>, KeychainError>
    where
        T: ItemValue + Clone,
        S: SecureStore,
    {
        let mut attributes = InternetPasswordAttributes::new(server);
        self.apply(&mut attributes.common);
        CredentialItem::with_identity(store, InternetPasswordAttributes::identity(), attributes, self.policy)
    }
}
