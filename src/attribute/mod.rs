//! Attributes - typed slots bound to keychain attribute keys.
//!
//! A keychain item is not addressed by a single key. It is addressed by a
//! combination of classified attributes (service, account, server, access
//! policy, free-form metadata) and carries read-only attributes the store
//! synthesizes itself (creation and modification dates).
//!
//! Each attribute is modelled as an [`AttributeElement<T>`]: a typed value bound
//! to an [`AttributeKey`], optionally read-only, optionally constrained against
//! other keys. Elements are grouped into structs implementing [`AttributeSet`],
//! which is what the query builders walk.
//!
//! ## Example
//!
//! ```ignore
//! use keychain_item::{AttributeElement, AttributeKey, AttributeSet, CommonAttributes};
//!
//! #[derive(AttributeSet)]
//! struct TokenAttributes {
//!     #[element(flatten)]
//!     common: CommonAttributes,
//!     #[element]
//!     service: AttributeElement<String>,
//! }
//! ```

mod access;
mod common;
mod element;
mod value;

use std::fmt;

pub use access::{AccessControl, AccessControlFlags, Accessible, AuthenticationType, Protocol};
pub use common::CommonAttributes;
pub use element::{AttributeElement, AttributeSet, Element};
pub use value::{AttrValue, AttributeValue};

/// Identifier of a keychain attribute as understood by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AttributeKey(&'static str);

impl AttributeKey {
    /// Reserved: item class of the stored item.
    pub const CLASS: AttributeKey = AttributeKey("class");
    /// Reserved: the value blob.
    pub const DATA: AttributeKey = AttributeKey("v_Data");

    pub const SERVICE: AttributeKey = AttributeKey("svce");
    pub const ACCOUNT: AttributeKey = AttributeKey("acct");
    pub const SERVER: AttributeKey = AttributeKey("srvr");
    pub const DESCRIPTION: AttributeKey = AttributeKey("desc");
    pub const COMMENT: AttributeKey = AttributeKey("icmt");
    pub const CREATOR: AttributeKey = AttributeKey("crtr");
    pub const TYPE: AttributeKey = AttributeKey("type");
    pub const LABEL: AttributeKey = AttributeKey("labl");
    pub const IS_INVISIBLE: AttributeKey = AttributeKey("invi");
    pub const IS_NEGATIVE: AttributeKey = AttributeKey("nega");
    pub const ACCESSIBLE: AttributeKey = AttributeKey("pdmn");
    pub const ACCESS_CONTROL: AttributeKey = AttributeKey("accc");
    pub const ACCESS_GROUP: AttributeKey = AttributeKey("agrp");
    pub const SYNCHRONIZABLE: AttributeKey = AttributeKey("sync");
    pub const GENERIC: AttributeKey = AttributeKey("gena");
    pub const SECURITY_DOMAIN: AttributeKey = AttributeKey("sdmn");
    pub const PROTOCOL: AttributeKey = AttributeKey("ptcl");
    pub const AUTHENTICATION_TYPE: AttributeKey = AttributeKey("atyp");
    pub const PORT: AttributeKey = AttributeKey("port");
    pub const PATH: AttributeKey = AttributeKey("path");
    pub const CREATION_DATE: AttributeKey = AttributeKey("cdat");
    pub const MODIFICATION_DATE: AttributeKey = AttributeKey("mdat");

    /// Define a key the crate has no constant for.
    pub const fn custom(raw: &'static str) -> Self {
        AttributeKey(raw)
    }

    /// The raw identifier sent to the store.
    pub const fn as_str(&self) -> &'static str {
        self.0
    }

    /// Whether this key is reserved for the item class or the value blob.
    pub fn is_reserved(&self) -> bool {
        *self == Self::CLASS || *self == Self::DATA
    }
}

impl fmt::Display for AttributeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Presence rule between two attributes the store rejects when both are set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    /// If this element has a value, the other key is removed from the query.
    Override(AttributeKey),
    /// If this element ends up in the query, the other key is removed.
    OverriddenBy(AttributeKey),
}
