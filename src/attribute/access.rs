//! Access policy and internet-password enumerations.
//!
//! These are stored as opaque platform codes. Only the codes are part of the
//! store contract; the enums exist so callers never spell them by hand.

use std::fmt;
use std::ops::BitOr;

use serde::{Deserialize, Serialize};

use super::value::{AttrValue, AttributeValue};

/// When the item's data may be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Accessible {
    WhenPasscodeSetThisDeviceOnly,
    WhenUnlockedThisDeviceOnly,
    WhenUnlocked,
    AfterFirstUnlockThisDeviceOnly,
    AfterFirstUnlock,
}

impl Accessible {
    pub const ALL: [Accessible; 5] = [
        Accessible::WhenPasscodeSetThisDeviceOnly,
        Accessible::WhenUnlockedThisDeviceOnly,
        Accessible::WhenUnlocked,
        Accessible::AfterFirstUnlockThisDeviceOnly,
        Accessible::AfterFirstUnlock,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Accessible::WhenPasscodeSetThisDeviceOnly => "akpu",
            Accessible::WhenUnlockedThisDeviceOnly => "aku",
            Accessible::WhenUnlocked => "ak",
            Accessible::AfterFirstUnlockThisDeviceOnly => "cku",
            Accessible::AfterFirstUnlock => "ck",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.code() == code)
    }
}

impl AttributeValue for Accessible {
    fn to_attr(&self) -> AttrValue {
        AttrValue::String(self.code().to_string())
    }

    fn from_attr(value: &AttrValue) -> Option<Self> {
        value.as_str().and_then(Self::from_code)
    }
}

/// Additional authentication requirements of an access-control object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct AccessControlFlags(u32);

impl AccessControlFlags {
    pub const NONE: AccessControlFlags = AccessControlFlags(0);
    pub const USER_PRESENCE: AccessControlFlags = AccessControlFlags(1 << 0);
    pub const BIOMETRY_ANY: AccessControlFlags = AccessControlFlags(1 << 1);
    pub const BIOMETRY_CURRENT_SET: AccessControlFlags = AccessControlFlags(1 << 3);
    pub const DEVICE_PASSCODE: AccessControlFlags = AccessControlFlags(1 << 4);
    pub const OR: AccessControlFlags = AccessControlFlags(1 << 14);
    pub const AND: AccessControlFlags = AccessControlFlags(1 << 15);
    pub const APPLICATION_PASSWORD: AccessControlFlags = AccessControlFlags(1 << 31);

    pub const fn from_bits(bits: u32) -> Self {
        AccessControlFlags(bits)
    }

    pub const fn bits(&self) -> u32 {
        self.0
    }

    pub const fn contains(&self, other: AccessControlFlags) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for AccessControlFlags {
    type Output = AccessControlFlags;

    fn bitor(self, rhs: Self) -> Self::Output {
        AccessControlFlags(self.0 | rhs.0)
    }
}

/// Access-control object: a protection class plus authentication flags.
///
/// The store rejects a query carrying both an access-control object and a
/// plain [`Accessible`] attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AccessControl {
    pub protection: Accessible,
    pub flags: AccessControlFlags,
}

impl AccessControl {
    pub fn new(protection: Accessible, flags: AccessControlFlags) -> Self {
        Self { protection, flags }
    }
}

impl fmt::Display for AccessControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{};{}", self.protection.code(), self.flags.bits())
    }
}

impl AttributeValue for AccessControl {
    fn to_attr(&self) -> AttrValue {
        AttrValue::String(self.to_string())
    }

    fn from_attr(value: &AttrValue) -> Option<Self> {
        let (code, flags) = value.as_str()?.split_once(';')?;
        Some(AccessControl {
            protection: Accessible::from_code(code)?,
            flags: AccessControlFlags::from_bits(flags.parse().ok()?),
        })
    }
}

macro_rules! four_char_code_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $code:literal),* $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),*
        }

        impl $name {
            pub fn code(&self) -> &'static str {
                match self {
                    $($name::$variant => $code),*
                }
            }

            pub fn from_code(code: &str) -> Option<Self> {
                match code {
                    $($code => Some($name::$variant),)*
                    _ => None,
                }
            }
        }

        impl AttributeValue for $name {
            fn to_attr(&self) -> AttrValue {
                AttrValue::String(self.code().to_string())
            }

            fn from_attr(value: &AttrValue) -> Option<Self> {
                value.as_str().and_then(Self::from_code)
            }
        }
    };
}

four_char_code_enum!(
    /// Network protocol of an internet password.
    Protocol {
        Ftp => "ftp ",
        Ssh => "ssh ",
        Smtp => "smtp",
        Imap => "imap",
        Imaps => "imps",
        Pop3 => "pop3",
        Http => "http",
        Https => "htps",
        Ldap => "ldap",
        Smb => "smb ",
    }
);

four_char_code_enum!(
    /// Authentication scheme of an internet password.
    AuthenticationType {
        Default => "dflt",
        HttpBasic => "http",
        HttpDigest => "httd",
        HtmlForm => "form",
        Ntlm => "ntlm",
        Msn => "msna",
    }
);
