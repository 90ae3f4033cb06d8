use chrono::{DateTime, Utc};

use super::access::{AccessControl, Accessible};
use super::element::AttributeElement;
use super::{AttributeKey, Constraint};
use crate::AttributeSet;

/// Attributes shared by every password item kind.
///
/// Once an attribute is stored, setting it back to `None` and saving does not
/// remove it from the store; delete the item to reset it.
#[derive(Debug, Clone, AttributeSet)]
pub struct CommonAttributes {
    /// User-visible description.
    #[element]
    pub description: AttributeElement<String>,
    /// User-editable comment.
    #[element]
    pub comment: AttributeElement<String>,
    /// Creator four-char code.
    #[element]
    pub creator: AttributeElement<u32>,
    /// Type four-char code.
    #[element]
    pub item_type: AttributeElement<u32>,
    #[element]
    pub label: AttributeElement<String>,
    /// Hide the item from keychain browsers.
    #[element]
    pub is_invisible: AttributeElement<bool>,
    /// Marks a "never save a password for this" entry.
    #[element]
    pub is_negative: AttributeElement<bool>,
    /// Setting both this and `access_control` sends neither.
    #[element]
    pub accessible: AttributeElement<Accessible>,
    #[element]
    pub access_control: AttributeElement<AccessControl>,
    #[element]
    pub access_group: AttributeElement<String>,
    /// Passed through to the store as-is; sync policy is the platform's.
    #[element]
    pub synchronizable: AttributeElement<bool>,
    #[element]
    creation_date: AttributeElement<DateTime<Utc>>,
    #[element]
    modification_date: AttributeElement<DateTime<Utc>>,
}

impl Default for CommonAttributes {
    fn default() -> Self {
        Self {
            description: AttributeElement::new(AttributeKey::DESCRIPTION),
            comment: AttributeElement::new(AttributeKey::COMMENT),
            creator: AttributeElement::new(AttributeKey::CREATOR),
            item_type: AttributeElement::new(AttributeKey::TYPE),
            label: AttributeElement::new(AttributeKey::LABEL),
            is_invisible: AttributeElement::new(AttributeKey::IS_INVISIBLE),
            is_negative: AttributeElement::new(AttributeKey::IS_NEGATIVE),
            accessible: AttributeElement::with_constraints(
                AttributeKey::ACCESSIBLE,
                vec![Constraint::OverriddenBy(AttributeKey::ACCESS_CONTROL)],
            ),
            access_control: AttributeElement::with_constraints(
                AttributeKey::ACCESS_CONTROL,
                vec![Constraint::Override(AttributeKey::ACCESSIBLE)],
            ),
            access_group: AttributeElement::new(AttributeKey::ACCESS_GROUP),
            synchronizable: AttributeElement::new(AttributeKey::SYNCHRONIZABLE),
            creation_date: AttributeElement::read_only(AttributeKey::CREATION_DATE),
            modification_date: AttributeElement::read_only(AttributeKey::MODIFICATION_DATE),
        }
    }
}

impl CommonAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Synthesized by the store; populated by `load`.
    pub fn creation_date(&self) -> Option<&DateTime<Utc>> {
        self.creation_date.get()
    }

    /// Synthesized by the store; populated by `load`.
    pub fn modification_date(&self) -> Option<&DateTime<Utc>> {
        self.modification_date.get()
    }
}
