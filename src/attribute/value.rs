//! Attribute values as exchanged with the store, and the typed conversions.

use chrono::{DateTime, Utc};

/// Dynamically typed attribute value carried in a [`Query`](crate::Query).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AttrValue {
    String(String),
    Integer(i64),
    Bool(bool),
    Date(DateTime<Utc>),
    Data(Vec<u8>),
}

impl AttrValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttrValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            AttrValue::Integer(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttrValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<DateTime<Utc>> {
        match self {
            AttrValue::Date(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_data(&self) -> Option<&[u8]> {
        match self {
            AttrValue::Data(v) => Some(v),
            _ => None,
        }
    }
}

/// Conversion between a typed element value and its [`AttrValue`] form.
///
/// `from_attr` returns `None` when the store hands back a value of a different
/// dynamic type; the element is then treated as absent.
pub trait AttributeValue: Clone {
    fn to_attr(&self) -> AttrValue;
    fn from_attr(value: &AttrValue) -> Option<Self>;
}

impl AttributeValue for String {
    fn to_attr(&self) -> AttrValue {
        AttrValue::String(self.clone())
    }

    fn from_attr(value: &AttrValue) -> Option<Self> {
        value.as_str().map(str::to_owned)
    }
}

impl AttributeValue for bool {
    fn to_attr(&self) -> AttrValue {
        AttrValue::Bool(*self)
    }

    fn from_attr(value: &AttrValue) -> Option<Self> {
        value.as_bool()
    }
}

impl AttributeValue for i64 {
    fn to_attr(&self) -> AttrValue {
        AttrValue::Integer(*self)
    }

    fn from_attr(value: &AttrValue) -> Option<Self> {
        value.as_integer()
    }
}

macro_rules! narrow_integer_attribute {
    ($($ty:ty),*) => {
        $(
            impl AttributeValue for $ty {
                fn to_attr(&self) -> AttrValue {
                    AttrValue::Integer(i64::from(*self))
                }

                fn from_attr(value: &AttrValue) -> Option<Self> {
                    value.as_integer().and_then(|v| <$ty>::try_from(v).ok())
                }
            }
        )*
    };
}

narrow_integer_attribute!(u16, u32);

impl AttributeValue for DateTime<Utc> {
    fn to_attr(&self) -> AttrValue {
        AttrValue::Date(*self)
    }

    fn from_attr(value: &AttrValue) -> Option<Self> {
        value.as_date()
    }
}

impl AttributeValue for Vec<u8> {
    fn to_attr(&self) -> AttrValue {
        AttrValue::Data(self.clone())
    }

    fn from_attr(value: &AttrValue) -> Option<Self> {
        value.as_data().map(<[u8]>::to_vec)
    }
}
