//! Encodable values of the object model.
//!
//! [`Value`] is the closed set of things a document field can hold. Nested
//! objects wrap a full [`Document`], so they take part in sorting and
//! conflict resolution like the top-level document does.

use chrono::{DateTime, Utc};

use crate::attribute::AttributeValue;
use crate::document::Document;

/// Discriminator of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Null,
    Bool,
    Int,
    Double,
    String,
    Timestamp,
    Array,
    Object,
    Ignore,
}

/// A value stored in a document field.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    /// NaN and infinities encode as `null`.
    Double(f64),
    String(String),
    /// Encoded as RFC 3339 with nanoseconds and a `Z` suffix.
    Timestamp(DateTime<Utc>),
    Array(Vec<Value>),
    Object(Document),
    /// Marks a field superseded during dedup. Never encoded.
    Ignore,
}

impl Value {
    pub fn null() -> Self {
        Value::Null
    }

    pub fn bool(b: bool) -> Self {
        Value::Bool(b)
    }

    pub fn int(i: i64) -> Self {
        Value::Int(i)
    }

    pub fn double(d: f64) -> Self {
        Value::Double(d)
    }

    pub fn string(s: impl Into<String>) -> Self {
        Value::String(s.into())
    }

    pub fn timestamp(ts: DateTime<Utc>) -> Self {
        Value::Timestamp(ts)
    }

    pub fn array(items: impl IntoIterator<Item = Value>) -> Self {
        Value::Array(items.into_iter().collect())
    }

    pub fn object(doc: Document) -> Self {
        Value::Object(doc)
    }

    pub fn kind(&self) -> Kind {
        match self {
            Value::Null => Kind::Null,
            Value::Bool(_) => Kind::Bool,
            Value::Int(_) => Kind::Int,
            Value::Double(_) => Kind::Double,
            Value::String(_) => Kind::String,
            Value::Timestamp(_) => Kind::Timestamp,
            Value::Array(_) => Kind::Array,
            Value::Object(_) => Kind::Object,
            Value::Ignore => Kind::Ignore,
        }
    }

    pub fn is_ignore(&self) -> bool {
        matches!(self, Value::Ignore)
    }

    /// True when the value carries nothing to index: null, ignored, an empty
    /// array, or an object without visible fields.
    pub fn is_empty(&self) -> bool {
        match self {
            Value::Null | Value::Ignore => true,
            Value::Array(items) => items.is_empty(),
            Value::Object(doc) => doc.is_empty(),
            _ => false,
        }
    }

    /// Convert a single attribute value.
    ///
    /// Maps become objects wrapping a document built with an empty prefix;
    /// arrays convert element by element. Byte sequences have no counterpart
    /// and become [`Value::Null`].
    pub fn from_attribute(attr: &AttributeValue) -> Self {
        match attr {
            AttributeValue::Null => Value::Null,
            AttributeValue::Bool(b) => Value::Bool(*b),
            AttributeValue::Int(i) => Value::Int(*i),
            AttributeValue::Double(d) => Value::Double(*d),
            AttributeValue::String(s) => Value::String(s.clone()),
            AttributeValue::Bytes(_) => {
                tracing::trace!("byte attribute has no value kind, using null");
                Value::Null
            }
            AttributeValue::Array(items) => {
                Value::Array(items.iter().map(Value::from_attribute).collect())
            }
            AttributeValue::Map(map) => Value::Object(Document::from_attributes(map)),
        }
    }

    /// Canonicalize nested documents: objects are sorted and deduped, arrays
    /// are walked element by element. Scalars are left untouched.
    pub fn dedup(&mut self) {
        match self {
            Value::Object(doc) => doc.dedup(),
            Value::Array(items) => items.iter_mut().for_each(Value::dedup),
            _ => {}
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(d: f64) -> Self {
        Value::Double(d)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(ts: DateTime<Utc>) -> Self {
        Value::Timestamp(ts)
    }
}

impl From<Document> for Value {
    fn from(doc: Document) -> Self {
        Value::Object(doc)
    }
}

impl From<&AttributeValue> for Value {
    fn from(attr: &AttributeValue) -> Self {
        Value::from_attribute(attr)
    }
}
