//! Typed telemetry attributes, the input side of the object model.
//!
//! An [`AttributeMap`] is an insertion-ordered list of key/value pairs as
//! handed over by a telemetry pipeline. Values may nest: arrays hold further
//! attribute values and maps hold further attribute maps.

use serde_json::Value as JsonValue;

/// Discriminator of an [`AttributeValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeKind {
    Null,
    Bool,
    Int,
    Double,
    String,
    Bytes,
    Array,
    Map,
}

/// A single typed attribute value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum AttributeValue {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Double(f64),
    String(String),
    /// Raw byte sequence. The object model has no byte kind, so these are
    /// dropped during conversion.
    Bytes(Vec<u8>),
    Array(Vec<AttributeValue>),
    Map(AttributeMap),
}

impl AttributeValue {
    pub fn kind(&self) -> AttributeKind {
        match self {
            AttributeValue::Null => AttributeKind::Null,
            AttributeValue::Bool(_) => AttributeKind::Bool,
            AttributeValue::Int(_) => AttributeKind::Int,
            AttributeValue::Double(_) => AttributeKind::Double,
            AttributeValue::String(_) => AttributeKind::String,
            AttributeValue::Bytes(_) => AttributeKind::Bytes,
            AttributeValue::Array(_) => AttributeKind::Array,
            AttributeValue::Map(_) => AttributeKind::Map,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttributeValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            AttributeValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_double(&self) -> Option<f64> {
        match self {
            AttributeValue::Double(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttributeValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[AttributeValue]> {
        match self {
            AttributeValue::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&AttributeMap> {
        match self {
            AttributeValue::Map(map) => Some(map),
            _ => None,
        }
    }
}

impl From<bool> for AttributeValue {
    fn from(b: bool) -> Self {
        AttributeValue::Bool(b)
    }
}

impl From<i64> for AttributeValue {
    fn from(i: i64) -> Self {
        AttributeValue::Int(i)
    }
}

impl From<f64> for AttributeValue {
    fn from(d: f64) -> Self {
        AttributeValue::Double(d)
    }
}

impl From<&str> for AttributeValue {
    fn from(s: &str) -> Self {
        AttributeValue::String(s.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(s: String) -> Self {
        AttributeValue::String(s)
    }
}

impl From<AttributeMap> for AttributeValue {
    fn from(map: AttributeMap) -> Self {
        AttributeValue::Map(map)
    }
}

impl From<Vec<AttributeValue>> for AttributeValue {
    fn from(items: Vec<AttributeValue>) -> Self {
        AttributeValue::Array(items)
    }
}

/// Converts a parsed JSON value. Integers that fit `i64` become [`AttributeValue::Int`],
/// every other number becomes [`AttributeValue::Double`]. Object key order is kept.
impl From<JsonValue> for AttributeValue {
    fn from(value: JsonValue) -> Self {
        match value {
            JsonValue::Null => AttributeValue::Null,
            JsonValue::Bool(b) => AttributeValue::Bool(b),
            JsonValue::Number(n) => match n.as_i64() {
                Some(i) => AttributeValue::Int(i),
                None => n
                    .as_f64()
                    .map(AttributeValue::Double)
                    .unwrap_or(AttributeValue::Null),
            },
            JsonValue::String(s) => AttributeValue::String(s),
            JsonValue::Array(items) => {
                AttributeValue::Array(items.into_iter().map(AttributeValue::from).collect())
            }
            JsonValue::Object(map) => AttributeValue::Map(
                map.into_iter()
                    .map(|(k, v)| (k, AttributeValue::from(v)))
                    .collect(),
            ),
        }
    }
}

/// Insertion-ordered attribute map with unique keys.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AttributeMap {
    entries: Vec<(String, AttributeValue)>,
}

impl AttributeMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `value` under `key` unless the key is already present.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<AttributeValue>) {
        let key = key.into();
        if self.position(&key).is_none() {
            self.entries.push((key, value.into()));
        }
    }

    /// Adds `value` under `key`, replacing an existing value in place.
    pub fn upsert(&mut self, key: impl Into<String>, value: impl Into<AttributeValue>) {
        let key = key.into();
        let value = value.into();
        match self.position(&key) {
            Some(idx) => self.entries[idx].1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn insert_null(&mut self, key: impl Into<String>) {
        self.insert(key, AttributeValue::Null);
    }

    pub fn insert_bool(&mut self, key: impl Into<String>, value: bool) {
        self.insert(key, value);
    }

    pub fn insert_int(&mut self, key: impl Into<String>, value: i64) {
        self.insert(key, value);
    }

    pub fn insert_double(&mut self, key: impl Into<String>, value: f64) {
        self.insert(key, value);
    }

    pub fn insert_string(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let value: String = value.into();
        self.insert(key, value);
    }

    pub fn get(&self, key: &str) -> Option<&AttributeValue> {
        self.position(key).map(|idx| &self.entries[idx].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttributeValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k == key)
    }
}

/// Collects pairs with [`AttributeMap::insert`] semantics: the first value
/// for a repeated key is kept.
impl<K: Into<String>> FromIterator<(K, AttributeValue)> for AttributeMap {
    fn from_iter<I: IntoIterator<Item = (K, AttributeValue)>>(iter: I) -> Self {
        let mut map = AttributeMap::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}
