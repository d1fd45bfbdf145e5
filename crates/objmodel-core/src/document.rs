//! Documents: ordered field lists built from telemetry attributes.
//!
//! Nested attribute maps are flattened into dotted keys
//! (`{"http": {"method": "GET"}}` becomes `http.method`), arrays are kept as
//! single array-valued fields. Building gives no ordering guarantee; call
//! [`Document::sort`] and [`Document::dedup`] before encoding.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};

use crate::attribute::{AttributeMap, AttributeValue};
use crate::value::Value;

/// A single key/value entry of a [`Document`].
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub key: String,
    pub value: Value,
}

impl Field {
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// An ordered list of fields. Keys may repeat until the document is deduped.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    pub(crate) fields: Vec<Field>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing field list as-is.
    pub fn from_fields(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    /// Build a document from an attribute map, flattening nested maps.
    pub fn from_attributes(attrs: &AttributeMap) -> Self {
        Self::from_attributes_with_path("", attrs)
    }

    /// Build a document from an attribute map, prefixing every key with `path.`.
    pub fn from_attributes_with_path(path: &str, attrs: &AttributeMap) -> Self {
        let mut doc = Document::new();
        doc.add_attributes(path, attrs);
        doc
    }

    /// All fields in their current order, ignored ones included.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn into_fields(self) -> Vec<Field> {
        self.fields
    }

    /// Fields that will be encoded, i.e. everything not marked ignored.
    pub fn visible_fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(|f| !f.value.is_ignore())
    }

    /// Number of stored fields, ignored ones included.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True when no field would be encoded.
    pub fn is_empty(&self) -> bool {
        self.visible_fields().next().is_none()
    }

    /// Append a field. The key is used verbatim.
    pub fn add(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.fields.push(Field::new(key, value));
    }

    pub fn add_bool(&mut self, key: impl Into<String>, value: bool) {
        self.add(key, Value::Bool(value));
    }

    pub fn add_int(&mut self, key: impl Into<String>, value: i64) {
        self.add(key, Value::Int(value));
    }

    pub fn add_double(&mut self, key: impl Into<String>, value: f64) {
        self.add(key, Value::Double(value));
    }

    /// Append a string field; empty strings are skipped.
    pub fn add_string(&mut self, key: impl Into<String>, value: &str) {
        if !value.is_empty() {
            self.add(key, Value::string(value));
        }
    }

    /// Append a timestamp field; the Unix epoch is treated as "unset" and skipped.
    pub fn add_timestamp(&mut self, key: impl Into<String>, ts: DateTime<Utc>) {
        if ts != DateTime::<Utc>::UNIX_EPOCH {
            self.add(key, Value::Timestamp(ts));
        }
    }

    /// Append a trace or span id as lowercase hex; empty and all-zero ids are skipped.
    pub fn add_id(&mut self, key: impl Into<String>, id: &[u8]) {
        if id.iter().all(|b| *b == 0) {
            return;
        }
        let mut hex = String::with_capacity(id.len() * 2);
        for b in id {
            let _ = write!(hex, "{b:02x}");
        }
        self.add(key, Value::String(hex));
    }

    /// Append a single attribute under `key`.
    ///
    /// Null values are dropped, maps are flattened under `key.`, everything
    /// else (arrays included) becomes one field.
    pub fn add_attribute(&mut self, key: &str, attr: &AttributeValue) {
        match attr {
            AttributeValue::Map(map) => self.add_attributes(key, map),
            other => self.append_attribute_value("", key, other),
        }
    }

    /// Append every attribute of `attrs`, prefixing keys with `path.` when
    /// `path` is non-empty.
    pub fn add_attributes(&mut self, path: &str, attrs: &AttributeMap) {
        for (key, value) in attrs.iter() {
            self.append_attribute_value(path, key, value);
        }
    }

    fn append_attribute_value(&mut self, path: &str, key: &str, attr: &AttributeValue) {
        match attr {
            AttributeValue::Null => {}
            AttributeValue::Bytes(_) => {
                tracing::debug!(key, path, "dropping byte attribute");
            }
            AttributeValue::Map(map) => self.add_attributes(&flatten_key(path, key), map),
            other => self.add(flatten_key(path, key), Value::from_attribute(other)),
        }
    }

    /// Stable sort of the fields by key (byte-wise). Fields with equal keys
    /// keep their insertion order. Nested documents are not touched.
    pub fn sort(&mut self) {
        self.fields.sort_by(|a, b| a.key.cmp(&b.key));
    }
}

fn flatten_key(path: &str, key: &str) -> String {
    if path.is_empty() {
        return key.to_string();
    }
    let mut out = String::with_capacity(path.len() + 1 + key.len());
    out.push_str(path);
    out.push('.');
    out.push_str(key);
    out
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Document {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().map(|(k, v)| Field::new(k, v)).collect(),
        }
    }
}

impl<K: Into<String>, V: Into<Value>> Extend<(K, V)> for Document {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.fields
            .extend(iter.into_iter().map(|(k, v)| Field::new(k, v)));
    }
}

impl From<&AttributeMap> for Document {
    fn from(attrs: &AttributeMap) -> Self {
        Document::from_attributes(attrs)
    }
}
