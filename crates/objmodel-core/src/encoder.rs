//! JSON encoding of documents and values.
//!
//! Encoding goes through `serde`: [`Value`] and [`Document`] implement
//! [`Serialize`], and [`Document::serialize`] streams the result into any
//! [`io::Write`] sink with `serde_json`.
//!
//! Rules applied on top of plain JSON:
//!
//! - Fields marked [`Value::Ignore`] are skipped.
//! - A nested object without visible fields encodes as `null`, not `{}`.
//! - Non-finite doubles encode as `null`.
//! - Timestamps encode as `"YYYY-MM-DDTHH:MM:SS.nnnnnnnnnZ"`.
//! - Arrays keep every element, empty objects included (as `null`).
//!
//! With `dedot` enabled, the dotted keys of a sorted document are expanded
//! into nested objects: `{"a.b":1,"a.c":2}` becomes `{"a":{"b":1,"c":2}}`.

use std::io;

use chrono::{DateTime, Utc};
use serde::ser::{SerializeMap, SerializeSeq, Serializer};
use serde::Serialize;

use crate::document::{Document, Field};
use crate::error::Result;
use crate::value::Value;

/// `chrono` format string for RFC 3339 with nanosecond precision in UTC.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.9fZ";

impl Document {
    /// Write the document as a JSON object to `writer`.
    ///
    /// The document should be sorted and deduped first. A failing sink aborts
    /// the encode; bytes already written are left to the caller.
    pub fn serialize<W: io::Write>(&self, writer: W, dedot: bool) -> Result<()> {
        if dedot {
            serde_json::to_writer(writer, &DedotFields::root(&self.fields))?;
        } else {
            serde_json::to_writer(writer, &FlatFields(&self.fields))?;
        }
        Ok(())
    }

    /// Encode into a fresh buffer.
    pub fn to_json_vec(&self, dedot: bool) -> Vec<u8> {
        let mut buf = Vec::new();
        // Writing into a Vec cannot fail.
        let _ = self.serialize(&mut buf, dedot);
        buf
    }
}

impl Value {
    /// Write the value as JSON to `writer`.
    pub fn encode<W: io::Write>(&self, writer: W, dedot: bool) -> Result<()> {
        serde_json::to_writer(writer, &ValueView { value: self, dedot })?;
        Ok(())
    }
}

/// Format a timestamp the way the encoder writes it.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        ValueView {
            value: self,
            dedot: false,
        }
        .serialize(serializer)
    }
}

/// Serializes as a flat object of dotted keys.
impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        FlatFields(&self.fields).serialize(serializer)
    }
}

struct ValueView<'a> {
    value: &'a Value,
    dedot: bool,
}

impl Serialize for ValueView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self.value {
            Value::Null | Value::Ignore => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(i) => serializer.serialize_i64(*i),
            Value::Double(d) if d.is_finite() => serializer.serialize_f64(*d),
            Value::Double(_) => serializer.serialize_unit(),
            Value::String(s) => serializer.serialize_str(s),
            Value::Timestamp(ts) => serializer.collect_str(&ts.format(TIMESTAMP_FORMAT)),
            Value::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(&ValueView {
                        value: item,
                        dedot: self.dedot,
                    })?;
                }
                seq.end()
            }
            Value::Object(doc) if doc.is_empty() => serializer.serialize_unit(),
            Value::Object(doc) if self.dedot => DedotFields::root(&doc.fields).serialize(serializer),
            Value::Object(doc) => FlatFields(&doc.fields).serialize(serializer),
        }
    }
}

struct FlatFields<'a>(&'a [Field]);

impl Serialize for FlatFields<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        for field in self.0.iter().filter(|f| !f.value.is_ignore()) {
            map.serialize_entry(
                &field.key,
                &ValueView {
                    value: &field.value,
                    dedot: false,
                },
            )?;
        }
        map.end()
    }
}

/// A run of sorted fields sharing the key prefix `fields[..].key[..prefix_len]`,
/// written as one object level.
struct DedotFields<'a> {
    fields: &'a [Field],
    prefix_len: usize,
}

impl<'a> DedotFields<'a> {
    fn root(fields: &'a [Field]) -> Self {
        Self {
            fields,
            prefix_len: 0,
        }
    }
}

impl Serialize for DedotFields<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let fields = self.fields;
        let mut map = serializer.serialize_map(None)?;
        let mut i = 0;
        while i < fields.len() {
            let field = &fields[i];
            if field.value.is_ignore() {
                i += 1;
                continue;
            }

            let rest = &field.key[self.prefix_len..];
            match rest.find('.') {
                None => {
                    map.serialize_entry(
                        rest,
                        &ValueView {
                            value: &field.value,
                            dedot: true,
                        },
                    )?;
                    i += 1;
                }
                Some(dot) => {
                    // Open one object level for every field below `segment.`.
                    let child_prefix_len = self.prefix_len + dot + 1;
                    let child_prefix = &field.key[..child_prefix_len];
                    let end = i + fields[i..]
                        .iter()
                        .take_while(|f| f.key.starts_with(child_prefix))
                        .count();
                    map.serialize_entry(
                        &rest[..dot],
                        &DedotFields {
                            fields: &fields[i..end],
                            prefix_len: child_prefix_len,
                        },
                    )?;
                    i = end;
                }
            }
        }
        map.end()
    }
}
