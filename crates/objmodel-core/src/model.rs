//! Log record encoding -- maps a telemetry log record onto a document.
//!
//! The field layout follows the flattened OpenTelemetry log model used for
//! indexing:
//!
//! ```text
//! @timestamp, TraceId, SpanId, TraceFlags, SeverityText, SeverityNumber,
//! Name, Body, Attributes.*, Resource.*
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::attribute::{AttributeMap, AttributeValue};
use crate::document::Document;
use crate::error::Result;

/// The resource a record was emitted by.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Resource {
    pub attributes: AttributeMap,
}

/// A single log record.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LogRecord {
    /// Unix epoch means "not set".
    pub timestamp: DateTime<Utc>,
    pub trace_id: [u8; 16],
    pub span_id: [u8; 8],
    pub flags: u32,
    pub severity_text: String,
    pub severity_number: i32,
    pub name: String,
    pub body: AttributeValue,
    pub attributes: AttributeMap,
}

/// Encoding options, typically loaded from the host exporter's config.
///
/// ```
/// use objmodel_core::EncodeModel;
///
/// let model: EncodeModel = serde_json::from_str(r#"{"dedot": false}"#).unwrap();
/// assert!(model.dedup);
/// assert!(!model.dedot);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncodeModel {
    /// Resolve duplicate and leaf/namespace key conflicts before encoding.
    pub dedup: bool,
    /// Expand dotted keys into nested JSON objects.
    pub dedot: bool,
}

impl Default for EncodeModel {
    fn default() -> Self {
        Self {
            dedup: true,
            dedot: true,
        }
    }
}

impl EncodeModel {
    /// Build, canonicalize, and encode one log record.
    pub fn encode_log(&self, resource: &Resource, record: &LogRecord) -> Result<Vec<u8>> {
        let mut document = log_document(resource, record);
        if self.dedup {
            document.dedup();
        } else if self.dedot {
            document.sort();
        }

        let mut buf = Vec::new();
        document.serialize(&mut buf, self.dedot)?;
        Ok(buf)
    }
}

/// Build the (unsorted) document for a log record.
pub fn log_document(resource: &Resource, record: &LogRecord) -> Document {
    let mut document = Document::new();
    document.add_timestamp("@timestamp", record.timestamp);
    document.add_id("TraceId", &record.trace_id);
    document.add_id("SpanId", &record.span_id);
    document.add_int("TraceFlags", i64::from(record.flags));
    document.add_string("SeverityText", &record.severity_text);
    document.add_int("SeverityNumber", i64::from(record.severity_number));
    document.add_string("Name", &record.name);
    document.add_attribute("Body", &record.body);
    document.add_attributes("Attributes", &record.attributes);
    document.add_attributes("Resource", &resource.attributes);
    document
}
