//! # objmodel-core
//!
//! Canonical document model for indexing telemetry attributes as JSON.
//!
//! Telemetry attributes arrive as nested, unordered maps whose keys may
//! collide once flattened. This crate turns them into a deterministic JSON
//! document in four steps:
//!
//! 1. **Build** -- flatten attribute maps into dotted keys ([`Document::from_attributes`]).
//! 2. **Sort** -- stable sort by key ([`Document::sort`]).
//! 3. **Dedup** -- resolve duplicate keys (last one wins) and leaf/namespace
//!    clashes (`a` next to `a.b` becomes `a.value`) ([`Document::dedup`]).
//! 4. **Encode** -- stream JSON into any `io::Write` ([`Document::serialize`]).
//!
//! ## Quick start
//!
//! ```rust
//! use objmodel_core::{AttributeMap, Document};
//!
//! let mut attrs = AttributeMap::new();
//! attrs.insert_string("service", "checkout");
//! attrs.insert_int("service.version", 3);
//!
//! let mut doc = Document::from_attributes(&attrs);
//! doc.sort();
//! doc.dedup();
//!
//! let json = doc.to_json_vec(false);
//! assert_eq!(json, br#"{"service.value":"checkout","service.version":3}"#);
//! ```
//!
//! ## Modules
//!
//! - [`attribute`] -- typed input attributes (`AttributeValue`, `AttributeMap`)
//! - [`value`] -- encodable `Value` variants
//! - [`document`] -- field lists and the flattening builder
//! - [`dedup`] -- duplicate and leaf/namespace conflict resolution
//! - [`encoder`] -- JSON encoding, flat or dedotted
//! - [`model`] -- log record layout and `EncodeModel` options
//! - [`error`] -- encode errors

pub mod attribute;
pub mod dedup;
pub mod document;
pub mod encoder;
pub mod error;
pub mod model;
pub mod value;

pub use attribute::{AttributeKind, AttributeMap, AttributeValue};
pub use document::{Document, Field};
pub use encoder::format_timestamp;
pub use error::{EncodeError, Result};
pub use model::{log_document, EncodeModel, LogRecord, Resource};
pub use value::{Kind, Value};
