//! Document construction and sorting.
//!
//! Every build is followed by `sort()`, since construction alone makes no
//! promise about field order.

use objmodel_core::{AttributeMap, AttributeValue, Document, Field, Value};

fn sorted(mut doc: Document) -> Document {
    doc.sort();
    doc
}

fn fields(pairs: Vec<(&str, Value)>) -> Document {
    Document::from_fields(pairs.into_iter().map(|(k, v)| Field::new(k, v)).collect())
}

// ============================================================================
// Construction from attributes
// ============================================================================

#[test]
fn from_empty_map() {
    let doc = sorted(Document::from_attributes(&AttributeMap::new()));
    assert_eq!(doc, Document::new());
    assert!(doc.fields().is_empty());
}

#[test]
fn from_map() {
    let mut attrs = AttributeMap::new();
    attrs.insert_int("i", 42);
    attrs.insert_string("str", "test");

    let doc = sorted(Document::from_attributes(&attrs));
    assert_eq!(
        doc,
        fields(vec![("i", Value::int(42)), ("str", Value::string("test"))])
    );
}

#[test]
fn ignores_null_values() {
    let mut attrs = AttributeMap::new();
    attrs.insert_null("null");
    attrs.insert_string("str", "test");

    let doc = sorted(Document::from_attributes(&attrs));
    assert_eq!(doc, fields(vec![("str", Value::string("test"))]));
}

#[test]
fn drops_byte_attributes() {
    let mut attrs = AttributeMap::new();
    attrs.insert("raw", AttributeValue::Bytes(vec![1, 2, 3]));
    attrs.insert_bool("ok", true);

    let doc = sorted(Document::from_attributes(&attrs));
    assert_eq!(doc, fields(vec![("ok", Value::bool(true))]));
}

#[test]
fn from_map_with_prefix() {
    let mut attrs = AttributeMap::new();
    attrs.insert_int("i", 42);
    attrs.insert_string("str", "test");

    let doc = sorted(Document::from_attributes_with_path("prefix", &attrs));
    assert_eq!(
        doc,
        fields(vec![
            ("prefix.i", Value::int(42)),
            ("prefix.str", Value::string("test")),
        ])
    );
}

#[test]
fn add_attributes_with_key() {
    let mut attrs = AttributeMap::new();
    attrs.insert_int("i", 42);
    attrs.insert_string("str", "test");

    let mut doc = Document::new();
    doc.add_attributes("prefix", &attrs);
    assert_eq!(
        sorted(doc),
        fields(vec![
            ("prefix.i", Value::int(42)),
            ("prefix.str", Value::string("test")),
        ])
    );
}

#[test]
fn add_attribute_flattens_a_map_value() {
    let mut inner = AttributeMap::new();
    inner.insert_int("i", 42);
    inner.insert_string("str", "test");

    let mut doc = Document::new();
    doc.add_attribute("prefix", &AttributeValue::Map(inner));
    assert_eq!(
        sorted(doc),
        fields(vec![
            ("prefix.i", Value::int(42)),
            ("prefix.str", Value::string("test")),
        ])
    );
}

#[test]
fn nested_maps_flatten_at_any_depth() {
    let mut deepest = AttributeMap::new();
    deepest.insert_int("d", 4);
    let mut middle = AttributeMap::new();
    middle.insert("c", deepest);
    middle.insert_null("gone");
    let mut attrs = AttributeMap::new();
    attrs.insert("b", middle);

    let doc = sorted(Document::from_attributes_with_path("a", &attrs));
    assert_eq!(doc, fields(vec![("a.b.c.d", Value::int(4))]));
}

#[test]
fn empty_nested_map_emits_nothing() {
    let mut attrs = AttributeMap::new();
    attrs.insert("empty", AttributeMap::new());

    let doc = Document::from_attributes(&attrs);
    assert!(doc.fields().is_empty());
}

#[test]
fn arrays_are_not_flattened() {
    let mut element = AttributeMap::new();
    element.insert_int("x", 1);

    let mut attrs = AttributeMap::new();
    attrs.insert(
        "list",
        AttributeValue::Array(vec![
            AttributeValue::Int(1),
            AttributeValue::Null,
            AttributeValue::Map(element),
        ]),
    );

    let doc = Document::from_attributes_with_path("p", &attrs);
    assert_eq!(
        doc,
        fields(vec![(
            "p.list",
            Value::array([
                Value::int(1),
                Value::Null,
                Value::object(fields(vec![("x", Value::int(1))])),
            ])
        )])
    );
}

#[test]
fn from_json_attributes() {
    let attrs = AttributeValue::from(serde_json::json!({
        "http": {"method": "GET", "status": 200},
        "user": null,
        "tags": ["a", "b"]
    }));
    let map = attrs.as_map().unwrap();

    let doc = sorted(Document::from_attributes(map));
    assert_eq!(
        doc,
        fields(vec![
            ("http.method", Value::string("GET")),
            ("http.status", Value::int(200)),
            ("tags", Value::array([Value::string("a"), Value::string("b")])),
        ])
    );
}

#[test]
fn typed_adders_use_key_verbatim() {
    let mut doc = Document::new();
    doc.add_int("a.b", 1);
    doc.add_bool("c", false);
    doc.add_double("d", 1.5);
    doc.add_string("e", "x");
    doc.add("f", Value::Null);

    assert_eq!(
        doc,
        fields(vec![
            ("a.b", Value::int(1)),
            ("c", Value::bool(false)),
            ("d", Value::double(1.5)),
            ("e", Value::string("x")),
            ("f", Value::Null),
        ])
    );
}

// ============================================================================
// Sort
// ============================================================================

#[test]
fn keys_are_sorted() {
    let mut doc = Document::new();
    doc.add_int("z", 26);
    doc.add_int("a", 1);

    assert_eq!(
        sorted(doc),
        fields(vec![("a", Value::int(1)), ("z", Value::int(26))])
    );
}

#[test]
fn sorting_is_stable() {
    let mut doc = Document::new();
    doc.add_int("a", 1);
    doc.add_int("c", 3);
    doc.add_int("a", 2);

    assert_eq!(
        sorted(doc),
        fields(vec![
            ("a", Value::int(1)),
            ("a", Value::int(2)),
            ("c", Value::int(3)),
        ])
    );
}

#[test]
fn sorting_is_bytewise() {
    let mut doc = Document::new();
    doc.add_int("a.b", 1);
    doc.add_int("a-b", 2);
    doc.add_int("B", 3);
    doc.add_int("a", 4);

    let keys: Vec<String> = sorted(doc).into_fields().into_iter().map(|f| f.key).collect();
    assert_eq!(keys, vec!["B", "a", "a-b", "a.b"]);
}

#[test]
fn sort_does_not_touch_nested_documents() {
    let nested = fields(vec![("z", Value::int(1)), ("a", Value::int(2))]);
    let mut doc = Document::new();
    doc.add("obj", Value::object(nested.clone()));
    doc.sort();

    assert_eq!(doc, fields(vec![("obj", Value::object(nested))]));
}
