//! Generic serialization of SDK request/response values into span attribute
//! strings.
//!
//! [`serialize`] accepts any [`RawValue`] shape and produces a best-effort
//! textual rendering, or nothing. This path never fails: attribute
//! collection must not be able to abort the instrumented AWS call, so
//! unavailable marshallers, failed drains, and undecodable bytes all
//! collapse into an absent attribute.

use std::fmt;
use std::io::Read;

use opentelemetry::Value;

/// A structured SDK value that can be marshalled into its wire encoding.
///
/// This stands in for the SDK's protocol marshaller. Implementations live at
/// the instrumentation boundary, which knows the concrete operation and can
/// hand the value to the protocol factory for the current service.
pub trait Marshallable: fmt::Debug {
    /// Opens a reader over the wire encoding of this value.
    ///
    /// Returns `None` when no marshaller is available for the operation.
    fn wire_encoding(&self) -> Option<Box<dyn Read + '_>>;
}

/// A request or response value captured at the instrumentation boundary.
///
/// The boundary constructs exactly one of these per span-attribute request,
/// so the serialization core never has to introspect SDK object types
/// itself. Values borrow from the intercepted call and are consumed once.
#[derive(Debug)]
pub enum RawValue<'a> {
    /// A structured SDK object, marshalled to its wire encoding on demand.
    Record(&'a dyn Marshallable),
    /// An ordered collection of values.
    Collection(Vec<RawValue<'a>>),
    /// A keyed map. Only the key set contributes to the rendering.
    Map(Vec<(RawValue<'a>, RawValue<'a>)>),
    /// A raw byte buffer, typically an HTTP request or response body.
    Bytes(&'a [u8]),
    /// A primitive attribute value.
    Primitive(Value),
    /// No value was captured.
    Absent,
}

/// Renders a captured value as a span attribute string.
///
/// Returns `None` when the value has no useful rendering: the value is
/// absent, the marshaller is unavailable, the encoding cannot be drained or
/// is not UTF-8, or a collection has no non-empty elements.
pub fn serialize(value: &RawValue<'_>) -> Option<String> {
    match value {
        RawValue::Absent => None,
        RawValue::Record(record) => serialize_record(*record),
        RawValue::Collection(items) => {
            join_serialized(items.iter().map(|item| serialize(item).unwrap_or_default()))
        }
        RawValue::Map(entries) => {
            join_serialized(entries.iter().map(|(key, _)| serialize(key).unwrap_or_default()))
        }
        RawValue::Bytes(bytes) => std::str::from_utf8(bytes).ok().map(str::to_owned),
        RawValue::Primitive(value) => Some(value.as_str().into_owned()),
    }
}

fn serialize_record(record: &dyn Marshallable) -> Option<String> {
    let mut stream = record.wire_encoding()?;
    let mut encoded = Vec::new();
    // The stream is fully drained before returning on every path. A failed
    // drain yields no attribute rather than an error.
    match stream.read_to_end(&mut encoded) {
        Ok(_) => String::from_utf8(encoded).ok(),
        Err(_) => None,
    }
}

fn join_serialized(parts: impl Iterator<Item = String>) -> Option<String> {
    let parts: Vec<String> = parts.collect();
    if parts.iter().all(String::is_empty) {
        // an empty key set or all-unserializable elements is no value, not "[]"
        return None;
    }
    Some(format!("[{}]", parts.join(",")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[derive(Debug)]
    struct StaticBody(&'static str);

    impl Marshallable for StaticBody {
        fn wire_encoding(&self) -> Option<Box<dyn Read + '_>> {
            Some(Box::new(self.0.as_bytes()))
        }
    }

    #[derive(Debug)]
    struct NoMarshaller;

    impl Marshallable for NoMarshaller {
        fn wire_encoding(&self) -> Option<Box<dyn Read + '_>> {
            None
        }
    }

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::other("connection reset"))
        }
    }

    #[derive(Debug)]
    struct BrokenStream;

    impl Marshallable for BrokenStream {
        fn wire_encoding(&self) -> Option<Box<dyn Read + '_>> {
            Some(Box::new(FailingReader))
        }
    }

    #[test]
    fn absent_yields_nothing() {
        assert_eq!(serialize(&RawValue::Absent), None);
    }

    #[test]
    fn primitives_render_canonically() {
        let cases: Vec<(RawValue<'_>, &str)> = vec![
            (RawValue::Primitive(Value::from("MyTable")), "MyTable"),
            (RawValue::Primitive(Value::from(42i64)), "42"),
            (RawValue::Primitive(Value::from(0.5f64)), "0.5"),
            (RawValue::Primitive(Value::from(true)), "true"),
        ];
        for (value, expected) in cases {
            assert_eq!(serialize(&value).as_deref(), Some(expected));
        }
    }

    #[test]
    fn bytes_decode_as_utf8() {
        assert_eq!(
            serialize(&RawValue::Bytes(b"hello body")).as_deref(),
            Some("hello body")
        );
    }

    #[test]
    fn invalid_utf8_bytes_yield_nothing() {
        assert_eq!(serialize(&RawValue::Bytes(&[0xff, 0xfe, 0xfd])), None);
    }

    #[test]
    fn collection_joins_elements_in_brackets() {
        let value = RawValue::Collection(vec![
            RawValue::Primitive(Value::from("a")),
            RawValue::Primitive(Value::from("b")),
            RawValue::Primitive(Value::from(3i64)),
        ]);
        assert_eq!(serialize(&value).as_deref(), Some("[a,b,3]"));
    }

    #[test]
    fn empty_collection_yields_nothing() {
        assert_eq!(serialize(&RawValue::Collection(Vec::new())), None);
    }

    #[test]
    fn collection_of_unserializable_elements_yields_nothing() {
        let value = RawValue::Collection(vec![RawValue::Absent, RawValue::Absent]);
        assert_eq!(serialize(&value), None);
    }

    #[test]
    fn map_serializes_only_its_key_set() {
        let value = RawValue::Map(vec![
            (
                RawValue::Primitive(Value::from("id")),
                RawValue::Primitive(Value::from("ignored")),
            ),
            (
                RawValue::Primitive(Value::from("name")),
                RawValue::Bytes(b"also ignored"),
            ),
        ]);
        assert_eq!(serialize(&value).as_deref(), Some("[id,name]"));
    }

    #[test]
    fn record_marshals_through_its_wire_encoding() {
        let record = StaticBody(r#"{"TableName":"MyTable"}"#);
        assert_eq!(
            serialize(&RawValue::Record(&record)).as_deref(),
            Some(r#"{"TableName":"MyTable"}"#)
        );
    }

    #[test]
    fn unavailable_marshaller_yields_nothing() {
        assert_eq!(serialize(&RawValue::Record(&NoMarshaller)), None);
    }

    #[test]
    fn failed_stream_drain_yields_nothing() {
        assert_eq!(serialize(&RawValue::Record(&BrokenStream)), None);
    }

    #[test]
    fn nested_collections_serialize_recursively() {
        let value = RawValue::Collection(vec![
            RawValue::Collection(vec![RawValue::Primitive(Value::from("x"))]),
            RawValue::Primitive(Value::from("y")),
        ]);
        assert_eq!(serialize(&value).as_deref(), Some("[[x],y]"));
    }
}
