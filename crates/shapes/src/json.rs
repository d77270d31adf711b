use serde::Serialize;
use serde_json::{ser::PrettyFormatter, Map, Value};

use crate::error::{Error, ParseError, Result};
use crate::{Draw, Kind, Shape};

impl Shape {
    /// Rebuilds a shape from its structured map. `Ok(None)` for a `"type"` nobody knows.
    pub fn from_map(map: &Map<String, Value>) -> Result<Option<Shape>> {
        let tag = map.get("type").ok_or_else(|| ParseError::MissingField {
            tag: Value::Object(map.clone()).to_string(),
            field: "type",
        })?;
        let kind = match tag.as_str().and_then(Kind::from_tag) {
            Some(kind) => kind,
            None => {
                log::warn!("skipping shape of unknown type {}", tag);
                return Ok(None);
            }
        };

        let shape = Shape::read(kind, |field| -> Result<f64, ParseError> {
            let value = map.get(field).ok_or_else(|| ParseError::MissingField {
                tag: kind.tag().to_owned(),
                field,
            })?;
            value.as_f64().ok_or_else(|| ParseError::NotANumber {
                tag: kind.tag().to_owned(),
                field,
                text: value.to_string(),
            })
        })?;
        Ok(Some(shape))
    }
}

pub(crate) fn encode<'a>(shapes: impl Iterator<Item = &'a Shape>) -> Vec<u8> {
    let list = Value::Array(shapes.map(|s| Value::Object(s.to_map())).collect());

    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    // a `Value` always serializes and a `Vec` never fails to write
    if let Err(e) = list.serialize(&mut ser) {
        unreachable!("json encoding failed: {}", e);
    }
    buf
}

pub(crate) fn decode(text: &str) -> Result<Vec<Shape>> {
    let list = match serde_json::from_str(text).map_err(ParseError::from)? {
        Value::Array(list) => list,
        _ => return Err(ParseError::NotAList.into()),
    };

    let mut shapes = Vec::with_capacity(list.len());
    for item in &list {
        let map = item
            .as_object()
            .ok_or_else(|| Error::TypeMismatch(item.to_string()))?;
        shapes.extend(Shape::from_map(map)?);
    }
    Ok(shapes)
}

#[test]
fn dispatch() {
    let map = |v: Value| v.as_object().cloned().unwrap();

    let shape = Shape::from_map(&map(serde_json::json!({"type": "Circle", "radius": 5})));
    assert_eq!(shape.unwrap(), Some(crate::circle(5.0).unwrap()));

    let shape = Shape::from_map(&map(serde_json::json!({"type": "Triangle", "side": 3})));
    assert_eq!(shape.unwrap(), None);

    let shape = Shape::from_map(&map(serde_json::json!({"type": 7})));
    assert_eq!(shape.unwrap(), None);
}

#[test]
fn malformed_records() {
    let err = decode(r#"{"not": "a list"}"#).unwrap_err();
    assert!(matches!(err, Error::Parse(ParseError::NotAList)));

    let err = decode("[{").unwrap_err();
    assert!(matches!(err, Error::Parse(ParseError::Json(_))));

    let err = decode("[42]").unwrap_err();
    assert!(matches!(err, Error::TypeMismatch(ref found) if found == "42"));

    let err = decode(r#"[{"radius": 5}]"#).unwrap_err();
    assert!(matches!(err, Error::Parse(ParseError::MissingField { field: "type", .. })));

    let err = decode(r#"[{"type": "Rectangle", "width": 5}]"#).unwrap_err();
    assert!(matches!(err, Error::Parse(ParseError::MissingField { field: "height", .. })));

    let err = decode(r#"[{"type": "Circle", "radius": "5"}]"#).unwrap_err();
    assert!(matches!(err, Error::Parse(ParseError::NotANumber { field: "radius", .. })));

    let err = decode(r#"[{"type": "Circle", "radius": 0}]"#).unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
}

#[test]
fn pretty_output() {
    let shapes = [crate::circle(5.0).unwrap()];
    let text = String::from_utf8(encode(shapes.iter())).unwrap();
    assert_eq!(text, "[\n    {\n        \"type\": \"Circle\",\n        \"radius\": 5.0\n    }\n]");
}
