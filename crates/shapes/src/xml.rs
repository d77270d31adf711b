use crate::error::{ParseError, Result};
use crate::tree::Element;
use crate::{Draw, Kind, Shape};

/// Root element of a saved collection.
pub const ROOT: &str = "shapes";

impl Shape {
    /// Rebuilds a shape from its structured tree. `Ok(None)` for an element nobody knows.
    pub fn from_tree(el: &Element) -> Result<Option<Shape>> {
        let kind = match Kind::from_tag(&el.tag) {
            Some(kind) => kind,
            None => {
                log::warn!("skipping shape of unknown type `{}`", el.tag);
                return Ok(None);
            }
        };

        let shape = Shape::read(kind, |field| -> Result<f64, ParseError> {
            let child = el.find(field).ok_or_else(|| ParseError::MissingField {
                tag: el.tag.clone(),
                field,
            })?;
            let text = child.text.as_deref().unwrap_or_default();
            text.trim().parse::<f64>().map_err(|_| ParseError::NotANumber {
                tag: el.tag.clone(),
                field,
                text: text.to_owned(),
            })
        })?;
        Ok(Some(shape))
    }
}

pub(crate) fn encode<'a>(shapes: impl Iterator<Item = &'a Shape>) -> quick_xml::Result<Vec<u8>> {
    let mut root = Element::new(ROOT);
    for shape in shapes {
        root.push(shape.to_tree());
    }
    root.to_document()
}

pub(crate) fn decode(text: &str) -> Result<Vec<Shape>> {
    let root = Element::parse(text)?;
    if root.tag != ROOT {
        log::warn!("expected a `{}` root, found `{}`", ROOT, root.tag);
    }

    let mut shapes = Vec::with_capacity(root.children.len());
    for el in &root.children {
        shapes.extend(Shape::from_tree(el)?);
    }
    Ok(shapes)
}

#[test]
fn dispatch() {
    let doc = "<?xml version='1.0' encoding='utf-8'?>\n<shapes><Circle><radius>5.0</radius></Circle><Triangle><side>1</side></Triangle><Rectangle><width>10</width><height>20.0</height></Rectangle></shapes>";
    let shapes = decode(doc).unwrap();
    assert_eq!(
        shapes,
        [
            crate::circle(5.0).unwrap(),
            crate::rectangle(10.0, 20.0).unwrap()
        ]
    );
}

#[test]
fn malformed_records() {
    use crate::Error;

    let err = decode("<shapes><Circle></shapes>").unwrap_err();
    assert!(matches!(err, Error::Parse(ParseError::Xml(_))));

    let err = decode("<shapes><Circle/></shapes>").unwrap_err();
    assert!(matches!(err, Error::Parse(ParseError::MissingField { field: "radius", .. })));

    let err = decode("<shapes><Rectangle><width>1</width><height>wide</height></Rectangle></shapes>")
        .unwrap_err();
    assert!(matches!(err, Error::Parse(ParseError::NotANumber { field: "height", .. })));

    let err = decode("<shapes><Circle><radius/></Circle></shapes>").unwrap_err();
    assert!(matches!(err, Error::Parse(ParseError::NotANumber { .. })));

    let err = decode("<shapes><Circle><radius>-1</radius></Circle></shapes>").unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
}

#[test]
fn matches_documented_layout() {
    let shapes = [
        crate::circle(5.0).unwrap(),
        crate::rectangle(10.0, 20.0).unwrap(),
    ];
    let doc = String::from_utf8(encode(shapes.iter()).unwrap()).unwrap();
    assert_eq!(
        doc,
        "<?xml version=\"1.0\" encoding=\"utf-8\"?><shapes><Circle><radius>5.0</radius></Circle><Rectangle><width>10.0</width><height>20.0</height></Rectangle></shapes>"
    );
}
