//! A tiny element tree, just enough to carry shapes in and out of xml.

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use crate::error::ParseError;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Element {
    pub tag: String,
    pub text: Option<String>,
    pub children: Vec<Element>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            text: None,
            children: Vec::new(),
        }
    }

    pub fn with_text(tag: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::new(tag)
        }
    }

    pub fn push(&mut self, child: Element) {
        self.children.push(child);
    }

    /// First direct child with the given tag.
    pub fn find(&self, tag: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.tag == tag)
    }

    /// Writes this element as the root of a utf-8 document, declaration included.
    pub fn to_document(&self) -> quick_xml::Result<Vec<u8>> {
        let mut writer = Writer::new(Vec::new());
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
        self.write(&mut writer)?;
        Ok(writer.into_inner())
    }

    fn write(&self, w: &mut Writer<Vec<u8>>) -> quick_xml::Result<()> {
        if self.text.is_none() && self.children.is_empty() {
            w.write_event(Event::Empty(BytesStart::new(self.tag.as_str())))?;
            return Ok(());
        }
        w.write_event(Event::Start(BytesStart::new(self.tag.as_str())))?;
        if let Some(text) = &self.text {
            w.write_event(Event::Text(BytesText::new(text)))?;
        }
        for child in &self.children {
            child.write(w)?;
        }
        w.write_event(Event::End(BytesEnd::new(self.tag.as_str())))?;
        Ok(())
    }

    /// Parses a document and returns its root element.
    pub fn parse(text: &str) -> Result<Element, ParseError> {
        let mut reader = Reader::from_str(text);
        reader.trim_text(true);

        let mut stack: Vec<Element> = Vec::new();
        let mut root = None;
        loop {
            match reader.read_event()? {
                Event::Start(start) => {
                    let tag = String::from_utf8_lossy(start.name().as_ref()).into_owned();
                    stack.push(Element::new(tag));
                }
                Event::Empty(start) => {
                    let tag = String::from_utf8_lossy(start.name().as_ref()).into_owned();
                    close(Element::new(tag), &mut stack, &mut root)?;
                }
                Event::Text(t) => {
                    let text = t.unescape()?;
                    match stack.last_mut() {
                        Some(top) => append_text(top, &text),
                        None if text.trim().is_empty() => {}
                        None => return Err(ParseError::OutsideRoot(text.into_owned())),
                    }
                }
                Event::CData(c) => {
                    let text = String::from_utf8_lossy(&c).into_owned();
                    match stack.last_mut() {
                        Some(top) => append_text(top, &text),
                        None => return Err(ParseError::OutsideRoot(text)),
                    }
                }
                Event::End(_) => {
                    // the reader checks that end names match, so the stack can't be empty here
                    if let Some(el) = stack.pop() {
                        close(el, &mut stack, &mut root)?;
                    }
                }
                Event::Eof => break,
                // declarations, comments, processing instructions and doctypes
                _ => {}
            }
        }

        if let Some(el) = stack.pop() {
            return Err(ParseError::Unclosed(el.tag));
        }
        root.ok_or(ParseError::NoRoot)
    }
}

fn close(
    el: Element,
    stack: &mut Vec<Element>,
    root: &mut Option<Element>,
) -> Result<(), ParseError> {
    match stack.last_mut() {
        Some(parent) => parent.push(el),
        None if root.is_some() => return Err(ParseError::OutsideRoot(format!("<{}>", el.tag))),
        None => *root = Some(el),
    }
    Ok(())
}

fn append_text(el: &mut Element, text: &str) {
    el.text.get_or_insert_with(String::new).push_str(text);
}

#[test]
fn writes_compact_document() {
    let mut root = Element::new("shapes");
    let mut circle = Element::new("Circle");
    circle.push(Element::with_text("radius", "5.0"));
    root.push(circle);

    let doc = root.to_document().unwrap();
    assert_eq!(
        std::str::from_utf8(&doc).unwrap(),
        r#"<?xml version="1.0" encoding="utf-8"?><shapes><Circle><radius>5.0</radius></Circle></shapes>"#
    );
}

#[test]
fn parses_nested_elements() {
    let root = Element::parse(
        "<?xml version='1.0' encoding='utf-8'?>\n<shapes>\n  <Circle><radius> 5.0 </radius></Circle>\n  <Empty/>\n</shapes>",
    )
    .unwrap();
    assert_eq!(root.tag, "shapes");
    assert_eq!(root.children.len(), 2);
    assert_eq!(root.children[0].find("radius").unwrap().text.as_deref(), Some("5.0"));
    assert_eq!(root.children[1], Element::new("Empty"));
}

#[test]
fn escapes_text() {
    let el = Element::with_text("note", "a < b & c");
    let doc = el.to_document().unwrap();
    let back = Element::parse(std::str::from_utf8(&doc).unwrap()).unwrap();
    assert_eq!(back, el);
}

#[test]
fn rejects_broken_documents() {
    assert!(matches!(Element::parse(""), Err(ParseError::NoRoot)));
    assert!(Element::parse("<shapes><Circle></shapes>").is_err());
    assert!(Element::parse("<shapes>").is_err());
}

#[test]
fn single_root_only() {
    let err = Element::parse("<shapes/><shapes/>").unwrap_err();
    assert!(matches!(err, ParseError::OutsideRoot(ref found) if found == "<shapes>"));

    let err = Element::parse("<shapes/>junk").unwrap_err();
    assert!(matches!(err, ParseError::OutsideRoot(ref found) if found == "junk"));

    let err = Element::parse("junk<shapes/>").unwrap_err();
    assert!(matches!(err, ParseError::OutsideRoot(_)));

    // whitespace and comments around the root are fine
    let root = Element::parse("<?xml version='1.0'?>\n<!-- saved -->\n<shapes/>\n").unwrap();
    assert_eq!(root, Element::new("shapes"));
}
