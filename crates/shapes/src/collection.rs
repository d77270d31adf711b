use std::io::Write;
use std::path::Path;

use crate::error::{Error, ParseError, Result};
use crate::store::{Index, Store};
use crate::{json, xml, Draw, Shape};

/// The editor: an ordered collection of shapes that can be drawn and saved.
///
/// Loading appends to whatever is already held, the same as calling [`add`](Self::add)
/// for every shape in the file. Use [`clear`](Self::clear) first to replace instead.
#[derive(Debug, Clone, Default)]
pub struct ShapeCollection {
    shapes: Store<Shape>,
}

impl ShapeCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, shape: impl Into<Shape>) -> Index<Shape> {
        let shape = shape.into();
        log::trace!("adding {}", shape.kind());
        self.shapes.push(shape)
    }

    pub fn get(&self, index: Index<Shape>) -> Option<&Shape> {
        self.shapes.get(index)
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Shape> {
        self.shapes.iter()
    }

    pub fn clear(&mut self) {
        self.shapes.clear();
    }

    pub fn describe_all(&self) -> Vec<String> {
        self.iter().map(Draw::describe).collect()
    }

    /// Writes every description on its own line.
    pub fn draw_all(&self, out: &mut impl Write) -> std::io::Result<()> {
        for line in self.describe_all() {
            writeln!(out, "{}", line)?;
        }
        Ok(())
    }

    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        std::fs::write(path, json::encode(self.iter()))?;
        log::debug!("saved {} shapes to {}", self.len(), path.display());
        Ok(())
    }

    pub fn save_xml(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let doc = xml::encode(self.iter()).map_err(Error::Encode)?;
        std::fs::write(path, doc)?;
        log::debug!("saved {} shapes to {}", self.len(), path.display());
        Ok(())
    }

    /// Appends the shapes saved in a json file. Nothing is added if any of them fails.
    pub fn load_json(&mut self, path: impl AsRef<Path>) -> Result<usize> {
        let path = path.as_ref();
        let shapes = json::decode(&read_text(path)?)?;
        Ok(self.extend_loaded(shapes, path))
    }

    /// Appends the shapes saved in an xml file. Nothing is added if any of them fails.
    pub fn load_xml(&mut self, path: impl AsRef<Path>) -> Result<usize> {
        let path = path.as_ref();
        let shapes = xml::decode(&read_text(path)?)?;
        Ok(self.extend_loaded(shapes, path))
    }

    fn extend_loaded(&mut self, shapes: Vec<Shape>, path: &Path) -> usize {
        let count = shapes.len();
        for shape in shapes {
            self.add(shape);
        }
        log::debug!("loaded {} shapes from {}", count, path.display());
        count
    }
}

// bad bytes are a problem with the file's content, not with reading it
fn read_text(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path)?;
    String::from_utf8(bytes).map_err(|e| ParseError::from(e.utf8_error()).into())
}

impl<S: Into<Shape>> Extend<S> for ShapeCollection {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for shape in iter {
            self.add(shape);
        }
    }
}

impl<S: Into<Shape>> FromIterator<S> for ShapeCollection {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut c = Self::new();
        c.extend(iter);
        c
    }
}

#[test]
fn insertion_order() {
    use crate::{circle, rectangle, Circle};

    let mut editor = ShapeCollection::new();
    let first = editor.add(circle(5.0).unwrap());
    editor.add(rectangle(10.0, 20.0).unwrap());
    // duplicates are fine
    let dup = editor.add(Circle::new(5.0).unwrap());

    assert_eq!(editor.len(), 3);
    assert_eq!(editor.get(first), editor.get(dup));
    assert_eq!(
        editor.describe_all(),
        [
            "Рисуем круг с радиусом 5",
            "Рисуем прямоугольник шириной 10 и высотой 20",
            "Рисуем круг с радиусом 5",
        ]
    );

    let mut out = Vec::new();
    editor.draw_all(&mut out).unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "Рисуем круг с радиусом 5\nРисуем прямоугольник шириной 10 и высотой 20\nРисуем круг с радиусом 5\n"
    );
}

#[test]
fn cleared_indices_stay_dead() {
    use crate::circle;

    let mut editor = ShapeCollection::new();
    let old = editor.add(circle(1.0).unwrap());
    editor.clear();
    let new = editor.add(circle(99.0).unwrap());

    assert_eq!(editor.get(old), None);
    assert_eq!(editor.get(new), Some(&circle(99.0).unwrap()));
}
