use std::fmt;

use serde_json::{Map, Value};

use crate::error::{Error, ValidationError};
use crate::tree::Element;

/// The tag naming each shape variant, both as the json `"type"` and the xml element name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Circle,
    Rectangle,
}

impl Kind {
    pub const fn tag(self) -> &'static str {
        match self {
            Kind::Circle => "Circle",
            Kind::Rectangle => "Rectangle",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Kind> {
        match tag {
            "Circle" => Some(Kind::Circle),
            "Rectangle" => Some(Kind::Rectangle),
            _ => None,
        }
    }

    /// Dimension fields, in the order they are written out.
    pub const fn fields(self) -> &'static [&'static str] {
        match self {
            Kind::Circle => &["radius"],
            Kind::Rectangle => &["width", "height"],
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

pub trait Draw {
    /// Human readable description, the "drawing" of a shape.
    fn describe(&self) -> String;
    /// Json encoding unit.
    fn to_map(&self) -> Map<String, Value>;
    /// Xml encoding unit.
    fn to_tree(&self) -> Element;
}

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Circle {
    radius: f64,
}

impl Circle {
    pub fn new(radius: f64) -> Result<Self, ValidationError> {
        Ok(Self {
            radius: dimension(Kind::Circle, "radius", radius)?,
        })
    }

    #[inline]
    pub fn radius(&self) -> f64 {
        self.radius
    }
}

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Rectangle {
    width: f64,
    height: f64,
}

impl Rectangle {
    pub fn new(width: f64, height: f64) -> Result<Self, ValidationError> {
        Ok(Self {
            width: dimension(Kind::Rectangle, "width", width)?,
            height: dimension(Kind::Rectangle, "height", height)?,
        })
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.height
    }
}

// NaN and the infinities aren't positive lengths, and json can't carry them anyway
fn dimension(kind: Kind, field: &'static str, value: f64) -> Result<f64, ValidationError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ValidationError::InvalidDimension { kind, field, value })
    }
}

fn map(kind: Kind, values: &[f64]) -> Map<String, Value> {
    let mut map = Map::new();
    map.insert("type".into(), kind.tag().into());
    for (field, &value) in kind.fields().iter().zip(values) {
        map.insert((*field).into(), value.into());
    }
    map
}

fn tree(kind: Kind, values: &[f64]) -> Element {
    let mut el = Element::new(kind.tag());
    for (field, value) in kind.fields().iter().zip(values) {
        // debug formatting keeps the fraction, `5.0` rather than `5`
        el.push(Element::with_text(*field, format!("{:?}", value)));
    }
    el
}

impl Draw for Circle {
    fn describe(&self) -> String {
        format!("Рисуем круг с радиусом {}", self.radius)
    }

    fn to_map(&self) -> Map<String, Value> {
        map(Kind::Circle, &[self.radius])
    }

    fn to_tree(&self) -> Element {
        tree(Kind::Circle, &[self.radius])
    }
}

impl Draw for Rectangle {
    fn describe(&self) -> String {
        format!(
            "Рисуем прямоугольник шириной {} и высотой {}",
            self.width, self.height
        )
    }

    fn to_map(&self) -> Map<String, Value> {
        map(Kind::Rectangle, &[self.width, self.height])
    }

    fn to_tree(&self) -> Element {
        tree(Kind::Rectangle, &[self.width, self.height])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub enum Shape {
    Circle(Circle),
    Rectangle(Rectangle),
}

impl Shape {
    pub fn kind(&self) -> Kind {
        match self {
            Shape::Circle(_) => Kind::Circle,
            Shape::Rectangle(_) => Kind::Rectangle,
        }
    }

    /// Builds a shape of `kind`, asking `field` for each dimension by name in
    /// [`Kind::fields`] order.
    pub(crate) fn read<E>(
        kind: Kind,
        mut field: impl FnMut(&'static str) -> Result<f64, E>,
    ) -> Result<Shape, Error>
    where
        Error: From<E>,
    {
        Ok(match kind {
            Kind::Circle => Circle::new(field("radius")?)?.into(),
            Kind::Rectangle => {
                let width = field("width")?;
                let height = field("height")?;
                Rectangle::new(width, height)?.into()
            }
        })
    }

    fn as_draw(&self) -> &dyn Draw {
        match self {
            Shape::Circle(c) => c,
            Shape::Rectangle(r) => r,
        }
    }
}

impl Draw for Shape {
    fn describe(&self) -> String {
        self.as_draw().describe()
    }

    fn to_map(&self) -> Map<String, Value> {
        self.as_draw().to_map()
    }

    fn to_tree(&self) -> Element {
        self.as_draw().to_tree()
    }
}

impl From<Circle> for Shape {
    fn from(c: Circle) -> Self {
        Shape::Circle(c)
    }
}

impl From<Rectangle> for Shape {
    fn from(r: Rectangle) -> Self {
        Shape::Rectangle(r)
    }
}

pub fn circle(radius: f64) -> Result<Shape, ValidationError> {
    Circle::new(radius).map(Shape::from)
}

pub fn rectangle(width: f64, height: f64) -> Result<Shape, ValidationError> {
    Rectangle::new(width, height).map(Shape::from)
}

#[test]
fn validation() {
    assert!(circle(5.0).is_ok());
    assert!(circle(0.0).is_err());
    assert!(circle(-1.0).is_err());
    assert!(circle(f64::NAN).is_err());
    assert!(circle(f64::INFINITY).is_err());

    assert!(rectangle(10.0, 20.0).is_ok());
    assert!(rectangle(0.0, 20.0).is_err());
    assert!(rectangle(10.0, 0.0).is_err());
    assert_eq!(
        rectangle(10.0, -2.0),
        Err(ValidationError::InvalidDimension {
            kind: Kind::Rectangle,
            field: "height",
            value: -2.0
        })
    );
}

#[test]
fn descriptions() {
    assert_eq!(circle(5.0).unwrap().describe(), "Рисуем круг с радиусом 5");
    assert_eq!(circle(2.5).unwrap().describe(), "Рисуем круг с радиусом 2.5");
    assert_eq!(
        rectangle(10.0, 20.0).unwrap().describe(),
        "Рисуем прямоугольник шириной 10 и высотой 20"
    );
}

#[test]
fn structured_views() {
    let r = rectangle(10.0, 20.5).unwrap();
    let keys: Vec<_> = r.to_map().keys().cloned().collect();
    assert_eq!(keys, ["type", "width", "height"]);
    assert_eq!(r.to_map()["type"], "Rectangle");
    assert_eq!(r.to_map()["height"], 20.5);

    let el = circle(5.0).unwrap().to_tree();
    assert_eq!(el.tag, "Circle");
    assert_eq!(el.children, [Element::with_text("radius", "5.0")]);
}

#[test]
fn tags() {
    for kind in [Kind::Circle, Kind::Rectangle] {
        assert_eq!(Kind::from_tag(kind.tag()), Some(kind));
    }
    assert_eq!(Kind::from_tag("Triangle"), None);
}

#[test]
fn read_asks_for_every_field() {
    use crate::ParseError;

    for kind in [Kind::Circle, Kind::Rectangle] {
        let mut asked = Vec::new();
        let shape = Shape::read(kind, |field| {
            asked.push(field);
            Ok::<_, ParseError>(2.0)
        })
        .unwrap();
        assert_eq!(shape.kind(), kind);
        assert_eq!(asked, kind.fields());
    }

    let missing = Shape::read(Kind::Rectangle, |field| match field {
        "width" => Ok(1.0),
        _ => Err(ParseError::MissingField {
            tag: "Rectangle".into(),
            field,
        }),
    });
    assert!(matches!(
        missing,
        Err(Error::Parse(ParseError::MissingField { field: "height", .. }))
    ));

    let invalid = Shape::read(Kind::Circle, |_| Ok::<_, ParseError>(0.0));
    assert!(matches!(invalid, Err(Error::Validation(_))));
}
