//! Circles and rectangles that can be described, and saved to and loaded from json or xml.

mod collection;
mod error;
mod json;
mod shape;
mod store;
pub mod tree;
mod xml;

pub use collection::ShapeCollection;
pub use error::{Error, ParseError, Result, ValidationError};
pub use shape::{circle, rectangle, Circle, Draw, Kind, Rectangle, Shape};
pub use store::{Index, Store};
pub use xml::ROOT;
