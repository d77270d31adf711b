use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use shapes::{Shape, ValidationError};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub json: PathBuf,
    pub xml: PathBuf,
    pub shapes: Vec<ShapeConfig>,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum ShapeConfig {
    Circle { radius: f64 },
    Rectangle { width: f64, height: f64 },
}

impl ShapeConfig {
    pub fn build(self) -> Result<Shape, ValidationError> {
        match self {
            ShapeConfig::Circle { radius } => shapes::circle(radius),
            ShapeConfig::Rectangle { width, height } => shapes::rectangle(width, height),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            json: PathBuf::from("shapes.json"),
            xml: PathBuf::from("shapes.xml"),
            shapes: vec![
                ShapeConfig::Circle { radius: 5.0 },
                ShapeConfig::Rectangle {
                    width: 10.0,
                    height: 20.0,
                },
            ],
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("invalid config {}", path.display()))
    }
}

#[test]
fn defaults() {
    let config: Config = toml::from_str("").unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn shapes_table() {
    let config: Config = toml::from_str(
        r#"
        json = "out/a.json"

        [[shapes]]
        type = "Rectangle"
        width = 1.5
        height = 2.0

        [[shapes]]
        type = "Circle"
        radius = 3.0
        "#,
    )
    .unwrap();

    assert_eq!(config.json, PathBuf::from("out/a.json"));
    assert_eq!(config.xml, PathBuf::from("shapes.xml"));
    assert_eq!(
        config.shapes,
        [
            ShapeConfig::Rectangle {
                width: 1.5,
                height: 2.0
            },
            ShapeConfig::Circle { radius: 3.0 },
        ]
    );
    assert!(ShapeConfig::Circle { radius: -3.0 }.build().is_err());
}

#[test]
fn load_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("editor.toml");
    std::fs::write(&path, "xml = \"b.xml\"\n").unwrap();

    assert_eq!(Config::load(&path).unwrap().xml, PathBuf::from("b.xml"));
    assert!(Config::load(&dir.path().join("missing.toml")).is_err());
}
