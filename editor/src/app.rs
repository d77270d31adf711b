use std::io::Write;

use anyhow::Result;
use shapes::ShapeCollection;

use crate::config::Config;

pub struct App<W> {
    config: Config,
    out: W,
}

impl<W: Write> App<W> {
    pub fn new(config: Config, out: W) -> Self {
        Self { config, out }
    }

    /// Builds the configured shapes, draws them, saves them in both formats
    /// and loads each file back into a fresh editor.
    pub fn run(&mut self) -> Result<()> {
        let mut editor = ShapeCollection::new();
        for shape in &self.config.shapes {
            editor.add(shape.build().map_err(shapes::Error::from)?);
        }
        editor.draw_all(&mut self.out)?;

        editor.save_json(&self.config.json)?;
        writeln!(self.out, "Фигуры сохранены в {}", self.config.json.display())?;

        editor.save_xml(&self.config.xml)?;
        writeln!(self.out, "Фигуры сохранены в {}", self.config.xml.display())?;

        let mut from_json = ShapeCollection::new();
        from_json.load_json(&self.config.json)?;
        writeln!(self.out, "\nЗагруженные фигуры из JSON:")?;
        from_json.draw_all(&mut self.out)?;

        let mut from_xml = ShapeCollection::new();
        from_xml.load_xml(&self.config.xml)?;
        writeln!(self.out, "\nЗагруженные фигуры из XML:")?;
        from_xml.draw_all(&mut self.out)?;

        Ok(())
    }
}

#[cfg(test)]
fn config_in(dir: &std::path::Path) -> Config {
    Config {
        json: dir.join("shapes.json"),
        xml: dir.join("shapes.xml"),
        ..Config::default()
    }
}

#[test]
fn demo_sequence() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());
    let (json, xml) = (config.json.clone(), config.xml.clone());

    let mut out = Vec::new();
    App::new(config, &mut out).run().unwrap();

    let expected = format!(
        "Рисуем круг с радиусом 5\n\
         Рисуем прямоугольник шириной 10 и высотой 20\n\
         Фигуры сохранены в {}\n\
         Фигуры сохранены в {}\n\
         \n\
         Загруженные фигуры из JSON:\n\
         Рисуем круг с радиусом 5\n\
         Рисуем прямоугольник шириной 10 и высотой 20\n\
         \n\
         Загруженные фигуры из XML:\n\
         Рисуем круг с радиусом 5\n\
         Рисуем прямоугольник шириной 10 и высотой 20\n",
        json.display(),
        xml.display()
    );
    assert_eq!(String::from_utf8(out).unwrap(), expected);
}

#[test]
fn invalid_shape_is_a_domain_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = config_in(dir.path());
    config.shapes.push(crate::config::ShapeConfig::Circle { radius: 0.0 });

    let err = App::new(config, std::io::sink()).run().unwrap_err();
    let err = err.downcast_ref::<shapes::Error>().unwrap();
    assert!(err.is_domain());
    // nothing was written before the failure
    assert!(!dir.path().join("shapes.json").exists());
}
