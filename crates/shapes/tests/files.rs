use std::fs;

use shapes::{circle, rectangle, Error, ParseError, Shape, ShapeCollection};

fn sample() -> ShapeCollection {
    let mut editor = ShapeCollection::new();
    editor.add(circle(5.0).unwrap());
    editor.add(rectangle(10.0, 20.0).unwrap());
    editor
}

fn dimensions(editor: &ShapeCollection) -> Vec<Shape> {
    editor.iter().copied().collect()
}

#[test]
fn json_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("shapes.json");

    let editor = sample();
    editor.save_json(&path).unwrap();

    let mut loaded = ShapeCollection::new();
    assert_eq!(loaded.load_json(&path).unwrap(), 2);
    assert_eq!(dimensions(&loaded), dimensions(&editor));
    assert_eq!(
        loaded.describe_all(),
        [
            "Рисуем круг с радиусом 5",
            "Рисуем прямоугольник шириной 10 и высотой 20"
        ]
    );
}

#[test]
fn xml_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("shapes.xml");

    let mut editor = sample();
    editor.add(circle(0.125).unwrap());
    editor.add(rectangle(1e-9, 123456789.5).unwrap());
    editor.save_xml(&path).unwrap();

    let mut loaded = ShapeCollection::new();
    loaded.load_xml(&path).unwrap();
    assert_eq!(dimensions(&loaded), dimensions(&editor));
    assert_eq!(loaded.describe_all(), editor.describe_all());
}

#[test]
fn saving_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let editor = sample();

    for (first, second) in [("a.json", "b.json"), ("a.xml", "b.xml")] {
        let (first, second) = (dir.path().join(first), dir.path().join(second));
        if first.extension().unwrap() == "json" {
            editor.save_json(&first).unwrap();
            editor.save_json(&second).unwrap();
        } else {
            editor.save_xml(&first).unwrap();
            editor.save_xml(&second).unwrap();
        }
        assert_eq!(fs::read(&first).unwrap(), fs::read(&second).unwrap());
    }
}

#[test]
fn saving_overwrites() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("shapes.json");
    fs::write(&path, "this is not json and it is quite long, longer than the output").unwrap();

    ShapeCollection::new().save_json(&path).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "[]");
}

#[test]
fn loading_appends() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("shapes.json");
    sample().save_json(&path).unwrap();

    let mut editor = sample();
    editor.load_json(&path).unwrap();
    assert_eq!(editor.len(), 4);

    editor.clear();
    editor.load_json(&path).unwrap();
    assert_eq!(editor.len(), 2);
}

#[test]
fn reads_documented_formats() {
    let dir = tempfile::tempdir().unwrap();
    let json = dir.path().join("shapes.json");
    let xml = dir.path().join("shapes.xml");
    fs::write(
        &json,
        r#"[{"type": "Circle", "radius": 5}, {"type": "Rectangle", "width": 10, "height": 20}]"#,
    )
    .unwrap();
    fs::write(
        &xml,
        "<?xml version='1.0' encoding='utf-8'?>\n<shapes><Circle><radius>5.0</radius></Circle><Rectangle><width>10.0</width><height>20.0</height></Rectangle></shapes>",
    )
    .unwrap();

    let mut from_json = ShapeCollection::new();
    from_json.load_json(&json).unwrap();
    let mut from_xml = ShapeCollection::new();
    from_xml.load_xml(&xml).unwrap();

    assert_eq!(dimensions(&from_json), dimensions(&sample()));
    assert_eq!(dimensions(&from_xml), dimensions(&sample()));
}

#[test]
fn unknown_types_are_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("shapes.json");
    fs::write(
        &path,
        r#"[{"type": "Hexagon", "side": 1}, {"type": "Circle", "radius": 2.5}]"#,
    )
    .unwrap();

    let mut editor = ShapeCollection::new();
    assert_eq!(editor.load_json(&path).unwrap(), 1);
    assert_eq!(editor.describe_all(), ["Рисуем круг с радиусом 2.5"]);
}

#[test]
fn failed_loads_leave_collection_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let cases = [
        ("not_a_list.json", r#"{"not": "a list"}"#),
        ("mismatch.json", r#"[{"type": "Circle", "radius": 1}, 42]"#),
        ("invalid.json", r#"[{"type": "Circle", "radius": 1}, {"type": "Circle", "radius": 0}]"#),
    ];

    for (name, text) in cases {
        let path = dir.path().join(name);
        fs::write(&path, text).unwrap();

        let mut editor = sample();
        let err = editor.load_json(&path).unwrap_err();
        match name {
            "not_a_list.json" => assert!(matches!(err, Error::Parse(ParseError::NotAList))),
            "mismatch.json" => assert!(matches!(err, Error::TypeMismatch(_))),
            _ => assert!(matches!(err, Error::Validation(_))),
        }
        assert_eq!(dimensions(&editor), dimensions(&sample()));
    }
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut editor = ShapeCollection::new();

    let err = editor.load_xml(dir.path().join("nope.xml")).unwrap_err();
    assert!(matches!(err, Error::Io(ref e) if e.kind() == std::io::ErrorKind::NotFound));

    let err = sample()
        .save_json(dir.path().join("no/such/dir/shapes.json"))
        .unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn failed_xml_loads_leave_collection_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let cases = [
        (
            "invalid.xml",
            "<shapes><Circle><radius>1</radius></Circle><Circle><radius>0</radius></Circle></shapes>",
        ),
        (
            "missing.xml",
            "<shapes><Circle><radius>1</radius></Circle><Rectangle><width>1</width></Rectangle></shapes>",
        ),
        (
            "two_roots.xml",
            "<shapes><Circle><radius>1</radius></Circle></shapes><shapes><Circle><radius>2</radius></Circle></shapes>",
        ),
        ("trailing.xml", "<shapes><Circle><radius>1</radius></Circle></shapes>garbage"),
    ];

    for (name, text) in cases {
        let path = dir.path().join(name);
        fs::write(&path, text).unwrap();

        let mut editor = sample();
        let err = editor.load_xml(&path).unwrap_err();
        match name {
            "invalid.xml" => assert!(matches!(err, Error::Validation(_))),
            "missing.xml" => assert!(matches!(
                err,
                Error::Parse(ParseError::MissingField { field: "height", .. })
            )),
            _ => assert!(matches!(err, Error::Parse(ParseError::OutsideRoot(_)))),
        }
        assert_eq!(dimensions(&editor), dimensions(&sample()));
    }
}

#[test]
fn non_utf8_files_are_parse_errors() {
    let dir = tempfile::tempdir().unwrap();
    let json = dir.path().join("shapes.json");
    let xml = dir.path().join("shapes.xml");
    fs::write(&json, b"[\xff]").unwrap();
    fs::write(&xml, b"<shapes>\xff</shapes>").unwrap();

    let mut editor = ShapeCollection::new();
    let err = editor.load_json(&json).unwrap_err();
    assert!(matches!(err, Error::Parse(ParseError::InvalidUtf8(_))));
    let err = editor.load_xml(&xml).unwrap_err();
    assert!(matches!(err, Error::Parse(ParseError::InvalidUtf8(_))));
    assert!(editor.is_empty());
}
