use crate::Kind;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("ожидалась фигура, получено `{0}`")]
    TypeMismatch(String),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("не удалось записать xml")]
    Encode(#[source] quick_xml::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Errors caused by the shapes themselves, as opposed to the files they came from.
    pub fn is_domain(&self) -> bool {
        matches!(self, Error::Validation(_) | Error::TypeMismatch(_))
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("{}", must_be_positive(.field, .value))]
    InvalidDimension {
        kind: Kind,
        field: &'static str,
        value: f64,
    },
}

fn must_be_positive(field: &str, value: &f64) -> String {
    match field {
        "radius" => format!("Радиус должен быть положительным, получено {}", value),
        "width" => format!("Ширина должна быть положительной, получено {}", value),
        "height" => format!("Высота должна быть положительной, получено {}", value),
        other => format!("`{}` должно быть положительным, получено {}", other, value),
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ParseError {
    #[error("некорректный json")]
    Json(#[from] serde_json::Error),
    #[error("некорректный xml")]
    Xml(#[from] quick_xml::Error),
    #[error("файл не в кодировке utf-8")]
    InvalidUtf8(#[from] std::str::Utf8Error),
    #[error("ожидался список фигур")]
    NotAList,
    #[error("в документе нет корневого элемента")]
    NoRoot,
    #[error("элемент `{0}` не закрыт")]
    Unclosed(String),
    #[error("лишнее содержимое вне корневого элемента: {0:?}")]
    OutsideRoot(String),
    #[error("у `{tag}` нет поля `{field}`")]
    MissingField { tag: String, field: &'static str },
    #[error("поле `{field}` у `{tag}` не число: {text:?}")]
    NotANumber {
        tag: String,
        field: &'static str,
        text: String,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[test]
fn domain_errors() {
    let invalid = ValidationError::InvalidDimension {
        kind: Kind::Circle,
        field: "radius",
        value: 0.0,
    };
    assert_eq!(
        invalid.to_string(),
        "Радиус должен быть положительным, получено 0"
    );
    assert!(Error::from(invalid).is_domain());
    assert!(Error::TypeMismatch("42".into()).is_domain());
    assert!(!Error::from(ParseError::NotAList).is_domain());
}

#[test]
fn russian_messages() {
    let height = ValidationError::InvalidDimension {
        kind: Kind::Rectangle,
        field: "height",
        value: -2.5,
    };
    assert_eq!(
        height.to_string(),
        "Высота должна быть положительной, получено -2.5"
    );
    assert_eq!(
        Error::TypeMismatch("42".into()).to_string(),
        "ожидалась фигура, получено `42`"
    );
}
