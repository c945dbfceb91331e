//! Python literal formatting.

use std::fmt;

/// A primitive value that has a Python literal form.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValueError {
    #[error("unsupported value kind: {0} (use a call expression instead)")]
    UnsupportedValueKind(&'static str),
    #[error("non-finite number has no literal form")]
    NonFinite,
    #[error("not a numeric value: {0:?}")]
    NotNumeric(String),
}

impl Value {
    pub fn str(s: impl Into<String>) -> Self {
        Self::Str(s.into())
    }

    /// Format as Python source text.
    pub fn format(&self) -> Result<String, ValueError> {
        match self {
            Self::None => Ok("None".to_string()),
            Self::Bool(true) => Ok("True".to_string()),
            Self::Bool(false) => Ok("False".to_string()),
            Self::Int(n) => Ok(n.to_string()),
            Self::Float(n) if n.is_finite() => Ok(n.to_string()),
            Self::Float(_) => Err(ValueError::NonFinite),
            Self::Str(s) => Ok(quote(s)),
        }
    }

    /// Coerce a numeric literal, accepting numbers serialized as strings.
    pub fn numeric(self) -> Result<Self, ValueError> {
        match self {
            Self::Int(_) | Self::Float(_) => Ok(self),
            Self::Str(s) => {
                let text = s.trim();
                if let Ok(n) = text.parse::<i64>() {
                    Ok(Self::Int(n))
                } else if let Some(n) = text.parse::<f64>().ok().filter(|n| n.is_finite()) {
                    Ok(Self::Float(n))
                } else {
                    Err(ValueError::NotNumeric(s))
                }
            }
            other => Err(ValueError::NotNumeric(other.to_string())),
        }
    }
}

impl TryFrom<&serde_json::Value> for Value {
    type Error = ValueError;

    fn try_from(value: &serde_json::Value) -> Result<Self, Self::Error> {
        match value {
            serde_json::Value::Null => Ok(Self::None),
            serde_json::Value::Bool(b) => Ok(Self::Bool(*b)),
            serde_json::Value::Number(n) => match (n.as_i64(), n.as_f64()) {
                (Some(i), _) => Ok(Self::Int(i)),
                (None, Some(f)) => Ok(Self::Float(f)),
                (None, None) => Err(ValueError::NonFinite),
            },
            serde_json::Value::String(s) => Ok(Self::Str(s.clone())),
            serde_json::Value::Array(_) => Err(ValueError::UnsupportedValueKind("array")),
            serde_json::Value::Object(_) => Err(ValueError::UnsupportedValueKind("object")),
        }
    }
}

/// Plain text form, used where the value is shown rather than emitted.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Bool(b) => write!(f, "{}", b),
            Self::Int(n) => write!(f, "{}", n),
            Self::Float(n) => write!(f, "{}", n),
            Self::Str(s) => f.write_str(s),
        }
    }
}

fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_literals() {
        assert_eq!(Value::Bool(true).format().unwrap(), "True");
        assert_eq!(Value::Bool(false).format().unwrap(), "False");
        assert_eq!(Value::Int(42).format().unwrap(), "42");
        assert_eq!(Value::None.format().unwrap(), "None");
        assert_eq!(Value::str("it's").format().unwrap(), r"'it\'s'");
    }

    #[test]
    fn test_format_float() {
        assert_eq!(Value::Float(1.5).format().unwrap(), "1.5");
        assert_eq!(Value::Float(100.0).format().unwrap(), "100");
        assert_eq!(Value::Float(f64::NAN).format(), Err(ValueError::NonFinite));
    }

    #[test]
    fn test_format_escapes_backslash_and_newline() {
        assert_eq!(Value::str("a\\b\nc").format().unwrap(), r"'a\\b\nc'");
    }

    #[test]
    fn test_from_json_rejects_containers() {
        let array = serde_json::json!([1, 2]);
        let object = serde_json::json!({ "a": 1 });
        assert_eq!(
            Value::try_from(&array),
            Err(ValueError::UnsupportedValueKind("array"))
        );
        assert_eq!(
            Value::try_from(&object),
            Err(ValueError::UnsupportedValueKind("object"))
        );
        assert_eq!(Value::try_from(&serde_json::json!(null)), Ok(Value::None));
        assert_eq!(Value::try_from(&serde_json::json!(7)), Ok(Value::Int(7)));
    }

    #[test]
    fn test_numeric_coercion() {
        assert_eq!(Value::str("0").numeric(), Ok(Value::Int(0)));
        assert_eq!(
            Value::str("9007199254740993").numeric(),
            Ok(Value::Int(9007199254740993))
        );
        assert_eq!(Value::str("2.5").numeric(), Ok(Value::Float(2.5)));
        assert_eq!(
            Value::str("abc").numeric(),
            Err(ValueError::NotNumeric("abc".to_string()))
        );
        assert_eq!(
            Value::str("inf").numeric(),
            Err(ValueError::NotNumeric("inf".to_string()))
        );
    }
}
