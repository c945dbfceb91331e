//! Schema field -> Tortoise field constructor mapping.

use crate::python::{Arg, Value, ValueError};
use crate::schema::{Field, FieldKind};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FieldError {
    #[error("unsupported field kind")]
    UnsupportedFieldKind,
    #[error("unknown base type: {0}")]
    UnknownBaseType(String),
    #[error("list fields are not supported by tortoise orm")]
    UnsupportedListField,
    #[error("relation source field {0} not found on the model")]
    MissingSourceField(String),
    #[error(transparent)]
    Value(#[from] ValueError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseType {
    String,
    Boolean,
    Int,
    BigInt,
    Float,
    Decimal,
    DateTime,
    Json,
    Bytes,
}

impl BaseType {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "String" => Some(Self::String),
            "Boolean" => Some(Self::Boolean),
            "Int" => Some(Self::Int),
            "BigInt" => Some(Self::BigInt),
            "Float" => Some(Self::Float),
            "Decimal" => Some(Self::Decimal),
            "DateTime" => Some(Self::DateTime),
            "Json" => Some(Self::Json),
            "Bytes" => Some(Self::Bytes),
            _ => None,
        }
    }

    pub fn constructor(self) -> &'static str {
        match self {
            Self::String => "fields.CharField",
            Self::Boolean => "fields.BooleanField",
            Self::Int => "fields.IntField",
            Self::BigInt => "fields.BigIntField",
            Self::Float => "fields.FloatField",
            Self::Decimal => "fields.DecimalField",
            Self::DateTime => "fields.DatetimeField",
            Self::Json => "fields.JSONField",
            Self::Bytes => "fields.BinaryField",
        }
    }

    pub fn is_integer(self) -> bool {
        matches!(self, Self::Int | Self::BigInt)
    }

    /// Arguments every field of this type carries.
    pub fn fixed_args(self) -> Vec<Arg> {
        match self {
            Self::String => vec![Arg::named("max_length", Value::Int(255))],
            Self::Decimal => vec![
                Arg::named("max_digits", Value::Int(12)),
                Arg::named("decimal_places", Value::Int(2)),
            ],
            _ => vec![],
        }
    }
}

/// Base type of a scalar field; `None` for enum and relation fields.
pub fn base_type(field: &Field) -> Option<BaseType> {
    match field.kind {
        FieldKind::Scalar => BaseType::from_name(&field.type_name),
        _ => None,
    }
}

/// Constructor name for a physical field.
///
/// Relation fields map to `fields.ForeignKeyField` here; the relation
/// resolver decides between that and `fields.OneToOneField`. Virtual
/// relation fields never reach this point.
pub fn constructor(field: &Field) -> Result<&'static str, FieldError> {
    if field.is_list {
        return Err(FieldError::UnsupportedListField);
    }
    match field.kind {
        FieldKind::Unsupported | FieldKind::Unknown => Err(FieldError::UnsupportedFieldKind),
        FieldKind::Enum => Ok("fields.CharEnumField"),
        FieldKind::Object => Ok("fields.ForeignKeyField"),
        FieldKind::Scalar => BaseType::from_name(&field.type_name)
            .map(BaseType::constructor)
            .ok_or_else(|| FieldError::UnknownBaseType(field.type_name.clone())),
    }
}

/// Leading glyph of a field's docstring line.
pub fn glyph(field: &Field) -> &'static str {
    match base_type(field) {
        Some(BaseType::Int | BaseType::BigInt | BaseType::Float | BaseType::Decimal) => "🔟",
        Some(BaseType::Boolean) => "✅",
        Some(BaseType::String) => "🆎",
        Some(BaseType::DateTime) => "🕑",
        Some(BaseType::Bytes) => "💾",
        Some(BaseType::Json) | None => "🪢",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Schema;

    fn fields(json: &str) -> Vec<Field> {
        let input = format!(r#"{{ "models": [{{ "name": "M", "fields": [{}] }}] }}"#, json);
        Schema::from_json(&input).unwrap().models.remove(0).fields
    }

    #[test]
    fn test_scalar_constructors() {
        let cases = [
            ("String", "fields.CharField"),
            ("Boolean", "fields.BooleanField"),
            ("Int", "fields.IntField"),
            ("BigInt", "fields.BigIntField"),
            ("Float", "fields.FloatField"),
            ("Decimal", "fields.DecimalField"),
            ("DateTime", "fields.DatetimeField"),
            ("Json", "fields.JSONField"),
            ("Bytes", "fields.BinaryField"),
        ];
        for (ty, expected) in cases {
            let json = format!(r#"{{ "name": "f", "kind": "scalar", "type": "{}" }}"#, ty);
            assert_eq!(constructor(&fields(&json)[0]), Ok(expected), "{}", ty);
        }
    }

    #[test]
    fn test_enum_and_relation_constructors() {
        let fields = fields(
            r#"{ "name": "role", "kind": "enum", "type": "Role" },
               { "name": "user", "kind": "object", "type": "User" }"#,
        );
        assert_eq!(constructor(&fields[0]), Ok("fields.CharEnumField"));
        assert_eq!(constructor(&fields[1]), Ok("fields.ForeignKeyField"));
    }

    #[test]
    fn test_constructor_errors() {
        let fields = fields(
            r#"{ "name": "geom", "kind": "unsupported", "type": "Unsupported" },
               { "name": "tags", "kind": "scalar", "type": "String", "isList": true },
               { "name": "at", "kind": "scalar", "type": "Time" }"#,
        );
        assert_eq!(constructor(&fields[0]), Err(FieldError::UnsupportedFieldKind));
        assert_eq!(constructor(&fields[1]), Err(FieldError::UnsupportedListField));
        assert_eq!(
            constructor(&fields[2]),
            Err(FieldError::UnknownBaseType("Time".to_string()))
        );
    }

    #[test]
    fn test_fixed_args() {
        assert_eq!(
            BaseType::String.fixed_args(),
            vec![Arg::named("max_length", Value::Int(255))]
        );
        assert_eq!(BaseType::Decimal.fixed_args().len(), 2);
        assert!(BaseType::Int.fixed_args().is_empty());
    }

    #[test]
    fn test_glyphs() {
        let fields = fields(
            r#"{ "name": "a", "kind": "scalar", "type": "Decimal" },
               { "name": "b", "kind": "scalar", "type": "String" },
               { "name": "c", "kind": "enum", "type": "Role" }"#,
        );
        assert_eq!(glyph(&fields[0]), "🔟");
        assert_eq!(glyph(&fields[1]), "🆎");
        assert_eq!(glyph(&fields[2]), "🪢");
    }
}
