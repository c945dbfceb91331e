//! Schema document handed over by the Prisma host (DMMF datamodel).

use serde::{Deserialize, Deserializer};

#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("invalid schema document: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Schema {
    #[serde(default)]
    pub enums: Vec<Enum>,
    #[serde(default)]
    pub models: Vec<Model>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Enum {
    pub name: String,
    pub values: Vec<EnumValue>,
    #[serde(default)]
    pub documentation: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumValue {
    pub name: String,
    #[serde(default)]
    pub db_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Model {
    pub name: String,
    #[serde(default)]
    pub db_name: Option<String>,
    pub fields: Vec<Field>,
    #[serde(default)]
    pub documentation: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub name: String,
    pub kind: FieldKind,
    /// Scalar base type, or the enum/model name for enum and relation fields.
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub db_name: Option<String>,
    #[serde(default, deserialize_with = "nullable_list")]
    pub db_names: Vec<String>,
    #[serde(default)]
    pub is_required: bool,
    #[serde(default)]
    pub is_list: bool,
    #[serde(default)]
    pub is_unique: bool,
    #[serde(default)]
    pub is_id: bool,
    #[serde(default)]
    pub is_updated_at: bool,
    #[serde(default)]
    pub has_default_value: bool,
    #[serde(default)]
    pub default: Option<DefaultValue>,
    #[serde(default)]
    pub relation_name: Option<String>,
    #[serde(default, deserialize_with = "nullable_list")]
    pub relation_from_fields: Vec<String>,
    #[serde(default, deserialize_with = "nullable_list")]
    pub relation_to_fields: Vec<String>,
    #[serde(default)]
    pub relation_on_delete: Option<OnDelete>,
    #[serde(default)]
    pub documentation: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Scalar,
    Enum,
    Object,
    Unsupported,
    #[serde(other)]
    Unknown,
}

/// A generator call such as `autoincrement()`, or a plain literal.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum DefaultValue {
    Generator(Generator),
    Literal(serde_json::Value),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Generator {
    pub name: String,
    /// Always present for generator calls, so JSON object literals without
    /// it stay literals.
    pub args: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum OnDelete {
    #[default]
    NoAction,
    Cascade,
    Restrict,
    SetNull,
    SetDefault,
}

/// The full DMMF document or just its datamodel.
#[derive(Deserialize)]
#[serde(untagged)]
enum Document {
    Full { datamodel: Schema },
    Datamodel(Schema),
}

fn nullable_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

impl Schema {
    pub fn from_json(input: &str) -> Result<Self, SchemaError> {
        let schema = match serde_json::from_str(input)? {
            Document::Full { datamodel } => datamodel,
            Document::Datamodel(schema) => schema,
        };
        Ok(schema)
    }

    pub fn model(&self, name: &str) -> Option<&Model> {
        self.models.iter().find(|m| m.name == name)
    }
}

impl Model {
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Physical table name.
    pub fn table_name(&self) -> &str {
        self.db_name.as_deref().unwrap_or(&self.name)
    }
}

impl Field {
    /// Physical column name.
    pub fn column_name(&self) -> &str {
        self.db_names
            .first()
            .map(String::as_str)
            .or(self.db_name.as_deref())
            .unwrap_or(&self.name)
    }

    /// Reverse side of a relation: no physical column from this field's view.
    pub fn is_virtual(&self) -> bool {
        self.relation_from_fields.is_empty() && self.relation_to_fields.is_empty()
    }

    pub fn generator(&self) -> Option<&str> {
        match &self.default {
            Some(DefaultValue::Generator(generator)) => Some(&generator.name),
            _ => None,
        }
    }
}
