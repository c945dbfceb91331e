//! Assembles the generated classes into one Python module.

use tracing::info;

use crate::config::Config;
use crate::diagnostic::Warning;
use crate::fields::FieldError;
use crate::model::EntityGenerator;
use crate::python::{Class, RenderError, Value};
use crate::schema::Schema;

/// A fatal problem; the whole run is aborted.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GenerateError {
    #[error("model `{model}` field `{field}`: {source}")]
    Field {
        model: String,
        field: String,
        source: FieldError,
    },
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Result of one generation run.
#[derive(Debug, Clone, PartialEq)]
pub struct Generated {
    pub source: String,
    /// Class names in declaration order, as listed in `__all__`.
    pub exports: Vec<String>,
    pub warnings: Vec<Warning>,
}

pub fn header() -> String {
    format!(
        "__doc__ = '''
This file is generated by `{} ({})`,
Please do not modify directly.
'''

import typing
import uuid
from enum import Enum
from tortoise import fields
from tortoise.models import Model

",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
    )
}

/// Generate the models module for `schema`.
///
/// Recoverable problems are collected in [`Generated::warnings`]; the first
/// fatal one aborts the run.
pub fn generate(schema: &Schema, config: &Config) -> Result<Generated, GenerateError> {
    let generator = EntityGenerator::new(schema, config);
    let mut warnings = Vec::new();

    let mut classes: Vec<Class> = schema
        .enums
        .iter()
        .map(|e| generator.enum_class(e))
        .collect();
    for model in &schema.models {
        classes.push(generator.model_class(model, &mut warnings)?);
    }

    let exports: Vec<String> = classes.iter().map(|c| c.name.clone()).collect();

    let mut parts = vec![header()];
    for class in &classes {
        parts.push(format!("{}\n", class.render()?));
    }
    parts.push(exports_line(&exports));

    let mut source = parts.join("\n");
    source.push('\n');

    info!(
        classes = classes.len(),
        warnings = warnings.len(),
        "generated models module"
    );

    Ok(Generated {
        source,
        exports,
        warnings,
    })
}

fn exports_line(names: &[String]) -> String {
    let quoted: Vec<String> = names
        .iter()
        .map(|name| Value::str(name.as_str()).format().unwrap_or_else(|_| name.clone()))
        .collect();
    format!("__all__ = [{}]", quoted.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::WarningKind;

    #[test]
    fn test_empty_schema() {
        let generated = generate(&Schema::default(), &Config::default()).unwrap();
        assert_eq!(generated.source, format!("{}\n__all__ = []\n", header()));
        assert!(generated.exports.is_empty());
    }

    #[test]
    fn test_enums_before_models() {
        let schema = Schema::from_json(
            r#"{ "models": [{ "name": "Post", "fields": [] }],
                 "enums": [{ "name": "Role", "values": [{ "name": "USER" }] }] }"#,
        )
        .unwrap();
        let generated = generate(&schema, &Config::default()).unwrap();
        assert_eq!(generated.exports, vec!["Role", "Post"]);
        assert!(generated.source.ends_with("__all__ = ['Role', 'Post']\n"));

        let role = generated.source.find("class Role(str,Enum):").unwrap();
        let post = generated.source.find("class Post(Model):").unwrap();
        assert!(role < post);
        assert!(generated.source.contains("    USER = 'USER'\n\nclass Post(Model):"));
    }

    #[test]
    fn test_deterministic() {
        let input = r#"{ "models": [
            { "name": "User", "fields": [
                { "name": "id", "kind": "scalar", "type": "Int", "isId": true, "isRequired": true },
                { "name": "posts", "kind": "object", "type": "Post", "isList": true }
            ] },
            { "name": "Post", "fields": [
                { "name": "user", "kind": "object", "type": "User",
                  "relationFromFields": ["userId"], "relationToFields": ["id"] },
                { "name": "userId", "kind": "scalar", "type": "Int" }
            ] }
        ] }"#;
        let schema = Schema::from_json(input).unwrap();
        let config = Config::default();
        let first = generate(&schema, &config).unwrap();
        let second = generate(&schema, &config).unwrap();
        assert_eq!(first.source, second.source);
    }

    #[test]
    fn test_skips_do_not_abort_other_models() {
        let schema = Schema::from_json(
            r#"{ "models": [
                { "name": "Broken", "fields": [
                    { "name": "ghost", "kind": "object", "type": "Nowhere",
                      "relationFromFields": ["ghostId"], "relationToFields": ["id"] },
                    { "name": "ghostId", "kind": "scalar", "type": "Int" }
                ] },
                { "name": "Fine", "fields": [
                    { "name": "id", "kind": "scalar", "type": "Int", "isId": true, "isRequired": true }
                ] }
            ] }"#,
        )
        .unwrap();
        let generated = generate(&schema, &Config::default()).unwrap();
        assert_eq!(generated.exports, vec!["Broken", "Fine"]);
        assert_eq!(
            generated.warnings[0].kind,
            WarningKind::ModelNotFound("Nowhere".to_string())
        );
        assert!(generated.source.contains("class Fine(Model):"));
    }

    #[test]
    fn test_fatal_error_aborts() {
        let schema = Schema::from_json(
            r#"{ "models": [{ "name": "Odd", "fields": [
                { "name": "when", "kind": "scalar", "type": "Instant", "isRequired": true }
            ] }] }"#,
        )
        .unwrap();
        let err = generate(&schema, &Config::default()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "model `Odd` field `when`: unknown base type: Instant"
        );
    }
}
