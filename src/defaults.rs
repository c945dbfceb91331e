//! Primary keys, defaults and the trailing field arguments.

use crate::diagnostic::WarningKind;
use crate::fields::{BaseType, FieldError};
use crate::python::{Arg, Expr, Value};
use crate::schema::{DefaultValue, Field, FieldKind, Generator};

/// Arguments contributed by one policy step.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DefaultArgs {
    pub args: Vec<Arg>,
    /// Default as listed in the model docstring.
    pub shown: Option<String>,
    pub warning: Option<WarningKind>,
}

/// `pk=True`, plus `generated=False` for integer keys Tortoise would
/// otherwise treat as auto-incrementing.
pub fn identity_args(field: &Field, base: Option<BaseType>) -> DefaultArgs {
    if !field.is_id {
        return DefaultArgs::default();
    }
    let mut out = DefaultArgs {
        args: vec![Arg::named("pk", true)],
        ..DefaultArgs::default()
    };
    if base.is_some_and(BaseType::is_integer) {
        if field.generator() == Some("autoincrement") {
            out.shown = Some("auto_increment()".to_string());
        } else {
            out.args.push(Arg::named("generated", false));
        }
    }
    out
}

/// Arguments derived from the declared default and `@updatedAt`.
pub fn default_args(field: &Field, base: Option<BaseType>) -> Result<DefaultArgs, FieldError> {
    let mut out = match &field.default {
        Some(DefaultValue::Generator(generator)) => generator_args(field, base, generator),
        Some(DefaultValue::Literal(literal)) => literal_args(field, base, literal)?,
        None => DefaultArgs::default(),
    };

    if field.is_updated_at && base == Some(BaseType::DateTime) {
        out.args.push(Arg::named("auto_now", true));
    }
    Ok(out)
}

fn generator_args(field: &Field, base: Option<BaseType>, generator: &Generator) -> DefaultArgs {
    let mut out = DefaultArgs::default();
    match generator.name.as_str() {
        // implied by pk=True; identity_args already shows it
        "autoincrement" if field.is_id => {}
        "autoincrement" => {
            if base.is_some_and(BaseType::is_integer) {
                out.shown = Some("auto_increment()".to_string());
                out.args.push(Arg::named("generated", true));
            }
        }
        "now" => {
            if base == Some(BaseType::DateTime) {
                out.shown = Some("now()".to_string());
                out.args.push(Arg::named("auto_now_add", true));
            }
        }
        "dbgenerated" => out.args.push(Arg::named("generated", true)),
        "uuid" => {
            out.shown = Some("uuid()".to_string());
            out.args.push(Arg::named("default", Expr::raw("uuid.uuid4")));
        }
        "cuid" => {
            out.shown = Some("cuid()".to_string());
            out.warning = Some(WarningKind::UnsupportedDefault(generator.name.clone()));
        }
        other => out.warning = Some(WarningKind::UnsupportedDefault(other.to_string())),
    }
    out
}

fn literal_args(
    field: &Field,
    base: Option<BaseType>,
    literal: &serde_json::Value,
) -> Result<DefaultArgs, FieldError> {
    let value = Value::try_from(literal)?;
    let expr = if field.kind == FieldKind::Enum {
        Expr::raw(format!("{}.{}", field.type_name, value))
    } else if base == Some(BaseType::BigInt) {
        Expr::Literal(value.numeric()?)
    } else {
        Expr::Literal(value)
    };
    let shown = expr.render()?;
    Ok(DefaultArgs {
        args: vec![Arg::named("default", expr)],
        shown: Some(shown),
        warning: None,
    })
}

/// `unique=`, `null=` and `description=`, in that order.
pub fn trailing_args(field: &Field) -> Vec<Arg> {
    let mut args = Vec::new();
    if field.is_unique {
        args.push(Arg::named("unique", true));
    }
    if !field.is_required {
        args.push(Arg::named("null", true));
    }
    if let Some(doc) = &field.documentation {
        args.push(Arg::named("description", doc.as_str()));
    }
    args
}
