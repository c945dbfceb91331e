//! Class generation for schema enums and models.

use std::collections::HashSet;

use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::defaults;
use crate::diagnostic::{FieldOutcome, Warning, WarningKind};
use crate::fields::{self, FieldError};
use crate::module::GenerateError;
use crate::naming;
use crate::python::{Arg, Attribute, Call, Class, Doc, Expr, Method};
use crate::relation::{Relation, RelationResolver};
use crate::schema::{Enum, Field, FieldKind, Model, Schema};

/// One model attribute, complete with its docstring sub-lines.
struct GeneratedField {
    attribute: Attribute,
    notes: Vec<String>,
    warning: Option<WarningKind>,
}

pub struct EntityGenerator<'a> {
    config: &'a Config,
    relations: RelationResolver<'a>,
}

impl<'a> EntityGenerator<'a> {
    pub fn new(schema: &'a Schema, config: &'a Config) -> Self {
        Self {
            config,
            relations: RelationResolver::new(schema, config),
        }
    }

    pub fn enum_class(&self, schema_enum: &Enum) -> Class {
        info!(name = %schema_enum.name, "create enum");

        let mut doc = Vec::new();
        if let Some(documentation) = &schema_enum.documentation {
            doc.push(format!("{}\n", documentation));
        }

        let mut class = Class::new(schema_enum.name.as_str(), &["str", "Enum"]);
        for value in &schema_enum.values {
            doc.push(format!("- {}", value.name));
            class
                .attributes
                .push(Attribute::new(value.name.as_str()).value(value.name.as_str()));
        }
        class.doc = Some(Doc::Lines(doc));
        class
    }

    /// Build the class for `model`, appending recoverable problems to `warnings`.
    pub fn model_class(
        &self,
        model: &Model,
        warnings: &mut Vec<Warning>,
    ) -> Result<Class, GenerateError> {
        info!(model = %model.name, "create model");

        let class_name = naming::class_name(&model.name, self.config);
        let mut class = Class::new(class_name.as_str(), &["Model"]);

        let mut doc = Vec::new();
        if let Some(documentation) = &model.documentation {
            doc.push(format!("{}\n", documentation));
        }
        doc.push("fields:".to_string());

        // Tortoise declares the foreign key column itself; a second
        // declaration would clash.
        let consumed: HashSet<&str> = model
            .fields
            .iter()
            .filter_map(|f| f.relation_from_fields.first().map(String::as_str))
            .collect();

        let mut pk_attribute = None;

        for field in model.fields.iter().filter(|f| !consumed.contains(f.name.as_str())) {
            debug!(model = %model.name, field = %field.name, "create field");
            doc.push(doc_line(field));

            let warn_at = |kind: WarningKind| Warning {
                model: model.name.clone(),
                field: field.name.clone(),
                kind,
            };

            match self.field(model, field) {
                Ok(FieldOutcome::Emit(generated)) => {
                    if field.is_id {
                        pk_attribute = Some(generated.attribute.name.clone());
                    }
                    if let Some(kind) = generated.warning {
                        warn!(model = %model.name, field = %field.name, "{}", kind);
                        warnings.push(warn_at(kind));
                    }
                    doc.extend(generated.notes);
                    class.attributes.push(generated.attribute);
                }
                Ok(FieldOutcome::Skip(kind)) => {
                    error!(model = %model.name, field = %field.name, "{}", kind);
                    warnings.push(warn_at(kind));
                }
                Err(source) => {
                    return Err(GenerateError::Field {
                        model: model.name.clone(),
                        field: field.name.clone(),
                        source,
                    });
                }
            }
        }

        let mut meta = Class::new("Meta", &[]);
        meta.attributes
            .push(Attribute::new("table").value(model.table_name()));
        class.classes.push(meta);

        let body = match &pk_attribute {
            Some(pk) => format!("return f'{}<{{self.{}}}>'", class_name, pk),
            None => format!("return f'{}'", class_name),
        };
        class.methods.push(Method {
            name: "__str__".to_string(),
            params: vec![Attribute::new("self")],
            returns: Some("str".to_string()),
            body: vec![body],
            ..Method::default()
        });

        class.doc = Some(Doc::Lines(doc));
        Ok(class)
    }

    fn field(
        &self,
        model: &Model,
        field: &Field,
    ) -> Result<FieldOutcome<GeneratedField>, FieldError> {
        if field.kind == FieldKind::Unknown {
            return Ok(FieldOutcome::Skip(WarningKind::UnknownKind));
        }

        let name = naming::value_name(field.column_name(), self.config);

        let relation = if field.kind == FieldKind::Object {
            match self.relations.resolve(model, field, &name)? {
                FieldOutcome::Skip(kind) => return Ok(FieldOutcome::Skip(kind)),
                FieldOutcome::Emit(Relation::Reverse { annotation }) => {
                    return Ok(FieldOutcome::Emit(GeneratedField {
                        attribute: Attribute::new(name).annotated(annotation),
                        notes: Vec::new(),
                        warning: None,
                    }));
                }
                FieldOutcome::Emit(owning) => Some(owning),
            }
        } else {
            None
        };

        let base = fields::base_type(field);
        let mut constructor = fields::constructor(field)?;
        let mut annotation = None;

        let identity = defaults::identity_args(field, base);
        let mut args = identity.args;

        match relation {
            Some(Relation::Owning {
                constructor: relation_constructor,
                annotation: relation_annotation,
                args: relation_args,
            }) => {
                constructor = relation_constructor;
                annotation = Some(relation_annotation);
                args.extend(relation_args);
            }
            Some(Relation::Reverse { .. }) | None => {}
        }
        if field.kind == FieldKind::Enum {
            args.push(Arg::named("enum_type", Expr::raw(field.type_name.as_str())));
        }
        if let Some(base) = base {
            args.extend(base.fixed_args());
        }

        let default = defaults::default_args(field, base)?;
        args.extend(default.args);
        args.extend(defaults::trailing_args(field));

        let mut notes = Vec::new();
        if let Some(shown) = default.shown.or(identity.shown) {
            notes.push(format!("  - default: {}", shown));
        }
        if let Some(documentation) = &field.documentation {
            notes.push(format!("  - doc: {}", documentation));
        }

        let mut attribute = Attribute::new(name).value(Call::new(constructor, args));
        attribute.annotation = annotation;

        Ok(FieldOutcome::Emit(GeneratedField {
            attribute,
            notes,
            warning: default.warning,
        }))
    }
}

/// `- 🆎 *email [String] 📌`
fn doc_line(field: &Field) -> String {
    let has_default = field.has_default_value || field.default.is_some();
    let marker = if field.is_required && !field.is_list && !has_default {
        " *"
    } else {
        " "
    };
    format!(
        "- {}{}{} [{}{}]{}{}",
        fields::glyph(field),
        marker,
        field.name,
        field.type_name,
        if field.is_required { "" } else { "?" },
        if field.is_id { " 🔑" } else { "" },
        if field.is_unique { " 📌" } else { "" },
    )
}
