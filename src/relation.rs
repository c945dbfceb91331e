//! Relation resolution.
//!
//! Prisma declares a relation on both models: the owning side lists the
//! foreign key column in `relationFromFields`, the other side is virtual. The
//! virtual side's list flag decides between a foreign key and a one-to-one.

use crate::config::Config;
use crate::diagnostic::{FieldOutcome, WarningKind};
use crate::fields::FieldError;
use crate::naming;
use crate::python::{Arg, Expr, Value};
use crate::schema::{Field, FieldKind, Model, OnDelete, Schema};

#[derive(Debug, Clone, PartialEq)]
pub enum Relation {
    /// Virtual side: a type annotation and no column.
    Reverse { annotation: String },
    Owning {
        constructor: &'static str,
        annotation: String,
        args: Vec<Arg>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cardinality {
    OneToOne,
    Many,
}

pub struct RelationResolver<'a> {
    schema: &'a Schema,
    config: &'a Config,
}

impl<'a> RelationResolver<'a> {
    pub fn new(schema: &'a Schema, config: &'a Config) -> Self {
        Self { schema, config }
    }

    /// Resolve `field` of `model`, emitted as attribute `attribute`.
    pub fn resolve(
        &self,
        model: &Model,
        field: &Field,
        attribute: &str,
    ) -> Result<FieldOutcome<Relation>, FieldError> {
        if field.relation_from_fields.len() > 1 || field.relation_to_fields.len() > 1 {
            return Ok(FieldOutcome::Skip(WarningKind::MultiColumnRelation));
        }

        let target_class = naming::class_name(&field.type_name, self.config);
        let quoted_target = Value::str(target_class.as_str()).format()?;

        let Some(target) = self.schema.model(&field.type_name) else {
            return Ok(FieldOutcome::Skip(WarningKind::ModelNotFound(
                field.type_name.clone(),
            )));
        };

        if field.is_virtual() {
            let annotation = if field.is_list {
                format!("fields.ReverseRelation[{}]", quoted_target)
            } else {
                format!("fields.BackwardOneToOneRelation[{}]", quoted_target)
            };
            return Ok(FieldOutcome::Emit(Relation::Reverse { annotation }));
        }

        let Some(inverse) = find_inverse(model, field, target) else {
            return Ok(FieldOutcome::Skip(WarningKind::InverseNotFound(
                target.name.clone(),
            )));
        };
        let cardinality = if inverse.is_list {
            Cardinality::Many
        } else {
            Cardinality::OneToOne
        };

        // Looked up by schema name; `@map` on the source field only changes
        // its column, which is what gets emitted.
        let source_name = field
            .relation_from_fields
            .first()
            .cloned()
            .unwrap_or_default();
        let source = model
            .field(&source_name)
            .ok_or(FieldError::MissingSourceField(source_name))?;

        let mut args = vec![
            Arg::named("source_field", source.column_name()),
            Arg::named(
                "model_name",
                format!("{}.{}", self.config.app_name, target_class),
            ),
        ];
        if let Some(to_field) = field.relation_to_fields.first() {
            args.push(Arg::named("to_field", to_field.as_str()));
        }
        args.push(Arg::named(
            "related_name",
            naming::related_name(&model.name, attribute),
        ));
        if let Some(policy) = field.relation_on_delete.filter(|p| *p != OnDelete::NoAction) {
            args.push(Arg::named(
                "on_delete",
                Expr::raw(format!("fields.{}", on_delete_constant(policy))),
            ));
        }

        let union = format!("typing.Union[{}, typing.Any]", quoted_target);
        let relation = match cardinality {
            Cardinality::Many => Relation::Owning {
                constructor: "fields.ForeignKeyField",
                annotation: format!("fields.ForeignKeyRelation[{}]", union),
                args,
            },
            Cardinality::OneToOne => Relation::Owning {
                constructor: "fields.OneToOneField",
                annotation: format!("fields.OneToOneRelation[{}]", union),
                args,
            },
        };
        Ok(FieldOutcome::Emit(relation))
    }
}

/// The virtual field on `target` pointing back at `model`. A candidate with
/// the same relation name wins over the first match.
fn find_inverse<'m>(model: &Model, field: &Field, target: &'m Model) -> Option<&'m Field> {
    let mut candidates = target.fields.iter().filter(|f| {
        f.kind == FieldKind::Object && f.type_name == model.name && f.is_virtual()
    });
    let first = candidates.clone().next();
    match &field.relation_name {
        Some(name) => candidates
            .find(|f| f.relation_name.as_ref() == Some(name))
            .or(first),
        None => first,
    }
}

fn on_delete_constant(policy: OnDelete) -> String {
    let name = match policy {
        OnDelete::NoAction => "NoAction",
        OnDelete::Cascade => "Cascade",
        OnDelete::Restrict => "Restrict",
        OnDelete::SetNull => "SetNull",
        OnDelete::SetDefault => "SetDefault",
    };
    naming::constant_name(name)
}
