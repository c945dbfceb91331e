//! Recoverable problems reported while generating.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WarningKind {
    #[error("multiple fields of relationships are not supported")]
    MultiColumnRelation,
    #[error("relational model not found: {0}")]
    ModelNotFound(String),
    #[error("relational field not found on {0}")]
    InverseNotFound(String),
    #[error("unknown field kind")]
    UnknownKind,
    #[error("not supported prisma default option: {0}")]
    UnsupportedDefault(String),
}

impl WarningKind {
    /// Whether the whole field was left out, as opposed to just its default.
    pub fn skips_field(&self) -> bool {
        !matches!(self, Self::UnsupportedDefault(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    pub model: String,
    pub field: String,
    pub kind: WarningKind,
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}: {}", self.model, self.field, self.kind)
    }
}

/// Result of generating one field that did not fail the run.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldOutcome<T> {
    Emit(T),
    Skip(WarningKind),
}
