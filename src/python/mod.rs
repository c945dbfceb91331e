//! Python source AST and serializer.

mod class;
mod expr;
mod value;

pub use class::{Attribute, Class, Doc, Method, RenderError};
pub use expr::{Arg, Call, Expr};
pub use value::{Value, ValueError};

/// One indentation level.
pub const INDENT: &str = "    ";
