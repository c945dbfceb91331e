//! Naming conventions applied to generated identifiers.

use heck::{ToPascalCase, ToShoutySnakeCase, ToSnakeCase};

use crate::config::Config;

/// Python class name for a schema model name.
pub fn class_name(name: &str, config: &Config) -> String {
    if config.class_name_pascal_case {
        name.to_pascal_case()
    } else {
        name.to_string()
    }
}

/// Python attribute name for a schema field or column name.
pub fn value_name(name: &str, config: &Config) -> String {
    if config.value_name_snake_case {
        snake_case(name)
    } else {
        name.to_string()
    }
}

/// Reverse accessor name Tortoise installs on the related model.
pub fn related_name(model: &str, attribute: &str) -> String {
    snake_case(&format!("{}_{}", model, attribute))
}

/// heck snake_case, additionally splitting letters from digits (`is18` -> `is_18`).
fn snake_case(name: &str) -> String {
    let snake = name.to_snake_case();
    let mut out = String::with_capacity(snake.len() + 2);
    let mut prev: Option<char> = None;
    for c in snake.chars() {
        if let Some(p) = prev {
            if (p.is_alphabetic() && c.is_ascii_digit()) || (p.is_ascii_digit() && c.is_alphabetic()) {
                out.push('_');
            }
        }
        out.push(c);
        prev = Some(c);
    }
    out
}

/// `SetNull` -> `SET_NULL`
pub fn constant_name(name: &str) -> String {
    name.to_shouty_snake_case()
}
