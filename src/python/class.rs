//! Class declarations and their rendering.
//!
//! Rendering is line based: a class renders its header, then every body line
//! indented one level. Nested classes render themselves first and are then
//! indented as part of the parent body, so depth accumulates naturally.

use super::expr::Expr;
use super::value::ValueError;
use super::INDENT;

#[derive(Debug, Clone, PartialEq)]
pub enum Doc {
    Text(String),
    Lines(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Class {
    pub name: String,
    pub bases: Vec<String>,
    pub doc: Option<Doc>,
    pub attributes: Vec<Attribute>,
    pub classes: Vec<Class>,
    pub methods: Vec<Method>,
}

/// `name[: annotation][ = value]`, also used for method parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub name: String,
    pub annotation: Option<String>,
    pub value: Option<Expr>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Method {
    pub name: String,
    pub params: Vec<Attribute>,
    pub is_async: bool,
    pub returns: Option<String>,
    /// Empty renders as `pass`.
    pub body: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("class `{class}` attribute `{attribute}`: {source}")]
pub struct RenderError {
    pub class: String,
    pub attribute: String,
    pub source: ValueError,
}

impl Doc {
    fn lines(&self) -> Vec<String> {
        let text = match self {
            Self::Text(text) => text.clone(),
            Self::Lines(lines) => lines.join("\n"),
        };
        text.split('\n').map(str::to_string).collect()
    }
}

impl Attribute {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            annotation: None,
            value: None,
        }
    }

    pub fn annotated(mut self, annotation: impl Into<String>) -> Self {
        self.annotation = Some(annotation.into());
        self
    }

    pub fn value(mut self, value: impl Into<Expr>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn render(&self) -> Result<String, ValueError> {
        let mut text = self.name.clone();
        if let Some(annotation) = &self.annotation {
            text.push_str(": ");
            text.push_str(annotation);
        }
        if let Some(value) = &self.value {
            text.push_str(" = ");
            text.push_str(&value.render()?);
        }
        Ok(text)
    }
}

impl Method {
    fn lines(&self) -> Result<Vec<String>, ValueError> {
        let params = self
            .params
            .iter()
            .map(Attribute::render)
            .collect::<Result<Vec<_>, _>>()?;

        let mut header = String::new();
        if self.is_async {
            header.push_str("async ");
        }
        header.push_str(&format!("def {}({})", self.name, params.join(", ")));
        if let Some(returns) = &self.returns {
            header.push_str(" -> ");
            header.push_str(returns);
        }
        header.push(':');

        let mut lines = vec![header];
        if self.body.is_empty() {
            lines.push(format!("{}pass", INDENT));
        } else {
            lines.extend(self.body.iter().map(|line| format!("{}{}", INDENT, line)));
        }
        Ok(lines)
    }
}

impl Class {
    pub fn new(name: impl Into<String>, bases: &[&str]) -> Self {
        Self {
            name: name.into(),
            bases: bases.iter().map(|b| b.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn render(&self) -> Result<String, RenderError> {
        Ok(self.lines()?.join("\n"))
    }

    fn lines(&self) -> Result<Vec<String>, RenderError> {
        let mut body: Vec<String> = Vec::new();

        if let Some(doc) = &self.doc {
            body.push("'''".to_string());
            body.extend(doc.lines());
            body.push("'''".to_string());
        }

        if self.attributes.is_empty() && self.methods.is_empty() && self.classes.is_empty() {
            body.push("pass".to_string());
        }

        for attribute in &self.attributes {
            body.push(attribute.render().map_err(|source| RenderError {
                class: self.name.clone(),
                attribute: attribute.name.clone(),
                source,
            })?);
        }

        for class in &self.classes {
            body.push(String::new());
            body.extend(class.lines()?);
        }

        for method in &self.methods {
            body.push(String::new());
            body.extend(method.lines().map_err(|source| RenderError {
                class: self.name.clone(),
                attribute: method.name.clone(),
                source,
            })?);
        }

        let mut lines = Vec::with_capacity(body.len() + 1);
        lines.push(self.header());
        lines.extend(body.into_iter().map(|line| format!("{}{}", INDENT, line)));
        Ok(lines)
    }

    fn header(&self) -> String {
        if self.bases.is_empty() {
            format!("class {}:", self.name)
        } else {
            format!("class {}({}):", self.name, self.bases.join(","))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::python::{Arg, Call, Value};

    #[test]
    fn test_text_doc_indents_every_line() {
        let mut class = Class::new("Post", &["Model"]);
        class.doc = Some(Doc::Text("A blog post.\n\nPublished once.".to_string()));
        class.attributes.push(Attribute::new("title").value(Value::str("x")));
        let expected = [
            "class Post(Model):",
            "    '''",
            "    A blog post.",
            "    ",
            "    Published once.",
            "    '''",
            "    title = 'x'",
        ]
        .join("\n");
        assert_eq!(class.render().unwrap(), expected);
    }

    #[test]
    fn test_empty_class_renders_pass() {
        let class = Class::new("Post", &[]);
        assert_eq!(class.render().unwrap(), "class Post:\n    pass");
    }

    #[test]
    fn test_bases_joined_without_space() {
        let class = Class::new("Role", &["str", "Enum"]);
        assert_eq!(class.render().unwrap(), "class Role(str,Enum):\n    pass");
    }

    #[test]
    fn test_doc_lines_share_body_indent() {
        let mut class = Class::new("User", &["Model"]);
        class.doc = Some(Doc::Lines(vec![
            "model comment\n".to_string(),
            "fields:".to_string(),
        ]));
        class.attributes.push(Attribute::new("name").value(Call::new(
            "fields.CharField",
            vec![Arg::named("max_length", Value::Int(255))],
        )));

        let expected = [
            "class User(Model):",
            "    '''",
            "    model comment",
            "    ",
            "    fields:",
            "    '''",
            "    name = fields.CharField(max_length=255)",
        ]
        .join("\n");
        assert_eq!(class.render().unwrap(), expected);
    }

    #[test]
    fn test_attribute_forms() {
        assert_eq!(Attribute::new("id").render().unwrap(), "id");
        assert_eq!(
            Attribute::new("posts")
                .annotated("fields.ReverseRelation['Post']")
                .render()
                .unwrap(),
            "posts: fields.ReverseRelation['Post']"
        );
        assert_eq!(
            Attribute::new("table").value("User").render().unwrap(),
            "table = 'User'"
        );
    }

    #[test]
    fn test_nested_classes_accumulate_indent() {
        let mut inner = Class::new("Inner", &[]);
        inner.attributes.push(Attribute::new("x").value(Value::Int(1)));
        let mut middle = Class::new("Middle", &[]);
        middle.classes.push(inner);
        let mut outer = Class::new("Outer", &[]);
        outer.classes.push(middle);

        let expected = [
            "class Outer:",
            "    ",
            "    class Middle:",
            "        ",
            "        class Inner:",
            "            x = 1",
        ]
        .join("\n");
        assert_eq!(outer.render().unwrap(), expected);
    }

    #[test]
    fn test_methods() {
        let mut class = Class::new("Group", &["Model"]);
        class.methods.push(Method {
            name: "__str__".to_string(),
            params: vec![Attribute::new("self")],
            returns: Some("str".to_string()),
            body: vec!["return f'Group'".to_string()],
            ..Method::default()
        });
        class.methods.push(Method {
            name: "fetch".to_string(),
            params: vec![Attribute::new("self"), Attribute::new("limit").annotated("int")],
            is_async: true,
            ..Method::default()
        });

        let expected = [
            "class Group(Model):",
            "    ",
            "    def __str__(self) -> str:",
            "        return f'Group'",
            "    ",
            "    async def fetch(self, limit: int):",
            "        pass",
        ]
        .join("\n");
        assert_eq!(class.render().unwrap(), expected);
    }

    #[test]
    fn test_render_error_names_attribute() {
        let mut class = Class::new("Item", &["Model"]);
        class
            .attributes
            .push(Attribute::new("weight").value(Value::Float(f64::NAN)));
        let err = class.render().unwrap_err();
        assert_eq!(err.class, "Item");
        assert_eq!(err.attribute, "weight");
        assert_eq!(err.source, ValueError::NonFinite);
    }
}
