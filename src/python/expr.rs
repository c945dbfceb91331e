use super::value::{Value, ValueError};

/// Right-hand side of an attribute or a call argument.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Emitted through the literal formatter.
    Literal(Value),
    /// Emitted verbatim: a name or constant already in scope.
    Raw(String),
    Call(Call),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub callee: String,
    pub args: Vec<Arg>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Arg {
    pub name: Option<String>,
    pub value: Expr,
}

impl Expr {
    pub fn raw(text: impl Into<String>) -> Self {
        Self::Raw(text.into())
    }

    pub fn render(&self) -> Result<String, ValueError> {
        match self {
            Self::Literal(value) => value.format(),
            Self::Raw(text) => Ok(text.clone()),
            Self::Call(call) => call.render(),
        }
    }
}

impl From<Value> for Expr {
    fn from(value: Value) -> Self {
        Self::Literal(value)
    }
}

impl From<Call> for Expr {
    fn from(call: Call) -> Self {
        Self::Call(call)
    }
}

impl From<bool> for Expr {
    fn from(b: bool) -> Self {
        Self::Literal(Value::Bool(b))
    }
}

impl From<i64> for Expr {
    fn from(n: i64) -> Self {
        Self::Literal(Value::Int(n))
    }
}

impl From<&str> for Expr {
    fn from(s: &str) -> Self {
        Self::Literal(Value::str(s))
    }
}

impl From<String> for Expr {
    fn from(s: String) -> Self {
        Self::Literal(Value::Str(s))
    }
}

impl Call {
    pub fn new(callee: impl Into<String>, args: Vec<Arg>) -> Self {
        Self {
            callee: callee.into(),
            args,
        }
    }

    /// `callee(a, name=b, ...)`
    pub fn render(&self) -> Result<String, ValueError> {
        let args = self
            .args
            .iter()
            .map(Arg::render)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(format!("{}({})", self.callee, args.join(", ")))
    }
}

impl Arg {
    pub fn named(name: impl Into<String>, value: impl Into<Expr>) -> Self {
        Self {
            name: Some(name.into()),
            value: value.into(),
        }
    }

    pub fn positional(value: impl Into<Expr>) -> Self {
        Self {
            name: None,
            value: value.into(),
        }
    }

    fn render(&self) -> Result<String, ValueError> {
        let value = self.value.render()?;
        Ok(match &self.name {
            Some(name) => format!("{}={}", name, value),
            None => value,
        })
    }
}
