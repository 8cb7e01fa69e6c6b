use crate::color::Color;
use crate::descriptor::error::DescriptorError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of value a property carries. Used for converter lookup and type checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueKind {
    Empty,
    Bool,
    Int,
    Float,
    Text,
    Color,
    /// Enum-like selection identified by its display name.
    Choice,
    /// Position inside an owning list.
    Index,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ValueKind::Empty => "empty",
            ValueKind::Bool => "bool",
            ValueKind::Int => "integer",
            ValueKind::Float => "number",
            ValueKind::Text => "text",
            ValueKind::Color => "color",
            ValueKind::Choice => "choice",
            ValueKind::Index => "index",
        };
        f.write_str(s)
    }
}

/// A property value as seen by the property grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Empty,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Color(Color),
    Choice(String),
    Index(usize),
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Empty => ValueKind::Empty,
            Value::Bool(_) => ValueKind::Bool,
            Value::Int(_) => ValueKind::Int,
            Value::Float(_) => ValueKind::Float,
            Value::Text(_) => ValueKind::Text,
            Value::Color(_) => ValueKind::Color,
            Value::Choice(_) => ValueKind::Choice,
            Value::Index(_) => ValueKind::Index,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Value::Empty)
    }

    fn mismatch(&self, expected: ValueKind) -> DescriptorError {
        DescriptorError::ValueKind {
            expected,
            found: self.kind(),
        }
    }

    pub fn into_bool(self) -> Result<bool, DescriptorError> {
        match self {
            Value::Bool(b) => Ok(b),
            other => Err(other.mismatch(ValueKind::Bool)),
        }
    }

    pub fn into_int(self) -> Result<i64, DescriptorError> {
        match self {
            Value::Int(i) => Ok(i),
            other => Err(other.mismatch(ValueKind::Int)),
        }
    }

    /// Integers are widened; everything else is a kind mismatch.
    pub fn into_float(self) -> Result<f64, DescriptorError> {
        match self {
            Value::Float(v) => Ok(v),
            Value::Int(i) => Ok(i as f64),
            other => Err(other.mismatch(ValueKind::Float)),
        }
    }

    pub fn into_text(self) -> Result<String, DescriptorError> {
        match self {
            Value::Text(s) => Ok(s),
            other => Err(other.mismatch(ValueKind::Text)),
        }
    }

    pub fn into_color(self) -> Result<Color, DescriptorError> {
        match self {
            Value::Color(c) => Ok(c),
            other => Err(other.mismatch(ValueKind::Color)),
        }
    }

    /// `Empty` maps to `None` so optional selections can be cleared.
    pub fn into_choice(self) -> Result<Option<String>, DescriptorError> {
        match self {
            Value::Choice(s) => Ok(Some(s)),
            Value::Empty => Ok(None),
            other => Err(other.mismatch(ValueKind::Choice)),
        }
    }

    pub fn into_index(self) -> Result<Option<usize>, DescriptorError> {
        match self {
            Value::Index(i) => Ok(Some(i)),
            Value::Empty => Ok(None),
            other => Err(other.mismatch(ValueKind::Index)),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Empty => Ok(()),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Text(s) | Value::Choice(s) => f.write_str(s),
            Value::Color(c) => write!(f, "{c}"),
            Value::Index(i) => write!(f, "{i}"),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<Color> for Value {
    fn from(v: Color) -> Self {
        Value::Color(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn float_accepts_int() {
        assert_eq!(Value::Int(3).into_float().unwrap(), 3.0);
        assert!(Value::Text("3".into()).into_float().is_err());
    }

    #[test]
    fn empty_clears_choice_and_index() {
        assert_eq!(Value::Empty.into_choice().unwrap(), None);
        assert_eq!(Value::Empty.into_index().unwrap(), None);
        assert_eq!(Value::Index(2).into_index().unwrap(), Some(2));
    }

    #[test]
    fn display_renders_plain_text() {
        assert_eq!(Value::Float(3.14).to_string(), "3.14");
        assert_eq!(Value::Choice("Stair Step".into()).to_string(), "Stair Step");
        assert_eq!(Value::Empty.to_string(), "");
    }
}
