use std::fmt;

use crate::{ast::Type, util::num::i64_to_f64};

/// Represents a runtime value in the interpreter.
///
/// This enum models the four primitive kinds a statement can produce. An
/// absent value (a failed or value-less statement) is `Option::None` at the
/// use site, never a variant of its own.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A 64-bit signed integer.
    Integer(i64),
    /// A double precision floating-point number.
    Float(f64),
    /// An immutable string.
    String(String),
    /// A boolean value (`true` or `false`).
    /// Produced by relations and used as guards of `if`, `while` and `for`,
    /// which must evaluate to `Bool`.
    Bool(bool),
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl Value {
    /// Returns the primitive type of this value.
    ///
    /// # Example
    /// ```
    /// use slate::{ast::Type, interpreter::value::core::Value};
    ///
    /// assert_eq!(Value::Integer(1).type_of(), Type::Int);
    /// assert_eq!(Value::from("a").type_of(), Type::String);
    /// ```
    #[must_use]
    pub const fn type_of(&self) -> Type {
        match self {
            Self::Integer(_) => Type::Int,
            Self::Float(_) => Type::Float,
            Self::String(_) => Type::String,
            Self::Bool(_) => Type::Bool,
        }
    }

    /// Host truthiness: non-zero numbers, non-empty strings and `true`.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Integer(n) => *n != 0,
            Self::Float(r) => *r != 0.0,
            Self::String(s) => !s.is_empty(),
            Self::Bool(b) => *b,
        }
    }

    /// Returns the value as an `f64` if it is numeric.
    ///
    /// Booleans count as `0.0` and `1.0`, strings are not numeric.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(n) => Some(i64_to_f64(*n)),
            Self::Float(r) => Some(*r),
            Self::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Self::String(_) => None,
        }
    }
}

impl fmt::Display for Value {
    /// Floats always carry a fractional part, so `5.0` never prints as `5`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Float(r) if r.is_finite() => write!(f, "{r:?}"),
            Self::Float(r) => write!(f, "{r}"),
            Self::String(s) => write!(f, "{s}"),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floats_keep_a_fractional_part() {
        assert_eq!(Value::Float(5.0).to_string(), "5.0");
        assert_eq!(Value::Float(0.25).to_string(), "0.25");
        assert_eq!(Value::Float(-3.0).to_string(), "-3.0");
        assert_eq!(Value::Float(f64::INFINITY).to_string(), "inf");
    }

    #[test]
    fn other_kinds_display_plainly() {
        assert_eq!(Value::Integer(-7).to_string(), "-7");
        assert_eq!(Value::from("hi there").to_string(), "hi there");
        assert_eq!(Value::Bool(true).to_string(), "true");
    }

    #[test]
    fn truthiness() {
        assert!(Value::Integer(3).is_truthy());
        assert!(!Value::Float(0.0).is_truthy());
        assert!(!Value::from("").is_truthy());
        assert!(Value::from("0").is_truthy());
    }
}
