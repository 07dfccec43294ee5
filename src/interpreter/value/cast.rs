use crate::{
    ast::Type,
    error::RuntimeError,
    interpreter::value::{arithmetic::ValueResult, core::Value},
    util::num::{f64_to_i64_truncated, i64_to_f64},
};

impl Value {
    /// Converts the value to the requested type.
    ///
    /// - to `int`: floats truncate toward zero, strings are parsed after
    ///   trimming (a float-looking string is parsed and truncated), booleans
    ///   map to `0`/`1`.
    /// - to `float`: integers widen, strings are parsed, booleans map to
    ///   `0.0`/`1.0`.
    /// - to `string`: the displayed form.
    /// - to `bool`: host truthiness.
    ///
    /// Casting to the value's own type returns it unchanged. Function
    /// arguments are coerced to their parameter types through this method
    /// too.
    ///
    /// # Parameters
    /// - `target`: The type to convert to.
    ///
    /// # Returns
    /// - `Ok(Value)`: The converted value.
    /// - `Err(RuntimeError::TypeMismatch)`: If the value has no representation
    ///   in `target` (an unparsable string, a non-finite float to `int`).
    ///
    /// # Example
    /// ```
    /// use slate::{ast::Type, interpreter::value::core::Value};
    ///
    /// assert_eq!(Value::Float(3.7).cast(Type::Int), Ok(Value::Integer(3)));
    /// assert_eq!(Value::from(" 12 ").cast(Type::Int), Ok(Value::Integer(12)));
    /// assert_eq!(Value::Integer(0).cast(Type::Bool), Ok(Value::Bool(false)));
    /// assert!(Value::from("twelve").cast(Type::Float).is_err());
    /// ```
    pub fn cast(self, target: Type) -> ValueResult<Self> {
        if self.type_of() == target {
            return Ok(self);
        }

        let failed = |value: &Self| {
            RuntimeError::mismatch(format!("cannot convert {} '{value}' to {target}", value.type_of()))
        };

        match target {
            Type::Int => match &self {
                Self::Float(r) => f64_to_i64_truncated(*r).map(Self::Integer)
                                                          .ok_or_else(|| failed(&self)),
                Self::Bool(b) => Ok(Self::Integer(i64::from(*b))),
                Self::String(s) => parse_int(s).map(Self::Integer).ok_or_else(|| failed(&self)),
                Self::Integer(_) => Ok(self),
            },
            Type::Float => match &self {
                Self::Integer(n) => Ok(Self::Float(i64_to_f64(*n))),
                Self::Bool(b) => Ok(Self::Float(if *b { 1.0 } else { 0.0 })),
                Self::String(s) => s.trim()
                                    .parse::<f64>()
                                    .map(Self::Float)
                                    .map_err(|_| failed(&self)),
                Self::Float(_) => Ok(self),
            },
            Type::String => Ok(Self::String(self.to_string())),
            Type::Bool => Ok(Self::Bool(self.is_truthy())),
        }
    }
}

fn parse_int(text: &str) -> Option<i64> {
    let text = text.trim();
    text.parse::<i64>()
        .ok()
        .or_else(|| text.parse::<f64>().ok().and_then(f64_to_i64_truncated))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_int_truncates() {
        assert_eq!(Value::Float(-2.9).cast(Type::Int), Ok(Value::Integer(-2)));
        assert_eq!(Value::from("4.5").cast(Type::Int), Ok(Value::Integer(4)));
        assert_eq!(Value::Bool(true).cast(Type::Int), Ok(Value::Integer(1)));
    }

    #[test]
    fn to_int_rejects_non_finite() {
        let err = Value::Float(f64::NAN).cast(Type::Int).unwrap_err();
        assert!(matches!(err, RuntimeError::TypeMismatch { .. }));
    }

    #[test]
    fn to_float_widens() {
        assert_eq!(Value::Integer(3).cast(Type::Float), Ok(Value::Float(3.0)));
        assert_eq!(Value::from("2.5").cast(Type::Float), Ok(Value::Float(2.5)));
    }

    #[test]
    fn to_string_uses_display() {
        assert_eq!(Value::Float(2.0).cast(Type::String), Ok(Value::from("2.0")));
        assert_eq!(Value::Bool(false).cast(Type::String), Ok(Value::from("false")));
    }

    #[test]
    fn to_bool_uses_truthiness() {
        assert_eq!(Value::from("").cast(Type::Bool), Ok(Value::Bool(false)));
        assert_eq!(Value::Float(0.1).cast(Type::Bool), Ok(Value::Bool(true)));
    }
}
