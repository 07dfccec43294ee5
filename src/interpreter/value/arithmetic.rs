use std::cmp::Ordering;

use crate::{
    ast::{ArithmeticOperator, RelationalOperator},
    error::RuntimeError,
    interpreter::value::core::Value,
    util::num::{f64_to_i64_truncated, i64_to_f64},
};

/// Result of a value-level operation.
pub type ValueResult<T> = Result<T, RuntimeError>;

/// Applies a binary arithmetic operator to two values.
///
/// Both operands must have the same type. Strings only support `+`. Booleans
/// behave as the integers `0` and `1`, except that `^` turns the result back
/// into a boolean. `/` on integers or booleans is true division and yields a
/// float.
///
/// The evaluator and the constant folder share this function, so folding can
/// never compute something evaluation would not.
///
/// # Parameters
/// - `op`: The operator to apply.
/// - `left`: The left operand.
/// - `right`: The right operand.
///
/// # Returns
/// - `Ok(Value)`: The result of the operation.
/// - `Err(RuntimeError::TypeMismatch)`: If the operand types differ or the
///   operator is not defined for them.
/// - `Err(RuntimeError::Arithmetic)`: On division by zero, overflow, or a
///   non-finite power.
///
/// # Example
/// ```
/// use slate::{
///     ast::ArithmeticOperator,
///     interpreter::value::{arithmetic::apply_arithmetic, core::Value},
/// };
///
/// let sum = apply_arithmetic(ArithmeticOperator::Add,
///                            &Value::Integer(2),
///                            &Value::Integer(3));
/// assert_eq!(sum, Ok(Value::Integer(5)));
///
/// let quotient = apply_arithmetic(ArithmeticOperator::Div,
///                                 &Value::Integer(7),
///                                 &Value::Integer(2));
/// assert_eq!(quotient, Ok(Value::Float(3.5)));
///
/// let power = apply_arithmetic(ArithmeticOperator::Pow,
///                              &Value::Integer(2),
///                              &Value::Integer(-1));
/// assert_eq!(power, Ok(Value::Integer(0)));
/// ```
pub fn apply_arithmetic(op: ArithmeticOperator, left: &Value, right: &Value) -> ValueResult<Value> {
    match (left, right) {
        (Value::Integer(a), Value::Integer(b)) => integer_arithmetic(op, *a, *b),
        (Value::Float(a), Value::Float(b)) => float_arithmetic(op, *a, *b).map(Value::Float),
        (Value::Bool(a), Value::Bool(b)) => match integer_arithmetic(op, i64::from(*a), i64::from(*b))? {
            Value::Integer(n) if op == ArithmeticOperator::Pow => Ok(Value::Bool(n != 0)),
            result => Ok(result),
        },
        (Value::String(a), Value::String(b)) => match op {
            ArithmeticOperator::Add => Ok(Value::String(format!("{a}{b}"))),
            _ => Err(RuntimeError::mismatch(format!("operator '{op}' is not defined for strings"))),
        },
        _ => Err(RuntimeError::mismatch(format!("cannot apply '{op}' to {} and {}",
                                                left.type_of(),
                                                right.type_of()))),
    }
}

/// Compares two values of the same type.
///
/// # Returns
/// - `Ok(bool)`: The outcome of the comparison.
/// - `Err(RuntimeError::TypeMismatch)`: If the operand types differ.
///
/// # Example
/// ```
/// use slate::{
///     ast::RelationalOperator,
///     interpreter::value::{arithmetic::compare, core::Value},
/// };
///
/// assert_eq!(compare(RelationalOperator::Less, &Value::from("a"), &Value::from("b")),
///            Ok(true));
/// assert!(compare(RelationalOperator::Equal, &Value::Integer(1), &Value::Float(1.0)).is_err());
/// ```
pub fn compare(op: RelationalOperator, left: &Value, right: &Value) -> ValueResult<bool> {
    let ordering = match (left, right) {
        (Value::Integer(a), Value::Integer(b)) => a.partial_cmp(b),
        (Value::Float(a), Value::Float(b)) => a.partial_cmp(b),
        (Value::String(a), Value::String(b)) => a.partial_cmp(b),
        (Value::Bool(a), Value::Bool(b)) => a.partial_cmp(b),
        _ => {
            return Err(RuntimeError::mismatch(format!("cannot compare {} with {}",
                                                      left.type_of(),
                                                      right.type_of())));
        },
    };

    // NaN compares unequal to everything, itself included.
    let Some(ordering) = ordering else {
        return Ok(op == RelationalOperator::NotEqual);
    };

    Ok(match op {
        RelationalOperator::Less => ordering == Ordering::Less,
        RelationalOperator::Greater => ordering == Ordering::Greater,
        RelationalOperator::LessEqual => ordering != Ordering::Greater,
        RelationalOperator::GreaterEqual => ordering != Ordering::Less,
        RelationalOperator::Equal => ordering == Ordering::Equal,
        RelationalOperator::NotEqual => ordering != Ordering::Equal,
    })
}

fn integer_arithmetic(op: ArithmeticOperator, a: i64, b: i64) -> ValueResult<Value> {
    let overflow = || RuntimeError::arithmetic(format!("integer overflow in {a} {op} {b}"));

    let result = match op {
        ArithmeticOperator::Add => a.checked_add(b).ok_or_else(overflow)?,
        ArithmeticOperator::Sub => a.checked_sub(b).ok_or_else(overflow)?,
        ArithmeticOperator::Mul => a.checked_mul(b).ok_or_else(overflow)?,
        ArithmeticOperator::Div => return true_division(a, b),
        ArithmeticOperator::Pow => {
            let power = float_arithmetic(op, i64_to_f64(a), i64_to_f64(b))?;
            f64_to_i64_truncated(power).ok_or_else(overflow)?
        },
    };
    Ok(Value::Integer(result))
}

/// Divides two integers, always producing a float.
fn true_division(a: i64, b: i64) -> ValueResult<Value> {
    float_arithmetic(ArithmeticOperator::Div, i64_to_f64(a), i64_to_f64(b)).map(Value::Float)
}

fn float_arithmetic(op: ArithmeticOperator, a: f64, b: f64) -> ValueResult<f64> {
    match op {
        ArithmeticOperator::Add => Ok(a + b),
        ArithmeticOperator::Sub => Ok(a - b),
        ArithmeticOperator::Mul => Ok(a * b),
        ArithmeticOperator::Div => {
            if b == 0.0 {
                return Err(RuntimeError::arithmetic("division by zero"));
            }
            Ok(a / b)
        },
        ArithmeticOperator::Pow => {
            let power = a.powf(b);
            if !power.is_finite() && a.is_finite() && b.is_finite() {
                return Err(RuntimeError::arithmetic(format!("{a} ^ {b} has no finite value")));
            }
            Ok(power)
        },
    }
}
