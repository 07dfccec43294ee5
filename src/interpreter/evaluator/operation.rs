use std::io::Write;

use crate::{
    ast::{ArithmeticOperator, MathFunction, Node, NodeKind, RelationalOperator},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::{
            arithmetic::{apply_arithmetic, compare},
            core::Value,
        },
    },
    util::num::round_to_places,
};

/// Decimal places math function results are rounded to.
pub const MATH_PRECISION: i32 = 5;

impl<W: Write> Context<W> {
    /// Evaluates a binary arithmetic operation.
    ///
    /// Both operands are evaluated left to right. If either yields nothing the
    /// operation yields nothing; otherwise the result follows
    /// [`apply_arithmetic`].
    pub fn eval_operator(&mut self,
                         op: ArithmeticOperator,
                         left: &Node,
                         right: &Node,
                         line: usize)
                         -> Option<Value> {
        let left = self.eval_operand(left);
        let right = self.eval_operand(right);
        let (left, right) = (left?, right?);

        let result = apply_arithmetic(op, &left, &right).map(Some);
        self.settle(result, line)
    }

    /// Evaluates a relation; the result is always a boolean.
    pub fn eval_relation(&mut self,
                         op: RelationalOperator,
                         left: &Node,
                         right: &Node,
                         line: usize)
                         -> Option<Value> {
        let left = self.eval_operand(left);
        let right = self.eval_operand(right);
        let (left, right) = (left?, right?);

        let result = compare(op, &left, &right).map(|b| Some(Value::Bool(b)));
        self.settle(result, line)
    }

    /// Evaluates `static_cast(value, type)`.
    pub fn eval_cast(&mut self, value: &Node, type_name: &Node, line: usize) -> Option<Value> {
        let NodeKind::TypeVal(ty) = type_name.kind else {
            return None;
        };
        let value = self.eval_operand(value)?;

        let result = value.cast(ty).map(Some);
        self.settle(result, line)
    }

    /// Evaluates one of the built-in math functions.
    ///
    /// The argument may be an `int`, `float` or `bool`; the result is a
    /// `float` rounded to five decimal places.
    ///
    /// # Example
    /// ```
    /// use slate::{Interpreter, interpreter::value::core::Value};
    ///
    /// let mut interpreter = Interpreter::new(Vec::new());
    ///
    /// assert_eq!(interpreter.run("sqrt(2)"), Some(Value::Float(1.41421)));
    /// assert_eq!(interpreter.run("sin(PI)"), Some(Value::Float(0.0)));
    /// ```
    pub fn eval_math_function(&mut self,
                              function: MathFunction,
                              argument: &Node,
                              line: usize)
                              -> Option<Value> {
        let argument = self.eval_operand(argument)?;

        let result = apply_math_function(function, &argument).map(|r| Some(Value::Float(r)));
        self.settle(result, line)
    }
}

fn apply_math_function(function: MathFunction, argument: &Value) -> EvalResult<f64> {
    let Some(x) = argument.as_f64() else {
        return Err(RuntimeError::mismatch(format!("{function} expects a number, found {}",
                                                  argument.type_of())));
    };

    let result = match function {
        MathFunction::Sin => x.sin(),
        MathFunction::Cos => x.cos(),
        MathFunction::Exp => x.exp(),
        MathFunction::Sqrt => {
            if x < 0.0 {
                return Err(RuntimeError::arithmetic(format!("sqrt of negative number {x}")));
            }
            x.sqrt()
        },
        MathFunction::Log => {
            if x <= 0.0 {
                return Err(RuntimeError::arithmetic(format!("log of non-positive number {x}")));
            }
            x.ln()
        },
    };

    if !result.is_finite() && x.is_finite() {
        return Err(RuntimeError::arithmetic(format!("{function}({x}) overflows")));
    }

    // Adding 0.0 turns a rounded -0.0 into 0.0.
    Ok(round_to_places(result, MATH_PRECISION) + 0.0)
}
