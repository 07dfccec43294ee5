use std::io::Write;

use crate::{
    ast::Node,
    error::RuntimeError,
    interpreter::{evaluator::core::Context, value::core::Value},
};

impl<W: Write> Context<W> {
    /// Evaluates `if (guard) { body }`.
    ///
    /// The body runs in its own scope when the guard is `true`.
    ///
    /// # Returns
    /// The value of the body, or `None` when the guard is `false` or not a
    /// boolean.
    pub fn eval_condition(&mut self, guard: &Node, body: &Node) -> Option<Value> {
        if self.eval_guard(guard)? {
            self.scoped(|ctx| ctx.eval(body))
        } else {
            None
        }
    }

    /// Evaluates `while (guard) { body }`.
    ///
    /// One scope is opened for the whole loop, not one per iteration. The
    /// guard is checked before every iteration; a guard that is not a boolean
    /// ends the loop.
    ///
    /// # Returns
    /// The value of the last executed body.
    pub fn eval_while(&mut self, guard: &Node, body: &Node) -> Option<Value> {
        self.scoped(|ctx| {
                let mut result = None;
                while let Some(true) = ctx.eval_guard(guard) {
                    result = ctx.eval(body);
                }
                result
            })
    }

    /// Evaluates `for (init; guard; step) { body }`.
    ///
    /// `init` runs once inside the loop scope. Each iteration checks the
    /// guard, runs the body and then the step.
    ///
    /// # Example
    /// ```
    /// use slate::Interpreter;
    ///
    /// let mut interpreter = Interpreter::new(Vec::new());
    /// interpreter.run("for (i := 0; i < 3; i = i + 1) { print(i) }");
    ///
    /// assert_eq!(String::from_utf8_lossy(interpreter.output()), "0\n1\n2\n");
    /// ```
    pub fn eval_for(&mut self, init: &Node, guard: &Node, step: &Node, body: &Node) -> Option<Value> {
        self.scoped(|ctx| {
                ctx.eval(init);

                let mut result = None;
                while let Some(true) = ctx.eval_guard(guard) {
                    result = ctx.eval(body);
                    ctx.eval(step);
                }
                result
            })
    }

    /// Evaluates a guard that must produce a boolean.
    ///
    /// Anything else is reported as a type mismatch and yields `None`.
    fn eval_guard(&mut self, guard: &Node) -> Option<bool> {
        match self.eval_operand(guard)? {
            Value::Bool(b) => Some(b),
            other => {
                self.report(RuntimeError::mismatch(format!("condition must be bool, found {}",
                                                           other.type_of())),
                            guard.line);
                None
            },
        }
    }
}
