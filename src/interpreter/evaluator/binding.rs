use std::io::Write;

use crate::{
    ast::{Node, NodeKind},
    error::DeclarationError,
    interpreter::evaluator::core::Context,
};

impl<W: Write> Context<W> {
    /// Evaluates `name = value`.
    ///
    /// The value is evaluated first. A value-less right-hand side leaves the
    /// variable untouched and is reported as a type mismatch, unless it
    /// already reported an error of its own.
    pub fn eval_assign(&mut self, name: &Node, value: &Node, line: usize) {
        let Some(value) = self.eval_operand(value) else {
            return;
        };
        let Some(name) = name.name() else {
            return;
        };
        if let Err(error) = self.scopes.assign(name, value) {
            self.report(error, line);
        }
    }

    /// Evaluates `name: type`, declaring the name without a value.
    pub fn eval_type_declare(&mut self, name: &Node, type_name: &Node, line: usize) {
        let (Some(name), NodeKind::TypeVal(ty)) = (name.name(), &type_name.kind) else {
            return;
        };
        if let Err(error) = self.scopes.declare(name, *ty) {
            self.report(error, line);
        }
    }

    /// Evaluates `name := value`, declaring the name with the type of the
    /// value.
    ///
    /// A value-less right-hand side has no type to declare the name with. It
    /// is reported as `InvalidType` and the name stays undeclared.
    pub fn eval_assign_with_type(&mut self, name: &Node, value: &Node, line: usize) {
        let Some(value) = self.eval_required(value, |_| {
                                  DeclarationError::InvalidType { type_name: "none".to_string() }.into()
                              })
        else {
            return;
        };
        let Some(name) = name.name() else {
            return;
        };
        if let Err(error) = self.scopes.define(name, value) {
            self.report(error, line);
        }
    }
}
