use std::{io::Write, rc::Rc};

use tracing::debug;

use crate::{
    ast::{Node, NodeKind, Type},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
};

/// A user function registered in the function table.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDef {
    /// The function name, unique across the table.
    pub name:   String,
    /// Parameter names and types, in declaration order.
    pub params: Vec<(String, Type)>,
    /// The body `Block`; its last statement produces the result.
    pub body:   Node,
}

impl FunctionDef {
    /// Builds a definition from the children of a `Function` node.
    fn from_node(name: &str, params: Option<&Node>, body: &Node) -> Self {
        let params = match params.map(|node| &node.kind) {
            Some(NodeKind::Args { params }) => {
                params.iter()
                      .filter_map(|(name, ty)| match (&name.kind, &ty.kind) {
                          (NodeKind::NameVal(name), NodeKind::TypeVal(ty)) => Some((name.clone(), *ty)),
                          _ => None,
                      })
                      .collect()
            },
            _ => Vec::new(),
        };

        Self { name: name.to_string(),
               params,
               body: body.clone() }
    }
}

impl<W: Write> Context<W> {
    /// Registers a function definition.
    ///
    /// The name must not be a keyword or type name, a variable in any scope,
    /// or an already registered function. A rejected definition is dropped
    /// and the existing binding stays in place.
    ///
    /// # Errors
    /// - `Declaration(KeywordOrTypeName)` for reserved names.
    /// - `Redefinition` if the name is already taken.
    pub fn register_function(&mut self,
                             name: &Node,
                             params: Option<&Node>,
                             body: &Node)
                             -> EvalResult<()> {
        let Some(name) = name.name() else {
            return Ok(());
        };

        self.scopes.is_available(name)?;
        if self.functions.contains_key(name) {
            return Err(RuntimeError::Redefinition { name: name.to_string() });
        }

        let def = FunctionDef::from_node(name, params, body);
        debug!(name, params = def.params.len(), "registered function");
        self.functions.insert(name.to_string(), Rc::new(def));
        Ok(())
    }

    /// Calls a registered function.
    ///
    /// Arguments are evaluated left to right in the caller's scope, then
    /// bound to the parameters in one fresh scope, each coerced to its
    /// parameter's type. The scope is popped before returning on every path.
    /// The result is the value of the body's last executed statement.
    ///
    /// # Errors
    /// - `FunctionNotDefined` if no function has this name.
    /// - `ArityError` if the argument count differs from the parameter count.
    /// - `TypeMismatch` if an argument has no value or cannot be coerced.
    /// - `RecursionLimit` if the call would exceed the maximum call depth.
    pub fn call_function(&mut self,
                         name: &Node,
                         args: Option<&Node>,
                         line: usize)
                         -> EvalResult<Option<Value>> {
        let Some(name) = name.name() else {
            return Ok(None);
        };
        let def = self.functions
                      .get(name)
                      .cloned()
                      .ok_or_else(|| RuntimeError::FunctionNotDefined { name: name.to_string() })?;

        let arguments = match args.map(|node| &node.kind) {
            Some(NodeKind::ArgsVal { values }) => {
                values.iter().map(|value| self.eval_operand(value)).collect::<Vec<_>>()
            },
            _ => Vec::new(),
        };

        if arguments.len() != def.params.len() {
            return Err(RuntimeError::ArityError { name:     def.name.clone(),
                                                  expected: def.params.len(),
                                                  found:    arguments.len(), });
        }
        if self.call_depth >= self.max_call_depth {
            return Err(RuntimeError::RecursionLimit { name:  def.name.clone(),
                                                      limit: self.max_call_depth, });
        }

        self.scoped(|ctx| -> EvalResult<Option<Value>> {
                for ((param, ty), argument) in def.params.iter().zip(arguments) {
                    let Some(argument) = argument else {
                        // Already reported when the argument was evaluated.
                        return Ok(None);
                    };
                    ctx.scopes.define(param, argument.cast(*ty)?)?;
                }

                ctx.call_depth += 1;
                let result = ctx.eval(&def.body);
                ctx.call_depth -= 1;
                Ok(result)
            })
            .inspect_err(|error| debug!(%error, line, "call failed"))
    }
}
