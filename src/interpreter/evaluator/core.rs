use std::{collections::HashMap, io::Write, rc::Rc};

use tracing::{debug, warn};

use crate::{
    ast::{Node, NodeKind},
    error::{Diagnostic, RuntimeError},
    interpreter::{evaluator::function::FunctionDef, scope::ScopeStack, value::core::Value},
};

/// Result type used by the evaluator.
///
/// Helpers that can fail return either a value of type `T` or a
/// `RuntimeError`; node handlers turn the error into a recorded diagnostic.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// Default bound on nested user function calls.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 128;

/// Stores the runtime evaluation context.
///
/// This struct holds the interpreter state: the scope stack, every
/// registered function, the diagnostics recorded so far, and the writer
/// `print` writes to.
///
/// ## Usage
///
/// `Context` is created once and reused for every program it evaluates, so
/// variables and functions persist between calls to [`Context::eval`].
///
/// ```
/// use slate::{
///     ast::{Node, NodeIdAllocator, NodeKind},
///     interpreter::{evaluator::core::Context, value::core::Value},
/// };
///
/// let mut ids = NodeIdAllocator::default();
/// let node = Node::new(&mut ids, 1, NodeKind::IntVal(7));
///
/// let mut ctx = Context::new(Vec::new());
/// assert_eq!(ctx.eval(&node), Some(Value::Integer(7)));
/// ```
pub struct Context<W: Write> {
    /// Variables, from the global scope to the innermost one.
    pub scopes:            ScopeStack,
    /// Registered functions by name.
    pub functions:         HashMap<String, Rc<FunctionDef>>,
    /// Bound on nested user function calls.
    pub max_call_depth:    usize,
    /// Whether diagnostics are also written to the output as they occur.
    pub echo_diagnostics:  bool,
    /// Number of user function calls currently being evaluated.
    pub(crate) call_depth: usize,
    diagnostics:           Vec<Diagnostic>,
    output:                W,
}

impl<W: Write> Context<W> {
    /// Creates a context with only the global scope and no functions.
    #[must_use]
    pub fn new(output: W) -> Self {
        Self { scopes: ScopeStack::new(),
               functions: HashMap::new(),
               max_call_depth: DEFAULT_MAX_CALL_DEPTH,
               echo_diagnostics: false,
               call_depth: 0,
               diagnostics: Vec::new(),
               output }
    }

    /// Evaluates a node and returns the resulting value.
    ///
    /// This is the main entry point for evaluation. Failures never propagate:
    /// they are recorded as diagnostics and the failing node yields `None`, so
    /// evaluation continues with the next statement.
    ///
    /// # Parameters
    /// - `node`: Node to evaluate.
    ///
    /// # Returns
    /// `Some(Value)` for nodes that produce a value, or `None` for statements
    /// without one and for failed evaluations.
    pub fn eval(&mut self, node: &Node) -> Option<Value> {
        let line = node.line;

        match &node.kind {
            NodeKind::Program { block } => self.eval(block),
            NodeKind::Block { statements } => self.eval_block(statements),
            NodeKind::InstructionBlock { block } => self.scoped(|ctx| ctx.eval(block)),
            NodeKind::Condition { guard, body } => self.eval_condition(guard, body),
            NodeKind::While { guard, body } => self.eval_while(guard, body),
            NodeKind::For { init,
                            guard,
                            step,
                            body, } => self.eval_for(init, guard, step, body),
            NodeKind::Relation { op, left, right } => self.eval_relation(*op, left, right, line),
            NodeKind::Operator { op, left, right } => self.eval_operator(*op, left, right, line),
            NodeKind::Print { value } => {
                self.eval_print(value);
                None
            },
            NodeKind::Assign { name, value } => {
                self.eval_assign(name, value, line);
                None
            },
            NodeKind::TypeDeclare { name, type_name } => {
                self.eval_type_declare(name, type_name, line);
                None
            },
            NodeKind::AssignWithType { name, value } => {
                self.eval_assign_with_type(name, value, line);
                None
            },
            NodeKind::Cast { value, type_name } => self.eval_cast(value, type_name, line),
            NodeKind::Function { name, params, body } => {
                let result = self.register_function(name, params.as_deref(), body);
                self.settle(result.map(|()| None), line)
            },
            NodeKind::Call { name, args } => {
                let result = self.call_function(name, args.as_deref(), line);
                self.settle(result, line)
            },
            NodeKind::MathFunction { function, argument } => {
                self.eval_math_function(*function, argument, line)
            },
            NodeKind::KeyVal(name) => match self.scopes.get(name) {
                Ok(value) => value.cloned(),
                Err(error) => {
                    self.report(error, line);
                    None
                },
            },
            NodeKind::IntVal(value) => Some(Value::Integer(*value)),
            NodeKind::FloatVal(value) => Some(Value::Float(*value)),
            NodeKind::StringVal(value) => Some(Value::String(value.clone())),
            NodeKind::BoolVal(value) => Some(Value::Bool(*value)),
            NodeKind::Pi => Some(Value::Float(std::f64::consts::PI)),
            NodeKind::Comment { .. }
            | NodeKind::Args { .. }
            | NodeKind::ArgsVal { .. }
            | NodeKind::NameVal(_)
            | NodeKind::TypeVal(_) => None,
        }
    }

    /// Evaluates the statements of a block in order.
    ///
    /// The result is the value of the last executed statement. Comments are
    /// not executed and leave the result alone.
    fn eval_block(&mut self, statements: &[Node]) -> Option<Value> {
        let mut result = None;
        for statement in statements {
            if matches!(statement.kind, NodeKind::Comment { .. }) {
                continue;
            }
            result = self.eval(statement);
        }
        result
    }

    fn eval_print(&mut self, value: &Node) {
        let text = self.eval(value).map_or_else(|| "none".to_string(), |value| value.to_string());
        if let Err(error) = writeln!(self.output, "{text}") {
            warn!(%error, "failed to write program output");
        }
    }

    /// Runs `body` inside a freshly pushed scope.
    ///
    /// The scope is popped on every path out of `body`, so callers cannot
    /// leave the stack unbalanced.
    pub(crate) fn scoped<T>(&mut self, body: impl FnOnce(&mut Self) -> T) -> T {
        self.scopes.add_scope();
        let result = body(self);
        self.scopes.remove_scope();
        result
    }

    /// Evaluates an operand that must produce a value.
    ///
    /// An operand that yields nothing without having reported a problem of
    /// its own (an unset variable, a value-less call) is reported as a type
    /// mismatch here.
    pub(crate) fn eval_operand(&mut self, node: &Node) -> Option<Value> {
        self.eval_required(node, |node| {
                let details = node.name().map_or_else(|| "operand has no value".to_string(),
                                                      |name| format!("'{name}' has no value"));
                RuntimeError::mismatch(details)
            })
    }

    /// Evaluates a node whose value is needed, reporting `missing(node)` when
    /// it yields nothing and has not reported anything itself.
    pub(crate) fn eval_required(&mut self,
                                node: &Node,
                                missing: impl FnOnce(&Node) -> RuntimeError)
                                -> Option<Value> {
        let before = self.diagnostics.len();
        let value = self.eval(node);
        if value.is_none() && self.diagnostics.len() == before {
            self.report(missing(node), node.line);
        }
        value
    }

    /// Turns a helper result into the node's value, recording the error if
    /// there is one.
    pub(crate) fn settle(&mut self, result: EvalResult<Option<Value>>, line: usize) -> Option<Value> {
        result.unwrap_or_else(|error| {
                  self.report(error, line);
                  None
              })
    }

    /// Records a runtime error raised by the node on `line`.
    pub fn report(&mut self, error: impl Into<RuntimeError>, line: usize) {
        let diagnostic = Diagnostic::Runtime { error: error.into(),
                                               line };
        debug!(%diagnostic, "runtime error");
        self.push_diagnostic(diagnostic);
    }

    /// Records a diagnostic produced outside evaluation, such as a syntax
    /// error.
    pub fn push_diagnostic(&mut self, diagnostic: Diagnostic) {
        if self.echo_diagnostics
           && let Err(error) = writeln!(self.output, "{diagnostic}")
        {
            warn!(%error, "failed to write diagnostic");
        }
        self.diagnostics.push(diagnostic);
    }

    /// Diagnostics recorded so far.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Removes and returns the recorded diagnostics.
    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    /// The writer `print` writes to.
    #[must_use]
    pub const fn output(&self) -> &W {
        &self.output
    }

    /// Consumes the context and returns its writer.
    pub fn into_output(self) -> W {
        self.output
    }
}
