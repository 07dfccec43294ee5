//! # slate
//!
//! slate is a small typed scripting language written in Rust.
//! It lexes, parses, optimizes and evaluates scripts with four primitive
//! types, lexical scopes, loops and user-defined functions. Errors never stop
//! a script: each one is recorded as a diagnostic and evaluation continues.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use std::io::Write;

use crate::{
    ast::{Node, NodeIdAllocator},
    error::Diagnostic,
    interpreter::{
        evaluator::core::{Context, DEFAULT_MAX_CALL_DEPTH},
        lexer::{Token, tokenize},
        optimizer::core::Optimizer,
        parser::core::parse_program,
        value::core::Value,
    },
};

/// Defines the structure of parsed code.
///
/// This module declares the `Node` type and the closed catalog of node kinds
/// that represent a parsed program as a tree. The tree is built by the
/// parser, rewritten by the optimizer and walked by the evaluator.
///
/// # Responsibilities
/// - Defines node kinds for every statement and expression.
/// - Attaches ids and source lines to nodes.
/// - Defines the primitive types and the operator enums.
pub mod ast;
/// Provides unified error types for parsing and evaluation.
///
/// This module defines all errors that can be raised while lexing, parsing
/// or evaluating code, and the `Diagnostic` that pairs a runtime error with
/// its line.
///
/// # Responsibilities
/// - Defines error enums for all failure modes.
/// - Attaches line numbers and detailed messages for context.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, optimization, evaluation and
/// rendering.
///
/// # Responsibilities
/// - Coordinates all core components.
/// - Provides entry points for parsing and evaluating user code.
pub mod interpreter;
/// General utilities for safe numeric conversion and helpers.
///
/// # Responsibilities
/// - Safely convert between `i64` and `f64` without silent data loss.
/// - Round results of the math functions.
pub mod util;

/// Settings for an [`Interpreter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// Whether programs are optimized before they are evaluated.
    pub optimize:            bool,
    /// Whether the optimizer removes unused bindings. Only has an effect when
    /// `optimize` is set.
    pub eliminate_dead_code: bool,
    /// Whether diagnostics are written to the output as they are recorded.
    pub echo_diagnostics:    bool,
    /// Bound on nested user function calls.
    pub max_call_depth:      usize,
}

impl Default for Options {
    fn default() -> Self {
        Self { optimize:            true,
               eliminate_dead_code: true,
               echo_diagnostics:    false,
               max_call_depth:      DEFAULT_MAX_CALL_DEPTH, }
    }
}

/// Runs source code through every stage, keeping state between runs.
///
/// Variables and functions defined by one call to [`Interpreter::run`] are
/// visible to the next, which is what an interactive prompt needs. `print`
/// writes to the writer given at construction.
///
/// # Example
/// ```
/// use slate::Interpreter;
///
/// let mut interpreter = Interpreter::new(Vec::new());
/// interpreter.run("x := 2; y := 3; print(x + y)");
///
/// assert_eq!(String::from_utf8_lossy(interpreter.output()), "5\n");
/// assert!(interpreter.diagnostics().is_empty());
/// ```
pub struct Interpreter<W: Write> {
    context: Context<W>,
    ids:     NodeIdAllocator,
    options: Options,
}

impl<W: Write> Interpreter<W> {
    /// Creates an interpreter with the default [`Options`].
    pub fn new(output: W) -> Self {
        Self::with_options(output, Options::default())
    }

    /// Creates an interpreter with the given options.
    pub fn with_options(output: W, options: Options) -> Self {
        let mut context = Context::new(output);
        context.max_call_depth = options.max_call_depth;
        context.echo_diagnostics = options.echo_diagnostics;

        Self { context,
               ids: NodeIdAllocator::default(),
               options }
    }

    /// The options this interpreter was created with.
    #[must_use]
    pub const fn options(&self) -> &Options {
        &self.options
    }

    /// Splits source code into tokens, recording illegal characters.
    pub fn tokenize(&mut self, source: &str) -> Vec<(Token, usize)> {
        let (tokens, errors) = tokenize(source);
        for error in errors {
            self.context.push_diagnostic(error.into());
        }
        tokens
    }

    /// Parses source code, recording lexical and syntax errors.
    ///
    /// # Returns
    /// The `Program` node. After a syntax error it holds every statement the
    /// parser could recover.
    pub fn parse(&mut self, source: &str) -> Node {
        let tokens = self.tokenize(source);
        self.parse_tokens(&tokens)
    }

    /// Parses an already tokenized source.
    pub fn parse_tokens(&mut self, tokens: &[(Token, usize)]) -> Node {
        let (program, errors) = parse_program(tokens, &mut self.ids);
        for error in errors {
            self.context.push_diagnostic(error.into());
        }
        program
    }

    /// Optimizes a parsed program, unless optimization is turned off.
    pub fn optimize(&mut self, program: Node) -> Node {
        if !self.options.optimize {
            return program;
        }
        Optimizer::new(&mut self.ids, self.options.eliminate_dead_code).optimize(program)
    }

    /// Evaluates a program in this interpreter's context.
    pub fn evaluate(&mut self, program: &Node) -> Option<Value> {
        self.context.eval(program)
    }

    /// Parses, optimizes and evaluates source code.
    ///
    /// # Returns
    /// The value of the last executed top-level statement, if it has one.
    pub fn run(&mut self, source: &str) -> Option<Value> {
        let program = self.parse(source);
        let program = self.optimize(program);
        self.evaluate(&program)
    }

    /// Diagnostics recorded so far, in the order they happened.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        self.context.diagnostics()
    }

    /// Removes and returns the recorded diagnostics.
    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        self.context.take_diagnostics()
    }

    /// The writer `print` writes to.
    #[must_use]
    pub const fn output(&self) -> &W {
        self.context.output()
    }

    /// The evaluation context, holding scopes and functions.
    #[must_use]
    pub const fn context(&self) -> &Context<W> {
        &self.context
    }

    /// Consumes the interpreter and returns its writer.
    pub fn into_output(self) -> W {
        self.context.into_output()
    }
}

/// Everything a one-shot run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    /// Value of the last executed top-level statement.
    pub value:       Option<Value>,
    /// Text written by `print`.
    pub output:      String,
    /// Every recorded diagnostic, in order.
    pub diagnostics: Vec<Diagnostic>,
}

impl RunReport {
    /// Whether the run recorded no diagnostics.
    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Runs a whole source with default options and collects the results.
///
/// This function parses, optimizes and evaluates all statements in the
/// provided source using a fresh interpreter.
///
/// # Examples
/// ```
/// use slate::run_source;
///
/// // Simple program: the result is printed and no error occurs.
/// let report = run_source("x := 2 + 2; print(x)");
/// assert_eq!(report.output, "4\n");
/// assert!(report.succeeded());
///
/// // An error is recorded and the rest of the program still runs.
/// let report = run_source("print(1 + \"a\"); print(\"after\")");
/// assert_eq!(report.output, "none\nafter\n");
/// assert_eq!(report.diagnostics.len(), 1);
/// ```
#[must_use]
pub fn run_source(source: &str) -> RunReport {
    let mut interpreter = Interpreter::new(Vec::new());
    let value = interpreter.run(source);
    let diagnostics = interpreter.take_diagnostics();
    let output = String::from_utf8_lossy(&interpreter.into_output()).into_owned();

    RunReport { value,
                output,
                diagnostics }
}
