/// Core evaluation logic.
///
/// Contains the `Context`, the dispatch over node kinds, blocks, and the
/// helpers that turn failures into recorded diagnostics.
pub mod core;

/// Control flow evaluation.
///
/// `if`, `while` and `for`, each running inside its own scope.
pub mod control_flow;

/// Declarations and assignments.
pub mod binding;

/// Operators, relations, casts and math functions.
pub mod operation;

/// User-defined functions.
///
/// Handles registration in the function table and calls, including argument
/// coercion and the call scope.
pub mod function;
