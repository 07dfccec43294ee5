/// Parser entry points and shared state.
///
/// Contains `parse_program`, the expression entry point, and the state that
/// carries the id allocator and the recovered syntax errors.
pub mod core;

/// Binary operator parsing.
///
/// One function per precedence level, from relations down to the
/// right-associative power operator.
pub mod binary;

/// Primary expressions.
///
/// Literals, variable references, calls, math functions, casts and
/// parenthesized expressions.
pub mod primary;

/// Block parsing and error recovery.
pub mod block;

/// Utility functions for the parser.
///
/// Token expectations and operator lookups used across the parser.
pub mod utils;

/// Statement parsing.
///
/// Implements control flow, declarations, assignments, function definitions
/// and the other statement forms.
pub mod statement;
