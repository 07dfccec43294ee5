/// Arithmetic and relations on runtime values.
///
/// Implements the binary operators for every pair of primitive kinds. Both the
/// evaluator and the constant folder go through these functions, so a folded
/// literal always equals what evaluation would have produced.
pub mod arithmetic;
/// Explicit and implicit type conversion.
///
/// Backs `static_cast` and the coercion of call arguments to parameter types.
pub mod cast;

pub mod core;
