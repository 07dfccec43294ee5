/// Numeric conversion helpers.
///
/// Conversions between `i64` and `f64` used by casts, the power operator and
/// the math functions. Narrowing conversions return `None` instead of
/// saturating silently.
pub mod num;
