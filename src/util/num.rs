/// Converts an `f64` to `i64`, truncating toward zero.
///
/// ## Parameters
/// - `value`: The floating-point value to convert.
///
/// ## Returns
/// - `Some(i64)`: The truncated value.
/// - `None`: If the value is NaN, infinite, or outside the `i64` range.
///
/// ## Example
/// ```
/// use slate::util::num::f64_to_i64_truncated;
///
/// assert_eq!(f64_to_i64_truncated(3.7), Some(3));
/// assert_eq!(f64_to_i64_truncated(-3.7), Some(-3));
/// assert_eq!(f64_to_i64_truncated(f64::NAN), None);
/// assert_eq!(f64_to_i64_truncated(1e20), None);
/// ```
#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn f64_to_i64_truncated(value: f64) -> Option<i64> {
    if !value.is_finite() {
        return None;
    }
    let truncated = value.trunc();
    // i64::MAX as f64 rounds up to 2^63, which is already out of range.
    if truncated < i64::MIN as f64 || truncated >= i64::MAX as f64 {
        return None;
    }
    Some(truncated as i64)
}

/// Widens an `i64` to `f64`.
///
/// Magnitudes above `2^53` lose precision, as host float widening does.
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub const fn i64_to_f64(value: i64) -> f64 {
    value as f64
}

/// Rounds `value` to `places` decimal places, half away from zero.
///
/// # Example
/// ```
/// use slate::util::num::round_to_places;
///
/// assert_eq!(round_to_places(std::f64::consts::PI, 5), 3.14159);
/// assert_eq!(round_to_places(2.0_f64.sqrt(), 5), 1.41421);
/// ```
#[must_use]
pub fn round_to_places(value: f64, places: i32) -> f64 {
    let factor = 10_f64.powi(places);
    let scaled = value * factor;
    if scaled.is_finite() {
        scaled.round() / factor
    } else {
        value
    }
}
