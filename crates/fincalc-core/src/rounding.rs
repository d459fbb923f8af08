use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

/// Decimal places used when a caller does not specify a precision.
pub const DEFAULT_PRECISION: u32 = 2;

/// Largest precision accepted by the validator.
pub const MAX_PRECISION: u32 = 10;

const INTEGRAL_THRESHOLD: f64 = 9_007_199_254_740_992.0;

/// Round `value` to `precision` decimal places, halves away from zero.
///
/// Rounding happens on the shortest decimal form of the float, so `1.005`
/// rounds to `1.01` even though its binary value sits just below the
/// midpoint. Non-finite values are returned untouched.
///
/// `Decimal` carries at most 28 fractional digits, so a `precision` above 28
/// rounds to 28 places.
///
/// ```
/// use fincalc_core::round;
///
/// assert_eq!(round(10.1255, 2), 10.13);
/// assert_eq!(round(-10.1234, 0), -10.0);
/// ```
pub fn round(value: f64, precision: u32) -> f64 {
    // Beyond 2^53 every f64 is already an integer.
    if !value.is_finite() || value.abs() >= INTEGRAL_THRESHOLD {
        return value;
    }

    // Display for f64 is the shortest string that round-trips.
    // Digits past the 28th decimal are rounded away by the parser itself.
    Decimal::from_str(&value.to_string())
        .map(|d| {
            d.round_dp_with_strategy(precision, RoundingStrategy::MidpointAwayFromZero)
                .to_string()
        })
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(value)
}
