//! Money conversion utilities using rust_decimal for precision
//!
//! All monetary arithmetic runs through `Decimal`; values convert back to
//! `f64` for storage and serialization. Stored values keep full precision -
//! rounding happens only in [`format_money`], the presentation boundary.

use crate::config::Preferences;
use rust_decimal::prelude::*;

/// Decimal places used for display formatting (not for storage)
const DISPLAY_DECIMAL_PLACES: u32 = 2;

/// Tolerance for monetary comparisons (0.01)
pub const MONEY_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Convert f64 to Decimal for calculation
///
/// Input values are validated as finite at the composer boundary. If
/// NaN/Infinity somehow reaches here, logs an error and returns ZERO to
/// avoid silent data corruption in monetary calculations.
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_else(|| {
        tracing::error!(value = ?value, "Non-finite f64 in monetary calculation, defaulting to zero");
        Decimal::ZERO
    })
}

/// Convert Decimal back to f64 for storage
///
/// No rounding is applied here; internal totals keep full precision and
/// only the display formatter rounds.
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or_else(|| {
        tracing::error!(value = %value, "Decimal not representable as f64, defaulting to zero");
        0.0
    })
}

/// Compare two monetary values for equality (within 0.01 tolerance)
pub fn money_eq(a: f64, b: f64) -> bool {
    let diff = (to_decimal(a) - to_decimal(b)).abs();
    diff < MONEY_TOLERANCE
}

/// Format a monetary value for display: 2 decimal places (half-up) plus
/// the configured currency symbol
///
/// This is the only place a monetary value is rounded.
pub fn format_money(value: f64, preferences: &Preferences) -> String {
    let rounded = to_decimal(value)
        .round_dp_with_strategy(DISPLAY_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.2} {}", rounded, preferences.currency_symbol)
}
