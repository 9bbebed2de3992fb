//! Money calculation utilities using rust_decimal for precision
//!
//! Amounts are stored as `f64` (SQLite REAL) and computed as `Decimal`.

use rust_decimal::prelude::*;

/// Rounding strategy for monetary values (2 decimal places, half away from zero)
const DECIMAL_PLACES: u32 = 2;

/// Maximum allowed ticket price
pub const MAX_TICKET_PRICE: f64 = 1_000.0;

/// Convert f64 to Decimal; non-finite values become zero
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert Decimal to f64 for storage, rounded to cents
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Ticket price must be finite, positive and within bounds
pub fn is_valid_price(value: f64) -> bool {
    value.is_finite() && value > 0.0 && value <= MAX_TICKET_PRICE
}
