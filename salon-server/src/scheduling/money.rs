//! Monetary helpers using rust_decimal for precision
//!
//! Visit-spend accumulation is done in `Decimal` and converted back to
//! `f64` for storage, so repeated check-outs never drift.

use super::error::ScheduleError;
use rust_decimal::prelude::*;

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Maximum allowed appointment total
const MAX_AMOUNT: f64 = 1_000_000.0;

/// Convert f64 to Decimal for calculation
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Validate an appointment total before processing
pub fn validate_amount(amount: f64) -> Result<(), ScheduleError> {
    if !amount.is_finite() {
        return Err(ScheduleError::Validation(format!(
            "totalAmount must be a finite number, got {}",
            amount
        )));
    }
    if amount < 0.0 {
        return Err(ScheduleError::Validation(format!(
            "totalAmount must be non-negative, got {}",
            amount
        )));
    }
    if amount > MAX_AMOUNT {
        return Err(ScheduleError::Validation(format!(
            "totalAmount exceeds maximum allowed ({}), got {}",
            MAX_AMOUNT, amount
        )));
    }
    Ok(())
}
