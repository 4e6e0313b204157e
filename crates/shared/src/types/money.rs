//! Rounding of monetary amounts.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Amounts are `rust_decimal::Decimal` everywhere.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a monetary amount to `scale` decimal places, half away from zero.
///
/// Every amount stored on a billing line goes through this function so that
/// totals are sums of already rounded values.
#[must_use]
pub fn round_amount(amount: Decimal, scale: u32) -> Decimal {
    amount.round_dp_with_strategy(scale, RoundingStrategy::MidpointAwayFromZero)
}
