//! The standard accounting stages, in execution order.
//!
//! 1. `base_amount` - prorated rent of each property
//! 2. `charges` - prorated expenses of each property
//! 3. `discounts` - contract and settlement discounts
//! 4. `vat` - VAT on rent, charges and discounts
//! 5. `debts` - unpaid balance of the previous term
//! 6. `payments` - payments received
//! 7. `totals` - sums and balance, always last

mod base;
mod charges;
mod debts;
mod discounts;
mod payments;
mod totals;
mod vat;

#[cfg(test)]
mod stages_props;

use rust_decimal::Decimal;

use rentloop_shared::types::round_amount;

use crate::pipeline::Stage;

pub use base::BASE_AMOUNT;
pub use charges::CHARGES;
pub use debts::DEBTS;
pub use discounts::DISCOUNTS;
pub use payments::PAYMENTS;
pub use totals::TOTALS;
pub use vat::VAT;

/// Standard stage order.
pub const STANDARD: [Stage; 7] = [BASE_AMOUNT, CHARGES, DISCOUNTS, VAT, DEBTS, PAYMENTS, TOTALS];

/// `amount` scaled by the share of the term that is billed, rounded to `scale`.
///
/// A fully billed term yields exactly `amount`.
#[must_use]
pub fn prorate(amount: Decimal, billed_days: i64, period_days: i64, scale: u32) -> Decimal {
    if billed_days <= 0 || period_days <= 0 {
        return Decimal::ZERO;
    }
    if billed_days >= period_days {
        return round_amount(amount, scale);
    }
    round_amount(
        amount * Decimal::from(billed_days) / Decimal::from(period_days),
        scale,
    )
}
