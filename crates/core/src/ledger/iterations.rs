//! Terms left on a lease and how many of them still need paying.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::{ConfigError, RentError};
use crate::rent::{Contract, Rent};
use crate::term::{TermKey, remaining_iterations};

use super::balance::compute_balance;

/// Terms left on a lease.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemainingIterations {
    /// Terms until the lease ends.
    pub remaining_iterations: i64,
    /// Terms not already covered by the current balance.
    pub remaining_iterations_to_pay: i64,
}

/// Counts the terms left after `as_of` and how many are not prepaid.
///
/// A zero balance means the current term is paid. A positive balance covers
/// `floor(balance / periodic_amount)` further terms. A negative or unknown
/// balance leaves the count unchanged.
pub fn compute_remaining_iterations_to_pay(
    contract: &Contract,
    rents: &[Rent],
    as_of: TermKey,
    periodic_amount: Decimal,
) -> Result<RemainingIterations, RentError> {
    let unit = contract.time_range()?;
    let remaining = remaining_iterations(contract.last_day(), as_of, unit)?;

    let to_pay = match compute_balance(rents, as_of) {
        Some(balance) if balance.is_zero() => remaining.saturating_sub(1),
        Some(balance) if balance > Decimal::ZERO => {
            if periodic_amount <= Decimal::ZERO {
                return Err(ConfigError::NonPositivePeriodicAmount(periodic_amount).into());
            }
            let prepaid = balance
                .checked_div(periodic_amount)
                .ok_or(ConfigError::PeriodicAmountTooSmall {
                    balance,
                    periodic_amount,
                })?
                .floor();
            remaining.saturating_sub(i64::try_from(prepaid).unwrap_or(i64::MAX))
        }
        _ => remaining,
    };

    Ok(RemainingIterations {
        remaining_iterations: remaining,
        remaining_iterations_to_pay: to_pay,
    })
}

/// Amount billed every term: pre-tax rent, charges and VAT of the first rent.
#[must_use]
pub fn periodic_rent_amount(rents: &[Rent]) -> Decimal {
    rents.first().map_or(Decimal::ZERO, |rent| {
        rent.total.pre_tax_amount + rent.total.charges + rent.total.vat
    })
}
