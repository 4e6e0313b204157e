//! Portfolio-level figures: collection overview, lease status and deposit.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::rent::{Contract, Rent};

use super::status::{PaymentStatus, invoice_status};

/// Collection figures over a set of rents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RentsOverview {
    /// Number of rents.
    pub count: usize,
    /// Rents fully paid.
    pub paid_count: usize,
    /// Rents partially paid.
    pub partially_paid_count: usize,
    /// Rents not paid at all.
    pub not_paid_count: usize,
    /// Sum of grand totals.
    pub total_to_pay: Decimal,
    /// Sum of payments.
    pub total_paid: Decimal,
    /// Sum of what is still owed on each rent.
    pub total_not_paid: Decimal,
}

/// Collection overview of `rents`.
#[must_use]
pub fn overview<'a>(rents: impl IntoIterator<Item = &'a Rent>) -> RentsOverview {
    rents
        .into_iter()
        .fold(RentsOverview::default(), |mut acc, rent| {
            let total = &rent.total;
            acc.count += 1;
            match invoice_status(rent) {
                PaymentStatus::Paid => acc.paid_count += 1,
                PaymentStatus::PartiallyPaid => acc.partially_paid_count += 1,
                PaymentStatus::Unpaid => acc.not_paid_count += 1,
            }
            acc.total_to_pay += total.grand_total;
            acc.total_paid += total.payment;
            let owed = total.grand_total - total.payment;
            if owed > Decimal::ZERO {
                acc.total_not_paid += owed;
            }
            acc
        })
}

/// Lifecycle state of a lease.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LeaseStatus {
    /// Running.
    Active,
    /// Past its end date.
    Ended,
    /// Terminated early.
    Terminated,
}

/// State of `contract` on `today`.
#[must_use]
pub fn lease_status(contract: &Contract, today: NaiveDate) -> LeaseStatus {
    if contract.termination_date.is_some() {
        LeaseStatus::Terminated
    } else if contract.end_date < today {
        LeaseStatus::Ended
    } else {
        LeaseStatus::Active
    }
}

/// Deposit still held: guaranty minus what was paid back.
#[must_use]
pub fn deposit(contract: &Contract) -> Decimal {
    contract.guaranty - contract.guaranty_payback
}
