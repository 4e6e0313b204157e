//! Reporting over a tenant's rent series.
//!
//! Everything here is derived from already computed [`Rent`](crate::rent::Rent)s:
//! balances, remaining terms, payment status, invoices and collection figures.

mod balance;
mod iterations;
mod overview;
mod status;

#[cfg(test)]
mod ledger_props;

pub use balance::{Ledger, compute_balance};
pub use iterations::{RemainingIterations, compute_remaining_iterations_to_pay, periodic_rent_amount};
pub use overview::{LeaseStatus, RentsOverview, deposit, lease_status, overview};
pub use status::{Invoice, PaymentStatus, invoice_status, invoices};

use rust_decimal::Decimal;

use crate::error::RentError;
use crate::rent::Contract;
use crate::term::TermKey;

impl Ledger {
    /// Terms left on `contract` after `as_of`, and how many are not prepaid.
    pub fn remaining_iterations_to_pay(
        &self,
        contract: &Contract,
        as_of: TermKey,
        periodic_amount: Decimal,
    ) -> Result<RemainingIterations, RentError> {
        compute_remaining_iterations_to_pay(contract, self.rents(), as_of, periodic_amount)
    }

    /// Invoices up to `as_of`, newest first.
    #[must_use]
    pub fn invoices(&self, as_of: TermKey) -> Vec<Invoice> {
        invoices(self.rents(), as_of)
    }

    /// Collection overview of the terms in `[from, to]`.
    #[must_use]
    pub fn overview(&self, from: TermKey, to: TermKey) -> RentsOverview {
        overview(
            self.rents()
                .iter()
                .filter(|rent| rent.term >= from && rent.term <= to),
        )
    }

    /// Amount billed every term.
    #[must_use]
    pub fn periodic_rent_amount(&self) -> Decimal {
        periodic_rent_amount(self.rents())
    }
}
