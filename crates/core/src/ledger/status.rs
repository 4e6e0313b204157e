//! Payment status and invoice views of rents.

use rust_decimal::Decimal;
use serde::Serialize;

use rentloop_shared::types::TenantId;

use crate::rent::{Payment, PaymentMethod, Rent};
use crate::term::TermKey;

/// How much of a term has been paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentStatus {
    /// Nothing left to pay.
    Paid,
    /// Some payment received, some left to pay.
    PartiallyPaid,
    /// No payment received.
    Unpaid,
}

/// Classifies a rent by comparing its payments to its grand total.
#[must_use]
pub fn invoice_status(rent: &Rent) -> PaymentStatus {
    let total = &rent.total;
    if total.grand_total - total.payment <= Decimal::ZERO {
        PaymentStatus::Paid
    } else if total.payment > Decimal::ZERO {
        PaymentStatus::PartiallyPaid
    } else {
        PaymentStatus::Unpaid
    }
}

/// A rent as presented to the tenant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    /// Term invoiced.
    pub term: TermKey,
    /// Balance after the term.
    pub balance: Decimal,
    /// Amount due for the term.
    pub grand_total: Decimal,
    /// Amount paid for the term.
    pub payment: Decimal,
    /// Payment methods used.
    pub methods: Vec<PaymentMethod>,
    /// Payment status.
    pub status: PaymentStatus,
    /// Payments received.
    pub payments: Vec<Payment>,
}

impl Invoice {
    /// Invoice of a single rent.
    #[must_use]
    pub fn from_rent(rent: &Rent) -> Self {
        Self {
            term: rent.term,
            balance: rent.total.balance,
            grand_total: rent.total.grand_total,
            payment: rent.total.payment,
            methods: rent.payments.iter().map(|p| p.method).collect(),
            status: invoice_status(rent),
            payments: rent.payments.clone(),
        }
    }

    /// Identifier of the invoice for `tenant`.
    #[must_use]
    pub fn id(&self, tenant: TenantId) -> String {
        format!("{tenant}-{}", self.term)
    }
}

/// Invoices of every rent up to `as_of`, newest first.
#[must_use]
pub fn invoices(rents: &[Rent], as_of: TermKey) -> Vec<Invoice> {
    let mut invoices: Vec<Invoice> = rents
        .iter()
        .filter(|rent| rent.term <= as_of)
        .map(Invoice::from_rent)
        .collect();
    invoices.sort_by(|a, b| b.term.cmp(&a.term));
    invoices
}
