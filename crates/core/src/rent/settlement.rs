//! Settlement events recorded against a term.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How a payment was made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentMethod {
    /// Bank transfer.
    Transfer,
    /// Credit card.
    CreditCard,
    /// Cash.
    Cash,
    /// Cheque.
    Check,
}

/// A payment received for a term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    /// Date the payment was received.
    pub date: NaiveDate,
    /// Amount received.
    pub amount: Decimal,
    /// Payment method.
    pub method: PaymentMethod,
    /// Bank or cheque reference.
    #[serde(default)]
    pub reference: Option<String>,
}

/// An ad-hoc discount granted for a single term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettlementDiscount {
    /// Reason of the discount.
    pub description: String,
    /// Discount amount, excluding taxes.
    pub amount: Decimal,
}

/// What happened during a term: payments, one-off discounts, a VAT override.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settlement {
    /// Payments received.
    #[serde(default)]
    pub payments: Vec<Payment>,
    /// One-off discounts.
    #[serde(default)]
    pub discounts: Vec<SettlementDiscount>,
    /// VAT rate overriding the contract's for this term.
    #[serde(default)]
    pub vat_rate: Option<Decimal>,
    /// Free text shown on the rent notice.
    #[serde(default)]
    pub description: Option<String>,
}

impl Settlement {
    /// True when the settlement records nothing that would be lost if the term
    /// disappeared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.payments.iter().all(|p| p.amount <= Decimal::ZERO)
            && self.discounts.iter().all(|d| d.amount <= Decimal::ZERO)
            && self.vat_rate.is_none()
            && self.description.as_deref().is_none_or(str::is_empty)
    }

    /// Folds `other` into this settlement. Payments and discounts accumulate; a
    /// VAT override or description in `other` replaces this one.
    pub fn merge(&mut self, other: Self) {
        self.payments.extend(other.payments);
        self.discounts.extend(other.discounts);
        if other.vat_rate.is_some() {
            self.vat_rate = other.vat_rate;
        }
        if other.description.as_deref().is_some_and(|text| !text.is_empty()) {
            self.description = other.description;
        }
    }
}
