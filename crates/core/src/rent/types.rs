//! The per-term financial statement.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::settlement::{Payment, Settlement, SettlementDiscount};
use crate::term::TermKey;

/// Where a tagged line comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    /// Derived from the contract terms.
    Contract,
    /// Derived from the term's settlement.
    Settlement,
}

/// A described amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Line description.
    pub description: String,
    /// Line amount.
    pub amount: Decimal,
}

/// A discount line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountLine {
    /// Source of the discount.
    pub origin: Origin,
    /// Line description.
    pub description: String,
    /// Positive amount subtracted from the grand total.
    pub amount: Decimal,
}

/// A VAT line. Negative when it offsets a discount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VatLine {
    /// Source of the applied rate.
    pub origin: Origin,
    /// Line description.
    pub description: String,
    /// Applied rate.
    pub rate: Decimal,
    /// VAT amount.
    pub amount: Decimal,
}

/// Totals of a rent. Each one is the sum of its line items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RentTotal {
    /// Sum of pre-tax amounts.
    pub pre_tax_amount: Decimal,
    /// Sum of charges.
    pub charges: Decimal,
    /// Sum of discounts.
    pub discount: Decimal,
    /// Sum of VAT lines.
    pub vat: Decimal,
    /// Sum of carried debts.
    pub debts: Decimal,
    /// Sum of payments.
    pub payment: Decimal,
    /// Positive balance carried from the previous term.
    pub credit: Decimal,
    /// `payment + credit - grand_total`. Negative when the tenant owes money.
    ///
    /// A positive previous balance produces no line, so it is added back here
    /// through `credit`. Without a credit this is `payment - grand_total`; see
    /// [`RentTotal::term_balance`] for that figure on its own.
    pub balance: Decimal,
    /// `pre_tax_amount + charges + vat - discount + debts`.
    pub grand_total: Decimal,
}

impl RentTotal {
    /// `payment - grand_total`: what this term's payments leave, ignoring any
    /// credit carried from earlier terms.
    #[must_use]
    pub fn term_balance(&self) -> Decimal {
        self.payment - self.grand_total
    }
}

/// Financial statement of one term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rent {
    /// Term identifier.
    pub term: TermKey,
    /// Month of the term start (1-12).
    pub month: u32,
    /// Year of the term start.
    pub year: i32,
    /// Free text copied from the settlement.
    #[serde(default)]
    pub description: String,
    /// VAT rate override recorded by the settlement, applied or not.
    #[serde(default)]
    pub vat_rate: Option<Decimal>,
    /// Rent of each property, prorated.
    #[serde(default)]
    pub pre_tax_amounts: Vec<LineItem>,
    /// Expenses of each property, prorated.
    #[serde(default)]
    pub charges: Vec<LineItem>,
    /// Contract and settlement discounts.
    #[serde(default)]
    pub discounts: Vec<DiscountLine>,
    /// Unpaid balance carried from the previous term.
    #[serde(default)]
    pub debts: Vec<LineItem>,
    /// VAT lines.
    #[serde(default)]
    pub vats: Vec<VatLine>,
    /// Payments received.
    #[serde(default)]
    pub payments: Vec<Payment>,
    /// Totals.
    #[serde(default)]
    pub total: RentTotal,
}

impl Rent {
    /// Blank rent for `term`, the seed of a pipeline run.
    #[must_use]
    pub fn empty(term: TermKey) -> Self {
        Self {
            term,
            month: term.month(),
            year: term.year(),
            description: String::new(),
            vat_rate: None,
            pre_tax_amounts: Vec::new(),
            charges: Vec::new(),
            discounts: Vec::new(),
            debts: Vec::new(),
            vats: Vec::new(),
            payments: Vec::new(),
            total: RentTotal::default(),
        }
    }

    /// Totals recomputed from the line items, carrying `credit`.
    #[must_use]
    pub fn sum_lines(&self, credit: Decimal) -> RentTotal {
        let pre_tax_amount = sum(self.pre_tax_amounts.iter().map(|l| l.amount));
        let charges = sum(self.charges.iter().map(|l| l.amount));
        let discount = sum(self.discounts.iter().map(|l| l.amount));
        let vat = sum(self.vats.iter().map(|l| l.amount));
        let debts = sum(self.debts.iter().map(|l| l.amount));
        let payment = sum(self.payments.iter().map(|p| p.amount));
        let grand_total = pre_tax_amount + charges + vat - discount + debts;

        RentTotal {
            pre_tax_amount,
            charges,
            discount,
            vat,
            debts,
            payment,
            credit,
            balance: payment + credit - grand_total,
            grand_total,
        }
    }

    /// True when every total matches its line items.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.sum_lines(self.total.credit) == self.total
    }

    /// Rebuilds the settlement this rent was computed with.
    #[must_use]
    pub fn settlement(&self) -> Settlement {
        Settlement {
            payments: self.payments.clone(),
            discounts: self
                .discounts
                .iter()
                .filter(|line| line.origin == Origin::Settlement)
                .map(|line| SettlementDiscount {
                    description: line.description.clone(),
                    amount: line.amount,
                })
                .collect(),
            vat_rate: self.vat_rate,
            description: (!self.description.is_empty()).then(|| self.description.clone()),
        }
    }

    /// True when a settlement was recorded on this rent.
    #[must_use]
    pub fn has_settlement(&self) -> bool {
        !self.settlement().is_empty()
    }
}

fn sum(amounts: impl Iterator<Item = Decimal>) -> Decimal {
    amounts.fold(Decimal::ZERO, |acc, amount| acc + amount)
}
