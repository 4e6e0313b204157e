//! Rent engine data model.
//!
//! A [`Contract`] and an optional [`Settlement`] go in, a [`Rent`] comes out.

mod contract;
mod settlement;
mod types;

pub use contract::{Contract, Expense, RentedProperty};
pub use settlement::{Payment, PaymentMethod, Settlement, SettlementDiscount};
pub use types::{DiscountLine, LineItem, Origin, Rent, RentTotal, VatLine};
