//! Builders shared by unit and property tests.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use rentloop_shared::types::PropertyId;

use crate::rent::{Contract, Expense, Payment, PaymentMethod, Rent, RentedProperty, Settlement};
use crate::term::{TermKey, TimeRange};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn term(raw: u64) -> TermKey {
    TermKey::from_raw(raw)
}

pub fn property(name: &str, rent: Decimal, entry: NaiveDate, exit: NaiveDate) -> RentedProperty {
    RentedProperty {
        property_id: PropertyId::new(),
        name: name.to_string(),
        rent,
        expenses: vec![],
        entry_date: entry,
        exit_date: exit,
    }
}

pub fn expense(title: &str, amount: Decimal) -> Expense {
    Expense {
        title: title.to_string(),
        amount,
        begin_date: None,
        end_date: None,
    }
}

/// Monthly lease over 2024 renting a single flat at `rent`.
pub fn monthly_contract(rent: Decimal) -> Contract {
    Contract {
        time_range: Some(TimeRange::Months),
        number_of_terms: 12,
        begin_date: date(2024, 1, 1),
        end_date: date(2024, 12, 31),
        termination_date: None,
        properties: vec![property(
            "Flat 2B",
            rent,
            date(2024, 1, 1),
            date(2024, 12, 31),
        )],
        is_vat: false,
        vat_ratio: None,
        discount: Decimal::ZERO,
        guaranty: Decimal::ZERO,
        guaranty_payback: Decimal::ZERO,
    }
}

pub fn payment(amount: Decimal) -> Payment {
    Payment {
        date: date(2024, 1, 5),
        amount,
        method: PaymentMethod::Transfer,
        reference: None,
    }
}

pub fn paying(amount: Decimal) -> Settlement {
    Settlement {
        payments: vec![payment(amount)],
        ..Settlement::default()
    }
}

/// A previous rent whose only meaningful field is its balance.
pub fn rent_with_balance(raw: u64, balance: Decimal) -> Rent {
    let mut rent = Rent::empty(TermKey::from_raw(raw));
    rent.total.balance = balance;
    rent
}
