//! Property-based tests for the standard stages.
//!
//! - Conservation: totals equal their line items
//! - Idempotence: identical inputs give identical rents
//! - Carry-forward: a negative previous balance becomes exactly one debt
//! - Proration: billed rent never exceeds the full rent

use proptest::prelude::*;
use rust_decimal::Decimal;

use crate::fixtures::{date, expense, monthly_contract, paying, rent_with_balance, term};
use crate::pipeline::compute_rent_term;
use crate::rent::Contract;

use super::prorate;

/// Strategy to generate amounts (0.00 to 5,000.00).
fn amount() -> impl Strategy<Value = Decimal> {
    (0i64..500_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate signed balances (-5,000.00 to 5,000.00).
fn balance() -> impl Strategy<Value = Decimal> {
    (-500_000i64..500_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate VAT rates (0% to 30%, 0.1% steps).
fn vat_rate() -> impl Strategy<Value = Decimal> {
    (0i64..=300i64).prop_map(|permille| Decimal::new(permille, 3))
}

/// Strategy to generate an entry day within April 2024.
fn entry_day() -> impl Strategy<Value = u32> {
    1u32..=30u32
}

fn contract(rent: Decimal, charge: Decimal, discount: Decimal, vat: Option<Decimal>) -> Contract {
    let mut contract = monthly_contract(rent);
    contract.properties[0].expenses.push(expense("Charges", charge));
    contract.discount = discount;
    contract.is_vat = vat.is_some();
    contract.vat_ratio = vat;
    contract
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// *For any* lease and settlement, every total SHALL equal the sum of its
    /// line items and the grand total and balance SHALL follow their formulas.
    #[test]
    fn prop_totals_conserve_line_items(
        rent in amount(),
        charge in amount(),
        discount in amount(),
        vat in proptest::option::of(vat_rate()),
        paid in amount(),
        previous in balance(),
    ) {
        let contract = contract(rent, charge, discount, vat);
        let previous = rent_with_balance(2024_02_01_00, previous);
        let result = compute_rent_term(
            &contract,
            term(2024_03_01_00),
            Some(&previous),
            Some(&paying(paid)),
        );

        prop_assert!(result.is_ok());
        let rent = result.unwrap();
        let total = &rent.total;
        prop_assert!(rent.is_consistent());
        prop_assert_eq!(
            total.grand_total,
            total.pre_tax_amount + total.charges + total.vat - total.discount + total.debts
        );
        prop_assert_eq!(total.balance, total.payment + total.credit - total.grand_total);
    }

    /// *For any* inputs, computing the same term twice SHALL yield identical rents.
    #[test]
    fn prop_computation_is_idempotent(
        rent in amount(),
        charge in amount(),
        vat in proptest::option::of(vat_rate()),
        paid in amount(),
        previous in balance(),
    ) {
        let contract = contract(rent, charge, Decimal::ZERO, vat);
        let previous = rent_with_balance(2024_02_01_00, previous);
        let settlement = paying(paid);

        let first = compute_rent_term(&contract, term(2024_03_01_00), Some(&previous), Some(&settlement));
        let second = compute_rent_term(&contract, term(2024_03_01_00), Some(&previous), Some(&settlement));
        prop_assert_eq!(first, second);
    }

    /// *For any* negative previous balance, the term SHALL carry exactly one debt
    /// of the opposite amount. A positive balance SHALL carry no debt and a credit.
    #[test]
    fn prop_previous_balance_carried_forward(previous in balance()) {
        let contract = monthly_contract(Decimal::new(1000, 0));
        let prev = rent_with_balance(2024_02_01_00, previous);
        let rent = compute_rent_term(&contract, term(2024_03_01_00), Some(&prev), None).unwrap();

        if previous < Decimal::ZERO {
            prop_assert_eq!(rent.debts.len(), 1);
            prop_assert_eq!(rent.total.debts, -previous);
            prop_assert_eq!(rent.total.credit, Decimal::ZERO);
        } else {
            prop_assert!(rent.debts.is_empty());
            prop_assert_eq!(rent.total.credit, previous);
        }
    }

    /// *For any* VAT rate, the VAT total SHALL stay within half a cent per line
    /// of `rate * (pre_tax + charges - discount)`.
    #[test]
    fn prop_vat_tracks_taxable_base(
        rent in amount(),
        charge in amount(),
        discount in amount(),
        rate in vat_rate(),
    ) {
        let contract = contract(rent, charge, discount, Some(rate));
        let rent = compute_rent_term(&contract, term(2024_03_01_00), None, None).unwrap();
        let total = &rent.total;

        let exact = rate * (total.pre_tax_amount + total.charges - total.discount);
        let tolerance = Decimal::new(5, 3) * Decimal::from(rent.vats.len());
        prop_assert!((total.vat - exact).abs() <= tolerance);
    }

    /// *For any* entry day, the prorated rent SHALL be between zero and the full
    /// rent, and a first-day entry SHALL bill the full rent.
    #[test]
    fn prop_proration_bounded(rent in amount(), day in entry_day()) {
        let mut contract = monthly_contract(rent);
        contract.properties[0].entry_date = date(2024, 4, day);
        let billed = compute_rent_term(&contract, term(2024_04_01_00), None, None)
            .unwrap()
            .total
            .pre_tax_amount;

        prop_assert!(billed >= Decimal::ZERO);
        prop_assert!(billed <= rent);
        if day == 1 {
            prop_assert_eq!(billed, rent);
        }
    }

    /// *For any* split of a term, the two prorated parts SHALL add up to the
    /// full amount within one rounding step per part.
    #[test]
    fn prop_prorate_parts_add_up(amount in amount(), split in 1i64..30i64) {
        let first = prorate(amount, split, 30, 2);
        let second = prorate(amount, 30 - split, 30, 2);
        prop_assert!((first + second - amount).abs() <= Decimal::new(1, 2));
    }
}
