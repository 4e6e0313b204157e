//! Property-based tests for ledger queries.
//!
//! - Balance lookups are independent of the input order once sorted
//! - Status classification agrees with the payment amounts
//! - Overview counts and totals are consistent

use proptest::prelude::*;
use rust_decimal::Decimal;

use crate::fixtures::{monthly_contract, rent_with_balance};
use crate::rent::Rent;
use crate::term::TermKey;

use super::{Ledger, PaymentStatus, compute_balance, compute_remaining_iterations_to_pay, invoice_status, overview};

/// Strategy to generate signed amounts (-5,000.00 to 5,000.00).
fn signed_amount() -> impl Strategy<Value = Decimal> {
    (-500_000i64..500_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate non-negative amounts (0.00 to 5,000.00).
fn amount() -> impl Strategy<Value = Decimal> {
    (0i64..500_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate a monthly term key in 2024.
fn month_term() -> impl Strategy<Value = TermKey> {
    (1u64..=12u64).prop_map(|month| TermKey::from_raw(2024_00_01_00 + month * 10_000))
}

/// Strategy to generate a series of monthly rents in 2024 with distinct terms, sorted.
fn series() -> impl Strategy<Value = Vec<Rent>> {
    proptest::collection::btree_map(1u64..=12u64, signed_amount(), 0..12).prop_map(|by_month| {
        by_month
            .into_iter()
            .map(|(month, balance)| rent_with_balance(2024_00_01_00 + month * 10_000, balance))
            .collect()
    })
}

fn billed(grand_total: Decimal, payment: Decimal) -> Rent {
    let mut rent = rent_with_balance(2024_01_01_00, payment - grand_total);
    rent.total.grand_total = grand_total;
    rent.total.payment = payment;
    rent
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// *For any* sorted series, the ledger balance SHALL equal the scanned balance.
    #[test]
    fn prop_ledger_matches_scan_on_sorted_series(rents in series(), as_of in month_term()) {
        let expected = compute_balance(&rents, as_of);
        prop_assert_eq!(Ledger::new(rents).balance(as_of), expected);
    }

    /// *For any* permutation of a series, the ledger balance SHALL not change.
    #[test]
    fn prop_ledger_balance_order_independent(
        (rents, shuffled) in series().prop_flat_map(|rents| {
            let shuffled = Just(rents.clone()).prop_shuffle();
            (Just(rents), shuffled)
        }),
        as_of in month_term(),
    ) {
        prop_assert_eq!(Ledger::new(shuffled).balance(as_of), Ledger::new(rents).balance(as_of));
    }

    /// *For any* positive grand total, the status SHALL follow the amount paid.
    #[test]
    fn prop_status_follows_payment(grand_total in amount(), payment in amount()) {
        prop_assume!(grand_total > Decimal::ZERO);
        let status = invoice_status(&billed(grand_total, payment));

        if payment >= grand_total {
            prop_assert_eq!(status, PaymentStatus::Paid);
        } else if payment > Decimal::ZERO {
            prop_assert_eq!(status, PaymentStatus::PartiallyPaid);
        } else {
            prop_assert_eq!(status, PaymentStatus::Unpaid);
        }
    }

    /// *For any* set of rents, every rent SHALL be counted exactly once and the
    /// amount not paid SHALL cover the gap between due and paid.
    #[test]
    fn prop_overview_consistent(amounts in proptest::collection::vec((amount(), amount()), 0..20)) {
        let rents: Vec<Rent> = amounts.iter().map(|&(due, paid)| billed(due, paid)).collect();
        let summary = overview(&rents);

        prop_assert_eq!(summary.count, rents.len());
        prop_assert_eq!(
            summary.paid_count + summary.partially_paid_count + summary.not_paid_count,
            summary.count
        );
        prop_assert!(summary.total_not_paid >= summary.total_to_pay - summary.total_paid);
        prop_assert!(summary.total_not_paid >= Decimal::ZERO);
    }

    /// *For any* known non-negative balance, the terms left to pay SHALL not
    /// exceed the terms left.
    #[test]
    fn prop_prepaid_terms_reduce_terms_to_pay(balance in amount(), as_of in month_term()) {
        let contract = monthly_contract(Decimal::new(1000, 0));
        let rents = vec![rent_with_balance(2024_01_01_00, balance)];
        let result = compute_remaining_iterations_to_pay(
            &contract,
            &rents,
            as_of,
            Decimal::new(1000, 0),
        ).unwrap();

        prop_assert!(result.remaining_iterations_to_pay < result.remaining_iterations
            || (balance > Decimal::ZERO && balance < Decimal::new(1000, 0)));
    }
}
