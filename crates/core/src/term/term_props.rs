//! Property-based tests for term keys and due dates.
//!
//! - Key order is chronological order
//! - Stepping forward then back returns the same term
//! - Due dates never fall on a weekend nor before the lease begins

use chrono::{Datelike, Days, NaiveDate, Weekday};
use proptest::prelude::*;

use super::{TermKey, TimeRange, next_term, previous_term, shift_due_date, start_of};

/// Strategy to generate dates between 2000-01-01 and mid 2027.
fn any_date() -> impl Strategy<Value = NaiveDate> {
    (0u64..10_000u64).prop_map(|offset| {
        NaiveDate::from_ymd_opt(2000, 1, 1)
            .and_then(|origin| origin.checked_add_days(Days::new(offset)))
            .unwrap_or(NaiveDate::MIN)
    })
}

/// Strategy to generate a billing unit.
fn any_unit() -> impl Strategy<Value = TimeRange> {
    prop_oneof![
        Just(TimeRange::Days),
        Just(TimeRange::Weeks),
        Just(TimeRange::Months),
        Just(TimeRange::Years),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// *For any* two dates, their term keys SHALL compare like the dates.
    #[test]
    fn prop_key_order_is_chronological(a in any_date(), b in any_date()) {
        let ka = TermKey::encode_date(a, TimeRange::Days);
        let kb = TermKey::encode_date(b, TimeRange::Days);
        prop_assert_eq!(ka.cmp(&kb), a.cmp(&b));
    }

    /// *For any* key, decoding then encoding SHALL give back the key.
    #[test]
    fn prop_encode_decode_stable(date in any_date(), unit in any_unit()) {
        let key = TermKey::encode_date(date, unit);
        let decoded = key.decode().unwrap();
        prop_assert_eq!(TermKey::encode(decoded, unit), key);
        prop_assert_eq!(key.to_string().parse::<TermKey>().unwrap(), key);
    }

    /// *For any* monthly term, the next then previous term SHALL be the same term.
    #[test]
    fn prop_monthly_step_round_trips(date in any_date()) {
        let key = TermKey::encode_date(date, TimeRange::Months);
        let next = next_term(key, TimeRange::Months).unwrap();
        prop_assert!(next > key);
        prop_assert_eq!(previous_term(next, TimeRange::Months).unwrap(), key);
    }

    /// *For any* term start, the due date SHALL not fall on a weekend unless it
    /// is the lease begin date, and SHALL never precede the lease begin.
    #[test]
    fn prop_due_date_avoids_weekends(
        date in any_date(),
        unit in any_unit(),
        lead in 0u64..60u64,
    ) {
        let term_start = start_of(unit, date);
        let begin = term_start.checked_sub_days(Days::new(lead)).unwrap_or(term_start);
        let due = shift_due_date(term_start, unit, begin);

        prop_assert!(due >= begin);
        let weekend = matches!(due.weekday(), Weekday::Sat | Weekday::Sun);
        prop_assert!(!weekend || due == begin);
    }
}
