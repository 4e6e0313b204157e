//! Due dates and billing dates of a term.

use chrono::{Datelike, Days, NaiveDate, Weekday};

use super::calendar::add_units;
use super::key::TimeRange;

/// Grace period between the start of a term and its due date.
#[must_use]
pub const fn grace_period(unit: TimeRange) -> (TimeRange, i32) {
    match unit {
        TimeRange::Days => (TimeRange::Days, 0),
        TimeRange::Weeks => (TimeRange::Days, 2),
        TimeRange::Months => (TimeRange::Days, 10),
        TimeRange::Years => (TimeRange::Months, 1),
    }
}

/// Moves a weekend date to the closest weekday: Saturday to Friday, Sunday to Monday.
#[must_use]
pub fn avoid_weekend(date: NaiveDate) -> NaiveDate {
    let shifted = match date.weekday() {
        Weekday::Sat => date.checked_sub_days(Days::new(1)),
        Weekday::Sun => date.checked_add_days(Days::new(1)),
        _ => Some(date),
    };
    shifted.unwrap_or(date)
}

/// Due date of the term starting on `term_start`.
///
/// The grace period is added, weekends are avoided, and the result is never
/// earlier than the contract begin date.
#[must_use]
pub fn shift_due_date(term_start: NaiveDate, unit: TimeRange, contract_begin: NaiveDate) -> NaiveDate {
    let (grace_unit, grace) = grace_period(unit);
    let due = avoid_weekend(add_units(term_start, grace_unit, grace).unwrap_or(term_start));
    due.max(contract_begin)
}

/// Date printed on a rent notice sent on `today`.
///
/// Notices sent before the due date carry today's date. Once the due date is
/// reached, they are backdated to the term start, off weekends.
#[must_use]
pub fn billing_date(term_start: NaiveDate, due_date: NaiveDate, today: NaiveDate) -> NaiveDate {
    if due_date <= today {
        avoid_weekend(term_start)
    } else {
        today
    }
}
