//! Calendar arithmetic over billing periods.

use chrono::{DateTime, Datelike, Days, Months, NaiveDate};
use rust_decimal::Decimal;

use super::key::{TermKey, TimeRange};
use crate::error::ParseError;

/// First day of the calendar `unit` containing `date`. Weeks start on Monday.
#[must_use]
pub fn start_of(unit: TimeRange, date: NaiveDate) -> NaiveDate {
    match unit {
        TimeRange::Days => date,
        TimeRange::Weeks => {
            let offset = u64::from(date.weekday().num_days_from_monday());
            date.checked_sub_days(Days::new(offset)).unwrap_or(date)
        }
        TimeRange::Months => date.with_day(1).unwrap_or(date),
        TimeRange::Years => date.with_ordinal(1).unwrap_or(date),
    }
}

/// Last day of the calendar `unit` containing `date`.
#[must_use]
pub fn end_of(unit: TimeRange, date: NaiveDate) -> NaiveDate {
    add_units(start_of(unit, date), unit, 1)
        .and_then(|next| next.pred_opt())
        .unwrap_or(NaiveDate::MAX)
}

/// Moves `date` by `count` units. Month and year steps clamp to the last valid
/// day of the target month (January 31st plus one month is February 28th/29th).
#[must_use]
pub fn add_units(date: NaiveDate, unit: TimeRange, count: i32) -> Option<NaiveDate> {
    let magnitude = count.unsigned_abs();
    match unit {
        TimeRange::Days => shift_days(date, u64::from(magnitude), count < 0),
        TimeRange::Weeks => shift_days(date, u64::from(magnitude) * 7, count < 0),
        TimeRange::Months => shift_months(date, magnitude, count < 0),
        TimeRange::Years => shift_months(date, magnitude.checked_mul(12)?, count < 0),
    }
}

fn shift_days(date: NaiveDate, days: u64, backwards: bool) -> Option<NaiveDate> {
    if backwards {
        date.checked_sub_days(Days::new(days))
    } else {
        date.checked_add_days(Days::new(days))
    }
}

fn shift_months(date: NaiveDate, months: u32, backwards: bool) -> Option<NaiveDate> {
    if backwards {
        date.checked_sub_months(Months::new(months))
    } else {
        date.checked_add_months(Months::new(months))
    }
}

/// Inclusive date span covered by one term.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TermPeriod {
    /// First day of the term.
    pub start: NaiveDate,
    /// Last day of the term.
    pub end: NaiveDate,
}

impl TermPeriod {
    /// Resolves the period of `term` for a lease billed per `unit`.
    pub fn of(term: TermKey, unit: TimeRange) -> Result<Self, ParseError> {
        let start = term.date()?;
        let end = add_units(start, unit, 1)
            .and_then(|next| next.pred_opt())
            .ok_or_else(|| ParseError::OutOfRange(term.to_string()))?;
        Ok(Self { start, end })
    }

    /// Number of days in the period.
    #[must_use]
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Number of days of the period that fall within `[from, to]`, zero when disjoint.
    #[must_use]
    pub fn overlap_days(&self, from: NaiveDate, to: NaiveDate) -> i64 {
        let first = from.max(self.start);
        let last = to.min(self.end);
        ((last - first).num_days() + 1).max(0)
    }
}

/// First and last day billed by `term`.
pub fn term_period(term: TermKey, unit: TimeRange) -> Result<TermPeriod, ParseError> {
    TermPeriod::of(term, unit)
}

/// Key of the term following `term`.
pub fn next_term(term: TermKey, unit: TimeRange) -> Result<TermKey, ParseError> {
    step_term(term, unit, 1)
}

/// Key of the term preceding `term`.
pub fn previous_term(term: TermKey, unit: TimeRange) -> Result<TermKey, ParseError> {
    step_term(term, unit, -1)
}

fn step_term(term: TermKey, unit: TimeRange, count: i32) -> Result<TermKey, ParseError> {
    let start = term.date()?;
    add_units(start, unit, count)
        .map(|date| TermKey::encode_date(date, unit))
        .ok_or_else(|| ParseError::OutOfRange(term.to_string()))
}

/// Fractional number of `unit`s from `from` to `to`, negative when `to` is earlier.
///
/// Months are measured against anchor dates: whole months first, then the
/// remainder as a fraction of the surrounding month. Years are months / 12.
#[must_use]
pub fn fractional_diff(to: NaiveDate, from: NaiveDate, unit: TimeRange) -> Decimal {
    let days = Decimal::from((to - from).num_days());
    match unit {
        TimeRange::Days => days,
        TimeRange::Weeks => days / Decimal::from(7),
        TimeRange::Months => month_diff(to, from),
        TimeRange::Years => month_diff(to, from) / Decimal::from(12),
    }
}

fn month_diff(a: NaiveDate, b: NaiveDate) -> Decimal {
    if a.day() < b.day() {
        return -month_diff(b, a);
    }
    let whole = month_index(b) - month_index(a);
    let Some(anchor) = add_units(a, TimeRange::Months, whole) else {
        return Decimal::ZERO;
    };
    let step = if b < anchor { whole - 1 } else { whole + 1 };
    let Some(other) = add_units(a, TimeRange::Months, step) else {
        return -Decimal::from(whole);
    };
    let span = Decimal::from((other - anchor).num_days().abs());
    let adjust = Decimal::from((b - anchor).num_days()) / span;
    -(Decimal::from(whole) + adjust)
}

fn month_index(date: NaiveDate) -> i32 {
    date.year() * 12 + i32::try_from(date.month0()).unwrap_or_default()
}

/// Number of terms, rounded up, between the period containing `as_of` and `end`.
pub fn remaining_iterations(
    end: NaiveDate,
    as_of: TermKey,
    unit: TimeRange,
) -> Result<i64, ParseError> {
    let from = start_of(unit, as_of.date()?);
    let diff = fractional_diff(end, from, unit).ceil();
    i64::try_from(diff).map_err(|_| ParseError::OutOfRange(diff.to_string()))
}

/// Parses a date given as `YYYY-MM-DD`, `DD/MM/YYYY` or an RFC 3339 timestamp.
pub fn parse_date(input: &str) -> Result<NaiveDate, ParseError> {
    let trimmed = input.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(trimmed, "%d/%m/%Y"))
        .or_else(|_| DateTime::parse_from_rfc3339(trimmed).map(|at| at.date_naive()))
        .map_err(|_| ParseError::InvalidDate(input.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[rstest]
    #[case(TimeRange::Days, date(2024, 3, 13), date(2024, 3, 13), date(2024, 3, 13))]
    #[case(TimeRange::Weeks, date(2024, 3, 13), date(2024, 3, 11), date(2024, 3, 17))]
    #[case(TimeRange::Months, date(2024, 2, 13), date(2024, 2, 1), date(2024, 2, 29))]
    #[case(TimeRange::Years, date(2023, 6, 30), date(2023, 1, 1), date(2023, 12, 31))]
    fn test_boundaries(
        #[case] unit: TimeRange,
        #[case] day: NaiveDate,
        #[case] first: NaiveDate,
        #[case] last: NaiveDate,
    ) {
        assert_eq!(start_of(unit, day), first);
        assert_eq!(end_of(unit, day), last);
    }

    #[test]
    fn test_add_units_clamps_to_month_end() {
        assert_eq!(
            add_units(date(2024, 1, 31), TimeRange::Months, 1),
            Some(date(2024, 2, 29))
        );
        assert_eq!(
            add_units(date(2024, 2, 29), TimeRange::Years, 1),
            Some(date(2025, 2, 28))
        );
        assert_eq!(
            add_units(date(2024, 3, 1), TimeRange::Weeks, -1),
            Some(date(2024, 2, 23))
        );
    }

    #[test]
    fn test_term_period() {
        let period = TermPeriod::of(TermKey::from_raw(2024_02_01_00), TimeRange::Months).unwrap();
        assert_eq!(period.start, date(2024, 2, 1));
        assert_eq!(period.end, date(2024, 2, 29));
        assert_eq!(period.days(), 29);

        let weekly = TermPeriod::of(TermKey::from_raw(2024_03_13_00), TimeRange::Weeks).unwrap();
        assert_eq!(weekly.end, date(2024, 3, 19));
        assert_eq!(weekly.days(), 7);
    }

    #[test]
    fn test_overlap_days() {
        let period = TermPeriod::of(TermKey::from_raw(2024_04_01_00), TimeRange::Months).unwrap();
        assert_eq!(period.overlap_days(date(2024, 1, 1), date(2024, 12, 31)), 30);
        assert_eq!(period.overlap_days(date(2024, 4, 16), date(2024, 12, 31)), 15);
        assert_eq!(period.overlap_days(date(2024, 5, 1), date(2024, 12, 31)), 0);
        assert_eq!(period.overlap_days(date(2023, 1, 1), date(2024, 4, 1)), 1);
    }

    #[test]
    fn test_next_and_previous_term() {
        let jan = TermKey::from_raw(2024_01_01_00);
        let feb = next_term(jan, TimeRange::Months).unwrap();
        assert_eq!(feb, TermKey::from_raw(2024_02_01_00));
        assert_eq!(previous_term(feb, TimeRange::Months).unwrap(), jan);
        assert_eq!(
            previous_term(jan, TimeRange::Months).unwrap(),
            TermKey::from_raw(2023_12_01_00)
        );
        assert_eq!(
            next_term(TermKey::from_raw(2024_12_30_00), TimeRange::Weeks).unwrap(),
            TermKey::from_raw(2025_01_06_00)
        );
    }

    #[test]
    fn test_fractional_month_diff() {
        assert_eq!(
            fractional_diff(date(2024, 6, 1), date(2024, 1, 1), TimeRange::Months),
            dec!(5)
        );
        assert_eq!(
            fractional_diff(date(2024, 1, 1), date(2024, 6, 1), TimeRange::Months),
            dec!(-5)
        );
        let partial = fractional_diff(date(2024, 12, 31), date(2024, 3, 1), TimeRange::Months);
        assert!(partial > dec!(9) && partial < dec!(10));
        assert_eq!(
            fractional_diff(date(2026, 1, 1), date(2024, 1, 1), TimeRange::Years),
            dec!(2)
        );
        assert_eq!(
            fractional_diff(date(2024, 1, 15), date(2024, 1, 1), TimeRange::Weeks),
            dec!(2)
        );
    }

    #[rstest]
    #[case(date(2024, 12, 31), 2024_01_01_00, 12)]
    #[case(date(2024, 12, 31), 2024_03_15_00, 10)]
    #[case(date(2024, 12, 31), 2024_12_01_00, 1)]
    #[case(date(2024, 6, 30), 2024_09_01_00, -2)]
    fn test_remaining_iterations_monthly(
        #[case] end: NaiveDate,
        #[case] as_of: u64,
        #[case] expected: i64,
    ) {
        assert_eq!(
            remaining_iterations(end, TermKey::from_raw(as_of), TimeRange::Months).unwrap(),
            expected
        );
    }

    #[rstest]
    #[case("2024-03-01")]
    #[case("01/03/2024")]
    #[case("2024-03-01T10:00:00+01:00")]
    #[case(" 2024-03-01 ")]
    fn test_parse_date_formats(#[case] input: &str) {
        assert_eq!(parse_date(input).unwrap(), date(2024, 3, 1));
    }

    #[test]
    fn test_parse_date_rejects_garbage() {
        assert!(matches!(
            parse_date("31/02/2024"),
            Err(ParseError::InvalidDate(_))
        ));
        assert!(parse_date("next tuesday").is_err());
    }
}
