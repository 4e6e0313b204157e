//! Term keys and billing period units.
//!
//! A term is identified by the instant its billing period starts, packed as
//! the integer `YYYYMMDDHH`. Keys order chronologically as plain integers.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use super::calendar::start_of;
use crate::error::ParseError;

/// Billing period unit of a lease.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeRange {
    /// One term per day.
    Days,
    /// One term per week.
    Weeks,
    /// One term per calendar month.
    Months,
    /// One term per year.
    Years,
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Days => write!(f, "days"),
            Self::Weeks => write!(f, "weeks"),
            Self::Months => write!(f, "months"),
            Self::Years => write!(f, "years"),
        }
    }
}

impl FromStr for TimeRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "days" => Ok(Self::Days),
            "weeks" => Ok(Self::Weeks),
            "months" => Ok(Self::Months),
            "years" => Ok(Self::Years),
            _ => Err(format!("Unknown time range: {s}")),
        }
    }
}

/// Identifier of a billing term, `YYYYMMDDHH` of the period start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TermKey(u64);

impl TermKey {
    /// Wraps a raw key without validating it. Use [`TermKey::decode`] to check it.
    #[must_use]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw integer.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }

    /// Encodes the term of `unit` starting at `at`.
    ///
    /// Monthly keys are normalized to the first day of the month. Daily, weekly
    /// and yearly keys are normalized to the start of the day: weekly and
    /// yearly periods run from their anniversary, not from a calendar boundary.
    #[must_use]
    pub fn encode(at: NaiveDateTime, unit: TimeRange) -> Self {
        let day = match unit {
            TimeRange::Months => start_of(unit, at.date()),
            TimeRange::Days | TimeRange::Weeks | TimeRange::Years => at.date(),
        };
        Self::pack(day.and_time(NaiveTime::MIN))
    }

    /// Encodes the term of `unit` starting on `date`.
    #[must_use]
    pub fn encode_date(date: NaiveDate, unit: TimeRange) -> Self {
        Self::encode(date.and_time(NaiveTime::MIN), unit)
    }

    fn pack(at: NaiveDateTime) -> Self {
        // Years before the common era are not representable.
        let year = u64::from(at.year().unsigned_abs());
        Self(
            year * 1_000_000
                + u64::from(at.month()) * 10_000
                + u64::from(at.day()) * 100
                + u64::from(at.hour()),
        )
    }

    /// Decodes the key back to the instant it identifies.
    pub fn decode(self) -> Result<NaiveDateTime, ParseError> {
        let invalid = || ParseError::InvalidTerm(self.0.to_string());
        let hour = u32::try_from(self.0 % 100).map_err(|_| invalid())?;
        let day = u32::try_from(self.0 / 100 % 100).map_err(|_| invalid())?;
        let month = u32::try_from(self.0 / 10_000 % 100).map_err(|_| invalid())?;
        let year = i32::try_from(self.0 / 1_000_000).map_err(|_| invalid())?;

        NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|date| date.and_hms_opt(hour, 0, 0))
            .ok_or_else(invalid)
    }

    /// Decodes the key to the date its period starts on.
    pub fn date(self) -> Result<NaiveDate, ParseError> {
        self.decode().map(|at| at.date())
    }

    /// Calendar year of the period start.
    #[must_use]
    pub fn year(self) -> i32 {
        i32::try_from(self.0 / 1_000_000).unwrap_or(i32::MAX)
    }

    /// Calendar month (1-12) of the period start.
    #[must_use]
    pub fn month(self) -> u32 {
        u32::try_from(self.0 / 10_000 % 100).unwrap_or_default()
    }
}

impl fmt::Display for TermKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:010}", self.0)
    }
}

impl FromStr for TermKey {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 10 || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseError::InvalidTerm(s.to_string()));
        }
        let key = Self(
            s.parse()
                .map_err(|_| ParseError::InvalidTerm(s.to_string()))?,
        );
        key.decode()?;
        Ok(key)
    }
}
