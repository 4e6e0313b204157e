//! Error types for rent computation and lease scheduling.
//!
//! Errors are split by origin so callers can tell a malformed contract
//! ([`ConfigError`]) from an unparseable term ([`ParseError`]) or a stage that
//! rejected its input ([`StageError`]). [`RentError`] unifies the three for the
//! pipeline entry point and [`ScheduleError`] adds the lease-level failures.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

use rentloop_shared::AppError;

use crate::term::TermKey;

/// The contract handed to the engine is malformed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The contract carries no billing period unit.
    #[error("Contract has no time range")]
    MissingTimeRange,

    /// The contract rents no property.
    #[error("Contract must rent at least one property")]
    NoProperties,

    /// A monetary field that must not be negative is negative.
    #[error("{field} cannot be negative: {amount}")]
    NegativeAmount {
        /// Name of the offending field.
        field: String,
        /// The rejected amount.
        amount: Decimal,
    },

    /// The contract ends before it begins.
    #[error("Contract end date {end} is before begin date {begin}")]
    InvalidDateRange {
        /// Contract begin date.
        begin: NaiveDate,
        /// Contract end date.
        end: NaiveDate,
    },

    /// The termination date falls outside the lease.
    #[error("Termination date {0} is outside the contract period")]
    TerminationOutOfRange(NaiveDate),

    /// A property leaves before it enters.
    #[error("Property {name} exit date {exit} is before entry date {entry}")]
    InvalidPropertyDates {
        /// Property name.
        name: String,
        /// Entry date.
        entry: NaiveDate,
        /// Exit date.
        exit: NaiveDate,
    },

    /// A credit has to be spread over terms but the periodic amount is not positive.
    #[error("Periodic rent amount must be positive to absorb a credit, got {0}")]
    NonPositivePeriodicAmount(Decimal),

    /// The periodic amount is so small that a credit spans more terms than can be counted.
    #[error("Periodic rent amount {periodic_amount} is too small to spread a credit of {balance}")]
    PeriodicAmountTooSmall {
        /// Credit to spread.
        balance: Decimal,
        /// Amount billed every term.
        periodic_amount: Decimal,
    },
}

/// A term key or date string could not be interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The term key does not encode a valid `YYYYMMDDHH` instant.
    #[error("Invalid term key {0}: expected YYYYMMDDHH")]
    InvalidTerm(String),

    /// The date string matches none of the accepted formats.
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// Date arithmetic left the supported calendar range.
    #[error("Date out of range: {0}")]
    OutOfRange(String),
}

/// Why a single stage rejected its input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StageFailure {
    /// The lease is subject to VAT but no rate is known.
    #[error("VAT applies but no VAT ratio is set")]
    MissingVatRatio,

    /// The VAT rate is not within `0..=1`.
    #[error("VAT ratio {0} is not between 0 and 1")]
    InvalidVatRatio(Decimal),

    /// A settlement discount has a negative amount.
    #[error("Settlement discount cannot be negative: {0}")]
    NegativeDiscount(Decimal),

    /// A recorded payment has a negative amount.
    #[error("Payment cannot be negative: {0}")]
    NegativePayment(Decimal),
}

/// A stage failed while computing a term. Names the stage and the term.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Stage {stage} failed for term {term}: {failure}")]
pub struct StageError {
    /// Name of the failing stage.
    pub stage: &'static str,
    /// Term being computed.
    pub term: TermKey,
    /// Underlying failure.
    #[source]
    pub failure: StageFailure,
}

/// Any failure of a rent computation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RentError {
    /// Malformed contract.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Unparseable term or date.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// A stage rejected its input.
    #[error(transparent)]
    Stage(#[from] StageError),
}

impl RentError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Config(_) => "INVALID_CONTRACT",
            Self::Parse(_) => "INVALID_TERM",
            Self::Stage(_) => "STAGE_FAILED",
        }
    }
}

/// Lease-level operations failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    /// A rent computation failed.
    #[error(transparent)]
    Rent(#[from] RentError),

    /// Rents have not been generated for this lease yet.
    #[error("Rents have not been generated for this lease")]
    NotGenerated,

    /// The term is outside the lease period.
    #[error("Term {0} is outside the contract period")]
    TermOutOfRange(TermKey),

    /// Changing the lease would drop terms that already carry a settlement.
    #[error("Some payments will be lost because they are out of the contract time frame: {}", format_terms(.0))]
    LostPayments(Vec<TermKey>),
}

impl ScheduleError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Rent(err) => err.error_code(),
            Self::NotGenerated => "RENTS_NOT_GENERATED",
            Self::TermOutOfRange(_) => "TERM_OUT_OF_RANGE",
            Self::LostPayments(_) => "LOST_PAYMENTS",
        }
    }
}

impl From<ConfigError> for ScheduleError {
    fn from(err: ConfigError) -> Self {
        Self::Rent(err.into())
    }
}

impl From<ParseError> for ScheduleError {
    fn from(err: ParseError) -> Self {
        Self::Rent(err.into())
    }
}

fn format_terms(terms: &[TermKey]) -> String {
    terms
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl From<RentError> for AppError {
    fn from(err: RentError) -> Self {
        match err {
            RentError::Config(_) | RentError::Parse(_) => Self::Validation(err.to_string()),
            RentError::Stage(_) => Self::BusinessRule(err.to_string()),
        }
    }
}

impl From<ScheduleError> for AppError {
    fn from(err: ScheduleError) -> Self {
        match err {
            ScheduleError::Rent(inner) => inner.into(),
            ScheduleError::NotGenerated => Self::NotFound(err.to_string()),
            ScheduleError::TermOutOfRange(_) => Self::Validation(err.to_string()),
            ScheduleError::LostPayments(_) => Self::Conflict(err.to_string()),
        }
    }
}
