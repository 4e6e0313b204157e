//! Lease contract as seen by the rent engine.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use rentloop_shared::types::PropertyId;

use crate::error::ConfigError;
use crate::term::{TimeRange, add_units, fractional_diff, start_of};

/// A recurring expense attached to a rented property (e.g. building charges).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    /// Line description.
    pub title: String,
    /// Amount billed for a full term.
    pub amount: Decimal,
    /// First day the expense applies; defaults to the property entry date.
    #[serde(default)]
    pub begin_date: Option<NaiveDate>,
    /// Last day the expense applies; defaults to the property exit date.
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

/// A property rented under a contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RentedProperty {
    /// Property identifier.
    pub property_id: PropertyId,
    /// Name used as the pre-tax line description.
    pub name: String,
    /// Rent billed for a full term, excluding taxes.
    pub rent: Decimal,
    /// Expenses billed alongside the rent.
    #[serde(default)]
    pub expenses: Vec<Expense>,
    /// Day the tenant enters the property.
    pub entry_date: NaiveDate,
    /// Last day the tenant occupies the property.
    pub exit_date: NaiveDate,
}

/// Lease terms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contract {
    /// Billing period unit.
    #[serde(default)]
    pub time_range: Option<TimeRange>,
    /// Number of terms of the lease; used when renewing.
    #[serde(default)]
    pub number_of_terms: u32,
    /// First day of the lease.
    pub begin_date: NaiveDate,
    /// Last day of the lease.
    pub end_date: NaiveDate,
    /// Early end of the lease.
    #[serde(default)]
    pub termination_date: Option<NaiveDate>,
    /// Rented properties.
    #[serde(default)]
    pub properties: Vec<RentedProperty>,
    /// Whether VAT is charged.
    #[serde(default)]
    pub is_vat: bool,
    /// VAT rate between 0 and 1.
    #[serde(default)]
    pub vat_ratio: Option<Decimal>,
    /// Discount granted on every billed term.
    #[serde(default)]
    pub discount: Decimal,
    /// Security deposit.
    #[serde(default)]
    pub guaranty: Decimal,
    /// Part of the deposit already returned.
    #[serde(default)]
    pub guaranty_payback: Decimal,
}

impl Contract {
    /// Billing period unit, required for any computation.
    pub fn time_range(&self) -> Result<TimeRange, ConfigError> {
        self.time_range.ok_or(ConfigError::MissingTimeRange)
    }

    /// Last day billed: the termination date if any, else the end date.
    #[must_use]
    pub fn last_day(&self) -> NaiveDate {
        self.termination_date.unwrap_or(self.end_date)
    }

    /// Checks the contract is complete and consistent. Returns its time range.
    pub fn validate(&self) -> Result<TimeRange, ConfigError> {
        let unit = self.time_range()?;

        if self.end_date < self.begin_date {
            return Err(ConfigError::InvalidDateRange {
                begin: self.begin_date,
                end: self.end_date,
            });
        }
        if let Some(termination) = self.termination_date
            && (termination < self.begin_date || termination > self.end_date)
        {
            return Err(ConfigError::TerminationOutOfRange(termination));
        }
        if self.properties.is_empty() {
            return Err(ConfigError::NoProperties);
        }

        non_negative("discount", self.discount)?;
        non_negative("guaranty", self.guaranty)?;
        non_negative("guarantyPayback", self.guaranty_payback)?;
        if let Some(ratio) = self.vat_ratio {
            non_negative("vatRatio", ratio)?;
        }

        for property in &self.properties {
            if property.exit_date < property.entry_date {
                return Err(ConfigError::InvalidPropertyDates {
                    name: property.name.clone(),
                    entry: property.entry_date,
                    exit: property.exit_date,
                });
            }
            non_negative("rent", property.rent)?;
            for expense in &property.expenses {
                non_negative("expense", expense.amount)?;
            }
        }

        Ok(unit)
    }

    /// Number of whole terms between begin and end dates, rounded to nearest.
    pub fn computed_number_of_terms(&self) -> Result<u32, ConfigError> {
        let unit = self.time_range()?;
        let terms = fractional_diff(self.end_date, self.begin_date, unit).round();
        Ok(u32::try_from(terms).unwrap_or_default())
    }

    /// Whether the period starting on `term_start` is billed by this lease.
    pub fn covers(&self, term_start: NaiveDate) -> Result<bool, ConfigError> {
        let unit = self.time_range()?;
        Ok(term_start >= start_of_term(self.begin_date, unit) && term_start <= self.last_day())
    }

    /// Copy of the contract extended by `number_of_terms` (or its computed length).
    pub fn renewed(&self) -> Result<Self, ConfigError> {
        let unit = self.time_range()?;
        let terms = if self.number_of_terms == 0 {
            self.computed_number_of_terms()?
        } else {
            self.number_of_terms
        };
        let count = i32::try_from(terms).unwrap_or(i32::MAX);
        let end_date = add_units(self.end_date, unit, count).ok_or(ConfigError::InvalidDateRange {
            begin: self.begin_date,
            end: self.end_date,
        })?;
        Ok(Self {
            end_date,
            ..self.clone()
        })
    }
}

fn start_of_term(date: NaiveDate, unit: TimeRange) -> NaiveDate {
    match unit {
        TimeRange::Months => start_of(unit, date),
        TimeRange::Days | TimeRange::Weeks | TimeRange::Years => date,
    }
}

fn non_negative(field: &str, amount: Decimal) -> Result<(), ConfigError> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(ConfigError::NegativeAmount {
            field: field.to_string(),
            amount,
        });
    }
    Ok(())
}
