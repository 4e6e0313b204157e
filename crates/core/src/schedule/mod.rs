//! Whole-lease rent series.
//!
//! [`LeaseSchedule`] generates every rent of a lease and keeps the series
//! consistent when a term's settlement or the lease itself changes. Each
//! change recomputes the affected terms from scratch; rents are never patched.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use rentloop_shared::BillingConfig;
use tracing::{debug, info};

use crate::error::{ConfigError, ParseError, ScheduleError};
use crate::pipeline::{ComputeContext, Pipeline};
use crate::rent::{Contract, Rent, Settlement};
use crate::term::{TermKey, TermPeriod, TimeRange, add_units};

/// Generates and recomputes the rents of a lease.
#[derive(Debug, Clone, Default)]
pub struct LeaseSchedule {
    pipeline: Pipeline,
    context: ComputeContext,
}

impl LeaseSchedule {
    /// Schedule running `pipeline` with `context`.
    #[must_use]
    pub fn new(pipeline: Pipeline, context: ComputeContext) -> Self {
        Self { pipeline, context }
    }

    /// Standard schedule configured from billing settings.
    #[must_use]
    pub fn from_config(config: &BillingConfig) -> Self {
        Self::new(Pipeline::standard(), ComputeContext::from_config(config))
    }

    fn compute(
        &self,
        contract: &Contract,
        term: TermKey,
        previous: Option<&Rent>,
        settlement: Option<&Settlement>,
    ) -> Result<Rent, ScheduleError> {
        self.pipeline
            .compute(&self.context, contract, term, previous, settlement)
            .map_err(ScheduleError::from)
    }

    /// Computes every term from the contract begin to its termination or end,
    /// applying the settlements recorded per term.
    pub fn generate(
        &self,
        contract: &Contract,
        settlements: &BTreeMap<TermKey, Settlement>,
    ) -> Result<Vec<Rent>, ScheduleError> {
        let unit = contract.validate()?;
        let mut rents: Vec<Rent> = Vec::new();

        for term in lease_terms(contract, unit)? {
            let rent = self.compute(contract, term, rents.last(), settlements.get(&term))?;
            rents.push(rent);
        }

        info!(terms = rents.len(), time_range = %unit, "Rents generated");
        Ok(rents)
    }

    /// Records `settlement` on `term` and recomputes that term and every later
    /// one. Later terms keep the settlements already recorded on them.
    pub fn pay_term(
        &self,
        contract: &Contract,
        rents: &[Rent],
        term: TermKey,
        settlement: &Settlement,
    ) -> Result<Vec<Rent>, ScheduleError> {
        if rents.is_empty() {
            return Err(ScheduleError::NotGenerated);
        }
        let unit = contract.time_range()?;
        let term = TermKey::encode(term.decode()?, unit);
        if !contract.covers(term.date()?)? {
            return Err(ScheduleError::TermOutOfRange(term));
        }
        let index = rents
            .iter()
            .position(|rent| rent.term == term)
            .ok_or(ScheduleError::NotGenerated)?;

        let mut recomputed = rents[..index].to_vec();
        for (offset, rent) in rents[index..].iter().enumerate() {
            let recorded;
            let applied = if offset == 0 {
                settlement
            } else {
                recorded = rent.settlement();
                &recorded
            };
            let next = self.compute(contract, rent.term, recomputed.last(), Some(applied))?;
            recomputed.push(next);
        }

        debug!(term = %term, recomputed = rents.len() - index, "Term settled");
        Ok(recomputed)
    }

    /// Regenerates the series for the `modified` contract, replaying the
    /// settlements recorded in `rents`.
    ///
    /// Each settlement moves to the new term whose period contains the start of
    /// the term it was recorded on, so it survives a shifted begin date. Several
    /// settlements landing on the same term are merged.
    pub fn update(&self, rents: &[Rent], modified: &Contract) -> Result<Vec<Rent>, ScheduleError> {
        let unit = modified.validate()?;
        check_lost_payments(modified, rents)?;

        let terms = lease_terms(modified, unit)?;
        let mut settlements: BTreeMap<TermKey, Settlement> = BTreeMap::new();
        let mut lost = Vec::new();
        for rent in rents.iter().filter(|rent| rent.has_settlement()) {
            match containing_term(&terms, unit, rent.term.date()?)? {
                Some(term) => settlements.entry(term).or_default().merge(rent.settlement()),
                None => lost.push(rent.term),
            }
        }
        if !lost.is_empty() {
            return Err(ScheduleError::LostPayments(lost));
        }

        info!(replayed = settlements.len(), "Regenerating rents after lease change");
        self.generate(modified, &settlements)
    }

    /// Terminates the lease on `termination` and regenerates its rents.
    pub fn terminate(
        &self,
        contract: &Contract,
        rents: &[Rent],
        termination: NaiveDate,
    ) -> Result<(Contract, Vec<Rent>), ScheduleError> {
        let terminated = Contract {
            termination_date: Some(termination),
            ..contract.clone()
        };
        let rents = self.update(rents, &terminated)?;
        Ok((terminated, rents))
    }

    /// Extends the lease by its number of terms and regenerates its rents.
    pub fn renew(
        &self,
        contract: &Contract,
        rents: &[Rent],
    ) -> Result<(Contract, Vec<Rent>), ScheduleError> {
        let renewed = contract.renewed()?;
        let rents = self.update(rents, &renewed)?;
        Ok((renewed, rents))
    }
}

/// Fails when some rent outside the lease period of `contract` carries a settlement.
pub fn check_lost_payments(contract: &Contract, rents: &[Rent]) -> Result<(), ScheduleError> {
    let mut lost = Vec::new();
    for rent in rents {
        if !contract.covers(rent.term.date()?)? && rent.has_settlement() {
            lost.push(rent.term);
        }
    }
    if lost.is_empty() {
        Ok(())
    } else {
        Err(ScheduleError::LostPayments(lost))
    }
}

/// Keys of every term billed by `contract`, in order.
fn lease_terms(contract: &Contract, unit: TimeRange) -> Result<Vec<TermKey>, ScheduleError> {
    let last_day = contract.last_day();
    let mut terms = Vec::new();
    for index in 0.. {
        let term = nth_term(contract, unit, index)?;
        if term.date()? > last_day {
            break;
        }
        terms.push(term);
    }
    Ok(terms)
}

/// The term of `terms` whose period contains `day`.
fn containing_term(
    terms: &[TermKey],
    unit: TimeRange,
    day: NaiveDate,
) -> Result<Option<TermKey>, ScheduleError> {
    for &term in terms.iter().rev() {
        let period = TermPeriod::of(term, unit)?;
        if period.start <= day {
            return Ok((day <= period.end).then_some(term));
        }
    }
    Ok(None)
}

fn nth_term(contract: &Contract, unit: TimeRange, index: u32) -> Result<TermKey, ScheduleError> {
    let count = i32::try_from(index).map_err(|_| ParseError::OutOfRange(index.to_string()))?;
    let start = add_units(contract.begin_date, unit, count).ok_or(ConfigError::InvalidDateRange {
        begin: contract.begin_date,
        end: contract.end_date,
    })?;
    Ok(TermKey::encode_date(start, unit))
}
