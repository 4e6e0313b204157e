//! Ordered execution of rent stages.
//!
//! A [`Pipeline`] is a fixed list of [`Stage`]s folded left to right over a
//! blank [`Rent`]. Each stage is a pure function of the shared [`StageInput`]
//! and the rent produced so far. The first failing stage aborts the run.

mod context;

pub use context::{ComputeContext, DefaultLabels, LineLabels};

use tracing::{debug, debug_span, warn};

use crate::error::{RentError, StageError, StageFailure};
use crate::rent::{Contract, Rent, Settlement};
use crate::stages;
use crate::term::{TermKey, TermPeriod, TimeRange};

/// Signature of a stage.
pub type StageFn = fn(&StageInput<'_>, Rent) -> Result<Rent, StageFailure>;

/// A named accounting rule.
#[derive(Debug, Clone, Copy)]
pub struct Stage {
    name: &'static str,
    apply: StageFn,
}

impl Stage {
    /// Declares a stage.
    #[must_use]
    pub const fn new(name: &'static str, apply: StageFn) -> Self {
        Self { name, apply }
    }

    /// Stage name, reported in errors and logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Runs the stage.
    pub fn apply(&self, input: &StageInput<'_>, rent: Rent) -> Result<Rent, StageFailure> {
        (self.apply)(input, rent)
    }
}

/// Read-only inputs shared by every stage of a run.
#[derive(Debug, Clone, Copy)]
pub struct StageInput<'a> {
    /// Lease terms.
    pub contract: &'a Contract,
    /// Billing unit of the lease.
    pub time_range: TimeRange,
    /// Term being computed.
    pub term: TermKey,
    /// Days billed by the term.
    pub period: TermPeriod,
    /// Rent of the preceding term.
    pub previous_rent: Option<&'a Rent>,
    /// Events recorded for the term.
    pub settlement: &'a Settlement,
    /// Scale and labels.
    pub context: &'a ComputeContext,
}

/// A statically ordered list of stages.
#[derive(Debug, Clone)]
pub struct Pipeline {
    stages: Vec<Stage>,
}

impl Pipeline {
    /// Pipeline running `stages` in the given order.
    #[must_use]
    pub fn new(stages: impl IntoIterator<Item = Stage>) -> Self {
        Self {
            stages: stages.into_iter().collect(),
        }
    }

    /// The seven standard stages: base amount, charges, discounts, VAT, debts,
    /// payments and totals.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(stages::STANDARD)
    }

    /// Declared stages, in execution order.
    #[must_use]
    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// Computes the rent of `term`.
    ///
    /// The contract is validated first and the term is normalized to the start
    /// of its billing period. No partial rent is returned on failure.
    pub fn compute(
        &self,
        context: &ComputeContext,
        contract: &Contract,
        term: TermKey,
        previous_rent: Option<&Rent>,
        settlement: Option<&Settlement>,
    ) -> Result<Rent, RentError> {
        let span = debug_span!("compute_rent_term", term = %term);
        let _enter = span.enter();

        let time_range = contract.validate()?;
        let term = normalize(term, time_range)?;
        let period = TermPeriod::of(term, time_range)?;
        let empty = Settlement::default();

        let input = StageInput {
            contract,
            time_range,
            term,
            period,
            previous_rent,
            settlement: settlement.unwrap_or(&empty),
            context,
        };

        self.stages
            .iter()
            .try_fold(Rent::empty(term), |rent, stage| -> Result<Rent, StageError> {
                let rent = stage.apply(&input, rent).map_err(|failure| {
                    warn!(stage = stage.name(), term = %term, error = %failure, "Rent computation aborted");
                    StageError {
                        stage: stage.name(),
                        term,
                        failure,
                    }
                })?;
                debug!(stage = stage.name(), "Stage applied");
                Ok(rent)
            })
            .map_err(RentError::from)
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::standard()
    }
}

fn normalize(term: TermKey, time_range: TimeRange) -> Result<TermKey, RentError> {
    let normalized = TermKey::encode(term.decode()?, time_range);
    if normalized != term {
        debug!(term = %term, normalized = %normalized, "Term normalized to period start");
    }
    Ok(normalized)
}

/// Computes the rent of `term` with the standard stages and default context.
pub fn compute_rent_term(
    contract: &Contract,
    term: TermKey,
    previous_rent: Option<&Rent>,
    settlement: Option<&Settlement>,
) -> Result<Rent, RentError> {
    Pipeline::standard().compute(
        &ComputeContext::default(),
        contract,
        term,
        previous_rent,
        settlement,
    )
}
