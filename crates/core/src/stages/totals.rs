//! Totals and balance.

use crate::error::StageFailure;
use crate::pipeline::{Stage, StageInput};
use crate::rent::Rent;

/// Sums every line array and computes the balance.
pub const TOTALS: Stage = Stage::new("totals", apply);

fn apply(_: &StageInput<'_>, mut rent: Rent) -> Result<Rent, StageFailure> {
    rent.total = rent.sum_lines(rent.total.credit);
    Ok(rent)
}
