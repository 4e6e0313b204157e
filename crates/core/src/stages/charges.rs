//! Prorated expenses of each property.

use crate::error::StageFailure;
use crate::pipeline::{Stage, StageInput};
use crate::rent::{LineItem, Rent};

use super::prorate;

/// Adds one charge line per expense applying during the term.
pub const CHARGES: Stage = Stage::new("charges", apply);

fn apply(input: &StageInput<'_>, mut rent: Rent) -> Result<Rent, StageFailure> {
    let contract = input.contract;
    let period_days = input.period.days();

    for property in &contract.properties {
        let occupied_from = property.entry_date.max(contract.begin_date);
        let occupied_to = property.exit_date.min(contract.last_day());

        for expense in &property.expenses {
            let from = expense
                .begin_date
                .map_or(occupied_from, |begin| begin.max(occupied_from));
            let to = expense
                .end_date
                .map_or(occupied_to, |end| end.min(occupied_to));

            let billed = input.period.overlap_days(from, to);
            if billed == 0 {
                continue;
            }
            rent.charges.push(LineItem {
                description: expense.title.clone(),
                amount: prorate(expense.amount, billed, period_days, input.context.scale),
            });
        }
    }

    Ok(rent)
}
