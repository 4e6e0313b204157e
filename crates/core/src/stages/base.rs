//! Prorated rent of each property.

use crate::error::StageFailure;
use crate::pipeline::{Stage, StageInput};
use crate::rent::{LineItem, Rent};

use super::prorate;

/// Adds one pre-tax line per property occupied during the term, within the lease.
/// Also records the settlement's description and VAT override on the rent.
pub const BASE_AMOUNT: Stage = Stage::new("base_amount", apply);

fn apply(input: &StageInput<'_>, mut rent: Rent) -> Result<Rent, StageFailure> {
    let contract = input.contract;
    let period_days = input.period.days();

    for property in &contract.properties {
        let billed = input.period.overlap_days(
            property.entry_date.max(contract.begin_date),
            property.exit_date.min(contract.last_day()),
        );
        if billed == 0 {
            continue;
        }
        rent.pre_tax_amounts.push(LineItem {
            description: property.name.clone(),
            amount: prorate(property.rent, billed, period_days, input.context.scale),
        });
    }

    if let Some(description) = input.settlement.description.as_deref() {
        rent.description = description.to_string();
    }
    rent.vat_rate = input.settlement.vat_rate;

    Ok(rent)
}
