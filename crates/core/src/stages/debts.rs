//! Balance carried from the previous term.

use rust_decimal::Decimal;

use crate::error::StageFailure;
use crate::pipeline::{Stage, StageInput};
use crate::rent::{LineItem, Rent};

/// Turns an unpaid previous balance into a debt line. A positive balance becomes a credit.
pub const DEBTS: Stage = Stage::new("debts", apply);

fn apply(input: &StageInput<'_>, mut rent: Rent) -> Result<Rent, StageFailure> {
    let Some(previous) = input.previous_rent else {
        return Ok(rent);
    };

    let balance = previous.total.balance;
    if balance < Decimal::ZERO {
        rent.debts.push(LineItem {
            description: input.context.labels.carried_debt(previous.term),
            amount: -balance,
        });
    } else if balance > Decimal::ZERO {
        rent.total.credit = balance;
    }

    Ok(rent)
}
