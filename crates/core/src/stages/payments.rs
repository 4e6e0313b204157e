//! Payments received during the term.

use rust_decimal::Decimal;

use crate::error::StageFailure;
use crate::pipeline::{Stage, StageInput};
use crate::rent::Rent;

/// Records every positive settlement payment.
pub const PAYMENTS: Stage = Stage::new("payments", apply);

fn apply(input: &StageInput<'_>, mut rent: Rent) -> Result<Rent, StageFailure> {
    for payment in &input.settlement.payments {
        if payment.amount < Decimal::ZERO {
            return Err(StageFailure::NegativePayment(payment.amount));
        }
        if payment.amount > Decimal::ZERO {
            rent.payments.push(payment.clone());
        }
    }
    Ok(rent)
}
