//! Contract and settlement discounts.

use rentloop_shared::types::round_amount;
use rust_decimal::Decimal;

use crate::error::StageFailure;
use crate::pipeline::{Stage, StageInput};
use crate::rent::{DiscountLine, Origin, Rent};

/// Adds the contract discount when a property is billed, then every settlement discount.
pub const DISCOUNTS: Stage = Stage::new("discounts", apply);

fn apply(input: &StageInput<'_>, mut rent: Rent) -> Result<Rent, StageFailure> {
    let scale = input.context.scale;

    if input.contract.discount > Decimal::ZERO && !rent.pre_tax_amounts.is_empty() {
        rent.discounts.push(DiscountLine {
            origin: Origin::Contract,
            description: input.context.labels.contract_discount(),
            amount: round_amount(input.contract.discount, scale),
        });
    }

    for discount in &input.settlement.discounts {
        if discount.amount < Decimal::ZERO {
            return Err(StageFailure::NegativeDiscount(discount.amount));
        }
        if discount.amount.is_zero() {
            continue;
        }
        rent.discounts.push(DiscountLine {
            origin: Origin::Settlement,
            description: discount.description.clone(),
            amount: round_amount(discount.amount, scale),
        });
    }

    Ok(rent)
}
