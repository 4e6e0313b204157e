//! VAT on rent, charges and discounts.

use rentloop_shared::types::round_amount;
use rust_decimal::Decimal;

use crate::error::StageFailure;
use crate::pipeline::{Stage, StageInput};
use crate::rent::{Origin, Rent, VatLine};

/// Adds one VAT line per pre-tax, charge and discount line when the lease is subject to VAT.
pub const VAT: Stage = Stage::new("vat", apply);

fn apply(input: &StageInput<'_>, mut rent: Rent) -> Result<Rent, StageFailure> {
    if !input.contract.is_vat {
        return Ok(rent);
    }

    let (rate, origin) = match (input.settlement.vat_rate, input.contract.vat_ratio) {
        (Some(rate), _) => (rate, Origin::Settlement),
        (None, Some(rate)) => (rate, Origin::Contract),
        (None, None) => return Err(StageFailure::MissingVatRatio),
    };
    if rate < Decimal::ZERO || rate > Decimal::ONE {
        return Err(StageFailure::InvalidVatRatio(rate));
    }

    let scale = input.context.scale;
    let labels = &input.context.labels;
    let line = |description: &str, amount: Decimal| VatLine {
        origin,
        description: labels.vat(description, rate),
        rate,
        amount: round_amount(amount * rate, scale),
    };

    let mut vats: Vec<VatLine> = rent
        .pre_tax_amounts
        .iter()
        .chain(&rent.charges)
        .map(|item| line(&item.description, item.amount))
        .collect();
    vats.extend(
        rent.discounts
            .iter()
            .map(|discount| line(&discount.description, -discount.amount)),
    );

    rent.vats = vats;
    Ok(rent)
}
