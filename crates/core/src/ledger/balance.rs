//! Balance lookups over a rent series.

use rust_decimal::Decimal;
use tracing::warn;

use crate::rent::Rent;
use crate::term::TermKey;

/// Balance of the last rent at or before `as_of`, scanning `rents` in the
/// given order. `None` when no rent qualifies.
///
/// The scan keeps the last qualifying rent it meets, so the slice is expected
/// to be sorted by term. Use [`Ledger`] when the order is not guaranteed.
#[must_use]
pub fn compute_balance(rents: &[Rent], as_of: TermKey) -> Option<Decimal> {
    if !is_sorted(rents) {
        warn!(as_of = %as_of, rents = rents.len(), "Balance lookup over an unsorted rent series");
    }
    rents
        .iter()
        .fold(None, |found, rent| if rent.term <= as_of { Some(rent) } else { found })
        .map(|rent| rent.total.balance)
}

pub(super) fn is_sorted(rents: &[Rent]) -> bool {
    rents.windows(2).all(|pair| pair[0].term <= pair[1].term)
}

/// A rent series sorted by term.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    rents: Vec<Rent>,
}

impl Ledger {
    /// Sorts `rents` by term. Rents sharing a term keep their relative order.
    #[must_use]
    pub fn new(mut rents: Vec<Rent>) -> Self {
        rents.sort_by_key(|rent| rent.term);
        Self { rents }
    }

    /// Rents, oldest first.
    #[must_use]
    pub fn rents(&self) -> &[Rent] {
        &self.rents
    }

    /// Whether the ledger holds no rent.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rents.is_empty()
    }

    /// Last rent at or before `as_of`.
    #[must_use]
    pub fn rent_at(&self, as_of: TermKey) -> Option<&Rent> {
        let index = self.rents.partition_point(|rent| rent.term <= as_of);
        index.checked_sub(1).map(|i| &self.rents[i])
    }

    /// Balance as of `as_of`, whatever order the rents were supplied in.
    #[must_use]
    pub fn balance(&self, as_of: TermKey) -> Option<Decimal> {
        self.rent_at(as_of).map(|rent| rent.total.balance)
    }
}

impl From<Vec<Rent>> for Ledger {
    fn from(rents: Vec<Rent>) -> Self {
        Self::new(rents)
    }
}
