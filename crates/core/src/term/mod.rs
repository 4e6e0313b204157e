//! Term keys and calendar arithmetic.
//!
//! - `key` - [`TermKey`] encoding and the [`TimeRange`] billing unit
//! - `calendar` - period boundaries, term stepping and fractional differences
//! - `due_date` - grace periods, weekend avoidance and billing dates

mod calendar;
mod due_date;
mod key;

pub use calendar::{
    TermPeriod, add_units, end_of, fractional_diff, next_term, parse_date, previous_term,
    remaining_iterations, start_of, term_period,
};
pub use due_date::{avoid_weekend, billing_date, grace_period, shift_due_date};
pub use key::{TermKey, TimeRange};

#[cfg(test)]
mod term_props;
