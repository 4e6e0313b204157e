//! Rent computation and ledger reconciliation for Rentloop.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! It turns a lease contract, the previous term's rent and the term's settlement
//! into an auditable per-term statement, and answers balance queries over the
//! resulting series. No function reads the clock or performs I/O.
//!
//! # Modules
//!
//! - `term` - Term keys, billing periods and due dates
//! - `rent` - Contract, settlement and rent data model
//! - `pipeline` - Ordered stage execution and the `compute_rent_term` entry point
//! - `stages` - The standard accounting stages
//! - `ledger` - Balances, remaining terms, invoices and collection figures
//! - `schedule` - Whole-lease generation and recomputation

pub mod error;
pub mod ledger;
pub mod pipeline;
pub mod rent;
pub mod schedule;
pub mod stages;
pub mod term;

#[cfg(test)]
mod fixtures;

pub use error::{ConfigError, ParseError, RentError, ScheduleError, StageError, StageFailure};
pub use ledger::{Ledger, compute_balance, compute_remaining_iterations_to_pay, invoice_status};
pub use pipeline::{ComputeContext, Pipeline, compute_rent_term};
pub use rent::{Contract, Rent, Settlement};
pub use schedule::LeaseSchedule;
pub use term::{TermKey, TimeRange};
