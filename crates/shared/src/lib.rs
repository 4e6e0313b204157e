//! Shared types, errors, and configuration for Rentloop.
//!
//! This crate provides common types used across all other crates:
//! - Decimal rounding of amounts
//! - Typed IDs for tenants and properties
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::{AppConfig, BillingConfig};
pub use error::{AppError, AppResult};
