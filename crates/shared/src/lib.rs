//! Shared types, errors, and configuration for Billsplit.
//!
//! This crate provides common types used across all other crates:
//! - Minor-unit money type for exact cent arithmetic
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::{AppConfig, BillConfig, LineConfig};
pub use error::{AppError, AppResult};
pub use types::Cents;
