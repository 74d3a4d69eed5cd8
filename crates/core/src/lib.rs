//! Core business logic for Billsplit.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//!
//! # Modules
//!
//! - `allocation` - Exact-cents share allocation with optional cash rounding
//! - `bill` - Chat references, request validation, split planning, chat commands
//! - `message` - LINE Flex message model and bill message builders

pub mod allocation;
pub mod bill;
pub mod message;
