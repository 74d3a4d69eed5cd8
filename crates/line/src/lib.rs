//! LINE platform adapters for Billsplit.
//!
//! # Modules
//!
//! - `auth` - LIFF access token verification
//! - `client` - Shared HTTP client for the LINE APIs
//! - `messaging` - Push/reply delivery and the chat member directory
//! - `signature` - Webhook signature verification
//! - `webhook` - Webhook event model

pub mod auth;
pub mod client;
pub mod error;
pub mod messaging;
pub mod signature;
pub mod webhook;

pub use auth::{AuthenticatedUser, IdentityVerifier, LiffVerifier, bearer_token};
pub use client::LineClient;
pub use error::LineError;
pub use messaging::{ChatGateway, MemberProfile, MessagingClient};
pub use signature::{SignatureCheck, check_signature};
pub use webhook::{EventSource, WebhookEvent, parse_events};
