//! Request authentication.

pub mod auth;

pub use auth::authenticate;
