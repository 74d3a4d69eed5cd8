//! API route definitions.

use axum::Router;

use crate::AppState;

pub mod bank_account;
pub mod bill_management;
pub mod cancel_bill;
pub mod create_bill;
pub mod health;
pub mod webhook;


/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(create_bill::routes())
        .merge(cancel_bill::routes())
        .merge(bill_management::routes())
        .merge(bank_account::routes())
        .merge(webhook::routes())
}
