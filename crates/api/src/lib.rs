//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - The LIFF endpoints (create, cancel and list bills, bank account)
//! - The LINE webhook
//! - LIFF token authentication
//! - JSON error responses

pub mod error;
pub mod extractors;
pub mod middleware;
pub mod routes;

use axum::Router;
use billsplit_line::{ChatGateway, IdentityVerifier};
use billsplit_shared::{BillConfig, LineConfig};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use error::ApiError;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: Arc<DatabaseConnection>,
    /// LIFF token verifier.
    pub identity: Arc<dyn IdentityVerifier>,
    /// Messaging API client; `None` without a channel access token.
    pub messaging: Option<Arc<dyn ChatGateway>>,
    /// LINE channel settings.
    pub line: Arc<LineConfig>,
    /// Bill endpoint limits.
    pub bill: Arc<BillConfig>,
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
