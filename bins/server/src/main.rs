//! Billsplit server.
//!
//! Serves the LIFF API and the LINE webhook.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use billsplit_api::{AppState, create_router};
use billsplit_db::connect_with;
use billsplit_line::{ChatGateway, LineClient, LiffVerifier, MessagingClient};
use billsplit_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "billsplit=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load().context("Failed to load configuration")?;

    let db = connect_with(&config.database).await?;
    info!("Connected to database");

    let line_client = LineClient::new(
        config.line.api_base_url.clone(),
        Duration::from_secs(config.line.request_timeout_secs),
    )?;

    if config.line.liff_channel_id.is_none() {
        warn!("line.liff_channel_id is not set; every LIFF token will be rejected");
    }
    let identity = LiffVerifier::new(line_client.clone(), config.line.liff_channel_id.clone());

    let messaging = config
        .line
        .channel_access_token
        .clone()
        .filter(|token| !token.is_empty())
        .map(|token| Arc::new(MessagingClient::new(line_client, token)) as Arc<dyn ChatGateway>);
    if messaging.is_none() {
        warn!("line.channel_access_token is not set; chat messages are disabled");
    }

    let state = AppState {
        db: Arc::new(db),
        identity: Arc::new(identity),
        messaging,
        line: Arc::new(config.line.clone()),
        bill: Arc::new(config.bill.clone()),
    };

    let app = create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
