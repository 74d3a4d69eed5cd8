//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// LINE platform configuration.
    #[serde(default)]
    pub line: LineConfig,
    /// Bill workflow limits.
    #[serde(default)]
    pub bill: BillConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// LINE platform configuration.
///
/// Every credential is optional: a missing channel access token disables
/// message delivery and the member directory, a missing channel secret skips
/// webhook signature checks, and a missing LIFF channel id rejects all LIFF
/// tokens.
#[derive(Debug, Clone, Deserialize)]
pub struct LineConfig {
    /// Messaging API channel access token.
    #[serde(default)]
    pub channel_access_token: Option<String>,
    /// Messaging API channel secret (webhook signatures).
    #[serde(default)]
    pub channel_secret: Option<String>,
    /// LIFF channel id expected in verified access tokens.
    #[serde(default)]
    pub liff_channel_id: Option<String>,
    /// Base URL of the LINE APIs.
    #[serde(default = "default_line_api_base_url")]
    pub api_base_url: String,
    /// Outbound request timeout in seconds.
    #[serde(default = "default_line_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for LineConfig {
    fn default() -> Self {
        Self {
            channel_access_token: None,
            channel_secret: None,
            liff_channel_id: None,
            api_base_url: default_line_api_base_url(),
            request_timeout_secs: default_line_timeout(),
        }
    }
}

fn default_line_api_base_url() -> String {
    "https://api.line.me".to_string()
}

fn default_line_timeout() -> u64 {
    10
}

/// Limits applied by the bill endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct BillConfig {
    /// Maximum number of chat members resolved for bill management.
    #[serde(default = "default_max_members")]
    pub max_members: usize,
    /// Number of most recent bills listed for a chat.
    #[serde(default = "default_max_listed_bills")]
    pub max_listed_bills: u64,
    /// Participant rows rendered in the bill summary message.
    #[serde(default = "default_max_summary_participants")]
    pub max_summary_participants: usize,
}

impl Default for BillConfig {
    fn default() -> Self {
        Self {
            max_members: default_max_members(),
            max_listed_bills: default_max_listed_bills(),
            max_summary_participants: default_max_summary_participants(),
        }
    }
}

fn default_max_members() -> usize {
    200
}

fn default_max_listed_bills() -> u64 {
    20
}

fn default_max_summary_participants() -> usize {
    12
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("BILLSPLIT").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
