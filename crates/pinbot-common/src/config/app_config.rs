//! Application configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file if present).

use std::collections::HashMap;
use std::env;
use std::fmt;
use std::time::Duration;

use pinbot_core::Snowflake;

/// Main application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub bot: BotConfig,
    pub pins: PinConfig,
    /// `None` keeps pin records in memory
    pub database: Option<DatabaseConfig>,
}

/// General application settings
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub name: String,
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    /// Parse a case-insensitive environment name
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "production" | "prod" => Some(Self::Production),
            "staging" => Some(Self::Staging),
            "development" | "dev" => Some(Self::Development),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

/// Platform connection settings
#[derive(Clone)]
pub struct BotConfig {
    pub token: String,
    pub gateway_url: String,
    pub api_base_url: String,
    pub http_timeout_secs: u64,
    pub reconnect_delay_ms: u64,
}

impl BotConfig {
    #[must_use]
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    #[must_use]
    pub fn reconnect_delay(&self) -> Duration {
        Duration::from_millis(self.reconnect_delay_ms)
    }
}

// Keep the token out of logs
impl fmt::Debug for BotConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BotConfig")
            .field("token", &"<redacted>")
            .field("gateway_url", &self.gateway_url)
            .field("api_base_url", &self.api_base_url)
            .field("http_timeout_secs", &self.http_timeout_secs)
            .field("reconnect_delay_ms", &self.reconnect_delay_ms)
            .finish()
    }
}

/// Pin feature settings
#[derive(Debug, Clone)]
pub struct PinConfig {
    /// Emoji name that triggers pin/unpin
    pub pin_emoji: String,
    /// Roles allowed to pin besides administrators
    pub pin_role_ids: Vec<Snowflake>,
    /// Source channel -> pinboard channels
    pub pinboards: HashMap<Snowflake, Vec<Snowflake>>,
    /// Pinboard for channels without an explicit mapping
    pub default_pinboard: Option<Snowflake>,
}

impl Default for PinConfig {
    fn default() -> Self {
        Self {
            pin_emoji: default_pin_emoji(),
            pin_role_ids: Vec::new(),
            pinboards: HashMap::new(),
            default_pinboard: None,
        }
    }
}

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

// Default value functions
fn default_app_name() -> String {
    "pinbot".to_string()
}

fn default_gateway_url() -> String {
    "wss://gateway.discord.gg/?v=10&encoding=json".to_string()
}

fn default_api_base_url() -> String {
    "https://discord.com/api/v10".to_string()
}

fn default_http_timeout_secs() -> u64 {
    10
}

fn default_reconnect_delay_ms() -> u64 {
    5000
}

fn default_pin_emoji() -> String {
    "📌".to_string()
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing or malformed
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let token = var("BOT_TOKEN").ok_or(ConfigError::MissingVar("BOT_TOKEN"))?;

        let database = match var("DATABASE_URL") {
            Some(url) => Some(DatabaseConfig {
                url,
                max_connections: parse_or(
                    "DATABASE_MAX_CONNECTIONS",
                    var("DATABASE_MAX_CONNECTIONS"),
                    default_max_connections,
                )?,
                min_connections: parse_or(
                    "DATABASE_MIN_CONNECTIONS",
                    var("DATABASE_MIN_CONNECTIONS"),
                    default_min_connections,
                )?,
            }),
            None => None,
        };

        Ok(Self {
            app: AppSettings {
                name: var("APP_NAME").unwrap_or_else(default_app_name),
                env: var("APP_ENV")
                    .as_deref()
                    .and_then(Environment::parse)
                    .unwrap_or_default(),
            },
            bot: BotConfig {
                token: token.trim().to_string(),
                gateway_url: var("GATEWAY_URL").unwrap_or_else(default_gateway_url),
                api_base_url: var("API_BASE_URL")
                    .map(|s| s.trim_end_matches('/').to_string())
                    .unwrap_or_else(default_api_base_url),
                http_timeout_secs: parse_or(
                    "HTTP_TIMEOUT_SECS",
                    var("HTTP_TIMEOUT_SECS"),
                    default_http_timeout_secs,
                )?,
                reconnect_delay_ms: parse_or(
                    "GATEWAY_RECONNECT_DELAY_MS",
                    var("GATEWAY_RECONNECT_DELAY_MS"),
                    default_reconnect_delay_ms,
                )?,
            },
            pins: PinConfig {
                pin_emoji: var("PIN_EMOJI")
                    .map(|s| s.trim().to_string())
                    .unwrap_or_else(default_pin_emoji),
                pin_role_ids: var("PIN_ROLE_IDS")
                    .map(|s| parse_id_list("PIN_ROLE_IDS", &s))
                    .transpose()?
                    .unwrap_or_default(),
                pinboards: var("PINBOARD_CHANNELS")
                    .map(|s| parse_pinboards(&s))
                    .transpose()?
                    .unwrap_or_default(),
                default_pinboard: var("PINBOARD_DEFAULT_CHANNEL")
                    .map(|s| parse_id("PINBOARD_DEFAULT_CHANNEL", &s))
                    .transpose()?,
            },
            database,
        })
    }
}

fn parse_or<T, D>(key: &'static str, value: Option<String>, default: D) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    D: FnOnce() -> T,
{
    match value {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(key, raw)),
        None => Ok(default()),
    }
}

fn parse_id(key: &'static str, raw: &str) -> Result<Snowflake, ConfigError> {
    Snowflake::parse(raw).map_err(|_| ConfigError::InvalidValue(key, raw.to_string()))
}

/// Comma-separated list of IDs; empty items are skipped
fn parse_id_list(key: &'static str, raw: &str) -> Result<Vec<Snowflake>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| parse_id(key, s))
        .collect()
}

/// `source:pinboard[,source:pinboard...]`, a source may appear several times
fn parse_pinboards(raw: &str) -> Result<HashMap<Snowflake, Vec<Snowflake>>, ConfigError> {
    const KEY: &str = "PINBOARD_CHANNELS";

    let mut pinboards: HashMap<Snowflake, Vec<Snowflake>> = HashMap::new();
    for entry in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let (source, target) = entry
            .split_once(':')
            .ok_or_else(|| ConfigError::InvalidValue(KEY, entry.to_string()))?;
        let source = parse_id(KEY, source)?;
        let target = parse_id(KEY, target)?;

        let targets = pinboards.entry(source).or_default();
        if !targets.contains(&target) {
            targets.push(target);
        }
    }
    Ok(pinboards)
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
