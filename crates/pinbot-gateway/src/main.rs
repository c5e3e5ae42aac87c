//! Pin bot entry point
//!
//! Run with:
//! ```bash
//! BOT_TOKEN=... cargo run -p pinbot-gateway
//! ```
//!
//! Configuration is loaded from environment variables.

use pinbot_common::{try_init_tracing_with_config, AppConfig, AppResult, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Load configuration before tracing so the environment picks the format
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = try_init_tracing_with_config(TracingConfig::for_environment(config.app.env)) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    if let Err(e) = run(config).await {
        error!(error = %e, code = e.error_code(), "Pin bot stopped");
        std::process::exit(1);
    }
}

async fn run(config: AppConfig) -> AppResult<()> {
    info!(
        name = %config.app.name,
        env = ?config.app.env,
        store = if config.database.is_some() { "postgres" } else { "memory" },
        "Starting pin bot..."
    );

    pinbot_gateway::run(config).await
}
