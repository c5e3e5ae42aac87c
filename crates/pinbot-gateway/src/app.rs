//! Application wiring
//!
//! Builds the store, platform client, policy, announcer and router from
//! `AppConfig`, then runs the gateway client until shutdown.

use std::sync::Arc;

use pinbot_common::{AppConfig, AppError, AppResult};
use pinbot_core::traits::{PinStore, PlatformClient};
use pinbot_db::{create_pool, ensure_schema, DatabaseConfig, MemoryPinStore, PgPinStore};
use pinbot_service::{
    EventRouter, PinSettings, PinboardAnnouncer, RolePolicy, ServiceContext,
};
use tracing::{info, warn};

use crate::client::{EventPipeline, GatewayClient, GatewayConfig};
use crate::rest::HttpPlatformClient;

/// Pin store selected by configuration: PostgreSQL when `DATABASE_URL` is set
pub async fn create_store(config: &AppConfig) -> AppResult<Arc<dyn PinStore>> {
    let Some(database) = &config.database else {
        warn!("DATABASE_URL not set, pin records are kept in memory");
        return Ok(Arc::new(MemoryPinStore::new()));
    };

    info!("Connecting to PostgreSQL...");
    let pool = create_pool(&DatabaseConfig::from(database))
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    ensure_schema(&pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    Ok(Arc::new(PgPinStore::new(pool)))
}

/// Build the event router around an existing store and platform client
pub fn create_router(
    config: &AppConfig,
    store: Arc<dyn PinStore>,
    platform: Arc<dyn PlatformClient>,
) -> AppResult<EventRouter> {
    let policy = Arc::new(RolePolicy::new(config.pins.pin_role_ids.clone(), store.clone()));
    let announcer = Arc::new(PinboardAnnouncer::from_config(platform.clone(), &config.pins));

    let ctx = ServiceContext::builder()
        .store(store)
        .platform(platform)
        .policy(policy)
        .announcer(announcer)
        .settings(PinSettings::from(&config.pins))
        .build()
        .map_err(AppError::internal)?;

    Ok(EventRouter::new(ctx))
}

/// Wire everything from configuration and run until the gateway gives up or
/// the process is interrupted
pub async fn run(config: AppConfig) -> AppResult<()> {
    let store = create_store(&config).await?;
    let platform: Arc<dyn PlatformClient> = Arc::new(HttpPlatformClient::from_config(&config.bot)?);
    let router = create_router(&config, store, platform)?;

    info!(
        pin_emoji = %config.pins.pin_emoji,
        pin_roles = config.pins.pin_role_ids.len(),
        pinboards = config.pins.pinboards.len(),
        "Pin pipeline ready"
    );

    let client = GatewayClient::new(GatewayConfig::from(&config.bot), EventPipeline::new(router));

    let shutdown = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Shutdown signal received"),
            Err(e) => {
                warn!(error = %e, "Cannot listen for Ctrl-C, running until the gateway stops");
                std::future::pending::<()>().await;
            }
        }
    };

    client.run_until(shutdown).await.map_err(AppError::from)?;
    info!("Shutdown complete");
    Ok(())
}
