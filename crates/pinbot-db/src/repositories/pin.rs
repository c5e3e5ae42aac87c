//! PostgreSQL implementation of PinStore

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, instrument};

use pinbot_core::entities::{NewPin, PinRecord, PinTracking};
use pinbot_core::traits::{PinStore, RepoResult};
use pinbot_core::value_objects::Snowflake;

use crate::mappers::PinInsert;
use crate::models::PinModel;

use super::error::map_db_error;

/// PostgreSQL implementation of PinStore
///
/// Concurrent duplicates are resolved by the partial unique index on
/// `message_id WHERE deleted_at IS NULL`.
#[derive(Clone)]
pub struct PgPinStore {
    pool: PgPool,
}

impl PgPinStore {
    /// Create a new PgPinStore
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Soft-delete the active record; true when one was updated
    async fn retire_active(&self, message_id: Snowflake) -> RepoResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE pins
            SET deleted_at = NOW()
            WHERE message_id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(message_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl PinStore for PgPinStore {
    #[instrument(skip(self))]
    async fn add_pin(&self, pin: &NewPin) -> RepoResult<PinTracking> {
        let insert = PinInsert::new(pin);

        let result = sqlx::query(
            r#"
            INSERT INTO pins (message_id, guild_id, channel_id, pinned_by_user_id, created_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (message_id) WHERE deleted_at IS NULL DO NOTHING
            "#,
        )
        .bind(insert.message_id)
        .bind(insert.guild_id)
        .bind(insert.channel_id)
        .bind(insert.pinned_by_user_id)
        .bind(insert.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            debug!(message_id = %pin.message_id, "Pin already tracked");
            Ok(PinTracking::AlreadyTracked)
        } else {
            Ok(PinTracking::Created)
        }
    }

    #[instrument(skip(self))]
    async fn remove_pin(&self, message_id: Snowflake) -> RepoResult<bool> {
        self.retire_active(message_id).await
    }

    #[instrument(skip(self))]
    async fn soft_delete_pin(&self, message_id: Snowflake) -> RepoResult<bool> {
        self.retire_active(message_id).await
    }

    #[instrument(skip(self))]
    async fn find_active(&self, message_id: Snowflake) -> RepoResult<Option<PinRecord>> {
        let result = sqlx::query_as::<_, PinModel>(
            r#"
            SELECT message_id, guild_id, channel_id, pinned_by_user_id, created_at, deleted_at
            FROM pins
            WHERE message_id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(message_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(PinRecord::from))
    }
}
