//! Schema bootstrap for the pins table

use sqlx::PgPool;
use tracing::info;

/// Statements are idempotent and run in order
const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS pins (
        id                BIGSERIAL PRIMARY KEY,
        message_id        BIGINT      NOT NULL,
        guild_id          BIGINT      NOT NULL,
        channel_id        BIGINT      NOT NULL,
        pinned_by_user_id BIGINT      NOT NULL,
        created_at        TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        deleted_at        TIMESTAMPTZ NULL
    )
    "#,
    // At most one active record per message
    r#"
    CREATE UNIQUE INDEX IF NOT EXISTS pins_active_message_idx
        ON pins (message_id) WHERE deleted_at IS NULL
    "#,
    r#"
    CREATE INDEX IF NOT EXISTS pins_guild_idx ON pins (guild_id)
    "#,
];

/// Create the pins table and its indexes if they do not exist
pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    for &statement in SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }
    info!("Pin schema ready");
    Ok(())
}
