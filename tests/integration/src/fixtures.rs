//! Test fixtures: ids, configuration and gateway payloads

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use pinbot_common::AppConfig;
use pinbot_core::traits::{PinStore, PlatformClient};
use pinbot_core::value_objects::{Permissions, Snowflake};
use pinbot_db::MemoryPinStore;
use pinbot_gateway::{create_router, EventPipeline, HttpPlatformClient};
use serde_json::{json, Value};

use crate::helpers::FakePlatform;

pub const BOT_TOKEN: &str = "test-token";

pub const GUILD: Snowflake = Snowflake::new(100);
pub const CHANNEL: Snowflake = Snowflake::new(200);
pub const PINBOARD: Snowflake = Snowflake::new(300);
pub const MESSAGE: Snowflake = Snowflake::new(400);
pub const OWNER: Snowflake = Snowflake::new(500);
/// Holds the pin role
pub const MODERATOR: Snowflake = Snowflake::new(600);
/// Also holds the pin role
pub const HELPER: Snowflake = Snowflake::new(650);
/// Member without roles
pub const MEMBER: Snowflake = Snowflake::new(700);
/// Not a member of the guild
pub const STRANGER: Snowflake = Snowflake::new(800);
pub const PIN_ROLE: Snowflake = Snowflake::new(900);

/// Configuration pointing at the fake platform
pub fn test_config(platform: &FakePlatform) -> Result<AppConfig> {
    let vars = HashMap::from([
        ("BOT_TOKEN", BOT_TOKEN.to_string()),
        ("API_BASE_URL", platform.api_base_url()),
        ("GATEWAY_URL", platform.gateway_url()),
        ("GATEWAY_RECONNECT_DELAY_MS", "50".to_string()),
        ("HTTP_TIMEOUT_SECS", "5".to_string()),
        ("PIN_ROLE_IDS", PIN_ROLE.to_string()),
        ("PINBOARD_CHANNELS", format!("{CHANNEL}:{PINBOARD}")),
    ]);
    AppConfig::from_lookup(|key| vars.get(key).cloned())
        .map_err(|e| anyhow::anyhow!("Config error: {e}"))
}

/// Populate the fake guild: @everyone can view, two members hold the pin role
pub fn seed_guild(platform: &FakePlatform) {
    platform.configure(|world| {
        world.roles = vec![
            (GUILD, Permissions::VIEW_CHANNEL.bits()),
            (PIN_ROLE, Permissions::MANAGE_MESSAGES.bits()),
        ];
        world.members.insert(MODERATOR, vec![PIN_ROLE]);
        world.members.insert(HELPER, vec![PIN_ROLE]);
        world.members.insert(MEMBER, vec![]);
        world.members.insert(OWNER, vec![]);
    });
}

/// The full pipeline wired against the fake platform with an in-memory store
pub struct TestBot {
    pub config: AppConfig,
    pub store: Arc<MemoryPinStore>,
    pub pipeline: EventPipeline,
}

impl TestBot {
    pub fn new(platform: &FakePlatform) -> Result<Self> {
        let config = test_config(platform)?;
        let store = Arc::new(MemoryPinStore::new());
        let client: Arc<dyn PlatformClient> = Arc::new(HttpPlatformClient::from_config(&config.bot)?);
        let router = create_router(&config, store.clone() as Arc<dyn PinStore>, client)?;

        Ok(Self {
            config,
            store,
            pipeline: EventPipeline::new(router),
        })
    }
}

// ============================================================================
// Gateway payloads
// ============================================================================

/// MESSAGE_REACTION_ADD / MESSAGE_REACTION_REMOVE payload in the guild
///
/// Reaction-add carries the member's roles like the real gateway does.
pub fn reaction_payload(user_id: Snowflake, emoji: &str, member_roles: Option<&[Snowflake]>) -> Value {
    let mut payload = json!({
        "user_id": user_id,
        "channel_id": CHANNEL,
        "message_id": MESSAGE,
        "guild_id": GUILD,
        "emoji": { "id": null, "name": emoji },
    });
    if let Some(roles) = member_roles {
        payload["member"] = json!({ "user": { "id": user_id }, "roles": roles });
    }
    payload
}

pub fn message_delete_payload(message_id: Snowflake) -> Value {
    json!({ "id": message_id, "channel_id": CHANNEL, "guild_id": GUILD })
}
