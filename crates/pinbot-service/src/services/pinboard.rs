//! Pinboard announcer
//!
//! Posts pin notices into the pinboard channel(s) mapped to the source channel.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use futures_util::future::join_all;
use pinbot_common::PinConfig;
use pinbot_core::traits::{AnnouncementSink, PlatformClient, RepoResult};
use pinbot_core::value_objects::Snowflake;
use tracing::{debug, instrument, warn};

/// Announcement sink writing to configured pinboard channels
pub struct PinboardAnnouncer {
    platform: Arc<dyn PlatformClient>,
    pinboards: HashMap<Snowflake, Vec<Snowflake>>,
    default_pinboard: Option<Snowflake>,
}

impl PinboardAnnouncer {
    /// Create a new PinboardAnnouncer
    pub fn new(
        platform: Arc<dyn PlatformClient>,
        pinboards: HashMap<Snowflake, Vec<Snowflake>>,
        default_pinboard: Option<Snowflake>,
    ) -> Self {
        Self {
            platform,
            pinboards,
            default_pinboard,
        }
    }

    /// Build from the pin section of the app config
    pub fn from_config(platform: Arc<dyn PlatformClient>, config: &PinConfig) -> Self {
        Self::new(platform, config.pinboards.clone(), config.default_pinboard)
    }

    /// Pinboards for a source channel, never the source itself
    pub fn pinboards_for(&self, channel_id: Snowflake) -> Vec<Snowflake> {
        let targets = match self.pinboards.get(&channel_id) {
            Some(explicit) => explicit.clone(),
            None => self.default_pinboard.into_iter().collect(),
        };
        targets.into_iter().filter(|t| *t != channel_id).collect()
    }
}

#[async_trait]
impl AnnouncementSink for PinboardAnnouncer {
    #[instrument(skip(self, text))]
    async fn announce(&self, channel_id: Snowflake, text: &str) -> RepoResult<()> {
        let targets = self.pinboards_for(channel_id);
        if targets.is_empty() {
            debug!("No pinboard configured for channel");
            return Ok(());
        }

        let results = join_all(
            targets
                .iter()
                .map(|target| self.platform.send_message(*target, text)),
        )
        .await;

        let total = results.len();
        let mut failures = 0;
        let mut last_error = None;
        for (target, result) in targets.iter().zip(results) {
            if let Err(e) = result {
                warn!(pinboard_id = %target, error = %e, "Failed to post to pinboard");
                failures += 1;
                last_error = Some(e);
            }
        }

        match last_error {
            Some(e) if failures == total => Err(e),
            _ => Ok(()),
        }
    }
}

impl std::fmt::Debug for PinboardAnnouncer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PinboardAnnouncer")
            .field("pinboards", &self.pinboards)
            .field("default_pinboard", &self.default_pinboard)
            .finish()
    }
}
