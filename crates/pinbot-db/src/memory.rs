//! In-memory pin store
//!
//! Used when no database is configured and in tests. Records live only as
//! long as the process.

use async_trait::async_trait;
use dashmap::DashMap;
use tracing::{debug, instrument};

use pinbot_core::entities::{NewPin, PinRecord, PinTracking};
use pinbot_core::traits::{PinStore, RepoResult};
use pinbot_core::value_objects::Snowflake;

/// Process-local PinStore
///
/// Keeps every record per message, newest last; only the last one can be
/// active. All mutations go through the `DashMap` entry API so concurrent
/// calls for the same message are serialized by the shard lock.
#[derive(Debug, Default)]
pub struct MemoryPinStore {
    records: DashMap<Snowflake, Vec<PinRecord>>,
}

impl MemoryPinStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// All records ever written for a message, retired ones included
    pub fn history(&self, message_id: Snowflake) -> Vec<PinRecord> {
        self.records
            .get(&message_id)
            .map(|records| records.clone())
            .unwrap_or_default()
    }

    /// Number of active records across all messages
    pub fn active_count(&self) -> usize {
        self.records
            .iter()
            .filter(|entry| entry.value().last().is_some_and(PinRecord::is_active))
            .count()
    }

    fn retire_active(&self, message_id: Snowflake) -> bool {
        let Some(mut records) = self.records.get_mut(&message_id) else {
            return false;
        };
        match records.last_mut() {
            Some(record) if record.is_active() => {
                record.retire();
                true
            }
            _ => false,
        }
    }
}

#[async_trait]
impl PinStore for MemoryPinStore {
    #[instrument(skip(self))]
    async fn add_pin(&self, pin: &NewPin) -> RepoResult<PinTracking> {
        let mut records = self.records.entry(pin.message_id).or_default();

        if records.last().is_some_and(PinRecord::is_active) {
            debug!(message_id = %pin.message_id, "Pin already tracked");
            return Ok(PinTracking::AlreadyTracked);
        }

        records.push(PinRecord::from_new(pin));
        Ok(PinTracking::Created)
    }

    #[instrument(skip(self))]
    async fn remove_pin(&self, message_id: Snowflake) -> RepoResult<bool> {
        Ok(self.retire_active(message_id))
    }

    #[instrument(skip(self))]
    async fn soft_delete_pin(&self, message_id: Snowflake) -> RepoResult<bool> {
        Ok(self.retire_active(message_id))
    }

    #[instrument(skip(self))]
    async fn find_active(&self, message_id: Snowflake) -> RepoResult<Option<PinRecord>> {
        Ok(self
            .records
            .get(&message_id)
            .and_then(|records| records.last().filter(|r| r.is_active()).cloned()))
    }
}
