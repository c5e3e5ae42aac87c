//! Service context - dependency container for the pin pipeline
//!
//! Holds the store, platform client, policy and announcer behind trait objects.

use std::sync::Arc;

use pinbot_common::PinConfig;
use pinbot_core::traits::{AnnouncementSink, AuthorizationPolicy, PinStore, PlatformClient};

use super::error::{ServiceError, ServiceResult};

/// Pin feature settings shared by the normalizer and handlers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinSettings {
    pin_emoji: String,
}

impl PinSettings {
    pub fn new(pin_emoji: impl Into<String>) -> Self {
        Self {
            pin_emoji: pin_emoji.into(),
        }
    }

    /// Emoji name that triggers pin and unpin
    pub fn pin_emoji(&self) -> &str {
        &self.pin_emoji
    }
}

impl Default for PinSettings {
    fn default() -> Self {
        Self::new("📌")
    }
}

impl From<&PinConfig> for PinSettings {
    fn from(config: &PinConfig) -> Self {
        Self::new(config.pin_emoji.clone())
    }
}

/// Service context containing all collaborators
///
/// Cheap to clone; every collaborator sits behind an `Arc`.
#[derive(Clone)]
pub struct ServiceContext {
    store: Arc<dyn PinStore>,
    platform: Arc<dyn PlatformClient>,
    policy: Arc<dyn AuthorizationPolicy>,
    announcer: Arc<dyn AnnouncementSink>,
    settings: PinSettings,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        store: Arc<dyn PinStore>,
        platform: Arc<dyn PlatformClient>,
        policy: Arc<dyn AuthorizationPolicy>,
        announcer: Arc<dyn AnnouncementSink>,
        settings: PinSettings,
    ) -> Self {
        Self {
            store,
            platform,
            policy,
            announcer,
            settings,
        }
    }

    /// Start building a context
    pub fn builder() -> ServiceContextBuilder {
        ServiceContextBuilder::new()
    }

    // === Collaborators ===

    /// Get the pin record store
    pub fn store(&self) -> &dyn PinStore {
        self.store.as_ref()
    }

    /// Get the chat platform client
    pub fn platform(&self) -> &dyn PlatformClient {
        self.platform.as_ref()
    }

    /// Get the authorization policy
    pub fn policy(&self) -> &dyn AuthorizationPolicy {
        self.policy.as_ref()
    }

    /// Get the announcement sink
    pub fn announcer(&self) -> &dyn AnnouncementSink {
        self.announcer.as_ref()
    }

    /// Shared handle to the platform client
    pub fn platform_handle(&self) -> Arc<dyn PlatformClient> {
        Arc::clone(&self.platform)
    }

    // === Settings ===

    pub fn settings(&self) -> &PinSettings {
        &self.settings
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("collaborators", &"...")
            .field("settings", &self.settings)
            .finish()
    }
}

/// Builder for creating ServiceContext
#[derive(Default)]
pub struct ServiceContextBuilder {
    store: Option<Arc<dyn PinStore>>,
    platform: Option<Arc<dyn PlatformClient>>,
    policy: Option<Arc<dyn AuthorizationPolicy>>,
    announcer: Option<Arc<dyn AnnouncementSink>>,
    settings: Option<PinSettings>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(mut self, store: Arc<dyn PinStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn platform(mut self, platform: Arc<dyn PlatformClient>) -> Self {
        self.platform = Some(platform);
        self
    }

    pub fn policy(mut self, policy: Arc<dyn AuthorizationPolicy>) -> Self {
        self.policy = Some(policy);
        self
    }

    pub fn announcer(mut self, announcer: Arc<dyn AnnouncementSink>) -> Self {
        self.announcer = Some(announcer);
        self
    }

    pub fn settings(mut self, settings: PinSettings) -> Self {
        self.settings = Some(settings);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required collaborator is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext::new(
            self.store
                .ok_or_else(|| ServiceError::validation("store is required"))?,
            self.platform
                .ok_or_else(|| ServiceError::validation("platform is required"))?,
            self.policy
                .ok_or_else(|| ServiceError::validation("policy is required"))?,
            self.announcer
                .ok_or_else(|| ServiceError::validation("announcer is required"))?,
            self.settings.unwrap_or_default(),
        ))
    }
}
