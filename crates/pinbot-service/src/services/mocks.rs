//! Recording collaborators for unit tests
//!
//! Every mock writes into one shared `CallLog` so tests can assert on the
//! order of side effects across collaborators.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use pinbot_core::entities::{
    AuthorizationRequest, CanRemovePinRequest, MemberInfo, MessageInfo, MessageRef, NewPin,
    PinRecord, PinTracking, RoleInfo, UserRef,
};
use pinbot_core::events::{ReactionEvent, ReactionKind};
use pinbot_core::traits::{
    AnnouncementSink, AuthorizationPolicy, PinStore, PlatformClient, RepoResult,
};
use pinbot_core::value_objects::{Emoji, PermissionOverwrite, Snowflake};
use pinbot_core::DomainError;

use super::context::{PinSettings, ServiceContext};

pub const GUILD: Snowflake = Snowflake::new(1_000);
pub const CHANNEL: Snowflake = Snowflake::new(2_000);
pub const MESSAGE: Snowflake = Snowflake::new(3_000);
pub const OWNER: Snowflake = Snowflake::new(4_000);
pub const ACTOR: Snowflake = Snowflake::new(5_000);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    FetchMessage(Snowflake),
    FetchMember(Snowflake),
    FetchGuildOwner,
    FetchRoles,
    FetchOverwrites,
    Pin(Snowflake),
    Unpin(Snowflake),
    SendMessage(Snowflake, String),
    AuthorizePin(Snowflake),
    AuthorizeUnpin(Snowflake),
    AddPin(Snowflake),
    RemovePin(Snowflake),
    SoftDelete(Snowflake),
    FindActive(Snowflake),
    Announce(Snowflake, String),
}

#[derive(Debug, Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<Call>>>);

impl CallLog {
    fn push(&self, call: Call) {
        self.0.lock().push(call);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.0.lock().clone()
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.0.lock().iter().filter(|c| pred(c)).count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.lock().is_empty()
    }
}

fn unavailable(what: &str) -> DomainError {
    DomainError::PlatformUnavailable(format!("{what} failed"))
}

// ============================================================================
// Platform
// ============================================================================

#[derive(Debug, Default)]
pub struct PlatformState {
    pub pinned: bool,
    pub owner_id: Snowflake,
    pub members: HashMap<Snowflake, Vec<Snowflake>>,
    pub roles: Vec<RoleInfo>,
    pub overwrites: Vec<PermissionOverwrite>,
    pub fail_pin: bool,
    pub fail_unpin: bool,
    pub fail_lookups: bool,
    pub failing_channels: Vec<Snowflake>,
}

#[derive(Debug)]
pub struct MockPlatform {
    log: CallLog,
    state: Mutex<PlatformState>,
}

impl MockPlatform {
    pub fn new(log: CallLog) -> Self {
        Self {
            log,
            state: Mutex::new(PlatformState {
                owner_id: OWNER,
                ..PlatformState::default()
            }),
        }
    }

    pub fn configure(&self, f: impl FnOnce(&mut PlatformState)) {
        f(&mut self.state.lock());
    }

    fn lookup_guard(&self) -> RepoResult<()> {
        if self.state.lock().fail_lookups {
            Err(unavailable("lookup"))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl PlatformClient for MockPlatform {
    async fn pin_message(&self, _channel_id: Snowflake, message_id: Snowflake) -> RepoResult<()> {
        self.log.push(Call::Pin(message_id));
        if self.state.lock().fail_pin {
            return Err(DomainError::Platform {
                status: 403,
                message: "Missing Permissions".to_string(),
            });
        }
        Ok(())
    }

    async fn unpin_message(&self, _channel_id: Snowflake, message_id: Snowflake) -> RepoResult<()> {
        self.log.push(Call::Unpin(message_id));
        if self.state.lock().fail_unpin {
            return Err(unavailable("unpin"));
        }
        Ok(())
    }

    async fn fetch_message(
        &self,
        channel_id: Snowflake,
        message_id: Snowflake,
    ) -> RepoResult<MessageInfo> {
        self.log.push(Call::FetchMessage(message_id));
        self.lookup_guard()?;
        Ok(MessageInfo {
            id: message_id,
            channel_id,
            pinned: self.state.lock().pinned,
        })
    }

    async fn fetch_member(
        &self,
        _guild_id: Snowflake,
        user_id: Snowflake,
    ) -> RepoResult<Option<MemberInfo>> {
        self.log.push(Call::FetchMember(user_id));
        self.lookup_guard()?;
        Ok(self.state.lock().members.get(&user_id).map(|roles| MemberInfo {
            user_id,
            role_ids: roles.clone(),
        }))
    }

    async fn fetch_guild_owner(&self, _guild_id: Snowflake) -> RepoResult<Snowflake> {
        self.log.push(Call::FetchGuildOwner);
        self.lookup_guard()?;
        Ok(self.state.lock().owner_id)
    }

    async fn fetch_guild_roles(&self, _guild_id: Snowflake) -> RepoResult<Vec<RoleInfo>> {
        self.log.push(Call::FetchRoles);
        self.lookup_guard()?;
        Ok(self.state.lock().roles.clone())
    }

    async fn fetch_channel_overwrites(
        &self,
        _channel_id: Snowflake,
    ) -> RepoResult<Vec<PermissionOverwrite>> {
        self.log.push(Call::FetchOverwrites);
        self.lookup_guard()?;
        Ok(self.state.lock().overwrites.clone())
    }

    async fn send_message(&self, channel_id: Snowflake, content: &str) -> RepoResult<()> {
        self.log.push(Call::SendMessage(channel_id, content.to_string()));
        if self.state.lock().failing_channels.contains(&channel_id) {
            return Err(unavailable("send"));
        }
        Ok(())
    }
}

// ============================================================================
// Store
// ============================================================================

#[derive(Debug)]
pub struct MockStore {
    log: CallLog,
    active: Mutex<HashMap<Snowflake, PinRecord>>,
    failing: Mutex<bool>,
}

impl MockStore {
    pub fn new(log: CallLog) -> Self {
        Self {
            log,
            active: Mutex::new(HashMap::new()),
            failing: Mutex::new(false),
        }
    }

    /// Seed an active record without logging a call
    pub fn seed(&self, message_id: Snowflake, pinned_by: Snowflake) {
        let pin = NewPin {
            message_id,
            guild_id: GUILD,
            channel_id: CHANNEL,
            pinned_by_user_id: pinned_by,
        };
        self.active.lock().insert(message_id, PinRecord::from_new(&pin));
    }

    pub fn set_failing(&self, failing: bool) {
        *self.failing.lock() = failing;
    }

    pub fn is_active(&self, message_id: Snowflake) -> bool {
        self.active.lock().contains_key(&message_id)
    }

    fn guard(&self) -> RepoResult<()> {
        if *self.failing.lock() {
            Err(DomainError::DatabaseError("connection reset".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl PinStore for MockStore {
    async fn add_pin(&self, pin: &NewPin) -> RepoResult<PinTracking> {
        self.log.push(Call::AddPin(pin.message_id));
        self.guard()?;
        let mut active = self.active.lock();
        if active.contains_key(&pin.message_id) {
            return Ok(PinTracking::AlreadyTracked);
        }
        active.insert(pin.message_id, PinRecord::from_new(pin));
        Ok(PinTracking::Created)
    }

    async fn remove_pin(&self, message_id: Snowflake) -> RepoResult<bool> {
        self.log.push(Call::RemovePin(message_id));
        self.guard()?;
        Ok(self.active.lock().remove(&message_id).is_some())
    }

    async fn soft_delete_pin(&self, message_id: Snowflake) -> RepoResult<bool> {
        self.log.push(Call::SoftDelete(message_id));
        self.guard()?;
        Ok(self.active.lock().remove(&message_id).is_some())
    }

    async fn find_active(&self, message_id: Snowflake) -> RepoResult<Option<PinRecord>> {
        self.log.push(Call::FindActive(message_id));
        self.guard()?;
        Ok(self.active.lock().get(&message_id).cloned())
    }
}

// ============================================================================
// Policy
// ============================================================================

#[derive(Debug)]
pub struct MockPolicy {
    log: CallLog,
    /// `None` makes the policy fail
    answer: Mutex<Option<bool>>,
}

impl MockPolicy {
    pub fn new(log: CallLog) -> Self {
        Self {
            log,
            answer: Mutex::new(Some(true)),
        }
    }

    pub fn set_answer(&self, answer: Option<bool>) {
        *self.answer.lock() = answer;
    }

    fn answer(&self) -> RepoResult<bool> {
        self.answer
            .lock()
            .ok_or_else(|| DomainError::PolicyError("evaluator offline".to_string()))
    }
}

#[async_trait]
impl AuthorizationPolicy for MockPolicy {
    async fn is_authorized_to_pin(&self, request: &AuthorizationRequest) -> RepoResult<bool> {
        self.log.push(Call::AuthorizePin(request.user_id));
        self.answer()
    }

    async fn is_authorized_to_unpin(&self, request: &CanRemovePinRequest) -> RepoResult<bool> {
        self.log.push(Call::AuthorizeUnpin(request.request.user_id));
        self.answer()
    }
}

// ============================================================================
// Announcement sink
// ============================================================================

#[derive(Debug)]
pub struct MockSink {
    log: CallLog,
    failing: Mutex<bool>,
}

impl MockSink {
    pub fn new(log: CallLog) -> Self {
        Self {
            log,
            failing: Mutex::new(false),
        }
    }

    pub fn set_failing(&self, failing: bool) {
        *self.failing.lock() = failing;
    }
}

#[async_trait]
impl AnnouncementSink for MockSink {
    async fn announce(&self, channel_id: Snowflake, text: &str) -> RepoResult<()> {
        self.log.push(Call::Announce(channel_id, text.to_string()));
        if *self.failing.lock() {
            return Err(unavailable("announce"));
        }
        Ok(())
    }
}

// ============================================================================
// Fixture
// ============================================================================

/// One set of mocks sharing a call log
pub struct Fixture {
    pub log: CallLog,
    pub store: Arc<MockStore>,
    pub platform: Arc<MockPlatform>,
    pub policy: Arc<MockPolicy>,
    pub sink: Arc<MockSink>,
}

impl Default for Fixture {
    fn default() -> Self {
        let log = CallLog::default();
        Self {
            store: Arc::new(MockStore::new(log.clone())),
            platform: Arc::new(MockPlatform::new(log.clone())),
            policy: Arc::new(MockPolicy::new(log.clone())),
            sink: Arc::new(MockSink::new(log.clone())),
            log,
        }
    }
}

impl Fixture {
    pub fn context(&self) -> ServiceContext {
        ServiceContext::new(
            self.store.clone(),
            self.platform.clone(),
            self.policy.clone(),
            self.sink.clone(),
            PinSettings::default(),
        )
    }
}

pub fn actor(is_admin: bool, role_ids: Vec<Snowflake>) -> UserRef {
    UserRef::new(ACTOR, is_admin, role_ids)
}

pub fn reaction(kind: ReactionKind, actor: UserRef, pinned: bool, emoji: &str) -> ReactionEvent {
    ReactionEvent {
        kind,
        actor,
        message: MessageRef::new(MESSAGE, CHANNEL, GUILD, pinned),
        emoji: Emoji::unicode(emoji),
    }
}
