//! Fake chat platform for integration tests
//!
//! Serves the REST routes the bot calls and a gateway WebSocket that sends
//! Hello, answers Identify with READY and Resume with RESUMED, and relays
//! frames pushed by a test. Every REST request and gateway handshake is
//! recorded so tests can assert on side effects.

use std::collections::{HashMap, HashSet};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use axum::extract::ws::{CloseFrame, Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Path, State};
use axum::http::{HeaderMap, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, put};
use axum::{Json, Router};
use parking_lot::Mutex;
use pinbot_core::value_objects::Snowflake;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use crate::fixtures::{BOT_TOKEN, OWNER};

/// One REST call made by the bot
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

impl RecordedRequest {
    pub fn is(&self, method: &Method, path: &str) -> bool {
        self.method == method && self.path == path
    }
}

/// Mutable state of the fake platform
#[derive(Debug)]
pub struct World {
    pub owner_id: Snowflake,
    /// (role id, permission bits); the @everyone role has the guild's id
    pub roles: Vec<(Snowflake, u64)>,
    pub members: HashMap<Snowflake, Vec<Snowflake>>,
    pub overwrites: Vec<Value>,
    pub pinned: HashSet<Snowflake>,
    /// Pin and unpin calls answer 403
    pub deny_pins: bool,
    /// Pin calls wait this long before answering
    pub pin_delay: Duration,
    /// Interval announced in Hello
    pub heartbeat_interval_ms: u64,
    /// Heartbeats go unanswered
    pub withhold_acks: bool,
    pub requests: Vec<RecordedRequest>,
    pub identifies: Vec<Value>,
    pub resumes: Vec<Value>,
    /// Gateway sessions opened so far
    pub connections: usize,
}

impl Default for World {
    fn default() -> Self {
        Self {
            owner_id: OWNER,
            roles: Vec::new(),
            members: HashMap::new(),
            overwrites: Vec::new(),
            pinned: HashSet::new(),
            deny_pins: false,
            pin_delay: Duration::ZERO,
            heartbeat_interval_ms: 45_000,
            withhold_acks: false,
            requests: Vec::new(),
            identifies: Vec::new(),
            resumes: Vec::new(),
            connections: 0,
        }
    }
}

/// Frame pushed to connected gateway sessions
#[derive(Debug, Clone)]
enum Push {
    Dispatch(String, Value),
    Op(Value),
    Close(u16, String),
}

#[derive(Clone)]
struct FakeState {
    world: Arc<Mutex<World>>,
    pushes: broadcast::Sender<Push>,
}

/// Fake platform server instance that manages lifecycle
pub struct FakePlatform {
    pub addr: SocketAddr,
    state: FakeState,
    _handle: JoinHandle<()>,
}

impl FakePlatform {
    /// Start a new fake platform on a free local port
    pub async fn start() -> Result<Self> {
        let (pushes, _) = broadcast::channel(64);
        let state = FakeState {
            world: Arc::new(Mutex::new(World::default())),
            pushes,
        };

        let app = Router::new()
            .route("/api/channels/:channel_id", get(get_channel))
            .route(
                "/api/channels/:channel_id/pins/:message_id",
                put(pin_message).delete(unpin_message),
            )
            .route(
                "/api/channels/:channel_id/messages/:message_id",
                get(get_message),
            )
            .route(
                "/api/channels/:channel_id/messages",
                axum::routing::post(create_message),
            )
            .route("/api/guilds/:guild_id", get(get_guild))
            .route("/api/guilds/:guild_id/roles", get(get_roles))
            .route("/api/guilds/:guild_id/members/:user_id", get(get_member))
            .route("/gateway", get(gateway))
            .with_state(state.clone());

        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Ok(Self {
            addr,
            state,
            _handle: handle,
        })
    }

    pub fn api_base_url(&self) -> String {
        format!("http://{}/api", self.addr)
    }

    pub fn gateway_url(&self) -> String {
        format!("ws://{}/gateway?v=10&encoding=json", self.addr)
    }

    /// Change the platform state
    pub fn configure(&self, f: impl FnOnce(&mut World)) {
        f(&mut self.state.world.lock());
    }

    /// Read from the platform state
    pub fn inspect<T>(&self, f: impl FnOnce(&World) -> T) -> T {
        f(&self.state.world.lock())
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.inspect(|w| w.requests.clone())
    }

    /// Requests that changed something on the platform
    pub fn writes(&self) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.method != Method::GET)
            .collect()
    }

    pub fn is_pinned(&self, message_id: Snowflake) -> bool {
        self.inspect(|w| w.pinned.contains(&message_id))
    }

    /// Push a dispatch to every connected gateway session
    pub fn dispatch(&self, name: &str, data: Value) {
        self.push(Push::Dispatch(name.to_string(), data));
    }

    /// Push a raw non-dispatch frame such as `{"op": 7}`
    pub fn send_op(&self, frame: Value) {
        self.push(Push::Op(frame));
    }

    /// Close every connected gateway session with the given code
    pub fn close(&self, code: u16, reason: &str) {
        self.push(Push::Close(code, reason.to_string()));
    }

    fn push(&self, push: Push) {
        // No receivers just means nobody is connected yet
        let _ = self.state.pushes.send(push);
    }

    /// Poll the platform state until `check` holds
    pub async fn wait_for(&self, check: impl Fn(&World) -> bool) -> Result<()> {
        let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
        while tokio::time::Instant::now() < deadline {
            if self.inspect(&check) {
                return Ok(());
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        anyhow::bail!("Timed out waiting for the fake platform")
    }
}

// ============================================================================
// REST routes
// ============================================================================

fn record(state: &FakeState, method: Method, path: String, body: Option<Value>) {
    state.world.lock().requests.push(RecordedRequest { method, path, body });
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bot {BOT_TOKEN}"))
}

fn error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "message": message, "code": 0 }))).into_response()
}

macro_rules! guard {
    ($headers:expr) => {
        if !authorized(&$headers) {
            return error(StatusCode::UNAUTHORIZED, "401: Unauthorized");
        }
    };
}

async fn pin_message(
    State(state): State<FakeState>,
    headers: HeaderMap,
    Path((channel_id, message_id)): Path<(Snowflake, Snowflake)>,
) -> Response {
    guard!(headers);
    record(&state, Method::PUT, format!("/channels/{channel_id}/pins/{message_id}"), None);
    let delay = state.world.lock().pin_delay;
    tokio::time::sleep(delay).await;
    let mut world = state.world.lock();
    if world.deny_pins {
        return error(StatusCode::FORBIDDEN, "Missing Permissions");
    }
    world.pinned.insert(message_id);
    StatusCode::NO_CONTENT.into_response()
}

async fn unpin_message(
    State(state): State<FakeState>,
    headers: HeaderMap,
    Path((channel_id, message_id)): Path<(Snowflake, Snowflake)>,
) -> Response {
    guard!(headers);
    record(&state, Method::DELETE, format!("/channels/{channel_id}/pins/{message_id}"), None);
    let mut world = state.world.lock();
    if world.deny_pins {
        return error(StatusCode::FORBIDDEN, "Missing Permissions");
    }
    world.pinned.remove(&message_id);
    StatusCode::NO_CONTENT.into_response()
}

async fn get_message(
    State(state): State<FakeState>,
    headers: HeaderMap,
    Path((channel_id, message_id)): Path<(Snowflake, Snowflake)>,
) -> Response {
    guard!(headers);
    record(&state, Method::GET, format!("/channels/{channel_id}/messages/{message_id}"), None);
    let pinned = state.world.lock().pinned.contains(&message_id);
    Json(json!({
        "id": message_id,
        "channel_id": channel_id,
        "content": "hello",
        "pinned": pinned,
    }))
    .into_response()
}

async fn create_message(
    State(state): State<FakeState>,
    headers: HeaderMap,
    Path(channel_id): Path<Snowflake>,
    Json(body): Json<Value>,
) -> Response {
    guard!(headers);
    record(&state, Method::POST, format!("/channels/{channel_id}/messages"), Some(body));
    Json(json!({ "id": "1", "channel_id": channel_id })).into_response()
}

async fn get_channel(
    State(state): State<FakeState>,
    headers: HeaderMap,
    Path(channel_id): Path<Snowflake>,
) -> Response {
    guard!(headers);
    record(&state, Method::GET, format!("/channels/{channel_id}"), None);
    let overwrites = state.world.lock().overwrites.clone();
    Json(json!({
        "id": channel_id,
        "type": 0,
        "permission_overwrites": overwrites,
    }))
    .into_response()
}

async fn get_guild(
    State(state): State<FakeState>,
    headers: HeaderMap,
    Path(guild_id): Path<Snowflake>,
) -> Response {
    guard!(headers);
    record(&state, Method::GET, format!("/guilds/{guild_id}"), None);
    let owner_id = state.world.lock().owner_id;
    Json(json!({ "id": guild_id, "name": "test guild", "owner_id": owner_id })).into_response()
}

async fn get_roles(
    State(state): State<FakeState>,
    headers: HeaderMap,
    Path(guild_id): Path<Snowflake>,
) -> Response {
    guard!(headers);
    record(&state, Method::GET, format!("/guilds/{guild_id}/roles"), None);
    let roles: Vec<Value> = state
        .world
        .lock()
        .roles
        .iter()
        .map(|(id, bits)| json!({ "id": id, "name": "role", "permissions": bits.to_string() }))
        .collect();
    Json(roles).into_response()
}

async fn get_member(
    State(state): State<FakeState>,
    headers: HeaderMap,
    Path((guild_id, user_id)): Path<(Snowflake, Snowflake)>,
) -> Response {
    guard!(headers);
    record(&state, Method::GET, format!("/guilds/{guild_id}/members/{user_id}"), None);
    match state.world.lock().members.get(&user_id) {
        Some(roles) => Json(json!({ "user": { "id": user_id }, "roles": roles })).into_response(),
        None => error(StatusCode::NOT_FOUND, "Unknown Member"),
    }
}

// ============================================================================
// Gateway
// ============================================================================

async fn gateway(State(state): State<FakeState>, ws: WebSocketUpgrade) -> impl IntoResponse {
    ws.on_upgrade(|socket| gateway_session(state, socket))
}

async fn gateway_session(state: FakeState, mut socket: WebSocket) {
    let mut pushes = state.pushes.subscribe();
    let mut sequence = 0_u64;

    let interval = {
        let mut world = state.world.lock();
        world.connections += 1;
        world.heartbeat_interval_ms
    };
    let hello = json!({ "op": 10, "d": { "heartbeat_interval": interval } });
    if socket.send(Message::Text(hello.to_string())).await.is_err() {
        return;
    }

    loop {
        tokio::select! {
            incoming = socket.recv() => {
                let frame: Value = match incoming {
                    Some(Ok(Message::Text(text))) => match serde_json::from_str(&text) {
                        Ok(frame) => frame,
                        Err(_) => continue,
                    },
                    Some(Ok(Message::Close(_)) | Err(_)) | None => return,
                    Some(Ok(_)) => continue,
                };

                let reply = match frame["op"].as_u64() {
                    Some(1) if state.world.lock().withhold_acks => continue,
                    Some(1) => json!({ "op": 11 }),
                    Some(2) => {
                        state.world.lock().identifies.push(frame["d"].clone());
                        sequence += 1;
                        json!({
                            "op": 0,
                            "t": "READY",
                            "s": sequence,
                            "d": { "v": 10, "session_id": "fake-session", "user": { "id": "1" }, "guilds": [] },
                        })
                    }
                    Some(6) => {
                        state.world.lock().resumes.push(frame["d"].clone());
                        sequence = frame["d"]["seq"].as_u64().unwrap_or(0) + 1;
                        json!({ "op": 0, "t": "RESUMED", "s": sequence, "d": {} })
                    }
                    _ => continue,
                };
                if socket.send(Message::Text(reply.to_string())).await.is_err() {
                    return;
                }
            }
            Ok(push) = pushes.recv() => {
                let message = match push {
                    Push::Dispatch(name, data) => {
                        sequence += 1;
                        Message::Text(json!({ "op": 0, "t": name, "s": sequence, "d": data }).to_string())
                    }
                    Push::Op(frame) => Message::Text(frame.to_string()),
                    Push::Close(code, reason) => {
                        let _ = socket
                            .send(Message::Close(Some(CloseFrame { code, reason: reason.into() })))
                            .await;
                        return;
                    }
                };
                if socket.send(message).await.is_err() {
                    return;
                }
            }
        }
    }
}
