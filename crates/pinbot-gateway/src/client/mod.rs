//! Gateway client
//!
//! Keeps one WebSocket session to the platform alive: Hello, Identify or
//! Resume, heartbeats with zombie detection, then dispatches until the
//! connection drops and the loop reconnects.
//!
//! Event tasks live in a `JoinSet`. On shutdown the socket is dropped first,
//! then every in-flight task is awaited so no pin sequence is cut short.

mod pipeline;
mod session;

pub use pipeline::EventPipeline;
pub use session::Session;

use std::future::Future;
use std::time::Duration;

use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use pinbot_common::BotConfig;
use pinbot_service::TransitionOutcome;
use tokio::net::TcpStream;
use tokio::task::{JoinError, JoinSet};
use tokio::time::{interval_at, sleep, Instant, MissedTickBehavior};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tracing::{debug, error, info, instrument, trace, warn};

use crate::error::{GatewayError, GatewayResult};
use crate::events::GatewayEventType;
use crate::protocol::{GatewayMessage, IdentifyPayload, Intents, OpCode, ReadyPayload};

type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;
type SocketSink = SplitSink<Socket, Message>;
type SocketStream = SplitStream<Socket>;

/// Gateway connection settings
#[derive(Clone)]
pub struct GatewayConfig {
    pub token: String,
    pub url: String,
    pub intents: Intents,
    pub reconnect_delay: Duration,
}

impl From<&BotConfig> for GatewayConfig {
    fn from(config: &BotConfig) -> Self {
        Self {
            token: config.token.clone(),
            url: config.gateway_url.clone(),
            intents: Intents::PIN_BOT,
            reconnect_delay: config.reconnect_delay(),
        }
    }
}

impl std::fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("url", &self.url)
            .field("intents", &self.intents)
            .field("reconnect_delay", &self.reconnect_delay)
            .finish()
    }
}

/// Long-running gateway client
pub struct GatewayClient {
    config: GatewayConfig,
    pipeline: EventPipeline,
    session: Session,
    tasks: JoinSet<Vec<TransitionOutcome>>,
}

impl GatewayClient {
    /// Create a new GatewayClient
    pub fn new(config: GatewayConfig, pipeline: EventPipeline) -> Self {
        Self {
            config,
            pipeline,
            session: Session::new(),
            tasks: JoinSet::new(),
        }
    }

    /// Stay connected until a close code says reconnecting is pointless
    pub async fn run(self) -> GatewayResult<()> {
        self.run_until(std::future::pending()).await
    }

    /// Like [`run`](Self::run), but stop reading the gateway once `shutdown`
    /// completes and wait for in-flight events before returning
    pub async fn run_until<F>(mut self, shutdown: F) -> GatewayResult<()>
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        loop {
            let url = self.session.connect_url(&self.config.url);
            let err = tokio::select! {
                err = self.connect(&url) => err,
                () = &mut shutdown => break,
            };

            if err.is_fatal() {
                error!(error = %err, "Gateway closed the connection for good");
                self.drain().await;
                return Err(err);
            }
            if err.can_resume() {
                warn!(error = %err, session_id = ?self.session.session_id(), "Gateway connection lost, resuming");
            } else {
                warn!(error = %err, "Gateway session lost, identifying again");
                self.session.reset();
            }

            tokio::select! {
                () = sleep(self.config.reconnect_delay) => {}
                () = &mut shutdown => break,
            }
        }

        self.drain().await;
        Ok(())
    }

    /// Await every in-flight event task
    async fn drain(&mut self) {
        if !self.tasks.is_empty() {
            info!(in_flight = self.tasks.len(), "Waiting for in-flight events");
        }
        while let Some(result) = self.tasks.join_next().await {
            log_task_result(result);
        }
    }

    /// Collect tasks that already finished
    fn reap(&mut self) {
        while let Some(result) = self.tasks.try_join_next() {
            log_task_result(result);
        }
    }

    /// Run one connection; always ends with the reason it stopped
    #[instrument(skip(self))]
    async fn connect(&mut self, url: &str) -> GatewayError {
        match self.connect_inner(url).await {
            Ok(never) => match never {},
            Err(e) => e,
        }
    }

    async fn connect_inner(&mut self, url: &str) -> GatewayResult<std::convert::Infallible> {
        let (socket, _) = connect_async(url).await?;
        let (mut sink, mut stream) = socket.split();

        let hello = match next_frame(&mut stream).await? {
            frame if frame.op == OpCode::Hello => frame
                .as_hello()
                .ok_or_else(|| GatewayError::UnexpectedHandshake(frame.to_string()))?,
            frame => return Err(GatewayError::UnexpectedHandshake(frame.to_string())),
        };
        let period = Duration::from_millis(hello.heartbeat_interval);
        debug!(heartbeat_ms = hello.heartbeat_interval, "Hello received");

        let handshake = match self.session.resume_payload(&self.config.token) {
            Some(resume) => {
                info!(session_id = %resume.session_id, seq = resume.seq, "Resuming session");
                GatewayMessage::resume(&resume)?
            }
            None => {
                info!("Identifying");
                GatewayMessage::identify(&IdentifyPayload::new(
                    self.config.token.clone(),
                    self.config.intents,
                ))?
            }
        };
        send(&mut sink, &handshake).await?;

        let mut heartbeat = interval_at(Instant::now() + period, period);
        heartbeat.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut acked = true;

        loop {
            tokio::select! {
                _ = heartbeat.tick() => {
                    if !acked {
                        return Err(GatewayError::ZombieConnection);
                    }
                    acked = false;
                    send(&mut sink, &GatewayMessage::heartbeat(self.session.sequence())).await?;
                }
                frame = next_frame(&mut stream) => {
                    let frame = frame?;
                    match frame.op {
                        OpCode::Dispatch => self.on_dispatch(frame),
                        OpCode::Heartbeat => {
                            send(&mut sink, &GatewayMessage::heartbeat(self.session.sequence())).await?;
                        }
                        OpCode::HeartbeatAck => acked = true,
                        OpCode::Reconnect => return Err(GatewayError::ReconnectRequested),
                        OpCode::InvalidSession => {
                            let resumable = frame.as_invalid_session().unwrap_or(false);
                            return Err(GatewayError::InvalidSession { resumable });
                        }
                        op => debug!(%op, "Ignoring unexpected op"),
                    }
                }
            }
        }
    }

    fn on_dispatch(&mut self, frame: GatewayMessage) {
        self.session.observe_sequence(frame.s);

        let Some(name) = frame.t.as_deref() else {
            return;
        };
        let Some(event_type) = GatewayEventType::parse(name) else {
            trace!(event = name, "Ignoring dispatch");
            return;
        };

        match event_type {
            GatewayEventType::Ready => match frame.payload::<ReadyPayload>() {
                Ok(ready) => {
                    info!(session_id = %ready.session_id, "Gateway ready");
                    self.session.ready(ready);
                }
                Err(e) => warn!(error = %e, "Malformed READY payload"),
            },
            GatewayEventType::Resumed => info!("Session resumed"),
            _ => match event_type.decode(frame.d.unwrap_or_default()) {
                Ok(Some(raw)) => {
                    self.reap();
                    let pipeline = self.pipeline.clone();
                    self.tasks.spawn(async move { pipeline.process(raw).await });
                }
                Ok(None) => {}
                Err(e) => warn!(event = %event_type, error = %e, "Malformed dispatch payload"),
            },
        }
    }
}

fn log_task_result(result: Result<Vec<TransitionOutcome>, JoinError>) {
    match result {
        Ok(outcomes) => trace!(outcomes = outcomes.len(), "Event task finished"),
        Err(e) if e.is_panic() => error!(error = %e, "Event task panicked"),
        Err(e) => warn!(error = %e, "Event task cancelled"),
    }
}

/// Next gateway frame, skipping pings and undecodable text
async fn next_frame(stream: &mut SocketStream) -> GatewayResult<GatewayMessage> {
    loop {
        match stream.next().await {
            None => {
                return Err(GatewayError::Closed {
                    code: None,
                    reason: String::new(),
                })
            }
            Some(Err(e)) => return Err(e.into()),
            Some(Ok(Message::Text(text))) => match GatewayMessage::from_json(&text) {
                Ok(frame) => return Ok(frame),
                Err(e) => warn!(error = %e, "Skipping undecodable frame"),
            },
            Some(Ok(Message::Close(frame))) => {
                return Err(GatewayError::Closed {
                    code: frame.as_ref().map(|f| u16::from(f.code)),
                    reason: frame.map(|f| f.reason.into_owned()).unwrap_or_default(),
                })
            }
            Some(Ok(_)) => {}
        }
    }
}

async fn send(sink: &mut SocketSink, frame: &GatewayMessage) -> GatewayResult<()> {
    trace!(%frame, "Sending frame");
    sink.send(Message::Text(frame.to_json()?)).await?;
    Ok(())
}
