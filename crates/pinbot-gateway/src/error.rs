//! Gateway client error types

use crate::protocol::CloseCode;
use pinbot_common::AppError;
use thiserror::Error;

/// Why a gateway connection ended
#[derive(Debug, Error)]
pub enum GatewayError {
    /// WebSocket transport failure
    #[error("WebSocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    /// Frame could not be encoded or decoded
    #[error("Invalid payload: {0}")]
    InvalidPayload(#[from] serde_json::Error),

    /// First frame was not Hello
    #[error("Expected Hello, got {0}")]
    UnexpectedHandshake(String),

    /// The previous heartbeat was never acknowledged
    #[error("Heartbeat not acknowledged")]
    ZombieConnection,

    /// The server asked for a reconnect
    #[error("Reconnect requested")]
    ReconnectRequested,

    /// The server invalidated the session
    #[error("Session invalidated (resumable: {resumable})")]
    InvalidSession { resumable: bool },

    /// The server closed the socket
    #[error("Connection closed: {}", describe_close(.code, .reason))]
    Closed { code: Option<u16>, reason: String },
}

fn describe_close(code: &Option<u16>, reason: &str) -> String {
    match code.and_then(CloseCode::from_u16) {
        Some(known) => known.to_string(),
        None => match code {
            Some(code) if reason.is_empty() => code.to_string(),
            Some(code) => format!("{code} {reason}"),
            None => "no close frame".to_string(),
        },
    }
}

impl GatewayError {
    /// Gateway close code, when the server sent a known one
    pub fn close_code(&self) -> Option<CloseCode> {
        match self {
            Self::Closed { code, .. } => code.and_then(CloseCode::from_u16),
            _ => None,
        }
    }

    /// Reconnecting cannot fix this error
    pub fn is_fatal(&self) -> bool {
        self.close_code().is_some_and(|code| !code.should_reconnect())
    }

    /// The current session may be resumed after this error
    pub fn can_resume(&self) -> bool {
        match self {
            Self::InvalidSession { resumable } => *resumable,
            Self::Closed { .. } => self.close_code().map_or(true, CloseCode::can_resume),
            Self::UnexpectedHandshake(_) => false,
            _ => true,
        }
    }
}

impl From<GatewayError> for AppError {
    fn from(err: GatewayError) -> Self {
        AppError::gateway(err.to_string())
    }
}

/// Gateway result type
pub type GatewayResult<T> = Result<T, GatewayError>;
