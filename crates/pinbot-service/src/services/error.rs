//! Service layer error types
//!
//! `TransitionOutcome` is the terminal state of one event; `TransitionError`
//! explains a `Failed` outcome. Neither ever escapes the router as an `Err`.

use pinbot_core::DomainError;
use std::fmt;
use tracing::Level;

/// Service construction errors
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl ServiceError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

/// Result type alias for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

// ============================================================================
// Transition errors
// ============================================================================

/// Why a pin transition stopped
#[derive(Debug, thiserror::Error)]
pub enum TransitionError {
    /// The policy said no; surfaced as `Skipped(NotAuthorized)`
    #[error("Permission denied")]
    PermissionDenied,

    /// The policy could not decide; treated as a denial
    #[error("Authorization unavailable: {0}")]
    AuthorizationUnavailable(#[source] DomainError),

    /// Platform pin/unpin failed; no record was touched
    #[error("Platform operation failed: {0}")]
    PlatformOperationFailed(#[source] DomainError),

    /// Record update failed; the platform change stands
    #[error("Store operation failed: {0}")]
    StoreOperationFailed(StoreFailure),

    /// Announcement failed; never changes the outcome
    #[error("Announcement failed: {0}")]
    AnnouncementFailed(#[source] DomainError),
}

impl TransitionError {
    /// Level this error is logged at
    pub fn level(&self) -> Level {
        match self {
            Self::PermissionDenied => Level::DEBUG,
            Self::AnnouncementFailed(_)
            | Self::StoreOperationFailed(StoreFailure::NoActiveRecord) => Level::WARN,
            Self::AuthorizationUnavailable(_)
            | Self::PlatformOperationFailed(_)
            | Self::StoreOperationFailed(StoreFailure::Error(_)) => Level::ERROR,
        }
    }

    /// Short code for structured logs
    pub fn code(&self) -> &'static str {
        match self {
            Self::PermissionDenied => "PERMISSION_DENIED",
            Self::AuthorizationUnavailable(_) => "AUTHORIZATION_UNAVAILABLE",
            Self::PlatformOperationFailed(_) => "PLATFORM_OPERATION_FAILED",
            Self::StoreOperationFailed(_) => "STORE_OPERATION_FAILED",
            Self::AnnouncementFailed(_) => "ANNOUNCEMENT_FAILED",
        }
    }
}

/// Store-side cause of a `StoreOperationFailed`
#[derive(Debug)]
pub enum StoreFailure {
    Error(DomainError),
    /// The record to retire was not there
    NoActiveRecord,
}

impl fmt::Display for StoreFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error(e) => write!(f, "{e}"),
            Self::NoActiveRecord => f.write_str("no active pin record"),
        }
    }
}

// ============================================================================
// Outcomes
// ============================================================================

/// Why an event was skipped without side effects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    AlreadyPinned,
    NotPinned,
    NotPinEmoji,
    NotAuthorized,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AlreadyPinned => "already_pinned",
            Self::NotPinned => "not_pinned",
            Self::NotPinEmoji => "not_pin_emoji",
            Self::NotAuthorized => "not_authorized",
        }
    }
}

/// Terminal state of one event
#[derive(Debug)]
pub enum TransitionOutcome {
    Skipped(SkipReason),
    Pinned,
    Unpinned,
    /// Reactions cleared; nothing to do
    Ignored,
    /// Deleted message had an active record, now retired
    Retired,
    /// Deleted message had no active record
    NoRecord,
    Failed(TransitionError),
}

impl TransitionOutcome {
    /// Short name for logs
    pub fn label(&self) -> &'static str {
        match self {
            Self::Skipped(_) => "skipped",
            Self::Pinned => "pinned",
            Self::Unpinned => "unpinned",
            Self::Ignored => "ignored",
            Self::Retired => "retired",
            Self::NoRecord => "no_record",
            Self::Failed(_) => "failed",
        }
    }

    /// True for anything except `Failed`
    pub fn is_success(&self) -> bool {
        !matches!(self, Self::Failed(_))
    }

    /// True when the event changed pin state
    pub fn is_transition(&self) -> bool {
        matches!(self, Self::Pinned | Self::Unpinned | Self::Retired)
    }
}
