//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::Snowflake;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Guild not found: {0}")]
    GuildNotFound(Snowflake),

    #[error("Channel not found: {0}")]
    ChannelNotFound(Snowflake),

    #[error("Message not found: {0}")]
    MessageNotFound(Snowflake),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    // =========================================================================
    // Platform Errors
    // =========================================================================
    #[error("Platform error ({status}): {message}")]
    Platform { status: u16, message: String },

    #[error("Platform unavailable: {0}")]
    PlatformUnavailable(String),

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Policy error: {0}")]
    PolicyError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for logs
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::GuildNotFound(_) => "UNKNOWN_GUILD",
            Self::ChannelNotFound(_) => "UNKNOWN_CHANNEL",
            Self::MessageNotFound(_) => "UNKNOWN_MESSAGE",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",

            // Platform
            Self::Platform { .. } => "PLATFORM_ERROR",
            Self::PlatformUnavailable(_) => "PLATFORM_UNAVAILABLE",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::PolicyError(_) => "POLICY_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::GuildNotFound(_) | Self::ChannelNotFound(_) | Self::MessageNotFound(_)
        ) || matches!(self, Self::Platform { status: 404, .. })
    }

    /// Check if the error came from the chat platform
    pub fn is_platform(&self) -> bool {
        matches!(self, Self::Platform { .. } | Self::PlatformUnavailable(_))
    }

    /// Check if retrying the call later could succeed
    pub fn is_transient(&self) -> bool {
        match self {
            Self::PlatformUnavailable(_) | Self::DatabaseError(_) => true,
            Self::Platform { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}
