//! Error types for Echoverse.

use thiserror::Error;

/// Primary error type for all Echoverse operations.
///
/// Errors are `Clone` so a failed generation can keep its reason in
/// [`GenerationStatus::Failed`](crate::generation::GenerationStatus::Failed).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EchoverseError {
    #[error("Text is empty")]
    EmptyInput,

    #[error("Missing ElevenLabs API key")]
    MissingCredential,

    #[error("Unknown voice: {0}")]
    UnknownVoice(String),

    #[error("A generation is already in progress")]
    AlreadyInProgress,

    #[error("Remote rejected request (status {status}): {message}")]
    RemoteRejected { status: u16, message: String },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Playback error: {0}")]
    Playback(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl From<reqwest::Error> for EchoverseError {
    fn from(error: reqwest::Error) -> Self {
        Self::Transport(error.to_string())
    }
}

/// Broad error category for routing user-facing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Remote,
    Transport,
    Playback,
    Configuration,
}

impl EchoverseError {
    /// Create a remote rejection error.
    pub fn rejected(status: u16, message: impl Into<String>) -> Self {
        Self::RemoteRejected {
            status,
            message: message.into(),
        }
    }

    /// Classify this error into a category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::EmptyInput
            | Self::MissingCredential
            | Self::UnknownVoice(_)
            | Self::AlreadyInProgress => ErrorCategory::Input,
            Self::RemoteRejected { .. } | Self::InvalidResponse(_) => ErrorCategory::Remote,
            Self::Transport(_) => ErrorCategory::Transport,
            Self::Playback(_) => ErrorCategory::Playback,
            Self::Configuration(_) => ErrorCategory::Configuration,
        }
    }

    /// Whether the error was raised before any network call was made.
    pub fn is_client_side(&self) -> bool {
        self.category() == ErrorCategory::Input
    }

    /// Whether the remote side refused the credential.
    pub fn is_authentication(&self) -> bool {
        matches!(self, Self::RemoteRejected { status: 401 | 403, .. })
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, EchoverseError>;
