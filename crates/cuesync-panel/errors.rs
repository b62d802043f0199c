//! Error types for the cuesync-panel crate
//!
//! `PanelError` wraps `CoreError` from cuesync-core and adds the failures of
//! the panel's outer surfaces: event handlers and configuration.
//! `PlayerError` is what a `CaptionPlayer` implementation reports;
//! the panel logs those and degrades instead of propagating them.

use cuesync_core::CoreError;
use thiserror::Error;

/// Main error type for panel operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PanelError {
    /// Errors from cuesync-core
    #[error(transparent)]
    Core(#[from] CoreError),

    /// An event handler rejected an event
    #[error("Event handler failed: {message}")]
    HandlerFailed { message: String },

    /// Handler registration limit reached
    #[error("Handler limit reached: {limit}")]
    HandlerLimit { limit: usize },

    /// Invalid configuration value
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Player call failed
    #[error(transparent)]
    Player(#[from] PlayerError),
}

impl PanelError {
    /// Create a handler failure
    pub fn handler<T: core::fmt::Display>(message: T) -> Self {
        Self::HandlerFailed {
            message: message.to_string(),
        }
    }

    /// Create a configuration error
    pub fn config<T: core::fmt::Display>(message: T) -> Self {
        Self::Config {
            message: message.to_string(),
        }
    }
}

/// Failure reported by a caption player
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlayerError {
    /// The player is not ready to answer yet
    #[error("Player not ready")]
    NotReady,

    /// Requested track does not exist
    #[error("Text track not found: {language}")]
    TrackNotFound { language: String },

    /// Any other player-side failure
    #[error("Player call '{call}' failed: {message}")]
    CallFailed { call: String, message: String },
}

impl PlayerError {
    /// Create a generic call failure
    pub fn call_failed<C: Into<String>, M: core::fmt::Display>(call: C, message: M) -> Self {
        Self::CallFailed {
            call: call.into(),
            message: message.to_string(),
        }
    }
}

/// Result type alias for panel operations
pub type Result<T> = core::result::Result<T, PanelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn core_errors_pass_through() {
        let err: PanelError = CoreError::ChunkOutOfRange { index: 2, len: 1 }.into();
        assert_eq!(
            err.to_string(),
            "Chunk 2 out of range (transcript has 1 chunks)"
        );
        assert!(matches!(err, PanelError::Core(CoreError::ChunkOutOfRange { .. })));
    }

    #[test]
    fn player_errors_display() {
        let err = PlayerError::call_failed("getTextTracks", "iframe detached");
        assert_eq!(
            err.to_string(),
            "Player call 'getTextTracks' failed: iframe detached"
        );
        let wrapped = PanelError::from(err.clone());
        assert_eq!(wrapped, PanelError::Player(err));
    }
}
