//! Core error type for cuesync operations
//!
//! The matching path itself never fails: an empty cue or a cue that scores
//! zero everywhere is a normal "clear highlight" outcome, not an error.
//! `CoreError` covers the fallible edges around it: index lookups with stale
//! coordinates, reversed word ranges and invalid scoring configuration.

use thiserror::Error;

/// Main error type for cuesync core operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// Chunk index outside the current transcript
    #[error("Chunk {index} out of range (transcript has {len} chunks)")]
    ChunkOutOfRange { index: usize, len: usize },

    /// Word index outside the addressed chunk
    #[error("Word {index} out of range in chunk {chunk} ({len} words)")]
    WordOutOfRange {
        chunk: usize,
        index: usize,
        len: usize,
    },

    /// Word range whose start lies after its end
    #[error("Invalid word range: start {start} > end {end}")]
    InvalidRange { start: usize, end: usize },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

impl CoreError {
    /// Create configuration error from message
    pub fn config<T: core::fmt::Display>(message: T) -> Self {
        Self::Config(message.to_string())
    }
}
