//! # cuesync core
//!
//! Text engine for keeping a transcript panel in step with a video player's
//! live captions. The player emits short caption snippets ("cues") that rarely
//! match the stored transcript verbatim; this crate splits transcripts into
//! chunks, tokenizes chunks into words, and finds the chunk and word range a
//! cue most likely refers to.
//!
//! ## Features
//!
//! - **Chunking**: paragraph split on blank lines, sentence heuristic otherwise
//! - **Lossless tokenization**: word, whitespace and punctuation segments that
//!   concatenate back to the original text
//! - **Canonical forms**: accent-stripped, lowercased comparison keys
//! - **Tolerant matching**: exact, substring and term-overlap scoring with a
//!   three-tier word-range fallback
//!
//! ## Quick Start
//!
//! ```rust
//! use cuesync_core::{match_cue, ChunkIndex, WordRange};
//!
//! let index = ChunkIndex::build("The quick brown fox jumps.\n\nOver the lazy dog.");
//! let result = match_cue("quick brown fox", &index).expect("cue should match");
//!
//! assert_eq!(result.chunk_index, 0);
//! assert_eq!(result.word_range, Some(WordRange::new(1, 3)));
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(unsafe_code)]

pub mod chunker;
pub mod matcher;
pub mod tokenizer;
pub mod utils;

pub use chunker::{split_into_chunks, ChunkIndex, TranscriptChunk, Word};
pub use matcher::{
    explain_cue, match_cue, match_cue_with, CueMatcher, MatchDetails, MatchResult, RangeTier,
    ScoringWeights, WordRange,
};
pub use tokenizer::{tokenize, Segment, SegmentKind, WordTokenizer};
pub use utils::{canonicalize, canonical_word, CoreError};

/// Result type for fallible core operations
pub type Result<T> = core::result::Result<T, CoreError>;

/// Crate version for runtime compatibility checks
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
