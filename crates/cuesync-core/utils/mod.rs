//! Utility functions and shared types for cuesync core
//!
//! Contains the canonical-form normalization shared by the chunker, the
//! tokenizer and the matcher, the error type, and hashing helpers.

pub mod errors;
pub mod hashers;
pub mod normalize;

pub use errors::CoreError;
pub use hashers::{create_word_set, word_set_from, WordSet};
pub use normalize::{canonical_word, canonical_words, canonicalize, normalize_line_endings};
