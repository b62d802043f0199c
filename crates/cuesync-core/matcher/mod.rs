//! Cue matching against a chunk index
//!
//! Given a raw caption cue, finds the transcript chunk it most likely refers
//! to and, inside it, the range of words to highlight. Matching never fails:
//! an empty cue or a cue sharing nothing with the transcript yields `None`,
//! which callers treat as "clear the highlight".
//!
//! # Example
//!
//! ```rust
//! use cuesync_core::{matcher::CueMatcher, ChunkIndex, WordRange};
//! use std::rc::Rc;
//!
//! let index = Rc::new(ChunkIndex::build("Energy transition requires systemic change."));
//! let mut matcher = CueMatcher::new(index);
//!
//! let result = matcher.match_cue("energy transiton requires").unwrap();
//! assert_eq!(result.chunk_index, 0);
//! assert_eq!(result.word_range, Some(WordRange::new(0, 2)));
//! assert_eq!(matcher.last_cue(), Some("energy transiton requires"));
//! ```

pub mod range;
pub mod scoring;

pub use range::{locate_word_range, RangeTier, WordRange};
pub use scoring::{score_chunk, ChunkScore, ScoringWeights};

use crate::{
    chunker::ChunkIndex,
    tokenizer::WordTokenizer,
    utils::{canonical_words, canonicalize},
    Result,
};
use std::rc::Rc;
use tracing::debug;

/// Chunk and word range a cue refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchResult {
    /// Index of the matched chunk
    pub chunk_index: usize,
    /// Words to highlight, `None` highlights the whole chunk
    pub word_range: Option<WordRange>,
}

impl MatchResult {
    /// Result highlighting a whole chunk
    #[must_use]
    pub const fn whole_chunk(chunk_index: usize) -> Self {
        Self {
            chunk_index,
            word_range: None,
        }
    }

    /// Result highlighting a word range
    #[must_use]
    pub const fn with_range(chunk_index: usize, range: WordRange) -> Self {
        Self {
            chunk_index,
            word_range: Some(range),
        }
    }
}

/// Match result with the diagnostics that produced it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchDetails {
    /// The match itself
    pub result: MatchResult,
    /// Winning chunk score
    pub score: ChunkScore,
    /// Tier that located the word range
    pub tier: RangeTier,
}

/// Match a cue with the default scoring weights
#[must_use]
pub fn match_cue(cue: &str, index: &ChunkIndex) -> Option<MatchResult> {
    match_cue_with(cue, index, &ScoringWeights::default())
}

/// Match a cue with explicit scoring weights
#[must_use]
pub fn match_cue_with(
    cue: &str,
    index: &ChunkIndex,
    weights: &ScoringWeights,
) -> Option<MatchResult> {
    explain_cue(cue, index, weights).map(|details| details.result)
}

/// Match a cue and report the winning score and range tier
#[must_use]
pub fn explain_cue(
    cue: &str,
    index: &ChunkIndex,
    weights: &ScoringWeights,
) -> Option<MatchDetails> {
    let canonical = canonicalize(cue);
    if canonical.is_empty() {
        return None;
    }
    let cue_words: Vec<&str> = canonical_words(&canonical).collect();

    let mut best: Option<(usize, ChunkScore)> = None;
    for (chunk, terms) in index.iter_with_terms() {
        let score = score_chunk(chunk, terms, &canonical, &cue_words, weights);
        if score.is_exact() {
            best = Some((chunk.index, score));
            break;
        }
        match best {
            Some((_, current)) if score.value() <= current.value() => {}
            _ => best = Some((chunk.index, score)),
        }
    }

    let (chunk_index, score) = best.filter(|(_, score)| score.value() > 0.0)?;
    let chunk = index.get(chunk_index)?;
    let chunk_words: Vec<&str> = chunk.word_canonicals().collect();
    // Same word boundaries as the chunk, so "c'est" stays one word
    let cue_terms: Vec<String> = WordTokenizer::new(cue)
        .filter_map(|segment| segment.canonical)
        .collect();
    let cue_terms: Vec<&str> = cue_terms.iter().map(String::as_str).collect();
    let (word_range, tier) = locate_word_range(&chunk_words, &cue_terms);

    Some(MatchDetails {
        result: MatchResult {
            chunk_index,
            word_range,
        },
        score,
        tier,
    })
}

/// Cue matcher bound to the current transcript
///
/// Remembers the last raw cue it saw, whatever the outcome, so the cue can
/// be replayed against a rebuilt index after a language or record switch.
#[derive(Debug, Clone)]
pub struct CueMatcher {
    /// Current chunk index, replaced wholesale on rebuild
    index: Rc<ChunkIndex>,
    /// Scoring weights
    weights: ScoringWeights,
    /// Last raw cue received
    last_cue: Option<String>,
}

impl CueMatcher {
    /// Create a matcher with default weights
    #[must_use]
    pub fn new(index: Rc<ChunkIndex>) -> Self {
        Self {
            index,
            weights: ScoringWeights::default(),
            last_cue: None,
        }
    }

    /// Create a matcher with validated weights
    ///
    /// # Errors
    ///
    /// Returns a configuration error if any weight is invalid.
    pub fn with_weights(index: Rc<ChunkIndex>, weights: ScoringWeights) -> Result<Self> {
        weights.validate()?;
        Ok(Self {
            index,
            weights,
            last_cue: None,
        })
    }

    /// Match a cue against the current index and remember it
    pub fn match_cue(&mut self, cue: &str) -> Option<MatchResult> {
        self.last_cue = Some(cue.to_string());
        let details = explain_cue(cue, &self.index, &self.weights);
        match &details {
            Some(details) => debug!(
                chunk = details.result.chunk_index,
                score = details.score.value(),
                tier = ?details.tier,
                "cue matched"
            ),
            None => debug!(cue_len = cue.len(), "cue cleared highlight"),
        }
        details.map(|details| details.result)
    }

    /// Swap in a rebuilt index, keeping the last cue
    pub fn replace_index(&mut self, index: Rc<ChunkIndex>) {
        debug!(chunks = index.len(), "chunk index replaced");
        self.index = index;
    }

    /// Re-match the last cue against the current index
    ///
    /// Returns `None` without touching state when there is no non-empty cue
    /// to replay.
    pub fn replay(&mut self) -> Option<Option<MatchResult>> {
        let cue = self.replayable_cue()?.to_string();
        Some(self.match_cue(&cue))
    }

    /// Current chunk index
    #[must_use]
    pub fn index(&self) -> &Rc<ChunkIndex> {
        &self.index
    }

    /// Scoring weights in use
    #[must_use]
    pub const fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Last raw cue received, including empty ones
    #[must_use]
    pub fn last_cue(&self) -> Option<&str> {
        self.last_cue.as_deref()
    }

    /// Last cue if it is worth replaying
    #[must_use]
    pub fn replayable_cue(&self) -> Option<&str> {
        self.last_cue().filter(|cue| !canonicalize(cue).is_empty())
    }

    /// Remember a cue without matching it
    ///
    /// Used while a rebuild is pending; the next `replay` applies it.
    pub fn remember(&mut self, cue: &str) {
        self.last_cue = Some(cue.to_string());
    }

    /// Forget the last cue
    pub fn reset(&mut self) {
        self.last_cue = None;
    }
}

#[cfg(test)]
mod tests;
