//! Chunk scoring against a canonical cue

use crate::{chunker::TranscriptChunk, utils::WordSet, CoreError, Result};

/// Weights of the chunk scoring heuristic
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ScoringWeights {
    /// Score of an exact canonical match
    pub exact: f64,
    /// Bonus when the chunk contains the whole cue
    pub chunk_contains_cue: f64,
    /// Bonus when the cue contains the whole chunk
    pub cue_contains_chunk: f64,
    /// Flat bonus per cue word found in the chunk
    pub per_shared_word: f64,
    /// Scale of the shared-words / cue-words ratio
    pub cue_coverage: f64,
    /// Scale of the shared-words / chunk-words ratio
    pub chunk_coverage: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            exact: 1000.0,
            chunk_contains_cue: 400.0,
            cue_contains_chunk: 350.0,
            per_shared_word: 25.0,
            cue_coverage: 120.0,
            chunk_coverage: 80.0,
        }
    }
}

impl ScoringWeights {
    /// Check that every weight is finite and non-negative
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Config`] naming the first offending weight.
    pub fn validate(&self) -> Result<()> {
        let named = [
            ("exact", self.exact),
            ("chunk_contains_cue", self.chunk_contains_cue),
            ("cue_contains_chunk", self.cue_contains_chunk),
            ("per_shared_word", self.per_shared_word),
            ("cue_coverage", self.cue_coverage),
            ("chunk_coverage", self.chunk_coverage),
        ];
        for (name, value) in named {
            if !value.is_finite() || value < 0.0 {
                return Err(CoreError::config(format!(
                    "weight '{name}' must be finite and non-negative, got {value}"
                )));
            }
        }
        if self.exact <= 0.0 {
            return Err(CoreError::config("weight 'exact' must be positive"));
        }
        Ok(())
    }
}

/// Score of one chunk against a cue
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChunkScore {
    /// Canonical forms are identical
    Exact(f64),
    /// Accumulated substring and overlap score
    Partial(f64),
}

impl ChunkScore {
    /// Numeric value of the score
    #[must_use]
    pub const fn value(self) -> f64 {
        match self {
            Self::Exact(value) | Self::Partial(value) => value,
        }
    }

    /// Whether this is an exact match
    #[must_use]
    pub const fn is_exact(self) -> bool {
        matches!(self, Self::Exact(_))
    }
}

/// Score a chunk against a canonical cue and its words
#[must_use]
pub fn score_chunk(
    chunk: &TranscriptChunk,
    terms: &WordSet,
    cue: &str,
    cue_words: &[&str],
    weights: &ScoringWeights,
) -> ChunkScore {
    if chunk.canonical == cue {
        return ChunkScore::Exact(weights.exact);
    }

    let mut score = 0.0;
    if chunk.canonical.contains(cue) {
        score += weights.chunk_contains_cue;
    }
    if !chunk.canonical.is_empty() && cue.contains(chunk.canonical.as_str()) {
        score += weights.cue_contains_chunk;
    }

    if !cue_words.is_empty() && chunk.term_count > 0 {
        let shared = cue_words.iter().filter(|word| terms.contains(**word)).count();
        if shared > 0 {
            let shared_f = shared as f64;
            score += weights.per_shared_word * shared_f;
            score += shared_f / cue_words.len() as f64 * weights.cue_coverage;
            score += shared_f / chunk.term_count as f64 * weights.chunk_coverage;
        }
    }

    ChunkScore::Partial(score)
}
