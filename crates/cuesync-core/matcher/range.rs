//! Word range location inside a matched chunk
//!
//! Captions drop, merge and misspell words, so the range search degrades
//! through tiers: exact window, sequential partial match, set overlap. When
//! none applies the whole chunk is highlighted.

use crate::{utils::word_set_from, CoreError, Result};

/// Inclusive range of word indices within one chunk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WordRange {
    /// First word index
    pub start: usize,
    /// Last word index (inclusive)
    pub end: usize,
}

impl WordRange {
    /// Create a range, swapping reversed bounds
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self {
                start: end,
                end: start,
            }
        }
    }

    /// Create a range, rejecting reversed bounds
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidRange`] if `start > end`.
    pub const fn try_new(start: usize, end: usize) -> Result<Self> {
        if start > end {
            return Err(CoreError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Range covering a single word
    #[must_use]
    pub const fn single(index: usize) -> Self {
        Self {
            start: index,
            end: index,
        }
    }

    /// Number of words covered
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end - self.start + 1
    }

    /// Always false; a range covers at least one word
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Check if a word index lies inside the range
    #[must_use]
    pub const fn contains(&self, index: usize) -> bool {
        index >= self.start && index <= self.end
    }

    /// Clamp both bounds to `0..word_count`, `None` for a chunk without words
    #[must_use]
    pub fn clamp_to(self, word_count: usize) -> Option<Self> {
        let last = word_count.checked_sub(1)?;
        Some(Self::new(self.start.min(last), self.end.min(last)))
    }
}

impl core::fmt::Display for WordRange {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}..={}", self.start, self.end)
    }
}

/// Which tier produced a word range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RangeTier {
    /// Cue words appear contiguously in the chunk
    Exact,
    /// Cue words appear in order, with gaps on either side
    Sequential,
    /// Span of chunk words present anywhere in the cue
    Overlap,
    /// No usable word correspondence
    WholeChunk,
}

/// Locate the words of `cue_words` inside `chunk_words`
///
/// Both slices hold canonical word forms. The returned range is already
/// clamped to the chunk.
#[must_use]
pub fn locate_word_range(
    chunk_words: &[&str],
    cue_words: &[&str],
) -> (Option<WordRange>, RangeTier) {
    if chunk_words.is_empty() || cue_words.is_empty() {
        return (None, RangeTier::WholeChunk);
    }

    let found = exact_window(chunk_words, cue_words)
        .map(|range| (range, RangeTier::Exact))
        .or_else(|| sequential(chunk_words, cue_words).map(|range| (range, RangeTier::Sequential)))
        .or_else(|| overlap(chunk_words, cue_words).map(|range| (range, RangeTier::Overlap)));

    match found {
        Some((range, tier)) => (range.clamp_to(chunk_words.len()), tier),
        None => (None, RangeTier::WholeChunk),
    }
}

/// First contiguous window equal to the cue
fn exact_window(chunk_words: &[&str], cue_words: &[&str]) -> Option<WordRange> {
    if cue_words.len() > chunk_words.len() {
        return None;
    }
    chunk_words
        .windows(cue_words.len())
        .position(|window| window == cue_words)
        .map(|start| WordRange::new(start, start + cue_words.len() - 1))
}

/// In-order partial match tolerating skipped words on both sides
fn sequential(chunk_words: &[&str], cue_words: &[&str]) -> Option<WordRange> {
    let mut cursor = 0;
    let mut first = None;
    let mut last = 0;

    for (index, word) in chunk_words.iter().enumerate() {
        if cursor >= cue_words.len() {
            break;
        }
        if let Some(offset) = cue_words[cursor..].iter().position(|cue| cue == word) {
            first.get_or_insert(index);
            last = index;
            cursor += offset + 1;
        }
    }

    first.map(|start| WordRange::new(start, last))
}

/// Span of chunk words that occur anywhere in the cue
fn overlap(chunk_words: &[&str], cue_words: &[&str]) -> Option<WordRange> {
    let cue_set = word_set_from(cue_words.iter().copied());
    let mut hits = chunk_words
        .iter()
        .enumerate()
        .filter(|(_, word)| cue_set.contains(**word))
        .map(|(index, _)| index);

    let start = hits.next()?;
    let end = hits.last().unwrap_or(start);
    Some(WordRange::new(start, end))
}
