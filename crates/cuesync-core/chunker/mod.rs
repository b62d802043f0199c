//! Transcript chunking and chunk index construction
//!
//! A chunk is the unit a reader perceives as one cohesive piece of a
//! transcript: a paragraph when the transcript has blank-line structure, a
//! sentence otherwise. The chunk index built from a transcript is immutable;
//! a record or language change builds a new one rather than patching the old.
//!
//! The sentence heuristic splits after `.`, `!` or `?` followed by
//! whitespace and an uppercase letter or digit. Abbreviations such as
//! "Dr. Smith" are split too; that is a known limitation of the heuristic.

use crate::{
    tokenizer::{SegmentKind, WordTokenizer},
    utils::{canonicalize, canonical_words, normalize_line_endings, word_set_from, WordSet},
    CoreError, Result,
};
use core::ops::Range;

/// Split a transcript into ordered, non-empty chunk strings
///
/// # Example
///
/// ```rust
/// use cuesync_core::split_into_chunks;
///
/// let chunks = split_into_chunks("First one. Second one! third stays.");
/// assert_eq!(chunks, vec!["First one.", "Second one! third stays."]);
/// ```
#[must_use]
pub fn split_into_chunks(text: &str) -> Vec<String> {
    let normalized = normalize_line_endings(text);
    let normalized = normalized.trim();

    let parts = if normalized.contains("\n\n") {
        split_paragraphs(normalized)
    } else {
        split_sentences(normalized)
    };

    parts
        .into_iter()
        .map(collapse_newlines)
        .filter(|chunk| !chunk.is_empty())
        .collect()
}

/// Split on runs of two or more newlines
fn split_paragraphs(text: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let bytes = text.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'\n' && bytes.get(i + 1) == Some(&b'\n') {
            let mut end = i;
            while end < bytes.len() && bytes[end] == b'\n' {
                end += 1;
            }
            parts.push(&text[start..i]);
            start = end;
            i = end;
        } else {
            i += 1;
        }
    }
    parts.push(&text[start..]);
    parts
}

/// Split after sentence punctuation followed by whitespace and a capital or digit
fn split_sentences(text: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((idx, ch)) = chars.next() {
        if !matches!(ch, '.' | '!' | '?') {
            continue;
        }

        let gap_start = idx + ch.len_utf8();
        let mut gap_end = gap_start;
        while let Some(&(next_idx, next)) = chars.peek() {
            if !next.is_whitespace() {
                break;
            }
            gap_end = next_idx + next.len_utf8();
            chars.next();
        }

        if gap_end == gap_start {
            continue;
        }
        if let Some(&(_, next)) = chars.peek() {
            if starts_sentence(next) {
                parts.push(&text[start..gap_start]);
                start = gap_end;
            }
        }
    }

    parts.push(&text[start..]);
    parts
}

/// Uppercase ASCII, uppercase Latin-1 (`À-Ö`, `Ø-Ý`) or ASCII digit
const fn starts_sentence(ch: char) -> bool {
    ch.is_ascii_uppercase()
        || ch.is_ascii_digit()
        || matches!(ch, '\u{00C0}'..='\u{00D6}' | '\u{00D8}'..='\u{00DD}')
}

/// Collapse newline runs to single spaces and trim
fn collapse_newlines(part: &str) -> String {
    let mut out = String::with_capacity(part.len());
    let mut in_newlines = false;
    for ch in part.chars() {
        if ch == '\n' {
            if !in_newlines {
                out.push(' ');
            }
            in_newlines = true;
        } else {
            in_newlines = false;
            out.push(ch);
        }
    }
    out.trim().to_string()
}

/// A word of a chunk
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Word {
    /// Index within the chunk (0-based, contiguous)
    pub index: usize,
    /// Display substring
    pub text: String,
    /// Canonical form without internal whitespace, never empty
    pub canonical: String,
}

/// A tokenizer segment stored as a byte range of the chunk text
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SegmentSpan {
    /// Segment kind
    pub kind: SegmentKind,
    /// Byte range in the chunk's display text
    pub range: Range<usize>,
    /// Word index for word segments
    pub word: Option<usize>,
}

/// An ordered unit of a transcript
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TranscriptChunk {
    /// Position in the transcript (0-based, contiguous)
    pub index: usize,
    /// Display text
    pub text: String,
    /// Canonical form of the whole chunk
    pub canonical: String,
    /// Number of words in the canonical form
    pub term_count: usize,
    /// Word tokens in order
    pub words: Vec<Word>,
    /// All tokenizer segments in order
    pub segments: Vec<SegmentSpan>,
}

impl TranscriptChunk {
    /// Build a chunk from display text
    #[must_use]
    pub fn new(index: usize, text: String) -> Self {
        let canonical = canonicalize(&text);
        let term_count = canonical_words(&canonical).count();

        let mut words = Vec::new();
        let mut segments = Vec::new();
        for segment in WordTokenizer::new(&text) {
            let word = segment.canonical.map(|canonical| {
                let word_index = words.len();
                words.push(Word {
                    index: word_index,
                    text: segment.text.to_string(),
                    canonical,
                });
                word_index
            });
            segments.push(SegmentSpan {
                kind: segment.kind,
                range: segment.offset..segment.offset + segment.text.len(),
                word,
            });
        }

        Self {
            index,
            text,
            canonical,
            term_count,
            words,
            segments,
        }
    }

    /// Check if the chunk has no word tokens
    #[must_use]
    pub fn is_non_lexical(&self) -> bool {
        self.words.is_empty()
    }

    /// Display text of a segment
    #[must_use]
    pub fn segment_text(&self, segment: &SegmentSpan) -> &str {
        &self.text[segment.range.clone()]
    }

    /// Canonical word forms in order
    pub fn word_canonicals(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(|word| word.canonical.as_str())
    }
}

/// Immutable index of the chunks of one transcript
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ChunkIndex {
    /// Chunks in transcript order
    chunks: Vec<TranscriptChunk>,
    /// Canonical term set per chunk, parallel to `chunks`
    #[cfg_attr(feature = "serde", serde(skip))]
    term_sets: Vec<WordSet>,
}

impl ChunkIndex {
    /// Chunk and tokenize a transcript
    #[must_use]
    pub fn build(text: &str) -> Self {
        Self::from_chunks(split_into_chunks(text))
    }

    /// Build from already-split chunk strings
    ///
    /// Chunks that are empty after trimming are dropped so indices stay
    /// contiguous.
    pub fn from_chunks<I, S>(chunks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let chunks: Vec<TranscriptChunk> = chunks
            .into_iter()
            .map(Into::into)
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
            .enumerate()
            .map(|(index, text)| TranscriptChunk::new(index, text))
            .collect();

        let term_sets = chunks
            .iter()
            .map(|chunk| word_set_from(canonical_words(&chunk.canonical)))
            .collect();

        Self { chunks, term_sets }
    }

    /// Empty index (no transcript)
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of chunks
    #[must_use]
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Check if the transcript produced no chunks
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// All chunks in order
    #[must_use]
    pub fn chunks(&self) -> &[TranscriptChunk] {
        &self.chunks
    }

    /// Chunk by index, `None` when out of range
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&TranscriptChunk> {
        self.chunks.get(index)
    }

    /// Chunk by index
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::ChunkOutOfRange`] for indices past the end.
    pub fn chunk(&self, index: usize) -> Result<&TranscriptChunk> {
        self.chunks.get(index).ok_or(CoreError::ChunkOutOfRange {
            index,
            len: self.chunks.len(),
        })
    }

    /// Word of a chunk
    ///
    /// # Errors
    ///
    /// Returns an out-of-range error when either coordinate is stale.
    pub fn word(&self, chunk: usize, word: usize) -> Result<&Word> {
        let owner = self.chunk(chunk)?;
        owner.words.get(word).ok_or(CoreError::WordOutOfRange {
            chunk,
            index: word,
            len: owner.words.len(),
        })
    }

    /// Canonical term set of a chunk
    #[must_use]
    pub fn term_set(&self, index: usize) -> Option<&WordSet> {
        self.term_sets.get(index)
    }

    /// Total number of word tokens
    #[must_use]
    pub fn word_count(&self) -> usize {
        self.chunks.iter().map(|chunk| chunk.words.len()).sum()
    }

    /// Iterate chunks with their term sets
    pub(crate) fn iter_with_terms(&self) -> impl Iterator<Item = (&TranscriptChunk, &WordSet)> {
        self.chunks.iter().zip(self.term_sets.iter())
    }
}
