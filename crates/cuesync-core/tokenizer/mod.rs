//! Word tokenizer for transcript chunks
//!
//! Splits a chunk's display text into an ordered, lossless sequence of
//! segments: word runs, whitespace runs, and single punctuation characters.
//! Concatenating the segment texts in order reproduces the input exactly,
//! which lets a renderer wrap highlight spans around word runs and re-emit
//! everything else untouched.
//!
//! # Example
//!
//! ```rust
//! use cuesync_core::tokenizer::{tokenize, SegmentKind};
//!
//! let segments = tokenize("L'été, déjà!");
//! let words: Vec<_> = segments
//!     .iter()
//!     .filter_map(|s| s.canonical.as_deref())
//!     .collect();
//!
//! assert_eq!(words, vec!["lete", "deja"]);
//! assert_eq!(segments[1].kind, SegmentKind::Punctuation);
//! ```

pub mod scanner;
pub mod tokens;

pub use scanner::{CharClass, RunScanner};
pub use tokens::{Segment, SegmentKind};

use crate::utils::canonical_word;

/// Streaming word tokenizer with zero-copy spans
#[derive(Debug, Clone)]
pub struct WordTokenizer<'a> {
    /// Run scanner over the source
    scanner: RunScanner<'a>,
}

impl<'a> WordTokenizer<'a> {
    /// Create new tokenizer for source text
    #[must_use]
    pub const fn new(source: &'a str) -> Self {
        Self {
            scanner: RunScanner::new(source),
        }
    }

    /// Get next segment, `None` at end of input
    pub fn next_segment(&mut self) -> Option<Segment<'a>> {
        let (class, span, offset) = self.scanner.next_run()?;

        let segment = match class {
            CharClass::Word => {
                let canonical = canonical_word(span);
                if canonical.is_empty() {
                    // A lone apostrophe carries nothing to compare against
                    Segment::separator(SegmentKind::Punctuation, span, offset)
                } else {
                    Segment::word(span, offset, canonical)
                }
            }
            CharClass::Whitespace => Segment::separator(SegmentKind::Whitespace, span, offset),
            CharClass::Other => Segment::separator(SegmentKind::Punctuation, span, offset),
        };

        Some(segment)
    }
}

impl<'a> Iterator for WordTokenizer<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_segment()
    }
}

/// Tokenize a chunk's display text into segments
#[must_use]
pub fn tokenize(text: &str) -> Vec<Segment<'_>> {
    WordTokenizer::new(text).collect()
}
