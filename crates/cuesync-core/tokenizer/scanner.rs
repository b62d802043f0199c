//! Character classification and run scanning for the word tokenizer

use unicode_normalization::char::is_combining_mark;

/// Apostrophe-like marks that stay inside a word run
const APOSTROPHES: [char; 4] = ['\'', '\u{2019}', '\u{2018}', '\u{02BC}'];

/// Lexical class of a single character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    /// Part of a word run
    Word,
    /// Part of a whitespace run
    Whitespace,
    /// Standalone punctuation or symbol
    Other,
}

impl CharClass {
    /// Classify a character
    #[must_use]
    pub fn of(ch: char) -> Self {
        if ch.is_alphanumeric() || is_combining_mark(ch) || APOSTROPHES.contains(&ch) {
            Self::Word
        } else if ch.is_whitespace() {
            Self::Whitespace
        } else {
            Self::Other
        }
    }

    /// Whether consecutive characters of this class form one run
    #[must_use]
    pub const fn is_run(self) -> bool {
        !matches!(self, Self::Other)
    }
}

/// Byte-position scanner over source text
#[derive(Debug, Clone)]
pub struct RunScanner<'a> {
    /// Source text being scanned
    source: &'a str,
    /// Current byte position in source
    position: usize,
}

impl<'a> RunScanner<'a> {
    /// Create a scanner at the start of `source`
    #[must_use]
    pub const fn new(source: &'a str) -> Self {
        Self {
            source,
            position: 0,
        }
    }

    /// Consume the next maximal run, returning its class and span
    ///
    /// Word and whitespace runs extend while the class holds; any other
    /// character forms a run of its own.
    pub fn next_run(&mut self) -> Option<(CharClass, &'a str, usize)> {
        let rest = &self.source[self.position..];
        let mut chars = rest.char_indices();
        let (_, first) = chars.next()?;
        let class = CharClass::of(first);

        let mut end = first.len_utf8();
        if class.is_run() {
            for (idx, ch) in chars {
                if CharClass::of(ch) != class {
                    break;
                }
                end = idx + ch.len_utf8();
            }
        }

        let start = self.position;
        self.position += end;
        Some((class, &rest[..end], start))
    }
}
