//! Canonical text forms used for fuzzy comparison
//!
//! Transcript text and live captions come from different transcription
//! passes, so they are compared through a canonical form: Unicode NFD with
//! combining marks removed, lowercased, every run of non-alphanumeric
//! characters collapsed to a single space, trimmed.

use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

/// Canonical form of a chunk or cue
///
/// # Example
///
/// ```rust
/// use cuesync_core::canonicalize;
///
/// assert_eq!(canonicalize("  Énergie — c'est TOUT!  "), "energie c est tout");
/// ```
#[must_use]
pub fn canonicalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;

    for ch in folded_chars(text) {
        if ch.is_alphanumeric() {
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;
            out.push(ch);
        } else {
            pending_space = true;
        }
    }

    out
}

/// Canonical form of a single word: same folding, no separators at all
///
/// `"l'été"` becomes `"lete"`. Returns an empty string for runs without any
/// alphanumeric character.
#[must_use]
pub fn canonical_word(text: &str) -> String {
    folded_chars(text).filter(|ch| ch.is_alphanumeric()).collect()
}

/// Split a canonical string into its words
pub fn canonical_words(canonical: &str) -> impl Iterator<Item = &str> {
    canonical.split(' ').filter(|word| !word.is_empty())
}

/// Normalize `\r\n` and lone `\r` to `\n`
#[must_use]
pub fn normalize_line_endings(text: &str) -> String {
    // Replace \r\n first, then \r to avoid double conversion
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// Decompose, drop combining marks, lowercase
fn folded_chars(text: &str) -> impl Iterator<Item = char> + '_ {
    text.nfd()
        .filter(|ch| !is_combining_mark(*ch))
        .flat_map(char::to_lowercase)
        .filter(|ch| !is_combining_mark(*ch))
}
