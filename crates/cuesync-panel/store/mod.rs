//! Transcript store: per-language transcripts of a record
//!
//! A record carries its transcripts in `Transcript` (the default text) and
//! `Transcript <language>` columns, e.g. `Transcript FR` or
//! `Transcript_english`. [`TranscriptSet`] collects them once per record and
//! resolves a language hint to the text to display.
//!
//! # Example
//!
//! ```rust
//! use cuesync_panel::store::{Record, TranscriptSet};
//!
//! let record = Record::from_pairs([
//!     ("Transcript", "Hello world."),
//!     ("Transcript French", "Bonjour le monde."),
//! ]);
//! let set = TranscriptSet::from_record(&record);
//!
//! let resolved = set.resolve("fr");
//! assert_eq!(resolved.text, "Bonjour le monde.");
//! assert_eq!(resolved.language.as_deref(), Some("fr"));
//!
//! // Unknown languages fall back to the default column
//! assert_eq!(set.resolve("ja").language.as_deref(), Some("default"));
//! ```

pub mod lang;
pub mod record;
pub mod srt;
pub mod subtitles;

pub use lang::{canonical_lang_code, language_label, normalize_language_code, normalize_token};
pub use record::Record;
pub use srt::{is_srt_like, normalize_transcript_text, srt_to_plain_text};
pub use subtitles::{parse_subtitle_list, SubtitleOption};

use tracing::debug;

/// Key of the plain `Transcript` column
pub const DEFAULT_KEY: &str = "default";

/// Columns that may hold the subtitle list, in priority order
pub const SUBTITLE_COLUMNS: &[&str] = &[
    "Subtitles",
    "Subtitle",
    "Subtitle languages",
    "Subtitles languages",
    "Captions",
];

const TRANSCRIPT_PREFIX: &str = "transcript";

/// Transcript text chosen for a language hint
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedTranscript {
    /// Transcript text, empty when the record has none
    pub text: String,
    /// Language key the text came from, `"default"` for the plain column
    pub language: Option<String>,
}

impl ResolvedTranscript {
    /// Check if there is nothing to show
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Language as a comparable code, `None` for default or missing
    #[must_use]
    pub fn language_code(&self) -> Option<String> {
        self.language
            .as_deref()
            .map(canonical_lang_code)
            .filter(|code| !code.is_empty())
    }
}

/// Transcripts and subtitle options of one record
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranscriptSet {
    /// `(key, text)` in column order, keys unique
    transcripts: Vec<(String, String)>,
    /// Selectable subtitle languages
    subtitles: Vec<SubtitleOption>,
}

impl TranscriptSet {
    /// Collect transcript columns and subtitle options from a record
    #[must_use]
    pub fn from_record(record: &Record) -> Self {
        let mut transcripts: Vec<(String, String)> = Vec::new();

        for (column, value) in record.cells() {
            let column = column.trim();
            let Some(key) = transcript_key(column) else {
                continue;
            };
            let text = normalize_transcript_text(value);
            if text.is_empty() || is_url(&text) {
                continue;
            }
            if transcripts.iter().any(|(existing, _)| *existing == key) {
                continue;
            }
            transcripts.push((key, text));
        }

        let mut subtitles = record
            .first_of(SUBTITLE_COLUMNS)
            .map(parse_subtitle_list)
            .unwrap_or_default();
        let mut seen: Vec<String> = subtitles
            .iter()
            .map(|option| {
                let code = normalize_language_code(&option.code);
                if code.is_empty() {
                    normalize_language_code(&option.label)
                } else {
                    code
                }
            })
            .collect();
        for (key, _) in &transcripts {
            let code = normalize_language_code(key);
            if !code.is_empty() && !seen.contains(&code) {
                subtitles.push(SubtitleOption::from_code(&code));
                seen.push(code);
            }
        }

        debug!(
            transcripts = transcripts.len(),
            subtitles = subtitles.len(),
            "transcript set built"
        );
        Self {
            transcripts,
            subtitles,
        }
    }

    /// Resolve a language hint to a transcript
    ///
    /// Order: exact key for the normalized hint, a key that normalizes to
    /// the hint, the default column, the first column in record order.
    #[must_use]
    pub fn resolve(&self, hint: &str) -> ResolvedTranscript {
        let pref = normalize_language_code(hint);

        if !pref.is_empty() {
            if let Some(text) = self.text_for(&pref) {
                return ResolvedTranscript {
                    text: text.to_string(),
                    language: Some(pref),
                };
            }
            if let Some((_, text)) = self
                .transcripts
                .iter()
                .find(|(key, _)| normalize_language_code(key) == pref)
            {
                return ResolvedTranscript {
                    text: text.clone(),
                    language: Some(pref),
                };
            }
        }

        if let Some(text) = self.text_for(DEFAULT_KEY) {
            return ResolvedTranscript {
                text: text.to_string(),
                language: Some(DEFAULT_KEY.to_string()),
            };
        }

        match self.transcripts.first() {
            Some((key, text)) => {
                let code = normalize_language_code(key);
                ResolvedTranscript {
                    text: text.clone(),
                    language: Some(if code.is_empty() { key.clone() } else { code }),
                }
            }
            None => ResolvedTranscript::default(),
        }
    }

    /// Check if a transcript exists for a language
    #[must_use]
    pub fn has_language(&self, language: &str) -> bool {
        let code = normalize_language_code(language);
        !code.is_empty()
            && self
                .transcripts
                .iter()
                .any(|(key, _)| *key == code || normalize_language_code(key) == code)
    }

    /// Language codes with a transcript, default included
    #[must_use]
    pub fn languages(&self) -> Vec<String> {
        let mut languages: Vec<String> = Vec::new();
        for (key, _) in &self.transcripts {
            let code = normalize_language_code(key);
            let code = if code.is_empty() { key.clone() } else { code };
            if !languages.contains(&code) {
                languages.push(code);
            }
        }
        languages
    }

    /// Selectable subtitle languages
    #[must_use]
    pub fn subtitle_options(&self) -> &[SubtitleOption] {
        &self.subtitles
    }

    /// Check if the record has no transcript at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.transcripts.is_empty()
    }

    fn text_for(&self, key: &str) -> Option<&str> {
        self.transcripts
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, text)| text.as_str())
    }
}

/// Store key for a transcript column, `None` for other columns
fn transcript_key(column: &str) -> Option<String> {
    let lower = column.to_lowercase();
    if !lower.starts_with(TRANSCRIPT_PREFIX) {
        return None;
    }
    if lower == TRANSCRIPT_PREFIX {
        return Some(DEFAULT_KEY.to_string());
    }

    let suffix = column
        .get(TRANSCRIPT_PREFIX.len()..)?
        .trim_start_matches([' ', '.', '_', ':', '-'])
        .trim();
    if suffix.is_empty() {
        return None;
    }

    let code = normalize_language_code(suffix);
    if !code.is_empty() {
        return Some(code);
    }
    let token = normalize_token(suffix);
    if token.is_empty() {
        Some(suffix.to_lowercase())
    } else {
        Some(token)
    }
}

fn is_url(text: &str) -> bool {
    let head = text.get(..8).unwrap_or(text).to_ascii_lowercase();
    head.starts_with("http://") || head.starts_with("https://")
}
