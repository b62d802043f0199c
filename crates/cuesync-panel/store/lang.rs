//! Language code normalization
//!
//! Column suffixes, subtitle lists, player tracks and stored preferences all
//! spell languages differently ("FR", "fra", "French", "fr-CA"). Everything
//! is reduced to a short lowercase code before comparison.

use cuesync_core::canonical_word;

/// Known spellings per language code
const ALIASES: &[(&str, &[&str])] = &[
    ("en", &["en", "eng", "english", "anglais", "anglaise"]),
    ("fr", &["fr", "fra", "fre", "french", "francais", "francophone"]),
    ("de", &["de", "ger", "deu", "german", "deutsch"]),
    ("es", &["es", "spa", "spanish", "espanol"]),
    ("it", &["it", "ita", "italian", "italiano"]),
    ("pl", &["pl", "pol", "polish", "polski", "polskie"]),
    ("pt", &["pt", "por", "portuguese", "portugues"]),
    ("nl", &["nl", "dut", "nld", "dutch", "nederlands"]),
];

/// Display labels for the aliased codes
const LABELS: &[(&str, &str)] = &[
    ("en", "English"),
    ("fr", "Français"),
    ("de", "Deutsch"),
    ("es", "Español"),
    ("it", "Italiano"),
    ("pl", "Polski"),
    ("pt", "Português"),
    ("nl", "Nederlands"),
];

/// Lowercase ASCII alphanumeric token, accents folded
///
/// `"Français"` becomes `"francais"`, `"pt-BR"` becomes `"ptbr"`.
#[must_use]
pub fn normalize_token(value: &str) -> String {
    canonical_word(value)
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect()
}

/// Normalize a language spelling to its code
///
/// Known aliases map to their two-letter code; any other token of two or
/// three characters is taken as a code verbatim. Everything else yields an
/// empty string.
///
/// # Example
///
/// ```rust
/// use cuesync_panel::store::normalize_language_code;
///
/// assert_eq!(normalize_language_code("French"), "fr");
/// assert_eq!(normalize_language_code(" ENG "), "en");
/// assert_eq!(normalize_language_code("ja"), "ja");
/// assert_eq!(normalize_language_code("Klingon"), "");
/// ```
#[must_use]
pub fn normalize_language_code(value: &str) -> String {
    let token = normalize_token(value);
    if token.is_empty() {
        return String::new();
    }
    if let Some((code, _)) = ALIASES
        .iter()
        .find(|(_, aliases)| aliases.contains(&token.as_str()))
    {
        return (*code).to_string();
    }
    if (2..=3).contains(&token.len()) {
        return token;
    }
    String::new()
}

/// Code used for comparisons, `""` for missing or `"default"`
///
/// Unlike [`normalize_language_code`] an unknown spelling is kept lowercase
/// rather than dropped, so an exotic track language still compares equal to
/// itself.
#[must_use]
pub fn canonical_lang_code(value: &str) -> String {
    let raw = value.trim().to_lowercase();
    if raw.is_empty() || raw == "default" {
        return String::new();
    }
    let normalized = normalize_language_code(&raw);
    if normalized.is_empty() {
        raw
    } else {
        normalized
    }
}

/// Human-readable label for a language code
///
/// Falls back to `fallback` when given, otherwise to the uppercased code.
#[must_use]
pub fn language_label(code: &str, fallback: &str) -> String {
    if code.is_empty() {
        return fallback.to_string();
    }
    let normalized = normalize_language_code(code);
    let key = if normalized.is_empty() {
        code.to_lowercase()
    } else {
        normalized
    };
    if let Some((_, label)) = LABELS.iter().find(|(code, _)| *code == key) {
        return (*label).to_string();
    }
    if fallback.is_empty() {
        key.to_uppercase()
    } else {
        fallback.to_string()
    }
}
