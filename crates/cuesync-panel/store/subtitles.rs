//! Subtitle language lists carried by a record
//!
//! A record lists the caption languages its video offers in a free-form
//! cell. Accepted shapes:
//!
//! - a JSON array of codes or `{ "code": .., "label": .., "url": .. }` objects
//! - a JSON object keyed by code, valued by label or option object
//! - a `,`, `;`, `|` or newline separated list of `code`, `code:label` or
//!   `label=code` tokens, optionally carrying a URL

use super::lang::{language_label, normalize_language_code, normalize_token};
use regex::Regex;
use serde_json::Value;
use std::{collections::HashSet, sync::OnceLock};

/// A selectable subtitle language
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SubtitleOption {
    /// Normalized language code, may be a rough token for unknown languages
    pub code: String,
    /// Display label
    pub label: String,
    /// Optional subtitle file URL
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "String::is_empty"))]
    pub url: String,
}

impl SubtitleOption {
    /// Option for a code with its default label
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        Self {
            code: code.to_string(),
            label: language_label(code, ""),
            url: String::new(),
        }
    }
}

fn url_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"(?i)https?://[\w\-./?&=%+#]+").ok())
        .as_ref()
}

fn caption_words_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"(?i)\b(subtitles?|captions?)\b").ok())
        .as_ref()
}

/// Parse a subtitle list cell, deduplicated by code
#[must_use]
pub fn parse_subtitle_list(raw: &str) -> Vec<SubtitleOption> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    if trimmed.starts_with('[') || trimmed.starts_with('{') {
        if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
            if let Some(options) = options_from_json(&value) {
                return dedupe(options);
            }
        }
    }

    let options = trimmed
        .split([',', ';', '|', '\n'])
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(option_from_token)
        .collect();
    dedupe(options)
}

fn string_field<'a>(object: &'a serde_json::Map<String, Value>, keys: &[&str]) -> &'a str {
    keys.iter()
        .find_map(|key| object.get(*key).and_then(Value::as_str))
        .map_or("", str::trim)
}

fn option_from_object(
    object: &serde_json::Map<String, Value>,
    fallback_code: &str,
) -> SubtitleOption {
    let raw_code = match string_field(object, &["code", "lang", "language", "id", "slug"]) {
        "" => fallback_code,
        found => found,
    };
    let code = normalize_language_code(raw_code);
    let label = match string_field(object, &["label", "title", "name"]) {
        "" => language_label(&code, raw_code),
        found => found.to_string(),
    };
    SubtitleOption {
        code,
        label,
        url: string_field(object, &["url", "href", "src"]).to_string(),
    }
}

fn options_from_json(value: &Value) -> Option<Vec<SubtitleOption>> {
    match value {
        Value::Array(entries) => Some(
            entries
                .iter()
                .filter_map(|entry| match entry {
                    Value::String(text) => {
                        let code = normalize_language_code(text);
                        Some(SubtitleOption {
                            label: language_label(&code, text.trim()),
                            code,
                            url: String::new(),
                        })
                    }
                    Value::Object(object) => Some(option_from_object(object, "")),
                    _ => None,
                })
                .collect(),
        ),
        Value::Object(map) => Some(
            map.iter()
                .map(|(key, entry)| match entry {
                    Value::String(label) => {
                        let code = normalize_language_code(key);
                        SubtitleOption {
                            label: language_label(&code, label.trim()),
                            code,
                            url: String::new(),
                        }
                    }
                    Value::Object(object) => {
                        let mut option = option_from_object(object, key);
                        if option.code.is_empty() {
                            option.code = normalize_language_code(key);
                        }
                        option
                    }
                    _ => {
                        let code = normalize_language_code(key);
                        SubtitleOption {
                            label: language_label(&code, key),
                            code,
                            url: String::new(),
                        }
                    }
                })
                .collect(),
        ),
        _ => None,
    }
}

/// Parse one list token
fn option_from_token(token: &str) -> SubtitleOption {
    let mut working = token.to_string();
    let mut url = String::new();
    if let Some(found) = url_pattern().and_then(|re| re.find(token)) {
        url = found.as_str().to_string();
        working = working.replacen(found.as_str(), "", 1).trim().to_string();
    }

    let mut code = String::new();
    let mut label = String::new();

    if let Some(split) = working.find(['=', ':']) {
        let left = working[..split].trim();
        let right = working[split + 1..].trim();
        let left_code = normalize_language_code(left);
        let right_code = normalize_language_code(right);

        (code, label) = match (left_code.is_empty(), right_code.is_empty()) {
            (false, _) => (left_code, right.to_string()),
            (true, false) => (right_code, left.to_string()),
            (true, true) => {
                let right_token = normalize_token(right);
                if right_token.is_empty() {
                    (normalize_token(left), right.to_string())
                } else {
                    (right_token, left.to_string())
                }
            }
        };
    }

    if code.is_empty() {
        code = normalize_language_code(&working);
    }

    if label.is_empty() {
        let is_bare_code = (2..=3).contains(&working.len())
            && working.chars().all(|ch| ch.is_ascii_alphabetic());
        label = if is_bare_code || working.is_empty() {
            language_label(&code, &working)
        } else {
            working.clone()
        };
    }

    if code.is_empty() && !label.is_empty() {
        let cleaned = caption_words_pattern()
            .map_or_else(|| label.clone(), |re| re.replace_all(&label, "").into_owned());
        code = normalize_language_code(cleaned.trim());
        if code.is_empty() {
            code = normalize_token(&label);
        }
    }

    SubtitleOption {
        code,
        label: label.trim().to_string(),
        url,
    }
}

/// Drop repeated codes, first occurrence wins
fn dedupe(options: Vec<SubtitleOption>) -> Vec<SubtitleOption> {
    let mut seen = HashSet::new();
    let mut result = Vec::with_capacity(options.len());

    for option in options {
        let mut key = normalize_language_code(&option.code);
        if key.is_empty() {
            key = normalize_token(&option.code);
        }
        if key.is_empty() {
            key = normalize_language_code(&option.label);
        }
        if key.is_empty() {
            key = normalize_token(&option.label);
        }

        let label = match option.label.trim() {
            "" => language_label(&key, ""),
            found => found.to_string(),
        };
        let dedupe_key = if key.is_empty() {
            label.to_lowercase()
        } else {
            key.clone()
        };
        if dedupe_key.is_empty() || !seen.insert(dedupe_key) {
            continue;
        }
        result.push(SubtitleOption {
            code: key,
            label,
            url: option.url.trim().to_string(),
        });
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn codes(options: &[SubtitleOption]) -> Vec<&str> {
        options.iter().map(|o| o.code.as_str()).collect()
    }

    #[test]
    fn plain_list() {
        let options = parse_subtitle_list("EN, fr; German | es");
        assert_eq!(codes(&options), vec!["en", "fr", "de", "es"]);
        assert_eq!(options[0].label, "English");
        assert_eq!(options[2].label, "German");
    }

    #[test]
    fn code_label_pairs() {
        let options = parse_subtitle_list("fr:Version française, Polnisch=pl");
        assert_eq!(codes(&options), vec!["fr", "pl"]);
        assert_eq!(options[0].label, "Version française");
        assert_eq!(options[1].label, "Polnisch");
    }

    #[test]
    fn tokens_with_urls() {
        let options = parse_subtitle_list("en https://example.org/subs/en.vtt");
        assert_eq!(options.len(), 1);
        assert_eq!(options[0].code, "en");
        assert_eq!(options[0].url, "https://example.org/subs/en.vtt");
    }

    #[test]
    fn unknown_language_keeps_rough_token() {
        let options = parse_subtitle_list("Klingon subtitles");
        assert_eq!(options[0].code, "klingonsubtitles");
        assert_eq!(options[0].label, "Klingon subtitles");

        let options = parse_subtitle_list("French captions");
        assert_eq!(options[0].code, "fr");
    }

    #[test]
    fn json_array() {
        let options = parse_subtitle_list(
            r#"["en", {"lang": "fra", "label": "Français (FR)", "url": "https://x.org/fr.vtt"}, 3]"#,
        );
        assert_eq!(codes(&options), vec!["en", "fr"]);
        assert_eq!(options[1].label, "Français (FR)");
        assert_eq!(options[1].url, "https://x.org/fr.vtt");
    }

    #[test]
    fn json_object() {
        let options = parse_subtitle_list(r#"{"de": "Deutsch", "english": {"title": "EN"}}"#);
        assert_eq!(codes(&options), vec!["de", "en"]);
        assert_eq!(options[1].label, "EN");
    }

    #[test]
    fn invalid_json_falls_back_to_tokens() {
        let options = parse_subtitle_list("[en, fr");
        assert_eq!(codes(&options), vec!["en", "fr"]);
    }

    #[test]
    fn duplicates_are_dropped() {
        let options = parse_subtitle_list("en, English, eng:English (US), fr");
        assert_eq!(codes(&options), vec!["en", "fr"]);
    }

    #[test]
    fn empty_cell() {
        assert!(parse_subtitle_list("  ").is_empty());
        assert!(parse_subtitle_list(",,;").is_empty());
    }
}
