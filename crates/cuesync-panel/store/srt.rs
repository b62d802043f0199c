//! SRT-like transcript cells
//!
//! Some records paste a subtitle file straight into the transcript column.
//! Those cells are flattened to plain text: index lines and timing lines are
//! dropped and the cue lines joined with single spaces.

use regex::Regex;
use std::sync::OnceLock;

/// `HH:MM:SS` anywhere in a line
fn timestamp_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"\d{2}:\d{2}:\d{2}").ok())
        .as_ref()
}

/// Line holding only a cue number
fn index_line_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"(?m)^\d+\s*$").ok())
        .as_ref()
}

fn has_timestamp(text: &str) -> bool {
    timestamp_pattern().is_some_and(|re| re.is_match(text))
}

/// Check if a cell looks like subtitle-file content
#[must_use]
pub fn is_srt_like(text: &str) -> bool {
    let sample = text.trim();
    if sample.is_empty() {
        return false;
    }
    if sample.contains("-->") {
        return true;
    }
    index_line_pattern().is_some_and(|re| re.is_match(sample)) && has_timestamp(sample)
}

/// Flatten subtitle-file content to a single line of text
///
/// # Example
///
/// ```rust
/// use cuesync_panel::store::srt_to_plain_text;
///
/// let srt = "1\n00:00:01,000 --> 00:00:02,500\nHello there.\n\n2\n00:00:03,000 --> 00:00:04,000\nGeneral  Kenobi.";
/// assert_eq!(srt_to_plain_text(srt), "Hello there. General Kenobi.");
/// ```
#[must_use]
pub fn srt_to_plain_text(srt: &str) -> String {
    let normalized = srt.replace("\r\n", "\n").replace('\r', "\n");
    let mut blocks = Vec::new();

    for block in normalized.trim().split("\n\n") {
        let lines: Vec<&str> = block
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .filter(|line| !line.bytes().all(|b| b.is_ascii_digit()))
            .filter(|line| !has_timestamp(line))
            .collect();
        if !lines.is_empty() {
            blocks.push(lines.join(" "));
        }
    }

    blocks
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Clean a raw transcript cell
///
/// Subtitle-file content is flattened; anything else only gets its line
/// endings unified and is trimmed.
#[must_use]
pub fn normalize_transcript_text(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    if is_srt_like(trimmed) {
        return srt_to_plain_text(trimmed);
    }
    trimmed.replace("\r\n", "\n").replace('\r', "\n")
}
