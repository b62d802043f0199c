//! Transcript markup and exports
//!
//! HTML markup mirrors what a surface renders: one paragraph per chunk and
//! one span per word, carrying the indices the highlight renderer targets.

use crate::config::NO_TRANSCRIPT_PLACEHOLDER;
use core::fmt::Write;
use cuesync_core::{ChunkIndex, SegmentKind};

/// Longest file name stem produced by [`export_file_name`]
pub const MAX_FILE_NAME_CHARS: usize = 120;

const FILE_NAME_RESERVED: &[char] = &['/', ':', '*', '?', '"', '<', '>', '|'];

/// Plain-text download of a transcript
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptExport {
    /// Suggested file name including extension
    pub file_name: String,
    /// File contents
    pub contents: String,
}

/// Escape text for HTML element and attribute content
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Render a transcript as HTML paragraphs with word spans
///
/// An empty index renders the placeholder paragraph.
///
/// # Example
///
/// ```rust
/// use cuesync_core::ChunkIndex;
/// use cuesync_panel::markup::transcript_html;
///
/// let html = transcript_html(&ChunkIndex::build("Hi <there>."), None);
/// assert_eq!(
///     html,
///     "<p class=\"chunk\" data-chunk=\"0\"><span class=\"word\" data-word=\"0\">Hi</span> \
///      &lt;<span class=\"word\" data-word=\"1\">there</span>&gt;.</p>"
/// );
/// ```
#[must_use]
pub fn transcript_html(index: &ChunkIndex, placeholder: Option<&str>) -> String {
    if index.is_empty() {
        return format!(
            "<p class=\"placeholder\">{}</p>",
            escape_html(placeholder.unwrap_or(NO_TRANSCRIPT_PLACEHOLDER))
        );
    }

    let mut html = String::new();
    for chunk in index.chunks() {
        let _ = write!(html, "<p class=\"chunk\" data-chunk=\"{}\">", chunk.index);
        for segment in &chunk.segments {
            let text = escape_html(chunk.segment_text(segment));
            match (segment.kind, segment.word) {
                (SegmentKind::Word, Some(word)) => {
                    let _ = write!(html, "<span class=\"word\" data-word=\"{word}\">{text}</span>");
                }
                _ => html.push_str(&text),
            }
        }
        html.push_str("</p>");
    }
    html
}

/// Plain text of a transcript, chunks separated by blank lines
#[must_use]
pub fn transcript_plain_text(index: &ChunkIndex) -> String {
    index
        .chunks()
        .iter()
        .map(|chunk| chunk.text.as_str())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// File name stem safe on common file systems
///
/// Runs of reserved characters become a single `_`; the result is cut to
/// [`MAX_FILE_NAME_CHARS`] characters. An empty title yields `Transcript`.
#[must_use]
pub fn export_file_name(title: &str) -> String {
    let title = title.trim();
    let title = if title.is_empty() { "Transcript" } else { title };

    let mut out = String::with_capacity(title.len());
    let mut in_reserved = false;
    for ch in title.chars() {
        if FILE_NAME_RESERVED.contains(&ch) {
            if !in_reserved {
                out.push('_');
            }
            in_reserved = true;
        } else {
            out.push(ch);
            in_reserved = false;
        }
    }
    out.chars().take(MAX_FILE_NAME_CHARS).collect()
}

/// Build the plain-text download for a titled transcript
#[must_use]
pub fn export_text(title: &str, index: &ChunkIndex) -> TranscriptExport {
    TranscriptExport {
        file_name: format!("{}.txt", export_file_name(title)),
        contents: transcript_plain_text(index),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn escapes_all_specials() {
        assert_eq!(
            escape_html(r#"a & b < c > "d" 'e'"#),
            "a &amp; b &lt; c &gt; &quot;d&quot; &#39;e&#39;"
        );
    }

    #[test]
    fn html_carries_chunk_and_word_indices() {
        let index = ChunkIndex::build("One two.\n\nThree.");
        let html = transcript_html(&index, None);
        assert_eq!(
            html,
            concat!(
                "<p class=\"chunk\" data-chunk=\"0\">",
                "<span class=\"word\" data-word=\"0\">One</span> ",
                "<span class=\"word\" data-word=\"1\">two</span>.</p>",
                "<p class=\"chunk\" data-chunk=\"1\">",
                "<span class=\"word\" data-word=\"0\">Three</span>.</p>",
            )
        );
    }

    #[test]
    fn empty_transcript_renders_placeholder() {
        let index = ChunkIndex::empty();
        assert_eq!(
            transcript_html(&index, None),
            "<p class=\"placeholder\">No transcript available.</p>"
        );
        assert_eq!(
            transcript_html(&index, Some("Rien <ici>")),
            "<p class=\"placeholder\">Rien &lt;ici&gt;</p>"
        );
    }

    #[test]
    fn plain_text_joins_chunks() {
        let index = ChunkIndex::build("First one. Second one.");
        assert_eq!(transcript_plain_text(&index), "First one.\n\nSecond one.");
        assert_eq!(transcript_plain_text(&ChunkIndex::empty()), "");
    }

    #[test]
    fn file_names_are_sanitized() {
        assert_eq!(export_file_name("Energy: a/b?"), "Energy_ a_b_");
        assert_eq!(export_file_name("x<>|y"), "x_y");
        assert_eq!(export_file_name("   "), "Transcript");

        let long = "é".repeat(200);
        assert_eq!(export_file_name(&long).chars().count(), MAX_FILE_NAME_CHARS);
    }

    #[test]
    fn text_export() {
        let export = export_text("Care — Ada", &ChunkIndex::build("Hello."));
        assert_eq!(export.file_name, "Care — Ada.txt");
        assert_eq!(export.contents, "Hello.");
    }
}
