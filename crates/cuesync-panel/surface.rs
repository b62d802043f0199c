//! Rendering surface abstraction
//!
//! The panel never touches a UI toolkit directly. A host implements
//! [`PanelSurface`] over whatever it draws with; [`MemorySurface`] keeps the
//! same state in memory for tests and headless replay.

use cuesync_core::{ChunkIndex, WordRange};
use std::collections::BTreeSet;

/// Region the surface should bring into view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollTarget {
    /// Chunk to reveal
    pub chunk_index: usize,
    /// First highlighted word, `None` to reveal the chunk itself
    pub word_index: Option<usize>,
}

/// Operations the panel performs on its rendering surface
pub trait PanelSurface {
    /// Replace the rendered transcript
    fn render_transcript(&mut self, index: &ChunkIndex, language: Option<&str>);

    /// Replace the rendered transcript with a placeholder message
    fn render_placeholder(&mut self, message: &str);

    /// Set the panel title
    fn set_title(&mut self, title: &str);

    /// Remove every active marker
    fn clear_active(&mut self);

    /// Mark a chunk active
    fn mark_chunk_active(&mut self, chunk_index: usize);

    /// Mark a range of words in a chunk active
    fn mark_words_active(&mut self, chunk_index: usize, range: WordRange);

    /// Bring a region into view
    fn scroll_into_view(&mut self, target: ScrollTarget);

    /// Set the absolute scroll offset
    fn set_scroll_offset(&mut self, offset: f64);

    /// Scrollable height: content height minus visible height
    fn scrollable_height(&self) -> f64;
}

/// In-memory surface recording everything the panel asked for
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemorySurface {
    /// Number of chunks rendered
    pub chunk_count: usize,
    /// Language attribute of the rendered transcript
    pub language: Option<String>,
    /// Placeholder currently shown
    pub placeholder: Option<String>,
    /// Title currently shown
    pub title: String,
    /// Active chunks
    pub active_chunks: BTreeSet<usize>,
    /// Active words as `(chunk, word)`
    pub active_words: BTreeSet<(usize, usize)>,
    /// Scroll requests in order
    pub scroll_requests: Vec<ScrollTarget>,
    /// Current scroll offset
    pub scroll_offset: f64,
    /// Scrollable height reported to the panel
    pub height: f64,
    /// Number of transcript renders
    pub renders: usize,
}

impl MemorySurface {
    /// Surface with no scrollable area
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Surface reporting a scrollable height
    #[must_use]
    pub fn with_height(height: f64) -> Self {
        Self {
            height,
            ..Self::default()
        }
    }

    /// Check if any marker is active
    #[must_use]
    pub fn has_active(&self) -> bool {
        !self.active_chunks.is_empty() || !self.active_words.is_empty()
    }

    /// Active word indices of one chunk in order
    #[must_use]
    pub fn active_words_in(&self, chunk_index: usize) -> Vec<usize> {
        self.active_words
            .iter()
            .filter(|(chunk, _)| *chunk == chunk_index)
            .map(|(_, word)| *word)
            .collect()
    }
}

impl PanelSurface for MemorySurface {
    fn render_transcript(&mut self, index: &ChunkIndex, language: Option<&str>) {
        self.chunk_count = index.len();
        self.language = language.map(str::to_string);
        self.placeholder = None;
        self.active_chunks.clear();
        self.active_words.clear();
        self.scroll_offset = 0.0;
        self.renders += 1;
    }

    fn render_placeholder(&mut self, message: &str) {
        self.chunk_count = 0;
        self.language = None;
        self.placeholder = Some(message.to_string());
        self.active_chunks.clear();
        self.active_words.clear();
        self.scroll_offset = 0.0;
        self.renders += 1;
    }

    fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    fn clear_active(&mut self) {
        self.active_chunks.clear();
        self.active_words.clear();
    }

    fn mark_chunk_active(&mut self, chunk_index: usize) {
        self.active_chunks.insert(chunk_index);
    }

    fn mark_words_active(&mut self, chunk_index: usize, range: WordRange) {
        self.active_words
            .extend((range.start..=range.end).map(|word| (chunk_index, word)));
    }

    fn scroll_into_view(&mut self, target: ScrollTarget) {
        self.scroll_requests.push(target);
    }

    fn set_scroll_offset(&mut self, offset: f64) {
        self.scroll_offset = offset;
    }

    fn scrollable_height(&self) -> f64 {
        self.height
    }
}
