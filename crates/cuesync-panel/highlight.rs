//! Highlight renderer
//!
//! Applies match results to a surface. Every application starts from a
//! clean slate, so applying the same result twice leaves the surface in the
//! same state as applying it once.

use crate::surface::{PanelSurface, ScrollTarget};
use cuesync_core::MatchResult;

/// Outcome of applying a match result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighlightChange {
    /// Highlight now shows this result
    Highlighted(MatchResult),
    /// Highlight removed
    Cleared,
}

/// Tracks and renders the current highlight
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HighlightRenderer {
    /// Result currently shown
    current: Option<MatchResult>,
    /// Chunk highlighted last, `None` is the no-selection sentinel
    last_chunk: Option<usize>,
}

impl HighlightRenderer {
    /// Renderer with nothing highlighted
    #[must_use]
    pub const fn new() -> Self {
        Self {
            current: None,
            last_chunk: None,
        }
    }

    /// Apply a match result to the surface
    ///
    /// Scroll-into-view is requested unless `autoscrolling` is set; a
    /// running autoscroll owns the scroll position.
    pub fn apply<S: PanelSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        result: Option<&MatchResult>,
        autoscrolling: bool,
    ) -> HighlightChange {
        surface.clear_active();

        let Some(result) = result else {
            self.current = None;
            self.last_chunk = None;
            return HighlightChange::Cleared;
        };

        if let Some(range) = result.word_range {
            surface.mark_words_active(result.chunk_index, range);
        }
        surface.mark_chunk_active(result.chunk_index);

        if !autoscrolling {
            surface.scroll_into_view(ScrollTarget {
                chunk_index: result.chunk_index,
                word_index: result.word_range.map(|range| range.start),
            });
        }

        self.current = Some(*result);
        self.last_chunk = Some(result.chunk_index);
        HighlightChange::Highlighted(*result)
    }

    /// Remove the highlight
    pub fn clear<S: PanelSurface + ?Sized>(&mut self, surface: &mut S) -> HighlightChange {
        self.apply(surface, None, false)
    }

    /// Forget state after the surface was re-rendered
    pub fn reset(&mut self) {
        self.current = None;
        self.last_chunk = None;
    }

    /// Result currently shown
    #[must_use]
    pub const fn current(&self) -> Option<&MatchResult> {
        self.current.as_ref()
    }

    /// Chunk highlighted last
    #[must_use]
    pub const fn last_chunk(&self) -> Option<usize> {
        self.last_chunk
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::MemorySurface;
    use cuesync_core::WordRange;
    use proptest::prelude::*;

    #[test]
    fn word_range_marks_words_and_chunk() {
        let mut surface = MemorySurface::new();
        let mut renderer = HighlightRenderer::new();
        let result = MatchResult::with_range(2, WordRange::new(1, 3));

        let change = renderer.apply(&mut surface, Some(&result), false);

        assert_eq!(change, HighlightChange::Highlighted(result));
        assert_eq!(surface.active_words_in(2), vec![1, 2, 3]);
        assert!(surface.active_chunks.contains(&2));
        assert_eq!(
            surface.scroll_requests,
            vec![ScrollTarget {
                chunk_index: 2,
                word_index: Some(1)
            }]
        );
        assert_eq!(renderer.last_chunk(), Some(2));
    }

    #[test]
    fn whole_chunk_without_range() {
        let mut surface = MemorySurface::new();
        let mut renderer = HighlightRenderer::new();
        renderer.apply(&mut surface, Some(&MatchResult::whole_chunk(0)), false);
        assert!(surface.active_words.is_empty());
        assert_eq!(surface.active_chunks.len(), 1);
        assert_eq!(surface.scroll_requests[0].word_index, None);
    }

    #[test]
    fn previous_markers_are_cleared() {
        let mut surface = MemorySurface::new();
        let mut renderer = HighlightRenderer::new();
        let first = MatchResult::with_range(0, WordRange::new(0, 4));
        let second = MatchResult::with_range(1, WordRange::single(0));
        renderer.apply(&mut surface, Some(&first), false);
        renderer.apply(&mut surface, Some(&second), false);
        assert!(surface.active_words_in(0).is_empty());
        assert_eq!(surface.active_chunks.iter().copied().collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn none_clears_and_resets_sentinel() {
        let mut surface = MemorySurface::new();
        let mut renderer = HighlightRenderer::new();
        renderer.apply(&mut surface, Some(&MatchResult::whole_chunk(3)), false);
        assert_eq!(renderer.apply(&mut surface, None, false), HighlightChange::Cleared);
        assert!(!surface.has_active());
        assert_eq!(renderer.last_chunk(), None);
        assert_eq!(renderer.current(), None);
    }

    #[test]
    fn autoscroll_suppresses_scroll_requests() {
        let mut surface = MemorySurface::new();
        let mut renderer = HighlightRenderer::new();
        renderer.apply(&mut surface, Some(&MatchResult::whole_chunk(1)), true);
        assert!(surface.scroll_requests.is_empty());
        assert!(surface.has_active());
    }

    proptest! {
        #[test]
        fn applying_twice_equals_applying_once(
            chunk in 0usize..20,
            start in 0usize..10,
            len in 0usize..5,
            with_range in any::<bool>(),
        ) {
            let result = if with_range {
                MatchResult::with_range(chunk, WordRange::new(start, start + len))
            } else {
                MatchResult::whole_chunk(chunk)
            };

            let mut once = MemorySurface::new();
            HighlightRenderer::new().apply(&mut once, Some(&result), true);

            let mut twice = MemorySurface::new();
            let mut renderer = HighlightRenderer::new();
            renderer.apply(&mut twice, Some(&result), true);
            renderer.apply(&mut twice, Some(&result), true);

            prop_assert_eq!(once, twice);
        }
    }
}
