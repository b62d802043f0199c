//! Panel session
//!
//! `PanelSession` owns everything one transcript panel needs: the chunk
//! index of the active transcript, the cue matcher, the highlight renderer,
//! the autoscroll driver and the event channel. It replaces page-global
//! state with an explicit object the host drives:
//!
//! - `open_record` / `begin_load` + `commit_load` when the record changes
//! - `on_cue_change` whenever the player's active cue changes
//! - `set_language_override` / `set_active_subtitle` on language changes
//! - `start_autoscroll`, `set_speed`, `on_frame` for the reading mode
//!
//! Loads carry a sequence number; committing a ticket older than the latest
//! one is a no-op, so a slow load can never overwrite a newer one.

use crate::{
    autoscroll::{AutoscrollDriver, FrameOutcome},
    config::{PanelConfig, Preferences},
    events::{EventChannel, PanelEvent},
    highlight::{HighlightChange, HighlightRenderer},
    markup::{self, TranscriptExport},
    player::{apply_preferred_track, media_duration, CaptionPlayer},
    store::{canonical_lang_code, Record, TranscriptSet},
    surface::PanelSurface,
    Result,
};
use cuesync_core::{ChunkIndex, CueMatcher, MatchResult};
use std::rc::Rc;
use tracing::{debug, warn};

/// Lifecycle state of a panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelState {
    /// No record loaded
    Idle,
    /// Transcript shown, nothing highlighted
    Ready,
    /// Transcript shown with an active highlight
    Highlighted,
    /// A load has begun and not been committed yet
    Rebuilding,
}

/// Token identifying one transcript load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LoadTicket {
    sequence: u64,
}

impl LoadTicket {
    /// Sequence number of the load
    #[must_use]
    pub const fn sequence(self) -> u64 {
        self.sequence
    }
}

/// Counters of what a session did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionStats {
    /// Cues received
    pub cues_received: usize,
    /// Cues that produced a highlight
    pub highlights: usize,
    /// Cues that cleared the highlight
    pub clears: usize,
    /// Transcript rebuilds committed
    pub rebuilds: usize,
    /// Loads discarded as stale
    pub loads_superseded: usize,
}

/// One transcript panel bound to a rendering surface
pub struct PanelSession<S: PanelSurface> {
    config: PanelConfig,
    surface: S,
    matcher: CueMatcher,
    highlight: HighlightRenderer,
    autoscroll: AutoscrollDriver,
    events: EventChannel,
    state: PanelState,
    record: Option<Record>,
    transcripts: TranscriptSet,
    transcript_language: Option<String>,
    preferences: Preferences,
    /// Language chosen explicitly for this panel, canonical code
    language_override: String,
    /// Language of the caption track enabled on the player, canonical code
    active_subtitle: String,
    latest_load: u64,
    stats: SessionStats,
}

impl<S: PanelSurface> PanelSession<S> {
    /// Create a session with default configuration
    #[must_use]
    pub fn new(surface: S) -> Self {
        let config = PanelConfig::default();
        Self {
            matcher: CueMatcher::new(Rc::new(ChunkIndex::empty())),
            autoscroll: AutoscrollDriver::with_config(config.autoscroll),
            events: EventChannel::with_config(config.events.clone()),
            config,
            surface,
            highlight: HighlightRenderer::new(),
            state: PanelState::Idle,
            record: None,
            transcripts: TranscriptSet::default(),
            transcript_language: None,
            preferences: Preferences::default(),
            language_override: String::new(),
            active_subtitle: String::new(),
            latest_load: 0,
            stats: SessionStats::default(),
        }
    }

    /// Create a session with validated configuration
    pub fn with_config(surface: S, config: PanelConfig) -> Result<Self> {
        config.validate()?;
        let mut session = Self::new(surface);
        session.matcher = CueMatcher::with_weights(Rc::new(ChunkIndex::empty()), config.weights)?;
        session.autoscroll = AutoscrollDriver::with_config(config.autoscroll);
        session.events = EventChannel::with_config(config.events.clone());
        session.config = config;
        Ok(session)
    }

    /// Use stored preferences
    #[must_use]
    pub fn with_preferences(mut self, preferences: Preferences) -> Self {
        self.preferences = preferences;
        self
    }

    /// Start a transcript load, superseding any pending one
    ///
    /// Cancels a running autoscroll; the panel stays in `Rebuilding` until
    /// the ticket is committed.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.latest_load += 1;
        self.cancel_autoscroll();
        self.state = PanelState::Rebuilding;
        debug!(sequence = self.latest_load, "transcript load started");
        LoadTicket {
            sequence: self.latest_load,
        }
    }

    /// Check if a ticket is still the newest load
    #[must_use]
    pub const fn is_current(&self, ticket: LoadTicket) -> bool {
        ticket.sequence == self.latest_load
    }

    /// Commit a load for a record
    ///
    /// Returns `false` and changes nothing when the ticket was superseded.
    pub fn commit_load(&mut self, ticket: LoadTicket, record: Record) -> bool {
        if !self.is_current(ticket) {
            debug!(
                sequence = ticket.sequence,
                latest = self.latest_load,
                "stale transcript load discarded"
            );
            self.stats.loads_superseded += 1;
            self.emit(PanelEvent::LoadSuperseded {
                sequence: ticket.sequence,
                latest: self.latest_load,
            });
            return false;
        }

        self.transcripts = TranscriptSet::from_record(&record);
        self.record = Some(record);
        self.rebuild();
        true
    }

    /// Load a record in one step
    pub fn open_record(&mut self, record: Record) {
        let ticket = self.begin_load();
        self.commit_load(ticket, record);
    }

    /// Language hint used to pick a transcript
    ///
    /// Explicit override, then the active subtitle language, then the
    /// stored preference.
    #[must_use]
    pub fn language_hint(&self) -> String {
        if !self.language_override.is_empty() {
            return self.language_override.clone();
        }
        if !self.active_subtitle.is_empty() {
            return self.active_subtitle.clone();
        }
        self.preferences.language_code()
    }

    /// Override the transcript language for this panel
    ///
    /// An empty language removes the override. Rebuilds the transcript when
    /// the effective hint changes.
    pub fn set_language_override(&mut self, language: &str) {
        let code = canonical_lang_code(language);
        self.change_language(|session| session.language_override = code);
    }

    /// Record the caption language enabled on the player
    pub fn set_active_subtitle(&mut self, language: &str) {
        let code = canonical_lang_code(language);
        self.change_language(|session| session.active_subtitle = code);
    }

    /// Replace the stored preferences
    ///
    /// Disabling autoscroll cancels a running animation; a changed language
    /// preference rebuilds the transcript.
    pub fn set_preferences(&mut self, preferences: Preferences) {
        if !preferences.autoscroll {
            self.cancel_autoscroll();
        }
        self.change_language(|session| session.preferences = preferences);
    }

    fn change_language(&mut self, update: impl FnOnce(&mut Self)) {
        let before = self.language_hint();
        update(self);
        let after = self.language_hint();
        if before == after {
            return;
        }

        debug!(from = %before, to = %after, "panel language changed");
        self.emit(PanelEvent::LanguageChanged {
            from: before,
            to: after,
        });
        if let Some(record) = self.record.clone() {
            let ticket = self.begin_load();
            self.commit_load(ticket, record);
        }
    }

    /// Enable the best caption track on the player and follow its language
    ///
    /// Returns the active caption language, empty when none could be
    /// enabled. An explicit override that the player could not satisfy
    /// stays in effect for the transcript.
    pub async fn sync_caption_track<P: CaptionPlayer + ?Sized>(&mut self, player: &P) -> String {
        let preferred = if self.language_override.is_empty() {
            self.preferences.language.clone()
        } else {
            self.language_override.clone()
        };

        let mut code = apply_preferred_track(player, &preferred, &self.config.track_retry).await;
        if code.is_empty() && !self.language_override.is_empty() {
            code.clone_from(&self.language_override);
        }
        self.set_active_subtitle(&code);
        code
    }

    /// Handle a change of the player's active cue
    ///
    /// Empty or unmatched cues clear the highlight. While a load is pending
    /// the cue is only remembered; committing the load replays it against
    /// the new transcript.
    pub fn on_cue_change(&mut self, cue: &str) -> Option<MatchResult> {
        self.stats.cues_received += 1;
        if self.state == PanelState::Rebuilding {
            debug!(sequence = self.latest_load, "cue deferred until load commits");
            self.matcher.remember(cue);
            return None;
        }
        let result = self.matcher.match_cue(cue);
        self.show(result.as_ref());
        result
    }

    fn show(&mut self, result: Option<&MatchResult>) {
        let change = self
            .highlight
            .apply(&mut self.surface, result, self.autoscroll.is_active());

        let event = match change {
            HighlightChange::Highlighted(result) => {
                self.stats.highlights += 1;
                PanelEvent::HighlightChanged {
                    chunk_index: result.chunk_index,
                    word_range: result.word_range,
                }
            }
            HighlightChange::Cleared => {
                self.stats.clears += 1;
                PanelEvent::HighlightCleared
            }
        };

        if self.state != PanelState::Idle && self.state != PanelState::Rebuilding {
            self.state = if self.highlight.current().is_some() {
                PanelState::Highlighted
            } else {
                PanelState::Ready
            };
        }
        self.emit(event);
    }

    /// Build the index for the current record and hint, then replay the last cue
    fn rebuild(&mut self) {
        let resolved = self.transcripts.resolve(&self.language_hint());
        let index = Rc::new(ChunkIndex::build(&resolved.text));

        let title = self.record.as_ref().map(Record::title).unwrap_or_default();
        self.surface.set_title(&title);
        if index.is_empty() {
            self.surface.render_placeholder(&self.config.placeholder);
        } else {
            self.surface
                .render_transcript(&index, resolved.language_code().as_deref());
        }
        self.highlight.reset();

        let (chunks, words) = (index.len(), index.word_count());
        self.matcher.replace_index(index);
        self.transcript_language.clone_from(&resolved.language);
        self.stats.rebuilds += 1;
        self.state = PanelState::Ready;
        debug!(
            language = ?resolved.language,
            chunks,
            words,
            "transcript rebuilt"
        );
        self.emit(PanelEvent::TranscriptLoaded {
            language: resolved.language,
            chunks,
            words,
        });

        if let Some(result) = self.matcher.replay() {
            self.show(result.as_ref());
        }
    }

    /// Start scrolling through the transcript over the media duration
    ///
    /// Does nothing when autoscroll is disabled in the preferences, the
    /// duration is unknown or the transcript fits on screen.
    pub fn start_autoscroll(&mut self, media_duration_s: f64, now_ms: f64) -> Option<u64> {
        self.cancel_autoscroll();
        if !self.preferences.autoscroll {
            return None;
        }

        let height = self.surface.scrollable_height();
        let generation =
            self.autoscroll
                .start(media_duration_s, height, self.preferences.speed, now_ms)?;
        self.surface.set_scroll_offset(0.0);
        self.emit_started(generation);
        Some(generation)
    }

    /// Read the media duration from the player and start scrolling
    pub async fn start_autoscroll_with<P: CaptionPlayer + ?Sized>(
        &mut self,
        player: &P,
        now_ms: f64,
    ) -> Option<u64> {
        let duration = media_duration(player).await?;
        self.start_autoscroll(duration, now_ms)
    }

    /// Change the autoscroll speed, restarting a running animation
    pub fn set_speed(&mut self, speed: f64, now_ms: f64) -> Option<u64> {
        self.preferences.speed = speed;
        let generation = self.autoscroll.set_speed(speed, now_ms)?;
        self.surface.set_scroll_offset(0.0);
        self.emit_started(generation);
        Some(generation)
    }

    fn emit_started(&mut self, generation: u64) {
        let duration_ms = self.autoscroll.duration_ms().unwrap_or_default();
        self.emit(PanelEvent::AutoscrollStarted {
            generation,
            duration_ms,
        });
    }

    /// Advance the running autoscroll
    pub fn on_frame(&mut self, now_ms: f64) -> FrameOutcome {
        let outcome = self.autoscroll.on_frame(now_ms);
        self.apply_frame(outcome);
        outcome
    }

    /// Advance the autoscroll of a generation, ignoring stale ones
    pub fn frame(&mut self, generation: u64, now_ms: f64) -> FrameOutcome {
        let outcome = self.autoscroll.frame(generation, now_ms);
        self.apply_frame(outcome);
        outcome
    }

    fn apply_frame(&mut self, outcome: FrameOutcome) {
        if let Some(offset) = outcome.offset() {
            self.surface.set_scroll_offset(offset);
        }
        if let FrameOutcome::Finished { generation, .. } = outcome {
            self.emit(PanelEvent::AutoscrollFinished { generation });
        }
    }

    /// Stop the running autoscroll
    pub fn cancel_autoscroll(&mut self) -> bool {
        match self.autoscroll.cancel() {
            Some(generation) => {
                self.emit(PanelEvent::AutoscrollCancelled { generation });
                true
            }
            None => false,
        }
    }

    /// Close the panel
    ///
    /// Cancels autoscroll, supersedes pending loads and forgets the record
    /// and the last cue.
    pub fn close(&mut self) {
        self.cancel_autoscroll();
        self.latest_load += 1;
        self.highlight.clear(&mut self.surface);
        self.matcher.replace_index(Rc::new(ChunkIndex::empty()));
        self.matcher.reset();
        self.record = None;
        self.transcripts = TranscriptSet::default();
        self.transcript_language = None;
        self.state = PanelState::Idle;
        self.emit(PanelEvent::PanelClosed);
    }

    fn emit(&mut self, event: PanelEvent) {
        if let Err(err) = self.events.dispatch(event) {
            warn!(error = %err, "panel event handler failed");
        }
    }

    /// Current lifecycle state
    #[must_use]
    pub const fn state(&self) -> PanelState {
        self.state
    }

    /// Rendering surface
    #[must_use]
    pub const fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable rendering surface, for hosts updating layout
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Event channel for registering observers
    pub fn events(&mut self) -> &mut EventChannel {
        &mut self.events
    }

    /// Highlighted result, if any
    #[must_use]
    pub const fn current_highlight(&self) -> Option<&MatchResult> {
        self.highlight.current()
    }

    /// Chunk index of the shown transcript
    #[must_use]
    pub fn index(&self) -> &ChunkIndex {
        self.matcher.index()
    }

    /// Language key of the shown transcript
    #[must_use]
    pub fn transcript_language(&self) -> Option<&str> {
        self.transcript_language.as_deref()
    }

    /// Transcripts of the current record
    #[must_use]
    pub const fn transcripts(&self) -> &TranscriptSet {
        &self.transcripts
    }

    /// Current record
    #[must_use]
    pub const fn record(&self) -> Option<&Record> {
        self.record.as_ref()
    }

    /// Seconds the player should skip when starting the record's media
    ///
    /// Zero without a record or late-start marker.
    #[must_use]
    pub fn start_offset_s(&self) -> f64 {
        self.record.as_ref().map_or(0.0, Record::late_start_seconds)
    }

    /// Stored preferences
    #[must_use]
    pub const fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    /// Check if an autoscroll animation is running
    #[must_use]
    pub const fn is_autoscrolling(&self) -> bool {
        self.autoscroll.is_active()
    }

    /// Session counters
    #[must_use]
    pub const fn stats(&self) -> &SessionStats {
        &self.stats
    }

    /// HTML markup of the shown transcript
    #[must_use]
    pub fn transcript_html(&self) -> String {
        markup::transcript_html(self.index(), Some(&self.config.placeholder))
    }

    /// Plain-text download of the shown transcript
    #[must_use]
    pub fn export_text(&self) -> TranscriptExport {
        let title = self.record.as_ref().map(Record::title).unwrap_or_default();
        markup::export_text(&title, self.index())
    }
}
