//! Event system for panel notifications
//!
//! Provides the `PanelEvent` enum describing what a panel session did and
//! `EventChannel` for distributing those events to observers. Handlers run
//! synchronously in priority order; an optional unbounded stream carries the
//! same events to async consumers.

use crate::{PanelError, Result};
use cuesync_core::WordRange;
use futures::channel::mpsc;
use tracing::debug;

/// Events emitted by a panel session
#[derive(Debug, Clone, PartialEq)]
pub enum PanelEvent {
    /// A transcript was committed to the panel
    TranscriptLoaded {
        /// Language key of the transcript, `None` when there is none
        language: Option<String>,
        /// Number of chunks
        chunks: usize,
        /// Number of words across all chunks
        words: usize,
    },

    /// A load was discarded because a newer one started
    LoadSuperseded {
        /// Sequence number of the discarded load
        sequence: u64,
        /// Sequence number of the newest load
        latest: u64,
    },

    /// Highlight moved to a chunk
    HighlightChanged {
        /// Highlighted chunk
        chunk_index: usize,
        /// Highlighted words, `None` for the whole chunk
        word_range: Option<WordRange>,
    },

    /// Highlight removed
    HighlightCleared,

    /// Active caption language changed
    LanguageChanged {
        /// Previous language code, empty for none
        from: String,
        /// New language code, empty for none
        to: String,
    },

    /// Autoscroll animation started
    AutoscrollStarted {
        /// Animation generation
        generation: u64,
        /// Animation duration in milliseconds
        duration_ms: f64,
    },

    /// Autoscroll animation reached the end
    AutoscrollFinished {
        /// Animation generation
        generation: u64,
    },

    /// Autoscroll animation cancelled before the end
    AutoscrollCancelled {
        /// Animation generation
        generation: u64,
    },

    /// Panel closed
    PanelClosed,
}

impl PanelEvent {
    /// Get a human-readable description of the event
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::TranscriptLoaded {
                language, chunks, ..
            } => match language {
                Some(language) => format!("Loaded '{language}' transcript ({chunks} chunks)"),
                None => "Loaded empty transcript".to_string(),
            },
            Self::LoadSuperseded { sequence, latest } => {
                format!("Discarded load {sequence} (latest is {latest})")
            }
            Self::HighlightChanged {
                chunk_index,
                word_range: Some(range),
            } => format!("Highlighted words {range} of chunk {chunk_index}"),
            Self::HighlightChanged { chunk_index, .. } => {
                format!("Highlighted chunk {chunk_index}")
            }
            Self::HighlightCleared => "Highlight cleared".to_string(),
            Self::LanguageChanged { from, to } => {
                let from = if from.is_empty() { "none" } else { from };
                let to = if to.is_empty() { "none" } else { to };
                format!("Language changed from {from} to {to}")
            }
            Self::AutoscrollStarted { duration_ms, .. } => {
                format!("Autoscroll started ({duration_ms:.0}ms)")
            }
            Self::AutoscrollFinished { .. } => "Autoscroll finished".to_string(),
            Self::AutoscrollCancelled { .. } => "Autoscroll cancelled".to_string(),
            Self::PanelClosed => "Panel closed".to_string(),
        }
    }

    /// Check if this event concerns the highlight
    #[must_use]
    pub const fn is_highlight(&self) -> bool {
        matches!(self, Self::HighlightChanged { .. } | Self::HighlightCleared)
    }

    /// Check if this event concerns autoscroll
    #[must_use]
    pub const fn is_autoscroll(&self) -> bool {
        matches!(
            self,
            Self::AutoscrollStarted { .. }
                | Self::AutoscrollFinished { .. }
                | Self::AutoscrollCancelled { .. }
        )
    }

    /// Get the event type name used for filtering
    #[must_use]
    pub const fn event_type_name(&self) -> &'static str {
        match self {
            Self::TranscriptLoaded { .. } => "TranscriptLoaded",
            Self::LoadSuperseded { .. } => "LoadSuperseded",
            Self::HighlightChanged { .. } => "HighlightChanged",
            Self::HighlightCleared => "HighlightCleared",
            Self::LanguageChanged { .. } => "LanguageChanged",
            Self::AutoscrollStarted { .. } => "AutoscrollStarted",
            Self::AutoscrollFinished { .. } => "AutoscrollFinished",
            Self::AutoscrollCancelled { .. } => "AutoscrollCancelled",
            Self::PanelClosed => "PanelClosed",
        }
    }
}

/// Event filter for selective event handling
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// Event types to include (empty means all types)
    include_types: Vec<String>,
    /// Event types to exclude
    exclude_types: Vec<String>,
    /// Whether to include highlight events
    include_highlight: Option<bool>,
    /// Whether to include autoscroll events
    include_autoscroll: Option<bool>,
}

impl EventFilter {
    /// Create a new event filter that accepts all events
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Only include specific event types
    #[must_use]
    pub fn include_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.include_types = types.into_iter().map(Into::into).collect();
        self
    }

    /// Exclude specific event types
    #[must_use]
    pub fn exclude_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_types = types.into_iter().map(Into::into).collect();
        self
    }

    /// Set whether to include highlight events
    #[must_use]
    pub const fn include_highlight(mut self, include: bool) -> Self {
        self.include_highlight = Some(include);
        self
    }

    /// Set whether to include autoscroll events
    #[must_use]
    pub const fn include_autoscroll(mut self, include: bool) -> Self {
        self.include_autoscroll = Some(include);
        self
    }

    /// Check if an event passes this filter
    #[must_use]
    pub fn matches(&self, event: &PanelEvent) -> bool {
        let event_type = event.event_type_name();

        if self.exclude_types.iter().any(|t| t == event_type) {
            return false;
        }
        if !self.include_types.is_empty() && !self.include_types.iter().any(|t| t == event_type) {
            return false;
        }
        if let Some(include) = self.include_highlight {
            if event.is_highlight() != include {
                return false;
            }
        }
        if let Some(include) = self.include_autoscroll {
            if event.is_autoscroll() != include {
                return false;
            }
        }
        true
    }
}

/// Event handler trait for responding to panel events
pub trait EventHandler {
    /// Handle a panel event
    fn handle_event(&mut self, event: &PanelEvent) -> Result<()>;

    /// Get the event filter for this handler
    fn event_filter(&self) -> EventFilter {
        EventFilter::new()
    }

    /// Get handler priority (higher numbers = higher priority)
    fn priority(&self) -> i32 {
        0
    }
}

/// Closures handle every event
impl<F> EventHandler for F
where
    F: FnMut(&PanelEvent) -> Result<()>,
{
    fn handle_event(&mut self, event: &PanelEvent) -> Result<()> {
        self(event)
    }
}

/// Statistics about event handling
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventStats {
    /// Total number of events dispatched
    pub events_dispatched: usize,
    /// Number of handlers currently registered
    pub handlers_count: usize,
    /// Number of handler deliveries skipped by filters
    pub events_filtered: usize,
    /// Number of events forwarded to the async stream
    pub async_events_queued: usize,
}

/// Event channel configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventChannelConfig {
    /// Maximum number of handlers
    pub max_handlers: usize,
    /// Whether to log events for debugging
    pub enable_logging: bool,
}

impl Default for EventChannelConfig {
    fn default() -> Self {
        Self {
            max_handlers: 100,
            enable_logging: false,
        }
    }
}

/// Information about a registered handler
struct HandlerInfo {
    /// Unique handler ID
    id: usize,
    /// Handler implementation
    handler: Box<dyn EventHandler>,
    /// Event filter for this handler
    filter: EventFilter,
    /// Handler priority
    priority: i32,
    /// Number of events processed by this handler
    events_processed: usize,
}

impl core::fmt::Debug for HandlerInfo {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("HandlerInfo")
            .field("id", &self.id)
            .field("filter", &self.filter)
            .field("priority", &self.priority)
            .field("events_processed", &self.events_processed)
            .field("handler", &"<EventHandler>")
            .finish()
    }
}

/// Event channel for distributing panel events to handlers
#[derive(Debug)]
pub struct EventChannel {
    /// Configuration for this channel
    config: EventChannelConfig,
    /// Registered event handlers, highest priority first
    handlers: Vec<HandlerInfo>,
    /// Event statistics
    stats: EventStats,
    /// Async event sender, set by [`EventChannel::subscribe_async`]
    async_sender: Option<mpsc::UnboundedSender<PanelEvent>>,
    /// Next handler ID for unique identification
    next_handler_id: usize,
}

impl EventChannel {
    /// Create a new event channel with default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(EventChannelConfig::default())
    }

    /// Create a new event channel with custom configuration
    #[must_use]
    pub fn with_config(config: EventChannelConfig) -> Self {
        Self {
            config,
            handlers: Vec::new(),
            stats: EventStats::default(),
            async_sender: None,
            next_handler_id: 0,
        }
    }

    /// Register an event handler, returning its ID
    pub fn register_handler(&mut self, handler: Box<dyn EventHandler>) -> Result<usize> {
        if self.handlers.len() >= self.config.max_handlers {
            return Err(PanelError::HandlerLimit {
                limit: self.config.max_handlers,
            });
        }

        let handler_id = self.next_handler_id;
        self.next_handler_id += 1;

        let filter = handler.event_filter();
        let priority = handler.priority();
        self.handlers.push(HandlerInfo {
            id: handler_id,
            handler,
            filter,
            priority,
            events_processed: 0,
        });
        // Stable sort keeps registration order within a priority
        self.handlers.sort_by(|a, b| b.priority.cmp(&a.priority));

        self.stats.handlers_count = self.handlers.len();
        Ok(handler_id)
    }

    /// Unregister an event handler by ID
    pub fn unregister_handler(&mut self, handler_id: usize) -> bool {
        let Some(pos) = self.handlers.iter().position(|h| h.id == handler_id) else {
            return false;
        };
        self.handlers.remove(pos);
        self.stats.handlers_count = self.handlers.len();
        true
    }

    /// Dispatch an event to all registered handlers
    ///
    /// Every matching handler sees the event even if an earlier one fails;
    /// the first failure is returned.
    pub fn dispatch(&mut self, event: PanelEvent) -> Result<()> {
        self.stats.events_dispatched += 1;
        let mut filtered_count = 0;
        let mut processed_count = 0;
        let mut first_error = None;

        for handler_info in &mut self.handlers {
            if !handler_info.filter.matches(&event) {
                filtered_count += 1;
                continue;
            }
            if let Err(err) = handler_info.handler.handle_event(&event) {
                first_error.get_or_insert(err);
            }
            handler_info.events_processed += 1;
            processed_count += 1;
        }
        self.stats.events_filtered += filtered_count;

        if self.config.enable_logging {
            debug!(
                event = %event.description(),
                handlers = processed_count,
                filtered = filtered_count,
                "event dispatched"
            );
        }

        let forwarded = self
            .async_sender
            .as_ref()
            .map(|sender| sender.unbounded_send(event).is_ok());
        match forwarded {
            Some(true) => self.stats.async_events_queued += 1,
            // Receiver dropped
            Some(false) => self.async_sender = None,
            None => {}
        }

        first_error.map_or(Ok(()), Err)
    }

    /// Stream every subsequently dispatched event
    ///
    /// Replaces any previous stream; its receiver sees the end of stream.
    pub fn subscribe_async(&mut self) -> mpsc::UnboundedReceiver<PanelEvent> {
        let (sender, receiver) = mpsc::unbounded();
        self.async_sender = Some(sender);
        receiver
    }

    /// Check if an async stream is attached
    #[must_use]
    pub const fn has_async_subscriber(&self) -> bool {
        self.async_sender.is_some()
    }

    /// Get event statistics
    #[must_use]
    pub const fn stats(&self) -> &EventStats {
        &self.stats
    }
}

impl Default for EventChannel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests;
