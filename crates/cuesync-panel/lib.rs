//! # cuesync panel
//!
//! Transcript panel session for cuesync. Ties the text engine of
//! `cuesync-core` to a rendering surface and a caption player: transcripts
//! are resolved from spreadsheet-style records, cue changes move the
//! highlight, language switches rebuild the index and replay the last cue,
//! and an optional autoscroll walks the transcript along the media.
//!
//! ## Quick Start
//!
//! ```rust
//! use cuesync_panel::{MemorySurface, PanelSession, PanelState, Record};
//!
//! let record = Record::from_pairs([
//!     ("Notion", "Commons"),
//!     ("Transcript", "The quick brown fox jumps.\n\nOver the lazy dog."),
//! ]);
//!
//! let mut session = PanelSession::new(MemorySurface::new());
//! session.open_record(record);
//!
//! let result = session.on_cue_change("quick brown fox").expect("cue should match");
//! assert_eq!(result.chunk_index, 0);
//! assert_eq!(session.state(), PanelState::Highlighted);
//!
//! session.on_cue_change("");
//! assert!(!session.surface().has_active());
//! ```
//!
//! ## Modules
//!
//! - [`store`]: records, transcript columns, language codes, subtitle lists
//! - [`sessions`]: the panel state machine
//! - [`highlight`] and [`autoscroll`]: what the panel does to its surface
//! - [`player`]: async caption-player boundary
//! - [`events`]: observer channel for panel events
//! - [`markup`]: HTML and plain-text exports

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(unsafe_code)]

pub mod autoscroll;
pub mod config;
pub mod errors;
pub mod events;
pub mod highlight;
pub mod markup;
pub mod player;
pub mod sessions;
pub mod store;
pub mod surface;

pub use autoscroll::{AutoscrollDriver, FrameOutcome};
pub use config::{AutoscrollConfig, PanelConfig, Preferences, NO_TRANSCRIPT_PLACEHOLDER};
pub use errors::{PanelError, PlayerError, Result};
pub use events::{
    EventChannel, EventChannelConfig, EventFilter, EventHandler, EventStats, PanelEvent,
};
pub use highlight::{HighlightChange, HighlightRenderer};
pub use markup::{export_file_name, transcript_html, transcript_plain_text, TranscriptExport};
pub use player::{
    apply_preferred_track, choose_track, media_duration, CaptionPlayer, TextTrack,
    TrackRetryPolicy,
};
pub use sessions::{LoadTicket, PanelSession, PanelState, SessionStats};
pub use store::{Record, ResolvedTranscript, SubtitleOption, TranscriptSet};
pub use surface::{MemorySurface, PanelSurface, ScrollTarget};

pub use cuesync_core::{ChunkIndex, MatchResult, WordRange};

/// Crate version for runtime compatibility checks
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
