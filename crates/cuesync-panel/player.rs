//! Caption player boundary
//!
//! The panel talks to the video player through [`CaptionPlayer`]. Player
//! calls are async and may fail or answer before the player is ready; track
//! selection polls with a bounded [`TrackRetryPolicy`] and degrades to "no
//! active language" instead of failing.

use crate::{errors::PlayerError, store::normalize_language_code};
use async_trait::async_trait;
use core::time::Duration;
use tracing::{debug, warn};

/// Kind used when a track does not report one
pub const DEFAULT_TRACK_KIND: &str = "subtitles";

/// Language tried when the preferred one is unavailable
pub const FALLBACK_LANGUAGE: &str = "en";

type PlayerResult<T> = core::result::Result<T, PlayerError>;

/// A text track offered by the player
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextTrack {
    /// Language tag as reported by the player, may be empty
    pub language: String,
    /// Display label, may be empty
    pub label: String,
    /// Track kind (`subtitles`, `captions`), may be empty
    pub kind: String,
}

impl TextTrack {
    /// Track with a language and kind
    pub fn new<L: Into<String>, K: Into<String>>(language: L, kind: K) -> Self {
        Self {
            language: language.into(),
            label: String::new(),
            kind: kind.into(),
        }
    }

    /// Set the display label
    #[must_use]
    pub fn with_label<S: Into<String>>(mut self, label: S) -> Self {
        self.label = label.into();
        self
    }

    /// Normalized language code from the primary subtag, else the label
    #[must_use]
    pub fn code(&self) -> String {
        let primary = self.language.split(['-', '_']).next().unwrap_or_default();
        let code = normalize_language_code(primary);
        if code.is_empty() {
            normalize_language_code(&self.label)
        } else {
            code
        }
    }

    /// Kind to request when enabling the track
    #[must_use]
    pub fn kind_or_default(&self) -> &str {
        if self.kind.is_empty() {
            DEFAULT_TRACK_KIND
        } else {
            &self.kind
        }
    }
}

/// Video player operations the panel relies on
#[async_trait(?Send)]
pub trait CaptionPlayer {
    /// Text tracks currently offered, possibly none before the player is ready
    async fn text_tracks(&self) -> PlayerResult<Vec<TextTrack>>;

    /// Enable the track for a language and kind
    async fn enable_text_track(&self, language: &str, kind: &str) -> PlayerResult<()>;

    /// Media duration in seconds
    async fn duration(&self) -> PlayerResult<f64>;
}

/// Bounded polling of the player's track list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackRetryPolicy {
    /// Number of polls before giving up
    pub attempts: u32,
    /// Delay between polls
    pub backoff: Duration,
}

impl Default for TrackRetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 5,
            backoff: Duration::from_millis(200),
        }
    }
}

/// Pick the track to enable for a preferred language
///
/// Order: exact code match, a track whose language tag starts with the
/// preference, English, the first track with a recognizable code, the first
/// track. Returns the track position and its code.
#[must_use]
pub fn choose_track(tracks: &[TextTrack], preferred: &str) -> Option<(usize, String)> {
    let codes: Vec<String> = tracks.iter().map(TextTrack::code).collect();
    let pref = normalize_language_code(preferred);

    let by_code = |code: &str| {
        codes
            .iter()
            .position(|candidate| !code.is_empty() && candidate == code)
    };

    let position = by_code(&pref)
        .or_else(|| {
            if pref.is_empty() {
                return None;
            }
            tracks.iter().position(|track| {
                !track.language.is_empty() && track.language.to_lowercase().starts_with(&pref)
            })
        })
        .or_else(|| by_code(FALLBACK_LANGUAGE))
        .or_else(|| codes.iter().position(|code| !code.is_empty()))
        .or_else(|| (!tracks.is_empty()).then_some(0))?;

    Some((position, codes[position].clone()))
}

/// Enable the best caption track for a preference
///
/// Returns the active language code, empty when no track could be enabled.
/// Player failures are logged and end the attempt.
pub async fn apply_preferred_track<P: CaptionPlayer + ?Sized>(
    player: &P,
    preferred: &str,
    policy: &TrackRetryPolicy,
) -> String {
    match try_apply_preferred_track(player, preferred, policy).await {
        Ok(Some(code)) => code,
        Ok(None) => {
            warn!(attempts = policy.attempts, "no caption track became available");
            String::new()
        }
        Err(err) => {
            warn!(error = %err, "applying preferred caption track failed");
            String::new()
        }
    }
}

async fn try_apply_preferred_track<P: CaptionPlayer + ?Sized>(
    player: &P,
    preferred: &str,
    policy: &TrackRetryPolicy,
) -> PlayerResult<Option<String>> {
    for attempt in 0..policy.attempts {
        let tracks = match player.text_tracks().await {
            Ok(tracks) => tracks,
            Err(PlayerError::NotReady) => Vec::new(),
            Err(err) => return Err(err),
        };

        if let Some((position, code)) = choose_track(&tracks, preferred) {
            let track = &tracks[position];
            let language = if track.language.is_empty() {
                if code.is_empty() {
                    FALLBACK_LANGUAGE.to_string()
                } else {
                    code.clone()
                }
            } else {
                track.language.clone()
            };
            player
                .enable_text_track(&language, track.kind_or_default())
                .await?;

            let active = if code.is_empty() {
                normalize_language_code(&language)
            } else {
                code
            };
            debug!(attempt, language = %active, "caption track enabled");
            return Ok(Some(active));
        }

        if attempt + 1 < policy.attempts {
            tokio::time::sleep(policy.backoff).await;
        }
    }
    Ok(None)
}

/// Media duration in seconds, `None` when unknown or the call failed
pub async fn media_duration<P: CaptionPlayer + ?Sized>(player: &P) -> Option<f64> {
    match player.duration().await {
        Ok(duration) if duration.is_finite() && duration > 0.0 => Some(duration),
        Ok(_) => None,
        Err(err) => {
            warn!(error = %err, "reading media duration failed");
            None
        }
    }
}
