//! Panel configuration and user preferences

use crate::{
    events::EventChannelConfig,
    player::TrackRetryPolicy,
    store::canonical_lang_code,
    PanelError, Result,
};
use cuesync_core::ScoringWeights;

/// Placeholder shown when a record has no transcript
pub const NO_TRANSCRIPT_PLACEHOLDER: &str = "No transcript available.";

/// Autoscroll tuning
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AutoscrollConfig {
    /// Speed used when the requested one is zero, negative or not finite
    pub fallback_speed: f64,
    /// Upper bound on the speed multiplier
    pub max_speed: f64,
}

impl Default for AutoscrollConfig {
    fn default() -> Self {
        Self {
            fallback_speed: 1.0,
            max_speed: 16.0,
        }
    }
}

impl AutoscrollConfig {
    /// Effective speed multiplier for a requested one
    #[must_use]
    pub fn effective_speed(&self, requested: f64) -> f64 {
        if requested.is_finite() && requested > 0.0 {
            requested.min(self.max_speed)
        } else {
            self.fallback_speed
        }
    }

    /// Check that the speeds are usable
    pub fn validate(&self) -> Result<()> {
        if !(self.fallback_speed.is_finite() && self.fallback_speed > 0.0) {
            return Err(PanelError::config("autoscroll fallback_speed must be positive"));
        }
        if !(self.max_speed.is_finite() && self.max_speed >= self.fallback_speed) {
            return Err(PanelError::config(
                "autoscroll max_speed must be finite and at least fallback_speed",
            ));
        }
        Ok(())
    }
}

/// Configuration of a panel session
#[derive(Debug, Clone, PartialEq)]
pub struct PanelConfig {
    /// Chunk scoring weights
    pub weights: ScoringWeights,
    /// Autoscroll tuning
    pub autoscroll: AutoscrollConfig,
    /// Caption-track polling
    pub track_retry: TrackRetryPolicy,
    /// Event channel limits
    pub events: EventChannelConfig,
    /// Text rendered when there is no transcript
    pub placeholder: String,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            weights: ScoringWeights::default(),
            autoscroll: AutoscrollConfig::default(),
            track_retry: TrackRetryPolicy::default(),
            events: EventChannelConfig::default(),
            placeholder: NO_TRANSCRIPT_PLACEHOLDER.to_string(),
        }
    }
}

impl PanelConfig {
    /// Validate every section
    pub fn validate(&self) -> Result<()> {
        self.weights.validate()?;
        self.autoscroll.validate()?;
        if self.track_retry.attempts == 0 {
            return Err(PanelError::config("track_retry attempts must be at least 1"));
        }
        if self.events.max_handlers == 0 {
            return Err(PanelError::config("events max_handlers must be at least 1"));
        }
        Ok(())
    }
}

/// Persisted user preferences
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Preferences {
    /// Preferred caption/transcript language, may be empty
    pub language: String,
    /// Whether the panel scrolls itself along the media
    pub autoscroll: bool,
    /// Autoscroll speed multiplier
    pub speed: f64,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            language: String::new(),
            autoscroll: true,
            speed: 1.0,
        }
    }
}

impl Preferences {
    /// Preferences with a language set
    #[must_use]
    pub fn with_language<S: Into<String>>(mut self, language: S) -> Self {
        self.language = language.into();
        self
    }

    /// Stored language as a comparable code
    #[must_use]
    pub fn language_code(&self) -> String {
        canonical_lang_code(&self.language)
    }
}
