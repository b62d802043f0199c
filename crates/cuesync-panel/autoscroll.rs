//! Frame-driven autoscroll
//!
//! Scrolls the panel linearly from the top to the bottom over the media
//! duration divided by the speed multiplier. The host owns the frame clock
//! and calls [`AutoscrollDriver::on_frame`]; every started animation gets a
//! new generation so frames scheduled for a cancelled one do nothing.

use crate::config::AutoscrollConfig;
use tracing::{debug, trace};

/// A running animation
#[derive(Debug, Clone, Copy, PartialEq)]
struct Animation {
    generation: u64,
    start_ms: f64,
    duration_ms: f64,
    height: f64,
    media_duration_s: f64,
}

impl Animation {
    fn progress(&self, now_ms: f64) -> f64 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        ((now_ms - self.start_ms) / self.duration_ms).clamp(0.0, 1.0)
    }
}

/// What a frame did
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameOutcome {
    /// No animation for this frame
    Idle,
    /// Scroll offset moved
    Scrolled {
        /// New scroll offset
        offset: f64,
    },
    /// Animation reached the end and stopped
    Finished {
        /// Finished generation
        generation: u64,
        /// Final scroll offset
        offset: f64,
    },
}

impl FrameOutcome {
    /// Offset to apply, if any
    #[must_use]
    pub const fn offset(&self) -> Option<f64> {
        match self {
            Self::Idle => None,
            Self::Scrolled { offset } | Self::Finished { offset, .. } => Some(*offset),
        }
    }
}

/// Drives one autoscroll animation at a time
#[derive(Debug, Clone)]
pub struct AutoscrollDriver {
    config: AutoscrollConfig,
    generation: u64,
    speed: f64,
    active: Option<Animation>,
}

impl Default for AutoscrollDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl AutoscrollDriver {
    /// Driver with default tuning
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(AutoscrollConfig::default())
    }

    /// Driver with custom tuning
    #[must_use]
    pub fn with_config(config: AutoscrollConfig) -> Self {
        Self {
            speed: config.fallback_speed,
            config,
            generation: 0,
            active: None,
        }
    }

    /// Start scrolling `0 → height` over the media duration
    ///
    /// Cancels any running animation. Returns the new generation, or `None`
    /// when the duration is unknown or there is nothing to scroll.
    pub fn start(
        &mut self,
        media_duration_s: f64,
        height: f64,
        speed: f64,
        now_ms: f64,
    ) -> Option<u64> {
        self.cancel();
        self.speed = self.config.effective_speed(speed);

        if !(media_duration_s.is_finite() && media_duration_s > 0.0) {
            debug!(media_duration_s, "autoscroll not started: unknown duration");
            return None;
        }
        if !(height.is_finite() && height > 0.0) {
            debug!(height, "autoscroll not started: nothing to scroll");
            return None;
        }

        self.generation += 1;
        let animation = Animation {
            generation: self.generation,
            start_ms: now_ms,
            duration_ms: media_duration_s * 1000.0 / self.speed,
            height,
            media_duration_s,
        };
        debug!(
            generation = animation.generation,
            duration_ms = animation.duration_ms,
            height,
            "autoscroll started"
        );
        self.active = Some(animation);
        Some(self.generation)
    }

    /// Change the speed multiplier
    ///
    /// A running animation restarts from the top with the re-derived
    /// duration and a new generation.
    pub fn set_speed(&mut self, speed: f64, now_ms: f64) -> Option<u64> {
        match self.active {
            Some(animation) => {
                self.start(animation.media_duration_s, animation.height, speed, now_ms)
            }
            None => {
                self.speed = self.config.effective_speed(speed);
                None
            }
        }
    }

    /// Advance the current animation
    pub fn on_frame(&mut self, now_ms: f64) -> FrameOutcome {
        match self.active {
            Some(animation) => self.frame(animation.generation, now_ms),
            None => FrameOutcome::Idle,
        }
    }

    /// Advance the animation of a generation; stale generations are ignored
    pub fn frame(&mut self, generation: u64, now_ms: f64) -> FrameOutcome {
        let Some(animation) = self
            .active
            .filter(|animation| animation.generation == generation)
        else {
            trace!(generation, "stale autoscroll frame ignored");
            return FrameOutcome::Idle;
        };

        let progress = animation.progress(now_ms);
        let offset = animation.height * progress;
        trace!(generation, progress, offset, "autoscroll frame");

        if progress >= 1.0 {
            self.active = None;
            debug!(generation, "autoscroll finished");
            FrameOutcome::Finished { generation, offset }
        } else {
            FrameOutcome::Scrolled { offset }
        }
    }

    /// Stop the running animation, returning its generation
    pub fn cancel(&mut self) -> Option<u64> {
        let animation = self.active.take()?;
        debug!(generation = animation.generation, "autoscroll cancelled");
        Some(animation.generation)
    }

    /// Check if an animation is running
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Generation of the most recent animation, 0 before the first
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Duration of the running animation in milliseconds
    #[must_use]
    pub fn duration_ms(&self) -> Option<f64> {
        self.active.map(|animation| animation.duration_ms)
    }

    /// Effective speed multiplier
    #[must_use]
    pub const fn speed(&self) -> f64 {
        self.speed
    }
}
