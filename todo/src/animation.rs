//! Time-based slide animation for the add-item panel.
//!
//! Offsets are normalized: [`RESTING`] is fully on screen and [`OFFSCREEN`]
//! is fully hidden below the screen edge. A host multiplies by its screen
//! height to get a translation.

use crate::config::AnimationConfig;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Offset of a fully presented panel
pub const RESTING: f64 = 0.0;

/// Offset of a fully hidden panel
pub const OFFSCREEN: f64 = 1.0;

/// Timing curve applied to animation progress
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Easing {
    /// Constant speed
    Linear,
    /// Cubic ease-in-out
    #[default]
    Ease,
}

impl Easing {
    /// Map linear progress in `[0, 1]` to eased progress in `[0, 1]`
    ///
    /// Both curves are monotonic and fix the endpoints.
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::Ease => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            },
        }
    }
}

/// One in-flight slide between two offsets
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SlideAnimation {
    /// Offset when the animation started
    pub from: f64,
    /// Offset the animation settles at
    pub to: f64,
    /// When the animation started
    pub started_at: DateTime<Utc>,
    /// Visibility edge this animation belongs to
    pub generation: u64,
}

impl SlideAnimation {
    /// Linear progress in `[0, 1]` at `now`
    ///
    /// A clock that reads earlier than `started_at` yields 0.
    #[must_use]
    #[allow(clippy::cast_precision_loss)] // Millisecond spans are far below 2^52
    pub fn progress(&self, now: DateTime<Utc>, config: &AnimationConfig) -> f64 {
        if config.duration_ms == 0 {
            return 1.0;
        }
        let elapsed = (now - self.started_at).num_milliseconds().max(0) as f64;
        (elapsed / config.duration_ms as f64).clamp(0.0, 1.0)
    }

    /// Offset at `now`
    #[must_use]
    pub fn offset_at(&self, now: DateTime<Utc>, config: &AnimationConfig) -> f64 {
        let eased = config.easing.apply(self.progress(now, config));
        (self.to - self.from).mul_add(eased, self.from)
    }

    /// Whether the animation has run its full duration at `now`
    #[must_use]
    pub fn is_finished(&self, now: DateTime<Utc>, config: &AnimationConfig) -> bool {
        self.progress(now, config) >= 1.0
    }
}
