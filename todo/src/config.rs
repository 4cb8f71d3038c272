//! Configuration for the todo screen.
//!
//! Every field has a default, so an empty JSON object is a valid
//! configuration:
//!
//! ```
//! use todo::config::UiConfig;
//!
//! let config = UiConfig::from_json(r#"{ "animation": { "duration_ms": 200 } }"#).unwrap();
//! assert_eq!(config.animation.duration_ms, 200);
//! assert_eq!(config.animation.frame_interval_ms, 16);
//! assert_eq!(config.palette.primary, "#007AFF");
//! ```

use crate::animation::Easing;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Errors raised while loading or validating configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Input was not valid JSON for [`UiConfig`]
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// A field holds a value the screen cannot use
    #[error("Invalid configuration value for {field}: {reason}")]
    Invalid {
        /// Dotted path of the offending field
        field: &'static str,
        /// What is wrong with it
        reason: String,
    },
}

/// Slide animation timing
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Length of one open or close slide
    pub duration_ms: u64,
    /// Delay between animation frames
    pub frame_interval_ms: u64,
    /// Timing curve
    pub easing: Easing,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            duration_ms: 300,
            frame_interval_ms: 16,
            easing: Easing::Ease,
        }
    }
}

impl AnimationConfig {
    /// Slide duration
    #[must_use]
    pub const fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }

    /// Frame interval
    #[must_use]
    pub const fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }

    /// Set the slide duration
    #[must_use]
    pub const fn with_duration_ms(mut self, duration_ms: u64) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    /// Set the frame interval
    #[must_use]
    pub const fn with_frame_interval_ms(mut self, frame_interval_ms: u64) -> Self {
        self.frame_interval_ms = frame_interval_ms;
        self
    }

    /// Set the easing curve
    #[must_use]
    pub const fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Check the timing is usable
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for a zero duration, a zero frame
    /// interval, or a frame interval longer than the duration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.duration_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "animation.duration_ms",
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.frame_interval_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "animation.frame_interval_ms",
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.frame_interval_ms > self.duration_ms {
            return Err(ConfigError::Invalid {
                field: "animation.frame_interval_ms",
                reason: format!(
                    "{}ms exceeds the {}ms duration",
                    self.frame_interval_ms, self.duration_ms
                ),
            });
        }
        Ok(())
    }
}

/// Named colors used by the screen, as `#RRGGBB`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    /// Primary actions and the accent color
    pub primary: String,
    /// Text on filled buttons, panel background
    pub white: String,
    /// Body text
    pub black: String,
    /// Disabled controls, completed items, hints
    pub gray: String,
    /// Secondary buttons, screen background
    pub light_gray: String,
    /// Destructive actions
    pub red: String,
    /// Completion accent
    pub green: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            primary: "#007AFF".to_string(),
            white: "#FFFFFF".to_string(),
            black: "#000000".to_string(),
            gray: "#8E8E93".to_string(),
            light_gray: "#F2F2F7".to_string(),
            red: "#FF3B30".to_string(),
            green: "#34C759".to_string(),
        }
    }
}

impl Palette {
    /// Check every color is a `#RRGGBB` literal
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first bad color.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let colors = [
            ("palette.primary", &self.primary),
            ("palette.white", &self.white),
            ("palette.black", &self.black),
            ("palette.gray", &self.gray),
            ("palette.light_gray", &self.light_gray),
            ("palette.red", &self.red),
            ("palette.green", &self.green),
        ];

        for (field, color) in colors {
            if !is_hex_color(color) {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("{color:?} is not a #RRGGBB color"),
                });
            }
        }
        Ok(())
    }
}

fn is_hex_color(value: &str) -> bool {
    value
        .strip_prefix('#')
        .is_some_and(|hex| hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()))
}

/// Complete screen configuration
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Panel animation timing
    pub animation: AnimationConfig,
    /// Colors
    pub palette: Palette,
}

impl UiConfig {
    /// Parse and validate a JSON document
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and
    /// [`ConfigError::Invalid`] for values that fail [`UiConfig::validate`].
    pub fn from_json(input: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Replace the animation timing
    #[must_use]
    pub fn with_animation(mut self, animation: AnimationConfig) -> Self {
        self.animation = animation;
        self
    }

    /// Replace the palette
    #[must_use]
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    /// Validate every section
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError::Invalid`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.animation.validate()?;
        self.palette.validate()
    }
}
