use pillbar_core::DecorationType;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure parsed from `pillbar.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PillConfig {
    /// Demo window / bar layout size.
    pub window: WindowConfig,
    /// Style attributes of the Tick-mode bar.
    pub tick: StyleConfig,
    /// Style attributes of the Line-mode bar.
    pub line: StyleConfig,
}

impl PillConfig {
    /// Reject values no bar can be drawn with.  Colors are not checked here:
    /// an unparsable color falls back to its default when the style is built.
    pub fn validate(&self) -> Result<(), String> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err(format!(
                "window must be non-empty, got {}x{}",
                self.window.width, self.window.height
            ));
        }
        self.tick.validate().map_err(|e| format!("[tick] {e}"))?;
        self.line.validate().map_err(|e| format!("[line] {e}"))
    }
}

impl Default for PillConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            tick: StyleConfig {
                size_border: 2.0,
                size_radius: 12.0,
                ..StyleConfig::default()
            },
            line: StyleConfig {
                decoration_type: DecorationType::Line,
                size_border: 2.0,
                size_radius: 12.0,
                ..StyleConfig::default()
            },
        }
    }
}

/// Size the host lays each bar out at.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Bar width in logical pixels.
    pub width: u32,
    /// Bar height in logical pixels.
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self { width: 300, height: 24 }
    }
}

/// Style attributes for a single progress bar, resolved once at construction.
///
/// Colors are hex strings (`#RRGGBB` or `#RRGGBBAA`); sizes are logical pixels.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    pub decoration_type: DecorationType,
    pub color_background: String,
    pub color_foreground: String,
    pub color_decoration: String,
    pub size_border: f32,
    pub size_radius: f32,
    pub size_decoration_width: f32,
    /// PNG drawn under the fill in Line mode.
    pub image_foreground: Option<PathBuf>,
}

impl StyleConfig {
    fn validate(&self) -> Result<(), String> {
        for (name, value) in [
            ("size_border", self.size_border),
            ("size_radius", self.size_radius),
            ("size_decoration_width", self.size_decoration_width),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(format!("{name} must be a non-negative number, got {value}"));
            }
        }
        Ok(())
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            decoration_type:       DecorationType::Tick,
            color_background:      "#CCCCCC".to_string(), // light gray
            color_foreground:      "#00FF00".to_string(), // green
            color_decoration:      "#888888".to_string(), // gray
            size_border:           0.0,
            size_radius:           0.0,
            size_decoration_width: 0.0,
            image_foreground:      None,
        }
    }
}
