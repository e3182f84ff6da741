use crate::colors::Color;
use pillbar_config::StyleConfig;
use pillbar_core::DecorationType;
use std::path::PathBuf;

/// Number of segments a Tick-mode bar is divided into.
pub const DEFAULT_TICK_COUNT: u32 = 10;

/// Compiled, immutable style of one progress bar.
///
/// Built once from a [`StyleConfig`]; only [`ProgressStyle::set_decoration`]
/// changes it afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressStyle {
    decoration:       DecorationType,
    /// Colors as configured, kept so a switch back to Line mode restores them.
    configured_base:  Color,
    configured_fg:    Color,
    pub color_base:       Color,
    pub color_foreground: Color,
    pub color_decoration: Color,
    pub border_width:     f32,
    pub corner_radius:    f32,
    /// Parsed for style-sheet compatibility; no draw step reads it yet.
    pub decoration_width: f32,
    pub tick_count:       u32,
    pub image_foreground: Option<PathBuf>,
}

impl ProgressStyle {
    /// Build a [`ProgressStyle`] from one `[tick]` / `[line]` section.
    ///
    /// Infallible: invalid colors fall back to the stock palette and
    /// negative sizes clamp to zero.
    pub fn from_config(cfg: &StyleConfig) -> Self {
        let color = |hex: &str, fallback: Color, field: &str| {
            Color::from_hex(hex).unwrap_or_else(|| {
                tracing::warn!("invalid {field} color '{hex}'; using default");
                fallback
            })
        };

        let base = color(&cfg.color_background, Color::LTGRAY, "background");
        let fg   = color(&cfg.color_foreground, Color::GREEN, "foreground");

        let mut style = Self {
            decoration:       cfg.decoration_type,
            configured_base:  base,
            configured_fg:    fg,
            color_base:       base,
            color_foreground: fg,
            color_decoration: color(&cfg.color_decoration, Color::GRAY, "decoration"),
            border_width:     non_negative(cfg.size_border),
            corner_radius:    non_negative(cfg.size_radius),
            decoration_width: non_negative(cfg.size_decoration_width),
            tick_count:       DEFAULT_TICK_COUNT,
            image_foreground: cfg.image_foreground.clone(),
        };
        style.set_decoration(cfg.decoration_type);
        style
    }

    pub fn decoration(&self) -> DecorationType {
        self.decoration
    }

    /// Rebind the decoration mode.
    ///
    /// Tick mode always draws white-on-white (the notches carry the
    /// contrast), so it overrides the base and foreground colors; Line mode
    /// restores the configured ones.
    pub fn set_decoration(&mut self, decoration: DecorationType) {
        self.decoration = decoration;
        match decoration {
            DecorationType::Tick => {
                self.color_base       = Color::WHITE;
                self.color_foreground = Color::WHITE;
            }
            DecorationType::Line => {
                self.color_base       = self.configured_base;
                self.color_foreground = self.configured_fg;
            }
        }
    }
}

impl Default for ProgressStyle {
    fn default() -> Self {
        Self::from_config(&StyleConfig::default())
    }
}

fn non_negative(v: f32) -> f32 {
    if v.is_finite() { v.max(0.0) } else { 0.0 }
}
