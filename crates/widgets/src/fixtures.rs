use pillbar_config::StyleConfig;
use pillbar_core::DecorationType;
use pillbar_theme::ProgressStyle;

pub(crate) fn style(decoration: DecorationType, border: f32, radius: f32) -> ProgressStyle {
    ProgressStyle::from_config(&StyleConfig {
        decoration_type: decoration,
        size_border: border,
        size_radius: radius,
        ..StyleConfig::default()
    })
}
