pub mod schema;
pub mod watcher;

pub use schema::{PillConfig, StyleConfig, WindowConfig};
pub use watcher::ConfigWatcher;

use pillbar_core::{PillError, Result};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "PILLBAR_CONFIG";

/// Parse and validate `pillbar.toml`.
///
/// A missing file is not an error: both bars fall back to their built-in
/// presets.  Anything that fails to parse or describes an unusable bar is
/// reported as [`PillError::Config`] so a live reload can keep the previous
/// style.
pub fn load(path: impl AsRef<Path>) -> Result<PillConfig> {
    let path = path.as_ref();
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!(path = %path.display(), "no config file; using built-in presets");
            return Ok(PillConfig::default());
        }
        Err(e) => {
            return Err(PillError::Config(format!("cannot read '{}': {e}", path.display())))
        }
    };

    let config: PillConfig = toml::from_str(&raw)
        .map_err(|e| PillError::Config(format!("{}: {e}", path.display())))?;
    config
        .validate()
        .map_err(|e| PillError::Config(format!("{}: {e}", path.display())))?;

    tracing::debug!(path = %path.display(), "config loaded");
    Ok(config)
}

/// Where the demo looks for its config: `$PILLBAR_CONFIG` if set, otherwise
/// `pillbar/pillbar.toml` under the XDG config directory.
pub fn default_path() -> PathBuf {
    resolve_path(
        std::env::var_os(CONFIG_ENV),
        std::env::var_os("XDG_CONFIG_HOME"),
        std::env::var_os("HOME"),
    )
}

fn resolve_path(
    explicit: Option<OsString>,
    xdg_config_home: Option<OsString>,
    home: Option<OsString>,
) -> PathBuf {
    if let Some(path) = explicit.filter(|p| !p.is_empty()) {
        return PathBuf::from(path);
    }
    let config_dir = match xdg_config_home.filter(|p| !p.is_empty()) {
        Some(dir) => PathBuf::from(dir),
        None => home.map(PathBuf::from).unwrap_or_default().join(".config"),
    };
    config_dir.join("pillbar").join("pillbar.toml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pillbar_core::DecorationType;
    use std::io::Write;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load(dir.path().join("nope.toml")).unwrap();
        assert_eq!(cfg.window.width, 300);
        assert_eq!(cfg.tick.decoration_type, DecorationType::Tick);
        assert_eq!(cfg.line.decoration_type, DecorationType::Line);
    }

    #[test]
    fn partial_file_keeps_defaults_for_the_rest() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r##"
[window]
width = 420

[line]
decoration_type  = "line"
color_foreground = "#ff8800"
size_border      = 3.5
image_foreground = "/tmp/stripes.png"
"##
        )
        .unwrap();

        let cfg = load(file.path()).unwrap();
        assert_eq!(cfg.window.width, 420);
        assert_eq!(cfg.window.height, 24);
        assert_eq!(cfg.line.color_foreground, "#ff8800");
        assert_eq!(cfg.line.color_background, "#CCCCCC");
        assert_eq!(cfg.line.size_border, 3.5);
        assert_eq!(cfg.line.image_foreground, Some(PathBuf::from("/tmp/stripes.png")));
        // `[tick]` absent entirely → the preset from `PillConfig::default()`.
        assert_eq!(cfg.tick.size_border, 2.0);
    }

    #[test]
    fn malformed_file_is_a_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[tick]\nsize_border = \"wide\"").unwrap();

        match load(file.path()) {
            Err(PillError::Config(msg)) => {
                assert!(msg.contains(&file.path().display().to_string()))
            }
            other => panic!("expected config error, got {other:?}"),
        }
    }

    #[test]
    fn unknown_decoration_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[tick]\ndecoration_type = \"dots\"").unwrap();
        assert!(load(file.path()).is_err());
    }

    #[test]
    fn zero_sized_window_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[window]\nwidth = 0").unwrap();

        match load(file.path()) {
            Err(PillError::Config(msg)) => assert!(msg.contains("window")),
            other => panic!("expected config error, got {other:?}"),
        }
    }

    #[test]
    fn negative_border_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[line]\nsize_border = -1.0").unwrap();

        match load(file.path()) {
            Err(PillError::Config(msg)) => assert!(msg.contains("[line]")),
            other => panic!("expected config error, got {other:?}"),
        }
    }

    #[test]
    fn explicit_path_wins_over_xdg() {
        let path = resolve_path(
            Some("/etc/pill.toml".into()),
            Some("/xdg".into()),
            Some("/home/u".into()),
        );
        assert_eq!(path, PathBuf::from("/etc/pill.toml"));
    }

    #[test]
    fn empty_variables_fall_through_to_home() {
        let path = resolve_path(Some("".into()), Some("".into()), Some("/home/u".into()));
        assert_eq!(path, PathBuf::from("/home/u/.config/pillbar/pillbar.toml"));

        let path = resolve_path(None, Some("/xdg".into()), None);
        assert_eq!(path, PathBuf::from("/xdg/pillbar/pillbar.toml"));
    }
}
