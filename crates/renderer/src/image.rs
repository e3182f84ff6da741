use pillbar_core::{PillError, Result};
use std::path::Path;
use tiny_skia::Pixmap;

/// Decoded foreground bitmap for Line-mode bars.
///
/// Owns its pixel buffer; dropping the value releases it.
#[derive(Clone)]
pub struct ForegroundImage {
    pixmap: Pixmap,
}

impl ForegroundImage {
    /// Decode a PNG from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let pixmap = Pixmap::load_png(path)
            .map_err(|e| PillError::Image(format!("cannot decode '{}': {e}", path.display())))?;
        Ok(Self { pixmap })
    }

    pub fn from_pixmap(pixmap: Pixmap) -> Self {
        Self { pixmap }
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }
}

impl std::fmt::Debug for ForegroundImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ForegroundImage")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}
