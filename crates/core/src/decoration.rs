use serde::{Deserialize, Serialize};

/// How the progress bar decorates its fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DecorationType {
    /// Discrete notches punched through a masked, additive fill.
    #[default]
    Tick,
    /// Continuous fill, optionally over a foreground image.
    Line,
}

impl DecorationType {
    /// Stable numeric id used by style sheets that store enums as integers.
    pub const fn id(self) -> i32 {
        match self {
            Self::Tick => 0,
            Self::Line => 1,
        }
    }

    /// Decode a numeric id.  Unknown ids fall back to [`DecorationType::Tick`].
    pub fn from_id(id: i32) -> Self {
        match id {
            1 => Self::Line,
            _ => Self::Tick,
        }
    }
}
