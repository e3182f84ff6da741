use thiserror::Error;

/// Top-level error type used across the entire workspace.
#[derive(Debug, Error)]
pub enum PillError {
    #[error("config error: {0}")]
    Config(String),

    #[error("image error: {0}")]
    Image(String),

    #[error("render error: {0}")]
    Render(String),

    #[error("timer error: {0}")]
    Timer(String),

    #[error("widget error: {0}")]
    Widget(String),

    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

pub type Result<T, E = PillError> = std::result::Result<T, E>;
