use thiserror::Error;

/// Top-level error type used across the entire application.
#[derive(Debug, Error)]
pub enum PulseError {
    #[error("config error: {0}")]
    Config(String),

    #[error("stream error: {0}")]
    Stream(String),

    #[error("render error: {0}")]
    Render(String),

    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

pub type Result<T, E = PulseError> = std::result::Result<T, E>;
