use std::path::PathBuf;

use thiserror::Error;

/// A completion fraction outside `[0.0, 1.0]` (or not finite).
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("percent {0} is outside [0.0, 1.0]")]
pub struct InvalidPercent(pub f64);

/// Errors raised while loading or validating the shell configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("toml error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Errors surfaced by the adapter handle itself.
///
/// Load failures reported by the page driver are never errors here; they
/// become [`crate::LoadState::Error`].
#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("load state adapter is closed")]
    Closed,

    #[error("load state worker failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}
