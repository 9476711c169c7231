//! Player error types.

use lovenote_narrative::domain::script::ScriptError;
use thiserror::Error;

/// Startup and runtime errors for the terminal player.
#[derive(Debug, Error)]
pub enum PlayerError {
    /// An environment variable is invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// The narrative script failed to load or validate.
    #[error(transparent)]
    Script(#[from] ScriptError),

    /// The HTTP client could not be built.
    #[error("http client error: {0}")]
    Http(#[from] reqwest::Error),

    /// Terminal or log file I/O failed.
    #[error("terminal error: {0}")]
    Io(#[from] std::io::Error),
}
