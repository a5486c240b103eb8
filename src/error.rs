//! Error types for the game.
//!
//! Reaching game over is not an error, see [`crate::entities::Flow`]. The only
//! error the simulation itself produces is [`Error::Quit`].

use thiserror::Error;

/// The main error type
#[derive(Error, Debug)]
pub enum Error {
    /// The player asked to leave; ends the process loop
    #[error("game quit by player")]
    Quit,

    /// The sprite sheet descriptor is well-formed JSON but unusable
    #[error("invalid sprite sheet: {0}")]
    Sheet(String),

    /// Settings parsed but hold values the game cannot run with
    #[error("invalid settings: {0}")]
    Settings(String),

    /// A JSON document failed to parse
    #[error("failed to parse {what}: {source}")]
    Json {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// Reading a file from disk failed
    #[error("failed to read '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Creates a sprite sheet validation error
    pub fn sheet(reason: impl Into<String>) -> Self {
        Error::Sheet(reason.into())
    }

    /// Creates a settings validation error
    pub fn settings(reason: impl Into<String>) -> Self {
        Error::Settings(reason.into())
    }

    /// Wraps a JSON parse error with the name of the document
    pub fn json(what: &'static str, source: serde_json::Error) -> Self {
        Error::Json { what, source }
    }

    /// True for the player-initiated quit, which callers treat as a clean exit
    pub fn is_quit(&self) -> bool {
        matches!(self, Error::Quit)
    }
}

/// Result type alias for game operations
pub type Result<T> = std::result::Result<T, Error>;
