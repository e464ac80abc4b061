//! Error types shared by the webhook client, config and CLI.

use thiserror::Error;

/// Result type for songmatch operations
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Both the song title and the artist were blank
    #[error("Please enter at least a song title or artist name")]
    EmptyQuery,

    /// The webhook answered with a non-success status
    #[error("Webhook responded with status {0}")]
    HttpStatus(u16),

    /// The request never got an HTTP answer (DNS, connect, timeout, ...)
    #[error("Connection failed: {0}")]
    Transport(String),

    /// A success status whose body is not JSON
    #[error("Malformed webhook response: {0}")]
    MalformedBody(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("Config write error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    /// The listen link could not be handed to a browser
    #[error("Could not open browser: {0}")]
    Browser(String),
}

impl From<ureq::Error> for Error {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::Status(code, _) => Error::HttpStatus(code),
            ureq::Error::Transport(t) => Error::Transport(t.to_string()),
        }
    }
}
