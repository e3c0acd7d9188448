use miette::{Diagnostic, Result};
use thiserror::Error;

/// Main error type for the application
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("Environment error: {0}")]
    #[diagnostic(code(shiftsync::environment))]
    Environment(String),

    #[error("Configuration error: {0}")]
    #[diagnostic(code(shiftsync::config))]
    Config(String),

    #[error("Source API error: {0}")]
    #[diagnostic(code(shiftsync::source_api))]
    SourceApi(String),

    #[error("Agenda API error: {0}")]
    #[diagnostic(code(shiftsync::agenda_api))]
    AgendaApi(String),

    #[error("Timestamp error: {0}")]
    #[diagnostic(code(shiftsync::timestamp))]
    Timestamp(String),

    #[error("HTTP request error: {0}")]
    #[diagnostic(code(shiftsync::http))]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    #[diagnostic(code(shiftsync::io))]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    #[diagnostic(code(shiftsync::serialization))]
    Serialization(String),
}

// Implement From for TOML deserialization errors
impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

/// Type alias for Result with our Error type
pub type SyncResult<T> = Result<T, Error>;

/// Helper to create environment errors
pub fn env_error(var: &str) -> Error {
    Error::Environment(format!("Missing environment variable: {}", var))
}

/// Helper to create source API errors
pub fn source_api_error(message: &str) -> Error {
    Error::SourceApi(message.to_string())
}

/// Helper to create agenda API errors
pub fn agenda_api_error(message: &str) -> Error {
    Error::AgendaApi(message.to_string())
}

/// Helper to create timestamp errors
pub fn timestamp_error(message: &str) -> Error {
    Error::Timestamp(message.to_string())
}
