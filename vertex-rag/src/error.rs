//! Error definitions for the client.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("HTTP client error: {source}")]
    HttpClient {
        #[from]
        source: reqwest::Error,
    },

    #[error("API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("Parse error: {message}")]
    Parse { message: String },

    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },

    #[error("IO error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("Timeout: {message}")]
    Timeout { message: String },

    #[error("Cancelled: {message}")]
    Cancelled { message: String },

    #[error("Auth error: {message}")]
    Auth { message: String },

    /// The operation finished, but the server recorded an error in it.
    #[error("Operation {name} failed (code {code}): {message}")]
    OperationFailed {
        name: String,
        code: i32,
        message: String,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
