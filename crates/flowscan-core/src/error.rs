//! Error types for flowscan-core

use std::fmt;

/// Result type alias for flowscan operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for flowscan operations
#[derive(Debug)]
pub enum Error {
    /// Invalid configuration (missing credential, bad organization name)
    Config(String),

    /// Exclusion pattern failed to compile
    Pattern(String),

    /// Transport/network failure
    Http(String),

    /// Non-success HTTP status, message carries the status text
    Status(String),

    /// Response body did not decode into the expected shape
    Decode(String),

    /// Runtime error (Tokio)
    Runtime(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(msg) => write!(f, "Configuration error: {}", msg),
            Error::Pattern(msg) => write!(f, "Pattern error: {}", msg),
            Error::Http(msg) => write!(f, "HTTP error: {}", msg),
            Error::Status(msg) => write!(f, "Status error: {}", msg),
            Error::Decode(msg) => write!(f, "Decode error: {}", msg),
            Error::Runtime(msg) => write!(f, "Runtime error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Http(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Decode(err.to_string())
    }
}

impl From<regex::Error> for Error {
    fn from(err: regex::Error) -> Self {
        Error::Pattern(err.to_string())
    }
}

/// Fieldless error category for zero-cost pattern matching.
///
/// Single byte representation (`#[repr(u8)]`), `Copy`, no allocations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ErrorKind {
    /// Configuration error
    Config,
    /// Exclusion pattern error
    Pattern,
    /// Transport/network error
    Http,
    /// Non-success HTTP status
    Status,
    /// Response decode error
    Decode,
    /// Runtime error
    Runtime,
}

impl Error {
    /// Get the error kind, a `Copy` enum with no allocation.
    #[inline]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Error::Config(_) => ErrorKind::Config,
            Error::Pattern(_) => ErrorKind::Pattern,
            Error::Http(_) => ErrorKind::Http,
            Error::Status(_) => ErrorKind::Status,
            Error::Decode(_) => ErrorKind::Decode,
            Error::Runtime(_) => ErrorKind::Runtime,
        }
    }

    /// Borrow the error message without allocating.
    #[inline]
    pub fn message(&self) -> &str {
        match self {
            Error::Config(msg)
            | Error::Pattern(msg)
            | Error::Http(msg)
            | Error::Status(msg)
            | Error::Decode(msg)
            | Error::Runtime(msg) => msg,
        }
    }
}
