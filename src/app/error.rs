use thiserror::Error;

use crate::config::ConfigError;

/// Failures raised by a persistence backend.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Migration error: {0}")]
    Migration(String),

    #[error("Store lock poisoned")]
    Poisoned,

    #[error("Corrupt cache row: {0}")]
    Corrupt(String),
}

/// Failures raised by an HTTP transport before a response was received.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("{0}")]
    Other(String),
}

/// Errors produced by loaders and the combinators built on top of them.
///
/// Composed pipelines never wrap or merge these: the last failing stage is
/// the one the caller sees.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The transport could not complete the request. The native transport
    /// error is logged and dropped.
    #[error("Connectivity error")]
    Connectivity,

    /// A response arrived but failed validation by its mapper.
    #[error("Invalid data")]
    InvalidData,

    #[error("Store failure: {0}")]
    Store(#[from] StoreError),

    /// The local image lookup succeeded but had no entry for the URL.
    #[error("Not found")]
    NotFound,

    /// The local image lookup itself failed.
    #[error("Failed to read local data")]
    Failed,

    /// A background task ended without producing a result.
    #[error("Background load interrupted")]
    Interrupted,
}

pub type LoadResult<T> = std::result::Result<T, LoadError>;

#[derive(Error, Debug)]
pub enum TributaryError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Load error: {0}")]
    Load(#[from] LoadError),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, TributaryError>;
