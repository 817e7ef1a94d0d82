//! Error types for content discovery, collections and builders

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading content or building outputs from it
#[derive(Error, Debug)]
pub enum Error {
    /// A required configuration value is absent
    #[error("missing required configuration value: {0}")]
    MissingConfig(&'static str),

    /// A content file does not carry the metadata block of its collection
    #[error("missing `{export}` metadata in {}", path.display())]
    MissingMetadata { path: PathBuf, export: &'static str },

    /// The metadata block exists but does not match the collection's shape
    #[error("invalid `{export}` metadata in {}: {message}", path.display())]
    InvalidMetadata {
        path: PathBuf,
        export: &'static str,
        message: String,
    },

    /// The `date` field is not an ISO-8601 date
    #[error("invalid date `{value}` in {}", path.display())]
    InvalidDate { path: PathBuf, value: String },

    /// A caller passed an argument outside the accepted range
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// No entity with the requested slug exists
    #[error("{kind} not found: {slug}")]
    NotFound { kind: &'static str, slug: String },

    /// A feed item lacks a field the feed requires
    #[error("feed item `{slug}` has no {field}")]
    FeedContract { slug: String, field: &'static str },

    #[error("invalid glob pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("background task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl Error {
    /// Shorthand for a `NotFound` error
    pub fn not_found(kind: &'static str, slug: impl Into<String>) -> Self {
        Error::NotFound {
            kind,
            slug: slug.into(),
        }
    }

    /// Whether this is the recoverable "unknown slug" outcome
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }
}

/// Result alias used across the library
pub type Result<T> = std::result::Result<T, Error>;
