use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while writing the chore or team documents.
///
/// Reads never fail: a missing or unreadable document is treated as empty.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to serialize records: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Errors surfaced by commands. The recurrence engine itself never fails.
#[derive(Error, Debug)]
pub enum ChoreError {
    #[error("Chore '{0}' not found.")]
    ChoreNotFound(String),

    #[error("Team member '{0}' not found.")]
    MemberNotFound(String),

    #[error("Id prefix '{0}' matches more than one record.")]
    AmbiguousId(String),

    #[error("Invalid date '{input}': {source}. Use YYYY-MM-DD.")]
    InvalidDate {
        input: String,
        source: chrono::ParseError,
    },

    #[error("Invalid month '{0}'. Use YYYY-MM.")]
    InvalidMonth(String),

    #[error("Invalid weekday '{0}'. Use sun..sat or 0..6.")]
    InvalidWeekday(String),

    #[error("Unknown {kind} '{value}'.")]
    UnknownValue { kind: &'static str, value: String },

    #[error("Interval must be between 1 and 30, got {0}.")]
    InvalidInterval(u32),

    #[error("Title must not be empty.")]
    EmptyTitle,

    #[error("Name must not be empty.")]
    EmptyName,

    #[error(transparent)]
    Storage(#[from] StorageError),
}

pub type Result<T> = std::result::Result<T, ChoreError>;
