//! Error types for the carecal ecosystem.

use thiserror::Error;

/// Rejected input to the event store.
///
/// This is the only failure the scheduling engine itself produces. Every
/// variant is caller-correctable, and a rejected save leaves the store as it was.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Title is required")]
    MissingTitle,

    #[error("Name is required")]
    MissingName,

    #[error("Date is required")]
    MissingDate,

    #[error("Time is required")]
    MissingTime,

    #[error("Invalid time '{0}'. Expected HH:MM (24-hour)")]
    InvalidTime(String),

    #[error("At least one reminder time is required")]
    NoTimes,

    #[error("At most {max} reminder times per day are allowed (got {got})")]
    TooManyTimes { max: usize, got: usize },

    #[error("Duration must be between 1 and {max} days (got {got})")]
    DurationOutOfRange { max: u32, got: u32 },

    #[error("Schedule runs past the last supported date")]
    DateOutOfRange,

    #[error("Unknown profile: {0}")]
    UnknownProfile(String),

    #[error("Unknown event: {0}")]
    UnknownEvent(String),
}

/// Errors that can occur in carecal operations.
#[derive(Error, Debug)]
pub enum CareCalError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Profile not found: {0}")]
    ProfileNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for carecal operations.
pub type CareCalResult<T> = Result<T, CareCalError>;
