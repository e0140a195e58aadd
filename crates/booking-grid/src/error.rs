//! Error types for booking-grid operations.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GridError {
    #[error("Invalid month: {year}-{month}")]
    InvalidMonth { year: i32, month: u32 },

    #[error("Invalid blocked facts: {0}")]
    InvalidFacts(String),

    #[error("Invalid time slot catalogue: {0}")]
    InvalidCatalogue(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid weekday: {0}")]
    InvalidWeekday(String),

    /// The grid does not tile into whole weeks or its in-month days are not
    /// contiguous. Always a programming defect.
    #[error("Grid structure violated: {0}")]
    StructuralViolation(String),

    #[error("Config parse error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure of an external fetch. Never surfaced to the grid: the caller keeps
/// its fail-safe "not loaded" state instead.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Data unavailable: {0}")]
    Unavailable(String),

    #[error("No data for the requested key")]
    NotFound,

    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GridError>;
