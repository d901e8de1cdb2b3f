// File: ./src/error.rs
//! Error types surfaced by date extraction.
//!
//! `DateError` is what the resolver adapter reports for a single phrase.
//! `ExtractionError` is what a whole add/edit extraction reports to the command layer.
use chrono::{DateTime, Utc};
use thiserror::Error;

fn fmt_instant(dt: &DateTime<Utc>) -> String {
    dt.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

/// Failure to turn one phrase into exactly one instant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateError {
    #[error("{0} is not a valid date/time.")]
    NotADate(String),

    #[error("Multiple dates found when expecting only one date from {0}")]
    AmbiguousDateTimes(String),

    #[error("Date-time alternatives found in {0}, please only enter one date")]
    AmbiguousAlternatives(String),

    #[error("Recurring date-times such as {0} are not supported")]
    Recurring(String),
}

impl DateError {
    /// The offending raw text.
    pub fn text(&self) -> &str {
        match self {
            DateError::NotADate(t)
            | DateError::AmbiguousDateTimes(t)
            | DateError::AmbiguousAlternatives(t)
            | DateError::Recurring(t) => t,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionError {
    #[error("{0} is not a valid date/time.")]
    NotADate(String),

    #[error("Multiple dates found when expecting only one date from {0}")]
    AmbiguousDateTimes(String),

    #[error("Date-time alternatives found in {0}, please only enter one date")]
    AmbiguousAlternatives(String),

    #[error("Recurring date-times such as {0} are not supported")]
    Recurring(String),

    #[error("Relative date-times such as {0} are not allowed for new tasks")]
    RelativeNotAllowed(String),

    #[error("The date-time {} is in the past", fmt_instant(.0))]
    PastDateTime(DateTime<Utc>),

    #[error(
        "The end date-time {} must be after the start date-time {}",
        fmt_instant(.1),
        fmt_instant(.0)
    )]
    InvalidDuration(DateTime<Utc>, DateTime<Utc>),

    #[error("Must have both start and end date-time")]
    MissingPairedField,

    #[error("A task cannot have both a deadline and a start and end date-time")]
    BothDeadlineAndRangeSupplied,

    #[error("Invalid task index: {0}")]
    InvalidIndex(String),

    #[error("At least one field to edit must be provided.")]
    NothingToEdit,

    #[error("Internal error while resolving dates: {0}")]
    Internal(String),
}

impl ExtractionError {
    /// True for invariant violations inside the engine, as opposed to bad user input.
    pub fn is_internal(&self) -> bool {
        matches!(self, ExtractionError::Internal(_))
    }
}

impl From<DateError> for ExtractionError {
    fn from(e: DateError) -> Self {
        match e {
            DateError::NotADate(t) => ExtractionError::NotADate(t),
            DateError::AmbiguousDateTimes(t) => ExtractionError::AmbiguousDateTimes(t),
            DateError::AmbiguousAlternatives(t) => ExtractionError::AmbiguousAlternatives(t),
            DateError::Recurring(t) => ExtractionError::Recurring(t),
        }
    }
}

pub type Result<T> = std::result::Result<T, ExtractionError>;
