// File: ./src/model/item.rs
use crate::error::Result;
use crate::validate;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;
use strum::Display;

// --- DATE TYPES ---

/// A single instant by which a task is due.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Deadline {
    pub instant: DateTime<Utc>,
}

impl Deadline {
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self { instant }
    }
}

impl fmt::Display for Deadline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "by {}", self.instant.to_rfc3339())
    }
}

/// A pair of instants bounding a scheduled task. `start` is always strictly before `end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DateRange {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl DateRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
        validate::validate_duration(start, end)?;
        Ok(Self { start, end })
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "from {} to {}",
            self.start.to_rfc3339(),
            self.end.to_rfc3339()
        )
    }
}

/// The dates a task carries. A task holds at most one of a deadline or a range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Schedule {
    #[default]
    Floating,
    Due(Deadline),
    Span(DateRange),
}

impl Schedule {
    pub fn deadline(&self) -> Option<Deadline> {
        match self {
            Schedule::Due(d) => Some(*d),
            _ => None,
        }
    }

    pub fn range(&self) -> Option<DateRange> {
        match self {
            Schedule::Span(r) => Some(*r),
            _ => None,
        }
    }

    pub fn is_floating(&self) -> bool {
        matches!(self, Schedule::Floating)
    }
}

// --- EXTRACTION TYPES ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SpanKind {
    Deadline,
    Start,
    End,
}

/// A date-bearing substring found by the matcher.
///
/// `byte_range` covers only the value, relative to the text the matcher scanned at that stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedSpan {
    pub kind: SpanKind,
    pub text: String,
    pub byte_range: Range<usize>,
}
