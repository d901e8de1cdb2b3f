// File: ./src/model/adapter.rs
//! Adapter between the raw date oracle and the rest of the engine.
//!
//! The oracle reports everything it sees. This layer insists on exactly one
//! non-recurring instant per phrase and tags the result with how much of it
//! the phrase actually specified.
use crate::error::DateError;
use crate::model::parser::{DateGroup, DateKind, DateOracle, NaturalDateParser};
use chrono::{DateTime, NaiveDateTime, Utc};
use strum::Display;

/// The component of an instant the oracle filled in by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Component {
    Date,
    Time,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Specificity {
    /// The phrase named both date and time-of-day (or is an ISO timestamp).
    Explicit,
    /// The phrase named one component; the oracle defaulted the other.
    PartiallyInferred(Component),
    /// An offset from the reference ("2 days later", "in 3 hours").
    PureRelative,
    /// A non-relative result whose flags say both, or neither, component was inferred.
    Inconsistent,
}

/// A phrase resolved to exactly one instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub text: String,
    pub instant: DateTime<Utc>,
    pub date_inferred: bool,
    pub time_inferred: bool,
    pub kind: DateKind,
    pub specificity: Specificity,
}

impl Candidate {
    fn from_group(group: DateGroup, instant: DateTime<Utc>) -> Self {
        let specificity = match (group.kind, group.date_inferred, group.time_inferred) {
            (DateKind::RelativeDate | DateKind::RelativeTime, _, _) => Specificity::PureRelative,
            (DateKind::Explicit, true, false) => Specificity::PartiallyInferred(Component::Date),
            (DateKind::Explicit, false, true) => Specificity::PartiallyInferred(Component::Time),
            (DateKind::Explicit, false, false) => Specificity::Explicit,
            (DateKind::Explicit, true, true) => Specificity::Inconsistent,
        };
        Self {
            text: group.text,
            instant,
            date_inferred: group.date_inferred,
            time_inferred: group.time_inferred,
            kind: group.kind,
            specificity,
        }
    }

    pub fn is_relative(&self) -> bool {
        self.specificity == Specificity::PureRelative
    }
}

#[derive(Debug, Clone, Default)]
pub struct DateResolver<O = NaturalDateParser> {
    oracle: O,
}

impl<O: DateOracle> DateResolver<O> {
    pub fn new(oracle: O) -> Self {
        Self { oracle }
    }

    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    /// Whether the text contains anything date-like at all. Used by the matcher
    /// to tell a real clause from an incidental keyword ("stand by me").
    pub fn is_resolvable(&self, text: &str, now: DateTime<Utc>) -> bool {
        !self.oracle.parse(text, now).is_empty()
    }

    pub fn resolve(&self, text: &str, now: DateTime<Utc>) -> Result<Candidate, DateError> {
        self.resolve_anchored(text, now)
    }

    /// Resolves `text` with `anchor` as the oracle's reference instant.
    pub fn resolve_anchored(
        &self,
        text: &str,
        anchor: DateTime<Utc>,
    ) -> Result<Candidate, DateError> {
        let mut groups = self.oracle.parse(text, anchor);
        log::debug!("Oracle found {} group(s) in '{}'", groups.len(), text);

        let group = match groups.len() {
            0 => return Err(DateError::NotADate(text.to_string())),
            1 => groups.remove(0),
            _ => return Err(DateError::AmbiguousDateTimes(text.to_string())),
        };
        if group.recurring {
            return Err(DateError::Recurring(text.to_string()));
        }
        let instant = match group.dates.as_slice() {
            [single] => *single,
            [] => return Err(DateError::NotADate(text.to_string())),
            _ => return Err(DateError::AmbiguousAlternatives(text.to_string())),
        };
        Ok(Candidate::from_group(group, instant))
    }

    pub fn wall_clock(&self, instant: DateTime<Utc>) -> NaiveDateTime {
        self.oracle.wall_clock(instant)
    }
}
