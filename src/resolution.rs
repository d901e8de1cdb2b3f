// File: ./src/resolution.rs
//! Absolute vs. relative resolution of a single date phrase.
//!
//! New values are resolved against "now". Edits are resolved against the value
//! being replaced: a phrase that names only a time-of-day keeps the old date, a
//! phrase that names only a date keeps the old time. The oracle always fills in
//! both, so the named component is formatted back to text and re-resolved with
//! the old value as the oracle's reference.
use crate::error::{ExtractionError, Result};
use crate::model::adapter::{Component, DateResolver, Specificity};
use crate::model::parser::DateOracle;
use chrono::{DateTime, Utc};

/// The anchor a phrase is resolved against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionContext {
    Absolute {
        now: DateTime<Utc>,
    },
    Relative {
        previous: DateTime<Utc>,
        now: DateTime<Utc>,
    },
}

#[derive(Debug, Clone, Copy)]
pub struct ResolutionStrategy<'r, O> {
    resolver: &'r DateResolver<O>,
    allow_relative_for_new: bool,
}

impl<'r, O: DateOracle> ResolutionStrategy<'r, O> {
    pub fn new(resolver: &'r DateResolver<O>, allow_relative_for_new: bool) -> Self {
        Self {
            resolver,
            allow_relative_for_new,
        }
    }

    pub fn resolve(&self, text: &str, context: ResolutionContext) -> Result<DateTime<Utc>> {
        match context {
            ResolutionContext::Absolute { now } => self.resolve_absolute(text, now),
            ResolutionContext::Relative { previous, now } => {
                self.resolve_relative(text, previous, now)
            }
        }
    }

    pub fn resolve_absolute(&self, text: &str, now: DateTime<Utc>) -> Result<DateTime<Utc>> {
        let candidate = self.resolver.resolve(text, now)?;
        if candidate.is_relative() && !self.allow_relative_for_new {
            return Err(ExtractionError::RelativeNotAllowed(text.to_string()));
        }
        log::debug!("Resolved '{}' to {} (absolute)", text, candidate.instant);
        Ok(candidate.instant)
    }

    pub fn resolve_relative(
        &self,
        text: &str,
        previous: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<DateTime<Utc>> {
        let candidate = self.resolver.resolve(text, now)?;

        let (component_text, kept) = match candidate.specificity {
            // Offsets always count from the moment of the edit.
            Specificity::PureRelative => {
                log::debug!("Resolved '{}' to {} (offset from now)", text, candidate.instant);
                return Ok(candidate.instant);
            }
            Specificity::PartiallyInferred(Component::Date) => {
                let wall = self.resolver.wall_clock(candidate.instant);
                (wall.format("%H:%M:%S").to_string(), Component::Date)
            }
            Specificity::PartiallyInferred(Component::Time) => {
                let wall = self.resolver.wall_clock(candidate.instant);
                (wall.format("%Y-%m-%d").to_string(), Component::Time)
            }
            Specificity::Explicit | Specificity::Inconsistent => {
                log::error!(
                    "'{}' resolved with date_inferred={} time_inferred={}; cannot tell which component to keep",
                    text,
                    candidate.date_inferred,
                    candidate.time_inferred
                );
                return Err(ExtractionError::Internal(format!(
                    "cannot determine the component specified by '{}'",
                    text
                )));
            }
        };

        let second = self
            .resolver
            .resolve_anchored(&component_text, previous)
            .map_err(|e| {
                log::error!("Re-resolving '{}' against {} failed: {}", component_text, previous, e);
                ExtractionError::Internal(format!(
                    "re-resolving '{}' from '{}' failed",
                    component_text, text
                ))
            })?;
        log::debug!(
            "Resolved '{}' to {} (keeping the {} of {})",
            text,
            second.instant,
            kept,
            previous
        );
        Ok(second.instant)
    }
}
