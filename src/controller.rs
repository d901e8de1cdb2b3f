// File: ./src/controller.rs
//! Extraction pipeline for task commands.
//! This is the single entry point the command layer calls for both "add" and "edit".
//! Each call is a pure function of the argument text, the invocation instant and,
//! for edits, the task's current schedule.
use crate::config::Config;
use crate::error::{ExtractionError, Result};
use crate::model::adapter::DateResolver;
use crate::model::item::{DateRange, Deadline, ExtractedSpan, Schedule, SpanKind};
use crate::model::matcher::{self, normalize_space};
use crate::model::parser::{DateOracle, NaturalDateParser, Zone};
use crate::resolution::{ResolutionContext, ResolutionStrategy};
use crate::validate::validate_not_past;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Result of extracting an "add" command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddExtraction {
    pub name: String,
    pub schedule: Schedule,
    pub tags: Vec<String>,
    pub spans: Vec<ExtractedSpan>,
}

/// Result of extracting an "edit" command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditExtraction {
    /// 1-based position of the task in the displayed list.
    pub index: usize,
    pub name: Option<String>,
    /// `None` when the edit does not touch the dates.
    pub schedule: Option<Schedule>,
    pub tags: Vec<String>,
    pub spans: Vec<ExtractedSpan>,
    /// A date field that hit an internal error and was left unchanged.
    pub aborted: Option<AbortedField>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbortedField {
    pub kind: SpanKind,
    pub error: ExtractionError,
}

/// Flat, serializable outcome of one extraction, as handed to the command layer.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ExtractionReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
    pub residual_name: String,
    pub deadline: Option<DateTime<Utc>>,
    pub range: Option<DateRange>,
    pub tags: Vec<String>,
    pub error: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub internal_error: bool,
    /// Field the error applies to when the rest of the command still went through.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aborted_field: Option<SpanKind>,
}

impl ExtractionReport {
    fn schedule_fields(schedule: Schedule) -> (Option<DateTime<Utc>>, Option<DateRange>) {
        (schedule.deadline().map(|d| d.instant), schedule.range())
    }

    fn failed(args: &str, error: &ExtractionError) -> Self {
        Self {
            residual_name: args.to_string(),
            error: Some(error.to_string()),
            internal_error: error.is_internal(),
            ..Default::default()
        }
    }
}

impl From<AddExtraction> for ExtractionReport {
    fn from(add: AddExtraction) -> Self {
        let (deadline, range) = Self::schedule_fields(add.schedule);
        Self {
            index: None,
            residual_name: add.name,
            deadline,
            range,
            tags: add.tags,
            error: None,
            internal_error: false,
            aborted_field: None,
        }
    }
}

impl From<EditExtraction> for ExtractionReport {
    fn from(edit: EditExtraction) -> Self {
        let (deadline, range) = edit
            .schedule
            .map(Self::schedule_fields)
            .unwrap_or_default();
        Self {
            index: Some(edit.index),
            residual_name: edit.name.unwrap_or_default(),
            deadline,
            range,
            tags: edit.tags,
            error: edit.aborted.as_ref().map(|a| a.error.to_string()),
            internal_error: edit.aborted.is_some(),
            aborted_field: edit.aborted.map(|a| a.kind),
        }
    }
}

/// Spans found in one command, plus whatever text was left over.
#[derive(Debug, Default)]
struct Segments {
    deadline: Option<ExtractedSpan>,
    start: Option<ExtractedSpan>,
    end: Option<ExtractedSpan>,
    residual: String,
}

/// Failure while resolving the dates of an edit, tagged with the field when known.
struct FieldFailure {
    kind: Option<SpanKind>,
    error: ExtractionError,
}

impl From<ExtractionError> for FieldFailure {
    fn from(error: ExtractionError) -> Self {
        Self { kind: None, error }
    }
}

impl Segments {
    fn spans(&self) -> Vec<ExtractedSpan> {
        [&self.start, &self.end, &self.deadline]
            .into_iter()
            .flatten()
            .cloned()
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct Extractor<O = NaturalDateParser> {
    resolver: DateResolver<O>,
    allow_relative_for_new: bool,
}

impl Extractor<NaturalDateParser> {
    /// Builds an extractor reading phrases in the configured zone.
    pub fn from_config(config: &Config) -> Self {
        let zone = config.zone().unwrap_or_else(|| {
            log::warn!(
                "utc_offset_minutes {:?} out of range, using the system zone",
                config.utc_offset_minutes
            );
            Zone::Local
        });
        Self::new(NaturalDateParser::new(zone)).with_relative_for_new(config.allow_relative_for_new)
    }
}

impl<O: DateOracle> Extractor<O> {
    pub fn new(oracle: O) -> Self {
        Self {
            resolver: DateResolver::new(oracle),
            allow_relative_for_new: true,
        }
    }

    pub fn with_relative_for_new(mut self, allow: bool) -> Self {
        self.allow_relative_for_new = allow;
        self
    }

    pub fn resolver(&self) -> &DateResolver<O> {
        &self.resolver
    }

    pub fn strategy(&self) -> ResolutionStrategy<'_, O> {
        ResolutionStrategy::new(&self.resolver, self.allow_relative_for_new)
    }

    /// Extracts the name, dates and tags of a new task.
    ///
    /// Flow:
    /// 1. A `from … to …` clause, if present and date-like, must resolve to a valid
    ///    future range. A `by …` clause before or after it is a conflict.
    /// 2. Otherwise a `by …` clause, if present and date-like, must resolve to a
    ///    future deadline.
    /// 3. Otherwise the task is floating and the text is returned as the name.
    pub fn extract_add(&self, args: &str, now: DateTime<Utc>) -> Result<AddExtraction> {
        let is_date = |text: &str| self.resolver.is_resolvable(text, now);
        let strategy = self.strategy();
        let absolute = ResolutionContext::Absolute { now };

        // A trailing deadline would otherwise be swallowed by the lazy end value.
        if let Some(d) = matcher::match_deadline(args, is_date)
            && matcher::match_start_end(&d.residual, is_date).is_some()
        {
            log::debug!("Rejecting deadline '{}' after a range", d.span.text);
            return Err(ExtractionError::BothDeadlineAndRangeSupplied);
        }

        let (schedule, segments) = if let Some(m) = matcher::match_start_end(args, is_date) {
            let start = self.resolve_matched(&strategy, &m.start, absolute)?;
            let end = self.resolve_matched(&strategy, &m.end, absolute)?;
            validate_not_past(start, now)?;
            let range = DateRange::new(start, end)?;

            if let Some(extra) = matcher::match_deadline(&m.residual, is_date) {
                log::debug!("Rejecting deadline '{}' next to a range", extra.span.text);
                return Err(ExtractionError::BothDeadlineAndRangeSupplied);
            }
            let segments = Segments {
                start: Some(m.start),
                end: Some(m.end),
                residual: m.residual,
                ..Default::default()
            };
            (Schedule::Span(range), segments)
        } else if let Some(m) = matcher::match_deadline(args, is_date) {
            let instant = self.resolve_matched(&strategy, &m.span, absolute)?;
            validate_not_past(instant, now)?;
            let segments = Segments {
                deadline: Some(m.span),
                residual: m.residual,
                ..Default::default()
            };
            (Schedule::Due(Deadline::new(instant)), segments)
        } else {
            log::debug!("No date clause in '{}'", args);
            let segments = Segments {
                residual: args.to_string(),
                ..Default::default()
            };
            (Schedule::Floating, segments)
        };

        let spans = segments.spans();
        let (name, tags) = matcher::strip_tags(&segments.residual);
        Ok(AddExtraction {
            name,
            schedule,
            tags,
            spans,
        })
    }

    /// Extracts the index, new name, new dates and tags of an edit.
    ///
    /// `current` is the task's schedule before the edit. Phrases that replace an
    /// existing value are resolved against that value; see
    /// [`ResolutionStrategy::resolve_relative`].
    ///
    /// An internal error while resolving a date leaves the dates unchanged and is
    /// returned in [`EditExtraction::aborted`]; name and tags still apply.
    pub fn extract_edit(
        &self,
        args: &str,
        current: &Schedule,
        now: DateTime<Utc>,
    ) -> Result<EditExtraction> {
        let segments = self.segment_edit(args, now);
        let spans = segments.spans();
        let (rest, tags) = matcher::strip_tags(&segments.residual);
        let rest = normalize_space(&rest);

        let (index_word, name) = match rest.split_once(' ') {
            Some((first, name)) => (first, Some(name.to_string())),
            None => (rest.as_str(), None),
        };
        let index = match index_word.parse::<usize>() {
            Ok(i) if i > 0 => i,
            _ => return Err(ExtractionError::InvalidIndex(index_word.to_string())),
        };

        let (schedule, aborted) = match self.edit_schedule(&segments, current, now) {
            Ok(schedule) => (schedule, None),
            Err(FieldFailure {
                kind: Some(kind),
                error,
            }) if error.is_internal() => {
                log::warn!("Leaving the {} of task {} unchanged: {}", kind, index, error);
                (None, Some(AbortedField { kind, error }))
            }
            Err(failure) => return Err(failure.error),
        };
        if name.is_none() && schedule.is_none() && tags.is_empty() {
            return Err(aborted.map_or(ExtractionError::NothingToEdit, |a| a.error));
        }

        Ok(EditExtraction {
            index,
            name,
            schedule,
            tags,
            spans,
            aborted,
        })
    }

    /// Runs [`Self::extract_add`] and flattens the outcome, errors included.
    pub fn report_add(&self, args: &str, now: DateTime<Utc>) -> ExtractionReport {
        match self.extract_add(args, now) {
            Ok(add) => add.into(),
            Err(e) => ExtractionReport::failed(args, &e),
        }
    }

    /// Runs [`Self::extract_edit`] and flattens the outcome, errors included.
    pub fn report_edit(
        &self,
        args: &str,
        current: &Schedule,
        now: DateTime<Utc>,
    ) -> ExtractionReport {
        match self.extract_edit(args, current, now) {
            Ok(edit) => edit.into(),
            Err(e) => ExtractionReport::failed(args, &e),
        }
    }

    /// Edit segmentation: a deadline, then a full range, else each side alone.
    /// Each stage scans what the previous one left behind.
    fn segment_edit(&self, args: &str, now: DateTime<Utc>) -> Segments {
        let is_date = |text: &str| self.resolver.is_resolvable(text, now);
        let mut segments = Segments {
            residual: args.to_string(),
            ..Default::default()
        };

        if let Some(m) = matcher::match_deadline(&segments.residual, is_date) {
            segments.deadline = Some(m.span);
            segments.residual = m.residual;
        }
        if let Some(m) = matcher::match_start_end(&segments.residual, is_date) {
            segments.start = Some(m.start);
            segments.end = Some(m.end);
            segments.residual = m.residual;
        } else {
            if let Some(m) = matcher::match_start_only(&segments.residual, is_date) {
                segments.start = Some(m.span);
                segments.residual = m.residual;
            }
            if let Some(m) = matcher::match_end_only(&segments.residual, is_date) {
                segments.end = Some(m.span);
                segments.residual = m.residual;
            }
        }
        segments
    }

    fn edit_schedule(
        &self,
        segments: &Segments,
        current: &Schedule,
        now: DateTime<Utc>,
    ) -> std::result::Result<Option<Schedule>, FieldFailure> {
        let strategy = self.strategy();
        let has_range_text = segments.start.is_some() || segments.end.is_some();

        if segments.deadline.is_some() && (has_range_text || current.range().is_some()) {
            return Err(ExtractionError::BothDeadlineAndRangeSupplied.into());
        }
        if has_range_text && current.deadline().is_some() {
            return Err(ExtractionError::BothDeadlineAndRangeSupplied.into());
        }

        if let Some(span) = &segments.deadline {
            let context = match current.deadline() {
                Some(previous) => ResolutionContext::Relative {
                    previous: previous.instant,
                    now,
                },
                None => ResolutionContext::Absolute { now },
            };
            let instant = self.resolve_field(&strategy, span, context)?;
            validate_not_past(instant, now)?;
            return Ok(Some(Schedule::Due(Deadline::new(instant))));
        }

        let previous = current.range();
        let range = match (&segments.start, &segments.end, previous) {
            (None, None, _) => return Ok(None),
            (Some(start), Some(end), None) => {
                let absolute = ResolutionContext::Absolute { now };
                let start = self.resolve_field(&strategy, start, absolute)?;
                let end = self.resolve_field(&strategy, end, absolute)?;
                validate_not_past(start, now)?;
                validate_not_past(end, now)?;
                DateRange::new(start, end)?
            }
            (Some(_), None, None) | (None, Some(_), None) => {
                return Err(ExtractionError::MissingPairedField.into());
            }
            (start_span, end_span, Some(previous)) => {
                let start = match start_span {
                    Some(span) => {
                        let context = ResolutionContext::Relative {
                            previous: previous.start(),
                            now,
                        };
                        let start = self.resolve_field(&strategy, span, context)?;
                        validate_not_past(start, now)?;
                        start
                    }
                    None => previous.start(),
                };
                let end = match end_span {
                    Some(span) => {
                        let context = ResolutionContext::Relative {
                            previous: previous.end(),
                            now,
                        };
                        let end = self.resolve_field(&strategy, span, context)?;
                        validate_not_past(end, now)?;
                        end
                    }
                    None => previous.end(),
                };
                DateRange::new(start, end)?
            }
        };
        Ok(Some(Schedule::Span(range)))
    }

    fn resolve_field(
        &self,
        strategy: &ResolutionStrategy<'_, O>,
        span: &ExtractedSpan,
        context: ResolutionContext,
    ) -> std::result::Result<DateTime<Utc>, FieldFailure> {
        self.resolve_matched(strategy, span, context)
            .map_err(|error| FieldFailure {
                kind: Some(span.kind),
                error,
            })
    }

    /// Resolves a span that already passed the matcher's pre-check. A "not a
    /// date" outcome at this point means the oracle contradicted itself.
    fn resolve_matched(
        &self,
        strategy: &ResolutionStrategy<'_, O>,
        span: &ExtractedSpan,
        context: ResolutionContext,
    ) -> Result<DateTime<Utc>> {
        strategy.resolve(&span.text, context).map_err(|e| match e {
            ExtractionError::NotADate(text) => {
                log::error!("'{}' passed the date pre-check but resolved to nothing", text);
                ExtractionError::Internal(format!("'{}' looked like a date but is not", text))
            }
            other => {
                log::debug!("Resolving {} '{}' failed: {}", span.kind, span.text, other);
                other
            }
        })
    }
}
