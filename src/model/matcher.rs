// File: ./src/model/matcher.rs
// Locates the date-bearing spans of a task command.
//
// Grammar recognised (keywords must be whitespace-bounded):
//   <name> from <start> to <end> [t/<tag>]*
//   <name> by <deadline> [t/<tag>]*
//   <name> from <start> [t/<tag>]*     (edit only)
//   <name> to <end> [t/<tag>]*         (edit only)
//
// The text before the keyword is matched greedily, so an incidental "from" or "by"
// inside the task name is skipped in favour of the last one. Value captures are
// lazy and stop at the trailing tag list. A structural match whose value fails the
// caller's date pre-check counts as no match.

use crate::model::item::{ExtractedSpan, SpanKind};
use regex::{Captures, Regex};
use std::sync::LazyLock;

static START_END: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<pre>(?:.*\s)?)from\s(?P<start>.+)\sto\s(?P<end>.+?)(?P<tags>(?:\st/[^/]+)*)$")
        .expect("start/end pattern")
});

static DEADLINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<pre>(?:.*\s)?)by\s(?P<deadline>.+?)(?P<tags>(?:\st/[^/]+)*)$")
        .expect("deadline pattern")
});

static START_ONLY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<pre>(?:.*\s)?)from\s(?P<start>.+?)(?P<tags>(?:\st/[^/]+)*)$")
        .expect("start pattern")
});

static END_ONLY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<pre>(?:.*\s)?)to\s(?P<end>.+?)(?P<tags>(?:\st/[^/]+)*)$")
        .expect("end pattern")
});

static TAG_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<body>.*?)(?P<tags>(?:(?:^|\s)t/[^/]+)*)$").expect("tag suffix pattern")
});

static TAG_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|\s)t/").expect("tag marker pattern"));

/// A `from … to …` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeMatch {
    pub start: ExtractedSpan,
    pub end: ExtractedSpan,
    /// The scanned text with the clause removed. Tags are left in place.
    pub residual: String,
}

/// A single `by …`, `from …` or `to …` clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SingleMatch {
    pub span: ExtractedSpan,
    pub residual: String,
}

pub fn match_start_end(text: &str, is_date: impl Fn(&str) -> bool) -> Option<RangeMatch> {
    let caps = START_END.captures(text)?;
    let start = value_span(&caps, "start", SpanKind::Start)?;
    let end = value_span(&caps, "end", SpanKind::End)?;
    if !is_date(start.text.as_str()) || !is_date(end.text.as_str()) {
        log::debug!(
            "Ignoring from/to clause '{}' / '{}': no date content",
            start.text,
            end.text
        );
        return None;
    }
    Some(RangeMatch {
        start,
        end,
        residual: residual_of(&caps),
    })
}

pub fn match_deadline(text: &str, is_date: impl Fn(&str) -> bool) -> Option<SingleMatch> {
    match_single(&DEADLINE, "deadline", SpanKind::Deadline, text, is_date)
}

pub fn match_start_only(text: &str, is_date: impl Fn(&str) -> bool) -> Option<SingleMatch> {
    match_single(&START_ONLY, "start", SpanKind::Start, text, is_date)
}

pub fn match_end_only(text: &str, is_date: impl Fn(&str) -> bool) -> Option<SingleMatch> {
    match_single(&END_ONLY, "end", SpanKind::End, text, is_date)
}

fn match_single(
    pattern: &Regex,
    group: &str,
    kind: SpanKind,
    text: &str,
    is_date: impl Fn(&str) -> bool,
) -> Option<SingleMatch> {
    let caps = pattern.captures(text)?;
    let span = value_span(&caps, group, kind)?;
    if !is_date(span.text.as_str()) {
        log::debug!("Ignoring {} clause '{}': no date content", kind, span.text);
        return None;
    }
    Some(SingleMatch {
        span,
        residual: residual_of(&caps),
    })
}

fn value_span(caps: &Captures, group: &str, kind: SpanKind) -> Option<ExtractedSpan> {
    let m = caps.name(group)?;
    let raw = m.as_str();
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let lead = raw.len() - raw.trim_start().len();
    let start = m.start() + lead;
    Some(ExtractedSpan {
        kind,
        text: trimmed.to_string(),
        byte_range: start..start + trimmed.len(),
    })
}

fn residual_of(caps: &Captures) -> String {
    let pre = caps.name("pre").map_or("", |m| m.as_str());
    let tags = caps.name("tags").map_or("", |m| m.as_str());
    normalize_space(&format!("{} {}", pre, tags))
}

/// Splits a trailing `t/<tag>` list off `text`.
///
/// Returns the remaining text and the tags, trimmed and de-duplicated in first-seen order.
/// Text without tags comes back untouched; otherwise only the whitespace before the tags is cut.
pub fn strip_tags(text: &str) -> (String, Vec<String>) {
    let Some(caps) = TAG_SUFFIX.captures(text) else {
        return (text.to_string(), Vec::new());
    };
    let body = caps.name("body").map_or("", |m| m.as_str());
    let suffix = caps.name("tags").map_or("", |m| m.as_str());

    let mut tags: Vec<String> = Vec::new();
    for tag in TAG_MARKER.split(suffix) {
        let tag = tag.trim();
        if !tag.is_empty() && !tags.iter().any(|t| t == tag) {
            tags.push(tag.to_string());
        }
    }
    if tags.is_empty() {
        return (text.to_string(), tags);
    }
    (body.trim_end().to_string(), tags)
}

/// Collapses whitespace runs and trims.
pub fn normalize_space(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    // Stand-in for the resolver pre-check: only these words count as dates.
    fn is_date(text: &str) -> bool {
        text.split_whitespace()
            .any(|w| matches!(w, "Mon" | "Wed" | "Fri" | "tmr" | "1st" | "25" | "Apr"))
    }

    #[test]
    fn test_start_end_basic() {
        let m = match_start_end("Meeting from Mon to Wed t/work", is_date).unwrap();
        assert_eq!(m.start.text, "Mon");
        assert_eq!(m.end.text, "Wed");
        assert_eq!(m.residual, "Meeting t/work");
        assert_eq!(m.start.byte_range, 13..16);
        assert_eq!(m.end.byte_range, 20..23);
    }

    #[test]
    fn test_start_end_skips_name_keywords() {
        // Greedy prefix picks the last "from"; greedy start swallows an inner "to".
        let m = match_start_end("Pass rose from Uncle to Jane from Mon to Wed", is_date).unwrap();
        assert_eq!(m.start.text, "Mon");
        assert_eq!(m.residual, "Pass rose from Uncle to Jane");

        assert!(match_start_end("Pass rose from Uncle to Jane", is_date).is_none());
    }

    #[test]
    fn test_keywords_must_be_whitespace_bounded() {
        assert!(match_start_end("Eat fromage tomorrow", |_| true).is_none());
        assert!(match_deadline("Fix bypass", |_| true).is_none());
        assert!(match_deadline("standby tmr", |_| true).is_none());
    }

    #[test]
    fn test_deadline_precheck_failure_is_no_match() {
        assert!(match_deadline("Download song stand by me", is_date).is_none());

        let m = match_deadline("stand by me by tmr", is_date).unwrap();
        assert_eq!(m.span.text, "tmr");
        assert_eq!(m.residual, "stand by me");
    }

    #[test]
    fn test_deadline_stops_at_tags() {
        let m = match_deadline("Pay rent by 1st t/home t/bills", is_date).unwrap();
        assert_eq!(m.span.text, "1st");
        assert_eq!(m.residual, "Pay rent t/home t/bills");
    }

    #[test]
    fn test_single_sided_clauses() {
        let m = match_start_only("1 from Fri", is_date).unwrap();
        assert_eq!(m.span.kind, SpanKind::Start);
        assert_eq!(m.residual, "1");

        let m = match_end_only("1 to 25 Apr t/x", is_date).unwrap();
        assert_eq!(m.span.text, "25 Apr");
        assert_eq!(m.residual, "1 t/x");

        assert!(match_end_only("1 Go to the mall", is_date).is_none());
    }

    #[test]
    fn test_strip_tags() {
        let (body, tags) = strip_tags("Buy milk  t/shop t/ home  t/shop");
        assert_eq!(body, "Buy milk");
        assert_eq!(tags, vec!["shop".to_string(), "home".to_string()]);

        let (body, tags) = strip_tags("No  tags here ");
        assert_eq!(body, "No  tags here ");
        assert!(tags.is_empty());

        // A slash inside the name is not a tag.
        let (body, tags) = strip_tags("Read a/b testing");
        assert_eq!(body, "Read a/b testing");
        assert!(tags.is_empty());
    }
}
