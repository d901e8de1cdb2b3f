// Tests for extracting dates out of "add" commands.
use chrono::{DateTime, Duration, SecondsFormat, TimeZone, Utc};
use pretty_assertions::assert_eq;
use taskwhen::model::{DateRange, Deadline, NaturalDateParser, Schedule, SpanKind, Zone};
use taskwhen::{ExtractionError, Extractor};

fn now() -> DateTime<Utc> {
    // Wednesday
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
}

fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
}

fn extractor() -> Extractor {
    Extractor::new(NaturalDateParser::new(Zone::utc()))
}

#[test]
fn test_text_without_keywords_is_floating() {
    let ex = extractor();
    for text in [
        "Buy milk",
        "Buy  milk ",
        "Eat fromage tomorrow",
        "Fix the bypass valve",
        "Auto-renew passport today",
    ] {
        let add = ex.extract_add(text, now()).unwrap();
        assert_eq!(add.schedule, Schedule::Floating, "'{}'", text);
        assert_eq!(add.name, text);
        assert!(add.spans.is_empty());
    }
}

#[test]
fn test_incidental_by_is_not_a_deadline() {
    // Input: "Download song stand by me"
    // Expectation: "me" is not a date, so nothing is extracted and nothing fails.
    let add = extractor()
        .extract_add("Download song stand by me", now())
        .unwrap();
    assert_eq!(add.name, "Download song stand by me");
    assert!(add.schedule.is_floating());
}

#[test]
fn test_last_by_wins() {
    let add = extractor().extract_add("stand by me by tmr", now()).unwrap();
    assert_eq!(add.name, "stand by me");
    assert_eq!(
        add.schedule,
        Schedule::Due(Deadline::new(at(2024, 5, 2, 12, 0, 0)))
    );
}

#[test]
fn test_range_with_tags() {
    let add = extractor()
        .extract_add("Meeting from next Mon 9am to next Mon 5pm t/work", now())
        .unwrap();
    assert_eq!(add.name, "Meeting");
    assert_eq!(add.tags, vec!["work".to_string()]);
    let range = add.schedule.range().expect("range");
    assert_eq!(range.start(), at(2024, 5, 6, 9, 0, 0));
    assert_eq!(range.end(), at(2024, 5, 6, 17, 0, 0));

    let kinds: Vec<SpanKind> = add.spans.iter().map(|s| s.kind).collect();
    assert_eq!(kinds, vec![SpanKind::Start, SpanKind::End]);
    assert_eq!(add.spans[0].text, "next Mon 9am");
}

#[test]
fn test_travel_between_places_keeps_name() {
    let add = extractor()
        .extract_add("Travel from Singapore to Malaysia", now())
        .unwrap();
    assert_eq!(add.name, "Travel from Singapore to Malaysia");
    assert!(add.schedule.is_floating());
}

#[test]
fn test_deadline_span_location() {
    let add = extractor()
        .extract_add("Pay rent by the 25th t/home", now())
        .unwrap();
    assert_eq!(add.name, "Pay rent");
    assert_eq!(add.tags, vec!["home".to_string()]);
    assert_eq!(
        add.schedule.deadline(),
        Some(Deadline::new(at(2024, 5, 25, 12, 0, 0)))
    );
    assert_eq!(add.spans.len(), 1);
    assert_eq!(add.spans[0].kind, SpanKind::Deadline);
    assert_eq!(add.spans[0].text, "the 25th");
    assert_eq!(add.spans[0].byte_range, 12..20);
}

#[test]
fn test_past_deadline_is_rejected() {
    // "1st" is the first of the current month at the current time, i.e. exactly now.
    assert_eq!(
        extractor().extract_add("Pay rent by 1st", now()),
        Err(ExtractionError::PastDateTime(now()))
    );
    assert_eq!(
        extractor().extract_add("Call mum by yesterday", now()),
        Err(ExtractionError::PastDateTime(at(2024, 4, 30, 12, 0, 0)))
    );
}

#[test]
fn test_inverted_range_is_rejected() {
    assert_eq!(
        extractor().extract_add("Trip from 25 May to 20 May", now()),
        Err(ExtractionError::InvalidDuration(
            at(2024, 5, 25, 12, 0, 0),
            at(2024, 5, 20, 12, 0, 0)
        ))
    );
}

#[test]
fn test_malformed_dates_reject_the_command() {
    let ex = extractor();
    assert_eq!(
        ex.extract_add("Trip from Fri to Wed or Thur", now()),
        Err(ExtractionError::AmbiguousAlternatives(
            "Wed or Thur".to_string()
        ))
    );
    assert_eq!(
        ex.extract_add("Watch movie by every Friday", now()),
        Err(ExtractionError::Recurring("every Friday".to_string()))
    );
    assert_eq!(
        ex.extract_add("Plan by Fri ~ Sat", now()),
        Err(ExtractionError::AmbiguousDateTimes("Fri ~ Sat".to_string()))
    );
}

#[test]
fn test_range_and_deadline_together_is_rejected() {
    assert_eq!(
        extractor().extract_add("Plan by Sat from Mon to next Fri", now()),
        Err(ExtractionError::BothDeadlineAndRangeSupplied)
    );
}

#[test]
fn test_range_followed_by_deadline_is_rejected() {
    // Input: "Meeting from Mon to Wed by Fri"
    // Expectation: the trailing deadline is not absorbed into the end date.
    assert_eq!(
        extractor().extract_add("Meeting from Mon to Wed by Fri", now()),
        Err(ExtractionError::BothDeadlineAndRangeSupplied)
    );
    assert_eq!(
        extractor().extract_add("Meeting from Mon to Wed by Fri t/work", now()),
        Err(ExtractionError::BothDeadlineAndRangeSupplied)
    );

    // Place names around "by" still leave a plain deadline.
    let add = extractor()
        .extract_add("Travel from Singapore to Malaysia by tmr", now())
        .unwrap();
    assert_eq!(add.name, "Travel from Singapore to Malaysia");
    assert_eq!(
        add.schedule,
        Schedule::Due(Deadline::new(at(2024, 5, 2, 12, 0, 0)))
    );
}

#[test]
fn test_relative_phrases_for_new_tasks() {
    let text = "Review from 2 days later to 3 days later";

    let add = extractor().extract_add(text, now()).unwrap();
    let expected = DateRange::new(now() + Duration::days(2), now() + Duration::days(3)).unwrap();
    assert_eq!(add.schedule, Schedule::Span(expected));

    let strict = extractor().with_relative_for_new(false);
    assert_eq!(
        strict.extract_add(text, now()),
        Err(ExtractionError::RelativeNotAllowed("2 days later".to_string()))
    );
}

#[test]
fn test_iso_round_trip() {
    // Accepted ranges survive being printed and extracted again, up to sub-second precision.
    let start = at(2024, 6, 1, 9, 30, 0) + Duration::milliseconds(400);
    let end = at(2024, 6, 1, 11, 0, 0);
    let text = format!(
        "Sync from {} to {}",
        start.to_rfc3339_opts(SecondsFormat::Secs, true),
        end.to_rfc3339_opts(SecondsFormat::Secs, true)
    );

    let add = extractor().extract_add(&text, now()).unwrap();
    let range = add.schedule.range().expect("range");
    assert_eq!(range.start(), at(2024, 6, 1, 9, 30, 0));
    assert_eq!(range.end(), end);
    assert_eq!(add.name, "Sync");
}

#[test]
fn test_report_shape() {
    let ex = extractor();

    let report = ex.report_add("Pay rent by the 25th t/home", now());
    assert_eq!(report.residual_name, "Pay rent");
    assert_eq!(report.deadline, Some(at(2024, 5, 25, 12, 0, 0)));
    assert_eq!(report.range, None);
    assert_eq!(report.error, None);

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["residual_name"], "Pay rent");
    assert_eq!(json["tags"][0], "home");
    assert!(json.get("index").is_none());

    let report = ex.report_add("Pay rent by 1st", now());
    assert!(report.error.unwrap().contains("is in the past"));
    assert_eq!(report.residual_name, "Pay rent by 1st");
    assert_eq!(report.deadline, None);
    assert!(!report.internal_error);
}
