// Tests for the resolver adapter: one phrase, one instant, or a typed error.
use chrono::{DateTime, TimeZone, Utc};
use taskwhen::DateError;
use taskwhen::model::{Component, DateResolver, NaturalDateParser, Specificity, Zone};

fn now() -> DateTime<Utc> {
    // Wednesday
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
}

fn resolver() -> DateResolver {
    DateResolver::new(NaturalDateParser::new(Zone::utc()))
}

#[test]
fn test_valid_phrases_resolve() {
    let r = resolver();
    for text in ["Sat", "Fri", "25 Apr", "Jan 2017", "2 days after", "2016-05-02"] {
        assert!(
            r.resolve(text, now()).is_ok(),
            "'{}' should resolve to exactly one instant",
            text
        );
    }
}

#[test]
fn test_not_a_date() {
    let r = resolver();
    for text in ["Not a date", "We.d", "Hello World"] {
        assert_eq!(
            r.resolve(text, now()),
            Err(DateError::NotADate(text.to_string())),
            "'{}' is not a date",
            text
        );
        assert!(!r.is_resolvable(text, now()));
    }
}

#[test]
fn test_multiple_groups_are_ambiguous() {
    // Input: two dates joined by something that is not a recognised separator.
    // Expectation: AmbiguousDateTimes carrying the whole phrase.
    let r = resolver();
    for text in ["Wed ~ Thur", "Wed ` Thursday", "Wed plus Thursday"] {
        assert_eq!(
            r.resolve(text, now()),
            Err(DateError::AmbiguousDateTimes(text.to_string())),
            "'{}' has two date groups",
            text
        );
        // The pre-check only asks whether anything date-like is present.
        assert!(r.is_resolvable(text, now()));
    }
}

#[test]
fn test_alternatives_are_ambiguous() {
    let r = resolver();
    for text in ["Wed or Thur", "Wed and Thur", "Mon, Tue or Wed"] {
        assert_eq!(
            r.resolve(text, now()),
            Err(DateError::AmbiguousAlternatives(text.to_string()))
        );
    }
}

#[test]
fn test_recurring_is_rejected() {
    let r = resolver();
    for text in ["every Friday", "every 2 weeks", "daily"] {
        let err = r.resolve(text, now()).unwrap_err();
        assert_eq!(err, DateError::Recurring(text.to_string()));
        assert_eq!(err.text(), text);
    }
}

#[test]
fn test_specificity_tags() {
    let r = resolver();

    let c = r.resolve("25 Apr", now()).unwrap();
    assert_eq!(c.specificity, Specificity::PartiallyInferred(Component::Time));
    assert!(c.time_inferred && !c.date_inferred);

    let c = r.resolve("8pm", now()).unwrap();
    assert_eq!(c.specificity, Specificity::PartiallyInferred(Component::Date));

    let c = r.resolve("2 days later", now()).unwrap();
    assert_eq!(c.specificity, Specificity::PureRelative);
    assert!(c.is_relative());

    let c = r.resolve("in 3 hours", now()).unwrap();
    assert_eq!(c.specificity, Specificity::PureRelative);

    let c = r.resolve("25 Apr 8pm", now()).unwrap();
    assert_eq!(c.specificity, Specificity::Explicit);

    // Anchored offsets take the anchor's specificity.
    let c = r.resolve("8 days from 25 Apr", now()).unwrap();
    assert_eq!(c.specificity, Specificity::PartiallyInferred(Component::Time));
}

#[test]
fn test_resolution_is_deterministic() {
    let r = resolver();
    let a = r.resolve("25 Apr", now()).unwrap();
    let b = r.resolve("25 Apr", now()).unwrap();
    assert_eq!(a.instant, b.instant);
    assert_eq!(a.instant, Utc.with_ymd_and_hms(2024, 4, 25, 12, 0, 0).unwrap());
}

#[test]
fn test_resolve_anchored_uses_anchor() {
    let r = resolver();
    let anchor = Utc.with_ymd_and_hms(2024, 6, 10, 20, 0, 0).unwrap();

    let c = r.resolve_anchored("09:00:00", anchor).unwrap();
    assert_eq!(c.instant, Utc.with_ymd_and_hms(2024, 6, 10, 9, 0, 0).unwrap());

    let c = r.resolve_anchored("2024-04-25", anchor).unwrap();
    assert_eq!(c.instant, Utc.with_ymd_and_hms(2024, 4, 25, 20, 0, 0).unwrap());
}

#[test]
fn test_inferred_time_drops_subseconds() {
    let r = resolver();
    let precise = now() + chrono::Duration::milliseconds(250);
    let c = r.resolve("25 Apr", precise).unwrap();
    assert_eq!(c.instant, Utc.with_ymd_and_hms(2024, 4, 25, 12, 0, 0).unwrap());
}
