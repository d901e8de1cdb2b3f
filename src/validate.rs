// File: ./src/validate.rs
// Temporal constraints applied to freshly resolved dates.
use crate::error::{ExtractionError, Result};
use chrono::{DateTime, Utc};

/// Fails if `instant` is not strictly after `now`.
pub fn validate_not_past(instant: DateTime<Utc>, now: DateTime<Utc>) -> Result<()> {
    if instant <= now {
        log::debug!("Rejecting past date-time {} (now {})", instant, now);
        return Err(ExtractionError::PastDateTime(instant));
    }
    Ok(())
}

/// Fails if `end` is not strictly after `start`.
pub fn validate_duration(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<()> {
    if end <= start {
        log::debug!("Rejecting inverted range {} -> {}", start, end);
        return Err(ExtractionError::InvalidDuration(start, end));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_not_past_boundary() {
        let now = Utc.with_ymd_and_hms(2024, 5, 2, 10, 0, 0).unwrap();

        // Equal to now counts as past.
        assert_eq!(
            validate_not_past(now, now),
            Err(ExtractionError::PastDateTime(now))
        );
        assert!(validate_not_past(now - Duration::seconds(1), now).is_err());
        assert!(validate_not_past(now + Duration::seconds(1), now).is_ok());
    }

    #[test]
    fn test_duration_inverted_and_empty() {
        let start = Utc.with_ymd_and_hms(2024, 5, 2, 10, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 5, 2, 9, 0, 0).unwrap();

        assert_eq!(
            validate_duration(start, end),
            Err(ExtractionError::InvalidDuration(start, end))
        );
        // Zero-length ranges are rejected too.
        assert!(validate_duration(start, start).is_err());
        assert!(validate_duration(end, start).is_ok());
    }
}
