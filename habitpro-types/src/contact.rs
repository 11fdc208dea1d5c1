use chrono::{Local, TimeZone};
use serde::{Deserialize, Serialize};

use crate::validation::{validate_email, validate_mobile, FieldErrors};

/// Nanoseconds in one millisecond. Store timestamps are nanoseconds.
const NANOS_PER_MILLI: u64 = 1_000_000;

/// Shown when a stored timestamp cannot be represented as a date.
const INVALID_DATE: &str = "Invalid Date";

/// A captured lead as returned by the contact store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRecord {
    pub email: String,
    pub mobile: String,
    /// Submission time in nanoseconds since the Unix epoch
    pub timestamp: u64,
}

impl ContactRecord {
    /// Submission time rendered in the local time zone.
    pub fn submitted_at_local(&self) -> String {
        format_submitted_at(self.timestamp, &Local)
    }
}

/// Body of a save-contact request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSubmission {
    pub email: String,
    pub mobile: String,
}

impl ContactSubmission {
    pub fn new(email: impl Into<String>, mobile: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            mobile: mobile.into(),
        }
    }

    /// Check both fields, collecting every field error.
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let errors = FieldErrors {
            email: validate_email(&self.email).err(),
            mobile: validate_mobile(&self.mobile).err(),
        };
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Format a nanosecond timestamp as `M/D/YYYY, h:mm:ss AM` in `tz`.
///
/// The value is truncated to whole milliseconds before conversion.
pub fn format_submitted_at<Tz>(nanos: u64, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let Ok(millis) = i64::try_from(nanos / NANOS_PER_MILLI) else {
        return INVALID_DATE.to_string();
    };

    match tz.timestamp_millis_opt(millis).single() {
        Some(dt) => dt.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string(),
        None => INVALID_DATE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_format_converts_nanoseconds() {
        // 2024-03-05T14:07:09.123Z
        let nanos = 1_709_647_629_123_000_000u64;
        assert_eq!(format_submitted_at(nanos, &Utc), "3/5/2024, 2:07:09 PM");
    }

    #[test]
    fn test_format_morning_and_epoch() {
        assert_eq!(format_submitted_at(0, &Utc), "1/1/1970, 12:00:00 AM");
        // 999_999 ns truncates to the same millisecond
        assert_eq!(format_submitted_at(999_999, &Utc), "1/1/1970, 12:00:00 AM");
    }

    #[test]
    fn test_format_out_of_range() {
        assert_eq!(format_submitted_at(u64::MAX, &Utc), "Invalid Date");
    }

    #[test]
    fn test_record_deserializes_store_payload() {
        let json = r#"{"email":"a@b.com","mobile":"9123456789","timestamp":1709647629123000000}"#;
        let record: ContactRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.email, "a@b.com");
        assert_eq!(record.timestamp, 1_709_647_629_123_000_000);
    }

    #[test]
    fn test_submission_collects_both_errors() {
        let errors = ContactSubmission::new("", "123").validate().unwrap_err();
        assert!(errors.email.is_some());
        assert!(errors.mobile.is_some());

        assert!(ContactSubmission::new("a@b.com", "9123456789").validate().is_ok());
    }
}
