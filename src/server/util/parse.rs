use chrono::{DateTime, NaiveDateTime, Utc};

use crate::server::error::AppError;

/// Input format for datetimes entered by admins, always interpreted as UTC.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Parses a "YYYY-MM-DD HH:MM" string as a UTC datetime.
///
/// # Arguments
/// - `field` - Name of the request field, used in the error message
/// - `value` - The string to parse
///
/// # Returns
/// - `Ok(DateTime<Utc>)` - Successfully parsed datetime
/// - `Err(AppError::BadRequest)` - The value does not match the expected format
pub fn parse_datetime(field: &str, value: &str) -> Result<DateTime<Utc>, AppError> {
    let naive = NaiveDateTime::parse_from_str(value.trim(), DATETIME_FORMAT).map_err(|_| {
        AppError::BadRequest(format!(
            "{} must use the format YYYY-MM-DD HH:MM, got '{}'",
            field, value
        ))
    })?;

    Ok(naive.and_utc())
}

/// Parses an optional datetime field, treating blank strings as absent.
pub fn parse_optional_datetime(
    field: &str,
    value: Option<&str>,
) -> Result<Option<DateTime<Utc>>, AppError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => parse_datetime(field, value).map(Some),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn parses_minutes_precision_utc() {
        let parsed = parse_datetime("scheduled_at", "2026-03-14 19:30").unwrap();

        assert_eq!(parsed.year(), 2026);
        assert_eq!(parsed.month(), 3);
        assert_eq!(parsed.day(), 14);
        assert_eq!(parsed.hour(), 19);
        assert_eq!(parsed.minute(), 30);
    }

    #[test]
    fn rejects_other_formats() {
        assert!(matches!(
            parse_datetime("scheduled_at", "2026-03-14T19:30:00Z"),
            Err(AppError::BadRequest(_))
        ));
        assert!(parse_datetime("scheduled_at", "tomorrow").is_err());
    }

    #[test]
    fn blank_optional_is_none() {
        assert_eq!(parse_optional_datetime("expires_at", None).unwrap(), None);
        assert_eq!(parse_optional_datetime("expires_at", Some("  ")).unwrap(), None);
        assert!(parse_optional_datetime("expires_at", Some("2026-01-01 00:00"))
            .unwrap()
            .is_some());
    }
}
