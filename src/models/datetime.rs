use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer};

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Accepts RFC 3339 timestamps, naive `YYYY-MM-DDTHH:MM:SS` (read as UTC) and
/// bare `YYYY-MM-DD` dates (UTC midnight).
pub fn parse_datetime(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(Utc.from_utc_datetime(&naive));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

pub fn deserialize_optional_datetime<'de, D>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    match value {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => parse_datetime(&raw)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid date: {}", raw))),
    }
}

/// Whole days between two instants, rounded up. Negative when `end` precedes `start`.
pub fn days_between(start: &DateTime<Utc>, end: &DateTime<Utc>) -> i64 {
    let millis = (*end - *start).num_milliseconds() as f64;
    (millis / MILLIS_PER_DAY).ceil() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_only() {
        let dt = parse_datetime("2025-06-01").unwrap();
        assert_eq!(dt.to_rfc3339(), "2025-06-01T00:00:00+00:00");
    }

    #[test]
    fn test_parse_rfc3339_with_offset() {
        let dt = parse_datetime("2025-06-01T02:00:00+02:00").unwrap();
        assert_eq!(dt, parse_datetime("2025-06-01").unwrap());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_datetime("next tuesday").is_none());
    }

    #[test]
    fn test_days_between_rounds_up() {
        let start = parse_datetime("2025-06-01").unwrap();
        assert_eq!(days_between(&start, &parse_datetime("2025-06-04").unwrap()), 3);
        assert_eq!(
            days_between(&start, &parse_datetime("2025-06-04T01:00:00Z").unwrap()),
            4
        );
        assert_eq!(days_between(&start, &start), 0);
        assert_eq!(days_between(&parse_datetime("2025-06-04").unwrap(), &start), -3);
    }
}
