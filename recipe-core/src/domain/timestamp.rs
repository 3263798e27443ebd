//! Lenient timestamp parsing for stored documents.
//!
//! Older documents carry `DD-MM-YYYY` dates; newer ones RFC 3339.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer};

const DATE_FORMATS: &[&str] = &["%d-%m-%Y", "%Y-%m-%d"];

pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Unparseable values become `None` instead of failing the whole load
pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_timestamp))
}
