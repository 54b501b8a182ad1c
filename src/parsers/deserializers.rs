use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::warn;

/// Offset-less layouts, read as UTC
const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Custom deserializer for `createdAt`: integers (ms), RFC3339 strings, offset-less
/// ISO-8601 strings (UTC) or null.
///
/// An unusable timestamp never rejects the entry; it is logged and treated as absent.
pub fn deserialize_optional_timestamp<'de, D>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let parsed = match &value {
        Value::Null => return Ok(None),
        Value::String(s) if s.trim().is_empty() => return Ok(None),
        Value::Number(n) => {
            // Unix timestamp in milliseconds; fractional ms are truncated
            let ms = n.as_i64().or_else(|| n.as_f64().map(|f| f as i64));
            ms.and_then(DateTime::from_timestamp_millis)
        }
        Value::String(s) => parse_timestamp_str(s.trim()),
        _ => None,
    };

    if parsed.is_none() {
        warn!(created_at = %value, "Unreadable createdAt, treating as absent");
    }
    Ok(parsed)
}

fn parse_timestamp_str(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = s.parse::<DateTime<Utc>>() {
        return Some(ts);
    }
    if let Some(naive) =
        NAIVE_FORMATS.iter().find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
    {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
