//! Lenient timestamp handling.
//!
//! Backend values are frequently bare dates, naive date-times or empty
//! strings. Anything that does not parse is treated as unknown.

use std::str::FromStr;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Utc};
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};

const NAIVE_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parse RFC 3339, naive date-time (UTC) or bare date (midnight UTC).
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(naive.and_utc());
        }
    }

    parse_bare_date(trimmed)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Parse the date part of any accepted timestamp form.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    parse_bare_date(value.trim()).or_else(|| parse_timestamp(value).map(|dt| dt.date_naive()))
}

fn parse_bare_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

/// Calendar date of `instant` as seen from `offset`.
pub fn local_day(instant: DateTime<Utc>, offset: &FixedOffset) -> NaiveDate {
    instant.with_timezone(offset).date_naive()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawText {
    Text(String),
    Other(IgnoredAny),
}

fn raw_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<RawText>::deserialize(deserializer)? {
        Some(RawText::Text(text)) => Some(text),
        Some(RawText::Other(_)) | None => None,
    })
}

/// `deserialize_with` helper: unparsable or non-string timestamps become `None`.
pub fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(raw_text(deserializer)?.as_deref().and_then(parse_timestamp))
}

/// `deserialize_with` helper for date-only fields.
pub fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(raw_text(deserializer)?.as_deref().and_then(parse_date))
}

/// `deserialize_with` helper for status enums: unknown values become `None`.
pub fn lenient_enum<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
{
    Ok(raw_text(deserializer)?.and_then(|text| text.parse().ok()))
}
