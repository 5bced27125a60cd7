//! Program date-time resolution.
//!
//! `#EXT-X-PROGRAM-DATE-TIME` values are frequently malformed in the wild, so
//! resolution never fails hard: the text is tried against a fixed list of
//! formats and an unmatched value resolves to `None`.

use chrono::{DateTime, NaiveDateTime, Utc};

type Resolver = fn(&str) -> Option<DateTime<Utc>>;

/// Tried in order, the first match wins.
const RESOLVERS: &[Resolver] = &[
    fractional_with_offset,
    whole_with_offset,
    whole_utc,
    fractional_utc,
    without_zone,
];

/// Resolve an ISO-8601 style date-time to a UTC instant.
pub fn resolve_timestamp(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    RESOLVERS.iter().find_map(|resolve| resolve(text))
}

// 2010-02-19T14:54:23.031+08:00
fn fractional_with_offset(text: &str) -> Option<DateTime<Utc>> {
    if !text.contains('.') {
        return None;
    }
    with_offset(text, "%Y-%m-%dT%H:%M:%S%.f%z")
}

// 2016-05-09T17:50:44+00:00
fn whole_with_offset(text: &str) -> Option<DateTime<Utc>> {
    with_offset(text, "%Y-%m-%dT%H:%M:%S%z")
}

// 2016-05-09T17:50:44Z
fn whole_utc(text: &str) -> Option<DateTime<Utc>> {
    as_utc(text, "%Y-%m-%dT%H:%M:%SZ")
}

// 2020-04-07T11:40:02.040Z
fn fractional_utc(text: &str) -> Option<DateTime<Utc>> {
    as_utc(text, "%Y-%m-%dT%H:%M:%S%.fZ")
}

// 2016-05-09T17:50:44, no zone means UTC
fn without_zone(text: &str) -> Option<DateTime<Utc>> {
    as_utc(text, "%Y-%m-%dT%H:%M:%S%.f")
}

fn with_offset(text: &str, format: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_str(text, format)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

fn as_utc(text: &str, format: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(text, format)
        .ok()
        .map(|dt| dt.and_utc())
}
