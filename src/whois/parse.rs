//! WHOIS creation-date extraction.

use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use whois_service::WhoisResponse;

/// Field labels registries use for the creation date in raw WHOIS text.
fn creation_line_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?im)^\s*(?:creation date|created(?: on| date)?|registered on|registration (?:date|time)|domain registration date|domain create date)\s*:\s*(.+?)\s*$",
        )
        .expect("creation date regex is valid")
    })
}

/// Picks the authoritative creation date from a WHOIS response.
///
/// The parsed record wins. Otherwise every creation line in the raw text is a
/// candidate and the first parseable one in document order is used.
pub(crate) fn creation_date_from_response(response: &WhoisResponse) -> Option<DateTime<Utc>> {
    let parsed = response
        .parsed_data
        .as_ref()
        .and_then(|p| p.creation_date.as_deref())
        .and_then(parse_date_string);

    parsed.or_else(|| creation_date_candidates(&response.raw_data).into_iter().next())
}

/// Collects every parseable creation date in raw WHOIS text, in order.
pub(crate) fn creation_date_candidates(raw: &str) -> Vec<DateTime<Utc>> {
    creation_line_regex()
        .captures_iter(raw)
        .filter_map(|caps| caps.get(1))
        .filter_map(|m| parse_date_string(m.as_str()))
        .collect()
}

/// Attempts to parse a date string in the formats registries commonly use.
pub(crate) fn parse_date_string(date_str: &str) -> Option<DateTime<Utc>> {
    let date_str = date_str.trim();
    if date_str.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(date_str) {
        return Some(dt.with_timezone(&Utc));
    }

    let with_offset = ["%Y-%m-%dT%H:%M:%S%z", "%Y-%m-%d %H:%M:%S%z", "%Y-%m-%d %H:%M:%S %z"];
    for format in &with_offset {
        if let Ok(dt) = DateTime::parse_from_str(date_str, format) {
            return Some(dt.with_timezone(&Utc));
        }
    }

    let naive_datetimes = [
        "%Y-%m-%dT%H:%M:%S%.fZ",
        "%Y-%m-%dT%H:%M:%SZ",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M:%S UTC",
        "%Y.%m.%d %H:%M:%S",
    ];
    for format in &naive_datetimes {
        if let Ok(naive_dt) = chrono::NaiveDateTime::parse_from_str(date_str, format) {
            return Some(naive_dt.and_utc());
        }
    }

    let naive_dates = ["%Y-%m-%d", "%d-%b-%Y", "%d/%m/%Y", "%Y.%m.%d", "%Y/%m/%d", "%d.%m.%Y"];
    for format in &naive_dates {
        if let Ok(naive_date) = chrono::NaiveDate::parse_from_str(date_str, format) {
            return Some(naive_date.and_hms_opt(0, 0, 0)?.and_utc());
        }
    }

    None
}
