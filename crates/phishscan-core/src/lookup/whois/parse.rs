//! Parse WHOIS reply text into a RegistrationRecord.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use super::RegistrationRecord;

const NOT_FOUND_MARKERS: &[&str] = &[
    "no match for",
    "not found",
    "no entries found",
    "no data found",
    "status: free",
    "status: available",
    "is available for registration",
];

const DOMAIN_KEYS: &[&str] = &["domain name", "domain"];
const REGISTRAR_KEYS: &[&str] = &["registrar", "sponsoring registrar"];
const CREATION_KEYS: &[&str] = &[
    "creation date",
    "created",
    "created on",
    "registered on",
    "registration date",
    "registration time",
    "domain registration date",
];
const EXPIRATION_KEYS: &[&str] = &[
    "registry expiry date",
    "registrar registration expiration date",
    "expiration date",
    "expiry date",
    "expires",
    "expires on",
    "paid-till",
    "domain expiration date",
];

/// `key: value` pairs, keys lowercased. Comment lines (`%`, `#`, `>>>`) are skipped.
fn fields(text: &str) -> impl Iterator<Item = (String, &str)> {
    text.lines().filter_map(|line| {
        let line = line.trim();
        if line.is_empty() || line.starts_with('%') || line.starts_with('#') || line.starts_with(">>>") {
            return None;
        }
        let (key, value) = line.split_once(':')?;
        let value = value.trim();
        if value.is_empty() {
            return None;
        }
        Some((key.trim().to_ascii_lowercase(), value))
    })
}

fn first_value<'a>(text: &'a str, keys: &[&str]) -> Option<&'a str> {
    fields(text)
        .find(|(k, _)| keys.contains(&k.as_str()))
        .map(|(_, v)| v)
}

/// Parses a registry date; date-only values are taken at midnight UTC.
pub(crate) fn parse_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    // Trailing zone names ("2020-01-01 00:00:00 UTC") or comments after the date.
    let head = value.split_whitespace().take(2).collect::<Vec<_>>().join(" ");
    for fmt in [
        "%Y-%m-%dT%H:%M:%SZ",
        "%Y-%m-%dT%H:%M:%S%.fZ",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
        "%Y.%m.%d %H:%M:%S",
    ] {
        for candidate in [value, head.as_str()] {
            if let Ok(dt) = NaiveDateTime::parse_from_str(candidate, fmt) {
                return Some(dt.and_utc());
            }
        }
    }
    let first = value.split_whitespace().next()?;
    for fmt in ["%Y-%m-%d", "%d-%b-%Y", "%Y.%m.%d", "%d.%m.%Y", "%Y/%m/%d", "%d/%m/%Y"] {
        if let Ok(d) = NaiveDate::parse_from_str(first, fmt) {
            return d.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
        }
    }
    None
}

/// Registrar WHOIS server named in a thin registry reply, if any.
pub(crate) fn registrar_referral(text: &str) -> Option<String> {
    first_value(text, &["registrar whois server", "whois server"])
        .map(|v| v.trim_start_matches("whois://").trim_end_matches('/').to_string())
}

/// WHOIS server for a TLD from an IANA reply (`refer:` or `whois:`).
pub(crate) fn iana_referral(text: &str) -> Option<String> {
    first_value(text, &["refer", "whois"]).map(str::to_owned)
}

/// Parses a reply. `None` when the reply says the domain is unregistered or
/// carries none of the recognised fields.
pub(crate) fn parse_record(text: &str) -> Option<RegistrationRecord> {
    let lower = text.to_ascii_lowercase();
    if NOT_FOUND_MARKERS.iter().any(|m| lower.contains(m)) {
        return None;
    }
    let record = RegistrationRecord {
        domain_name: first_value(text, DOMAIN_KEYS).map(|v| v.to_ascii_lowercase()),
        registrar: first_value(text, REGISTRAR_KEYS).map(str::to_owned),
        creation_date: first_value(text, CREATION_KEYS).and_then(parse_date),
        expiration_date: first_value(text, EXPIRATION_KEYS).and_then(parse_date),
    };
    if record.domain_name.is_none()
        && record.registrar.is_none()
        && record.creation_date.is_none()
        && record.expiration_date.is_none()
    {
        return None;
    }
    Some(record)
}
