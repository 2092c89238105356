//! Scorers over the shared registration record.
//!
//! A failed lookup is `None` here and lands every scorer on its suspicious branch.

use chrono::{DateTime, Utc};

use super::vector::Signal;
use crate::lookup::RegistrationRecord;

const MIN_REGISTRATION_DAYS: i64 = 365;
const MIN_AGE_DAYS: i64 = 180;

/// Legitimate when the registration spans at least a year.
pub fn registration_length(record: Option<&RegistrationRecord>) -> Signal {
    let span = record.and_then(|r| match (r.creation_date, r.expiration_date) {
        (Some(created), Some(expires)) => Some((expires - created).num_days()),
        _ => None,
    });
    match span {
        Some(days) if days >= MIN_REGISTRATION_DAYS => Signal::Legitimate,
        _ => Signal::Suspicious,
    }
}

/// Suspicious when there is no record or it names no domain.
pub fn abnormal_url(record: Option<&RegistrationRecord>) -> Signal {
    Signal::flag(!record.is_some_and(RegistrationRecord::has_registrant))
}

/// Legitimate when the domain was created at least 180 days before `now`.
pub fn age_of_domain(record: Option<&RegistrationRecord>, now: DateTime<Utc>) -> Signal {
    match record.and_then(|r| r.creation_date) {
        Some(created) if (now - created).num_days() >= MIN_AGE_DAYS => Signal::Legitimate,
        _ => Signal::Suspicious,
    }
}
