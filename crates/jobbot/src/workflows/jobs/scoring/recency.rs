use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use super::config::RecencyMode;

/// Age assigned to postings whose timestamp is missing or unreadable.
pub const UNKNOWN_AGE_DAYS: i64 = 999;

/// Flat score used when recency is only a cutoff filter.
const CUTOFF_ONLY_SCORE: u8 = 5;

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d-%m-%Y", "%d/%m/%Y", "%d %b %Y", "%b %d, %Y"];

/// Reads the timestamp shapes job boards commonly emit. Zone-less values are taken as UTC.
pub fn parse_posted_at(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }

    if trimmed.chars().all(|c| c.is_ascii_digit()) {
        let value: i64 = trimmed.parse().ok()?;
        // 13 digits and up are epoch milliseconds.
        return if trimmed.len() >= 13 {
            DateTime::from_timestamp_millis(value)
        } else {
            DateTime::from_timestamp(value, 0)
        };
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(naive.and_utc());
        }
    }

    DATE_FORMATS.iter().find_map(|format| {
        NaiveDate::parse_from_str(trimmed, format)
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc())
    })
}

/// Whole days since posting, never negative; [`UNKNOWN_AGE_DAYS`] when the timestamp is unusable.
pub fn posting_age_days(posted_at: Option<&str>, now: DateTime<Utc>) -> i64 {
    match posted_at.and_then(parse_posted_at) {
        Some(posted) => (now - posted).num_days().max(0),
        None => {
            tracing::debug!(raw = ?posted_at, "posting timestamp unusable; treating as stale");
            UNKNOWN_AGE_DAYS
        }
    }
}

pub fn recency_score(age_days: i64, mode: RecencyMode) -> u8 {
    match mode {
        RecencyMode::CutoffOnly => CUTOFF_ONLY_SCORE,
        RecencyMode::Bucketed => match age_days {
            i64::MIN..=3 => 10,
            4..=7 => 7,
            8..=30 => 4,
            _ => 1,
        },
    }
}

pub fn within_max_age(age_days: i64, max_posting_age_days: i64) -> bool {
    age_days < UNKNOWN_AGE_DAYS && age_days <= max_posting_age_days
}
