use time::format_description::well_known::Rfc3339;
use time::{OffsetDateTime, UtcOffset};

pub const MILLIS_PER_DAY: i64 = 86_400_000;

pub fn now_millis() -> i64 {
    (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as i64
}

pub fn parse_rfc3339_millis(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    OffsetDateTime::parse(raw, &Rfc3339)
        .ok()
        .map(|ts| (ts.unix_timestamp_nanos() / 1_000_000) as i64)
}

pub fn to_datetime(millis: i64, offset: UtcOffset) -> Option<OffsetDateTime> {
    OffsetDateTime::from_unix_timestamp_nanos(i128::from(millis) * 1_000_000)
        .ok()
        .map(|ts| ts.to_offset(offset))
}

pub fn format_rfc3339(millis: i64) -> String {
    to_datetime(millis, UtcOffset::UTC)
        .and_then(|ts| ts.format(&Rfc3339).ok())
        .unwrap_or_else(|| millis.to_string())
}

/// Calendar day label in the `dd Month yyyy` shape, e.g. `05 March 2025`.
pub fn day_label(millis: i64, offset: UtcOffset) -> String {
    match to_datetime(millis, offset) {
        Some(ts) => format!("{:02} {} {}", ts.day(), ts.month(), ts.year()),
        None => millis.to_string(),
    }
}
