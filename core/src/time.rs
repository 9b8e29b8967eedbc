//! Time related utils.

/// DateTime in UTC.
pub type DateTime = chrono::DateTime<chrono::Utc>;

/// Returns the current time in UTC.
pub fn now() -> DateTime {
    chrono::Utc::now()
}

/// Format a time as ISO-8601 with millisecond precision: `2019-01-01T00:00:00.000Z`.
///
/// This is the format the dragonchain API expects in the `timestamp` header,
/// and the exact string is also folded into the signed message, so it must
/// not be reformatted between signing and dispatch.
pub fn format_iso8601(t: DateTime) -> String {
    t.to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}
