/// Current UTC timestamp in milliseconds.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Current calendar day as a `YYYY-MM-DD` string (UTC).
///
/// Journal entries are keyed by calendar day, not by timestamp.
pub fn today_string() -> String {
    chrono::Utc::now().format("%Y-%m-%d").to_string()
}
