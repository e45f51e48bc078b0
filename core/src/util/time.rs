use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{DateTime, Local};

/// Reported when the system clock cannot be read as a wall-clock time.
pub const UNKNOWN_TIMESTAMP: &str = "unknown";

/// Local time without offset, microsecond precision: `2025-03-01T09:15:02.123456`.
pub fn current_timestamp() -> String {
    timestamp_at(SystemTime::now())
}

pub fn timestamp_at(now: SystemTime) -> String {
    let Ok(since_epoch) = now.duration_since(UNIX_EPOCH) else {
        return UNKNOWN_TIMESTAMP.to_string();
    };
    let Ok(secs) = i64::try_from(since_epoch.as_secs()) else {
        return UNKNOWN_TIMESTAMP.to_string();
    };

    match DateTime::from_timestamp(secs, since_epoch.subsec_nanos()) {
        Some(utc) => utc
            .with_timezone(&Local)
            .format("%Y-%m-%dT%H:%M:%S%.6f")
            .to_string(),
        None => UNKNOWN_TIMESTAMP.to_string(),
    }
}
