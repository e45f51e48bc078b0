pub mod time;
pub mod version;

pub use time::{current_timestamp, timestamp_at, UNKNOWN_TIMESTAMP};
pub use version::{parse_version, Version};
