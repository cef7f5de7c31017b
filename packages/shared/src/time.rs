//! Time-related utilities with clock abstraction for testability.
//!
//! Chat timestamps are rendered in India Standard Time (Asia/Kolkata) no
//! matter where the participants are. IST has no daylight saving, so a
//! fixed `+05:30` offset is exact.

use chrono::{DateTime, FixedOffset, Offset, Utc};

/// Offset of Asia/Kolkata from UTC, in seconds.
pub const IST_OFFSET_SECS: i32 = 5 * 3600 + 30 * 60;

/// Wire format of chat message timestamps.
pub const CHAT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Clock trait for dependency injection and testing
pub trait Clock: Send + Sync {
    /// Get current Unix timestamp (milliseconds)
    fn now_millis(&self) -> i64;
}

/// System clock implementation (uses actual system time)
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        get_timestamp_millis()
    }
}

/// Fixed clock implementation for testing (returns a fixed time)
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    fixed_time: i64,
}

impl FixedClock {
    /// Create a new fixed clock with the given timestamp
    pub fn new(fixed_time_millis: i64) -> Self {
        Self {
            fixed_time: fixed_time_millis,
        }
    }
}

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.fixed_time
    }
}

/// Get current Unix timestamp (milliseconds)
pub fn get_timestamp_millis() -> i64 {
    Utc::now().timestamp_millis()
}

fn ist_offset() -> FixedOffset {
    FixedOffset::east_opt(IST_OFFSET_SECS).unwrap_or_else(|| Utc.fix())
}

fn to_ist(timestamp_millis: i64) -> Option<DateTime<FixedOffset>> {
    DateTime::from_timestamp_millis(timestamp_millis).map(|dt| dt.with_timezone(&ist_offset()))
}

/// Convert Unix timestamp (milliseconds) to `YYYY-MM-DD HH:MM:SS` in IST.
///
/// Returns `None` when the timestamp is outside chrono's representable range.
pub fn timestamp_to_ist_string(timestamp_millis: i64) -> Option<String> {
    to_ist(timestamp_millis).map(|dt| dt.format(CHAT_TIMESTAMP_FORMAT).to_string())
}
