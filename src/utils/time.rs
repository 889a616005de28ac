// src/utils/time.rs

//! Clock abstraction and time formatting helpers.
//!
//! Event derivation depends on "today" in a fixed timezone. The current
//! instant comes from a [`Clock`] so that callers (and tests) decide what
//! "now" means instead of reading the system time ad hoc.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::error::{AppError, Result};

/// Display and sort format of canonical event times.
pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Source of the current instant.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock backed by the operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock frozen at a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Parse an IANA timezone name such as `Asia/Shanghai`.
pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.parse::<Tz>()
        .map_err(|e| AppError::config(format!("Unknown timezone '{name}': {e}")))
}

/// Convert an epoch-millisecond timestamp to a zoned datetime.
///
/// Non-positive values are treated as absent.
pub fn from_millis(tz: Tz, millis: i64) -> Option<DateTime<Tz>> {
    if millis <= 0 {
        return None;
    }
    tz.timestamp_millis_opt(millis).single()
}

/// Parse a canonical time string, `None` if empty or malformed.
pub fn parse_event_time(text: &str) -> Option<NaiveDateTime> {
    if text.is_empty() {
        return None;
    }
    NaiveDateTime::parse_from_str(text, TIME_FORMAT).ok()
}
