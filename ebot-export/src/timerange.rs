//! Compact duration tokens (`7d`, `24h`, `30m`) and their cutoff instants.

use chrono::{DateTime, Days, Duration, Utc};

/// Unit of a [`TimeRange`] token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    Days,
    Hours,
    Minutes,
}

/// Parsed duration token: a positive magnitude and a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub magnitude: u32,
    pub unit: TimeUnit,
}

impl TimeRange {
    /// The absolute instant `magnitude` units before `now`. Day subtraction is
    /// calendar-aware; hours and minutes are fixed durations.
    pub fn cutoff_from(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        match self.unit {
            TimeUnit::Days => now
                .checked_sub_days(Days::new(self.magnitude as u64))
                .unwrap_or(DateTime::<Utc>::MIN_UTC),
            TimeUnit::Hours => now - Duration::hours(self.magnitude as i64),
            TimeUnit::Minutes => now - Duration::minutes(self.magnitude as i64),
        }
    }

    /// Cutoff relative to the wall clock at call time.
    pub fn cutoff(&self) -> DateTime<Utc> {
        self.cutoff_from(Utc::now())
    }
}

/// Parses a token of the form `<digits><d|h|m>`. Anything else (empty string,
/// missing unit, missing digits, unsupported unit letter, zero magnitude)
/// yields None; this never panics.
pub fn parse_time_range(token: &str) -> Option<TimeRange> {
    let unit = match token.as_bytes().last().copied()? {
        b'd' => TimeUnit::Days,
        b'h' => TimeUnit::Hours,
        b'm' => TimeUnit::Minutes,
        _ => return None,
    };

    let digits = &token[..token.len() - 1];
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let magnitude: u32 = digits.parse().ok()?;
    if magnitude == 0 {
        return None;
    }

    Some(TimeRange { magnitude, unit })
}
