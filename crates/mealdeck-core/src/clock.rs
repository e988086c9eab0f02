//! Injected time source resolving civil time in a fixed zone.
//!
//! All date arithmetic (streaks, history day grouping, meal windows) runs
//! against the civil calendar in Indochina Time (UTC+7), independent of the
//! host timezone. The zone has no DST so a fixed offset is sufficient.

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};

/// Offset of the civil zone (Asia/Ho_Chi_Minh, UTC+7).
pub const CIVIL_OFFSET_SECS: i32 = 7 * 3600;

/// IANA name of the civil zone, carried in reminder preferences.
pub const CIVIL_TIMEZONE: &str = "Asia/Ho_Chi_Minh";

fn civil_offset() -> FixedOffset {
    FixedOffset::east_opt(CIVIL_OFFSET_SECS).expect("valid fixed offset")
}

/// A source of "now". Injected into every component that needs time so
/// tests can pin the clock.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;

    /// Current instant converted to the fixed civil zone.
    fn civil_now(&self) -> DateTime<FixedOffset> {
        self.now().with_timezone(&civil_offset())
    }

    /// Today's calendar date in the civil zone.
    fn civil_date(&self) -> NaiveDate {
        self.civil_now().date_naive()
    }

    /// Current hour (0-23) in the civil zone.
    fn civil_hour(&self) -> u32 {
        use chrono::Timelike;
        self.civil_now().hour()
    }
}

/// Convert an arbitrary instant to its civil calendar date.
pub fn civil_date_of(instant: DateTime<Utc>) -> NaiveDate {
    instant.with_timezone(&civil_offset()).date_naive()
}

/// Wall clock backed by the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A pinned clock for tests and simulations. Clones share the same
/// instant, so a handle kept by the test moves clocks already injected.
#[derive(Debug, Clone)]
pub struct FixedClock {
    now: std::sync::Arc<std::sync::Mutex<DateTime<Utc>>>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: std::sync::Arc::new(std::sync::Mutex::new(now)),
        }
    }

    /// Move the pinned instant.
    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.lock().expect("clock mutex poisoned") = now;
    }

    /// Advance the pinned instant by a duration.
    pub fn advance(&self, delta: chrono::Duration) {
        let mut now = self.now.lock().expect("clock mutex poisoned");
        *now = *now + delta;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().expect("clock mutex poisoned")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn civil_date_crosses_midnight_before_utc() {
        // 18:30 UTC is 01:30 next day in UTC+7.
        let clock = FixedClock::new(Utc.with_ymd_and_hms(2024, 3, 10, 18, 30, 0).unwrap());
        assert_eq!(
            clock.civil_date(),
            NaiveDate::from_ymd_opt(2024, 3, 11).unwrap()
        );
        assert_eq!(clock.civil_hour(), 1);
    }

    #[test]
    fn civil_hour_matches_offset() {
        let clock = FixedClock::new(Utc.with_ymd_and_hms(2024, 3, 10, 5, 0, 0).unwrap());
        assert_eq!(clock.civil_hour(), 12);
    }
}
