//! Time source for token-bucket refill.

use std::time::Duration;

use chrono::{DateTime, Utc};

/// Wall-clock reading consulted by the rate limiter on every admission
/// decision. Tests substitute a clock they can step by hand.
pub trait Clock: Send + Sync {
    /// Returns the current instant.
    fn now(&self) -> DateTime<Utc>;

    /// Time elapsed from `earlier` to now. A clock that has stepped behind
    /// `earlier` reports zero, so refill never runs backwards.
    fn since(&self, earlier: DateTime<Utc>) -> Duration {
        (self.now() - earlier).to_std().unwrap_or(Duration::ZERO)
    }
}

/// Reads `Utc::now()`.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::{TimeDelta, TimeZone};

    struct At(DateTime<Utc>);

    impl Clock for At {
        fn now(&self) -> DateTime<Utc> {
            self.0
        }
    }

    #[test]
    fn test_since_measures_forward_time() {
        let start = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        let clock = At(start + TimeDelta::milliseconds(125));

        assert_eq!(clock.since(start), Duration::from_millis(125));
    }

    #[test]
    fn test_since_is_zero_when_clock_is_behind() {
        let start = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        let clock = At(start - TimeDelta::seconds(30));

        assert_eq!(clock.since(start), Duration::ZERO);
    }

    #[test]
    fn test_system_clock_never_runs_behind_an_earlier_reading() {
        let earlier = SystemClock.now();
        assert!(SystemClock.since(earlier) < Duration::from_secs(60));
    }
}
