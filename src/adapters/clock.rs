//! Wall-clock adapter.
//!
//! [`SystemClock`] reads the host clock through `chrono` and sleeps on an
//! `async-io-mini` timer. A fixed `today` can be pinned for scripted runs
//! so expiry badges are reproducible.

use core::future::Future;
use core::time::Duration;

use chrono::{DateTime, NaiveDate, Utc};
// Host driver behind `async_io_mini::Timer`.
use embassy_time as _;

use crate::app::ports::Clock;

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock {
    pinned_today: Option<NaiveDate>,
}

impl SystemClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report `today` as the calendar date regardless of the host clock.
    pub fn pinned(today: NaiveDate) -> Self {
        Self {
            pinned_today: Some(today),
        }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        let now = Utc::now();
        match self.pinned_today {
            Some(day) => day.and_time(now.time()).and_utc(),
            None => now,
        }
    }

    fn today(&self) -> NaiveDate {
        self.pinned_today.unwrap_or_else(|| Utc::now().date_naive())
    }

    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> {
        async move {
            if !duration.is_zero() {
                async_io_mini::Timer::after(duration).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_lite::future::block_on;
    use std::time::Instant;

    #[test]
    fn pinned_clock_reports_pinned_date() {
        let day = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let clock = SystemClock::pinned(day);
        assert_eq!(clock.today(), day);
        assert_eq!(clock.now().date_naive(), day);
    }

    #[test]
    fn zero_sleep_returns_immediately() {
        let start = Instant::now();
        block_on(SystemClock::new().sleep(Duration::ZERO));
        assert!(start.elapsed() < Duration::from_millis(50));
    }

    #[test]
    fn sleep_waits_at_least_the_duration() {
        let start = Instant::now();
        block_on(SystemClock::new().sleep(Duration::from_millis(20)));
        assert!(start.elapsed() >= Duration::from_millis(20));
    }

    #[test]
    fn consecutive_sleeps_accumulate() {
        let clock = SystemClock::new();
        let start = Instant::now();
        block_on(async {
            clock.sleep(Duration::from_millis(10)).await;
            clock.sleep(Duration::from_millis(15)).await;
        });
        assert!(start.elapsed() >= Duration::from_millis(25));
    }
}
