//! Weekly trading-session calendar.
//!
//! The session is a half-open minute-of-day window `[open, close)` on
//! Monday through Friday in one fixed exchange timezone. Holidays are not
//! modelled.

use chrono::{DateTime, Datelike, Timelike, Utc, Weekday};
use chrono_tz::Tz;

use crate::config::MarketConfig;

/// Decides whether the market is open at a given instant.
#[derive(Clone, Copy, Debug)]
pub struct MarketCalendar {
    timezone: Tz,
    open_minute: u32,
    close_minute: u32,
}

impl MarketCalendar {
    /// Creates a calendar for the given timezone and session bounds
    /// (minutes since local midnight).
    #[must_use]
    pub fn new(timezone: Tz, open_minute: u32, close_minute: u32) -> Self {
        Self {
            timezone,
            open_minute,
            close_minute,
        }
    }

    /// Returns `true` if `now` falls inside a weekday session.
    pub fn is_open(&self, now: DateTime<Utc>) -> bool {
        let local = now.with_timezone(&self.timezone);
        if matches!(local.weekday(), Weekday::Sat | Weekday::Sun) {
            return false;
        }
        let minute = local.hour() * 60 + local.minute();
        minute >= self.open_minute && minute < self.close_minute
    }
}

impl Default for MarketCalendar {
    fn default() -> Self {
        Self::from(MarketConfig::default())
    }
}

impl From<MarketConfig> for MarketCalendar {
    fn from(config: MarketConfig) -> Self {
        Self::new(config.timezone, config.open_minute, config.close_minute)
    }
}
