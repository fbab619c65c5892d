//! Time sources for the outer boundary.
//!
//! Engine functions take `now` as an argument. Callers pick a clock once,
//! read it once per batch of calculations, and pass the value down.

use crate::{Error, Result};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

/// A source of the current time
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock pinned to one instant (tests, `--now` overrides)
#[derive(Clone, Copy, Debug)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    /// Pin the clock to midnight UTC on `date`
    pub fn at_date(date: NaiveDate) -> Self {
        Self(date.and_time(NaiveTime::MIN).and_utc())
    }

    /// Parse either `YYYY-MM-DD` or an RFC 3339 timestamp
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();
        if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
            return Ok(Self::at_date(date));
        }
        DateTime::parse_from_rfc3339(input)
            .map(|dt| Self(dt.with_timezone(&Utc)))
            .map_err(|e| Error::InvalidDate(format!("{input}: {e}")))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Calendar day of `now` in UTC
pub fn today(now: DateTime<Utc>) -> NaiveDate {
    now.date_naive()
}

/// Midnight UTC at the start of `date`
pub fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}
