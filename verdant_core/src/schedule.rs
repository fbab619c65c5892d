//! Care schedules and the lenient resolver that builds them from text.
//!
//! Recognized forms (case-insensitive, surrounding whitespace ignored):
//! - `daily`, `weekly`, `monthly`, `seasonal`
//! - `<N> weeks`, `<N> months` (and `every <N> weeks|months`)
//! - `every <N> days`, `<N> days`, or a bare day count `<N>`
//!
//! Anything else resolves to monthly, interval 1.

use crate::{CareType, Error, Result};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// How often a care action recurs
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Seasonal,
    Custom,
}

/// Canonical description of a recurring care action
///
/// `interval >= 1`, and `custom_days` is set exactly when the frequency is
/// [`Frequency::Custom`]. Construction goes through checked paths only, so
/// every `Schedule` in hand satisfies both.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "ScheduleRepr")]
pub struct Schedule {
    frequency: Frequency,
    interval: u32,
    care_type: CareType,
    #[serde(skip_serializing_if = "Option::is_none")]
    custom_days: Option<u32>,
}

impl Schedule {
    /// Checked constructor
    pub fn new(
        frequency: Frequency,
        interval: u32,
        care_type: CareType,
        custom_days: Option<u32>,
    ) -> Result<Self> {
        if interval == 0 {
            return Err(Error::InvalidSchedule("interval must be at least 1".into()));
        }
        match (frequency, custom_days) {
            (Frequency::Custom, Some(0)) => Err(Error::InvalidSchedule(
                "custom_days must be at least 1".into(),
            )),
            (Frequency::Custom, None) => Err(Error::InvalidSchedule(
                "custom schedules need custom_days".into(),
            )),
            (Frequency::Custom, Some(_)) | (_, None) => Ok(Self {
                frequency,
                interval,
                care_type,
                custom_days,
            }),
            (other, Some(_)) => Err(Error::InvalidSchedule(format!(
                "custom_days is only valid for custom schedules, not {other:?}"
            ))),
        }
    }

    /// Fertilizer schedule repeating every `interval` units of `frequency`.
    ///
    /// A zero interval is raised to 1. `Frequency::Custom` treats `interval`
    /// as the day count.
    pub fn every(frequency: Frequency, interval: u32) -> Self {
        let interval = interval.max(1);
        match frequency {
            Frequency::Custom => Self::custom(interval),
            _ => Self {
                frequency,
                interval,
                care_type: CareType::Fertilizer,
                custom_days: None,
            },
        }
    }

    /// Fertilizer schedule repeating every `days` days (minimum 1)
    pub fn custom(days: u32) -> Self {
        Self {
            frequency: Frequency::Custom,
            interval: 1,
            care_type: CareType::Fertilizer,
            custom_days: Some(days.max(1)),
        }
    }

    /// The same schedule for a different care action
    pub fn with_care_type(self, care_type: CareType) -> Self {
        Self { care_type, ..self }
    }

    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    pub fn interval(&self) -> u32 {
        self.interval
    }

    pub fn care_type(&self) -> CareType {
        self.care_type
    }

    pub fn custom_days(&self) -> Option<u32> {
        self.custom_days
    }

    /// Nominal length of one interval in days.
    ///
    /// Months count as 30 days and seasons as 90. Calendar-exact stepping
    /// lives in [`crate::due_date::compute_next_due`].
    pub fn interval_days(&self) -> i64 {
        let interval = i64::from(self.interval);
        match self.frequency {
            Frequency::Daily => interval,
            Frequency::Weekly => interval * 7,
            Frequency::Monthly => interval * 30,
            Frequency::Seasonal => interval * 90,
            Frequency::Custom => self.custom_days.map_or(interval, i64::from),
        }
    }
}

impl Default for Schedule {
    fn default() -> Self {
        Self::every(Frequency::Monthly, 1)
    }
}

impl fmt::Display for Schedule {
    /// Renders a description the resolver maps back to a schedule with the
    /// same interval length (care type aside).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.frequency, self.interval) {
            (Frequency::Daily, 1) => f.write_str("daily"),
            (Frequency::Daily, n) => write!(f, "{n} days"),
            (Frequency::Weekly, n) => write!(f, "{n} weeks"),
            (Frequency::Monthly, n) => write!(f, "{n} months"),
            (Frequency::Seasonal, n) => write!(f, "{} months", u64::from(n) * 3),
            (Frequency::Custom, _) => {
                write!(f, "every {} days", self.interval_days())
            }
        }
    }
}

impl FromStr for Schedule {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(resolve_schedule(s))
    }
}

/// Accepts either a free-form description or explicit fields
#[derive(Deserialize)]
#[serde(untagged)]
enum ScheduleRepr {
    Text(String),
    Fields {
        frequency: Frequency,
        #[serde(default = "default_interval")]
        interval: u32,
        #[serde(default = "default_care_type")]
        care_type: CareType,
        #[serde(default)]
        custom_days: Option<u32>,
    },
}

fn default_interval() -> u32 {
    1
}

fn default_care_type() -> CareType {
    CareType::Fertilizer
}

impl TryFrom<ScheduleRepr> for Schedule {
    type Error = Error;

    fn try_from(repr: ScheduleRepr) -> Result<Self> {
        match repr {
            ScheduleRepr::Text(text) => Ok(resolve_schedule(&text)),
            ScheduleRepr::Fields {
                frequency,
                interval,
                care_type,
                custom_days,
            } => Schedule::new(frequency, interval, care_type, custom_days),
        }
    }
}

/// Resolve a loosely formatted schedule description.
///
/// Never fails: unrecognized input becomes monthly, interval 1.
pub fn resolve_schedule(input: &str) -> Schedule {
    let normalized = input.trim().to_lowercase();
    let tokens: Vec<&str> = normalized.split_whitespace().collect();

    let resolved = match tokens.as_slice() {
        ["daily"] => Some(Schedule::every(Frequency::Daily, 1)),
        ["weekly"] => Some(Schedule::every(Frequency::Weekly, 1)),
        ["monthly"] => Some(Schedule::every(Frequency::Monthly, 1)),
        ["seasonal"] => Some(Schedule::every(Frequency::Seasonal, 1)),
        [count] => positive(count).map(Schedule::custom),
        ["every", count, unit] | [count, unit] => {
            positive(count).and_then(|n| match *unit {
                "day" | "days" => Some(Schedule::custom(n)),
                "week" | "weeks" => Some(Schedule::every(Frequency::Weekly, n)),
                "month" | "months" => Some(Schedule::every(Frequency::Monthly, n)),
                _ => None,
            })
        }
        _ => None,
    };

    resolved.unwrap_or_else(|| {
        tracing::debug!("Unrecognized schedule {:?}, defaulting to monthly", input);
        Schedule::default()
    })
}

fn positive(token: &str) -> Option<u32> {
    token.parse::<u32>().ok().filter(|n| *n > 0)
}
