//! Status and urgency classification of due dates.
//!
//! Both classifications work on `diff_days`: the days from `now` until the
//! start of the due date, rounded up, so a due date later today is 0 and
//! any part of a day still ahead counts as a whole day.

use crate::clock::start_of_day;
use crate::{CareStatus, CareUrgency};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

const SECONDS_PER_DAY: i64 = 86_400;

/// Days until a due date count as "due soon"
const DUE_SOON_DAYS: i64 = 7;

/// Threshold table used to map `diff_days` to a [`CareUrgency`]
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum UrgencyPolicy {
    /// More than a week overdue is critical, any lateness is high,
    /// due today or tomorrow is medium, the rest of the week is low.
    #[default]
    Standard,
    /// Escalates more slowly: 1–3 days overdue is medium, 4–7 is high,
    /// only the next three days count as low.
    Graduated,
}

impl UrgencyPolicy {
    fn classify(self, diff_days: i64) -> CareUrgency {
        match self {
            UrgencyPolicy::Standard => match diff_days {
                d if d < -7 => CareUrgency::Critical,
                -7..=-1 => CareUrgency::High,
                0..=1 => CareUrgency::Medium,
                2..=7 => CareUrgency::Low,
                _ => CareUrgency::None,
            },
            UrgencyPolicy::Graduated => match diff_days {
                d if d < -7 => CareUrgency::Critical,
                -7..=-4 => CareUrgency::High,
                -3..=-1 => CareUrgency::Medium,
                0..=3 => CareUrgency::Low,
                _ => CareUrgency::None,
            },
        }
    }
}

/// Whole days from `now` until `due_date`, rounded up
pub fn diff_days(due_date: NaiveDate, now: DateTime<Utc>) -> i64 {
    let seconds = (start_of_day(due_date) - now).num_seconds();
    // Ceiling division; `div_euclid` floors for a positive divisor.
    -(-seconds).div_euclid(SECONDS_PER_DAY)
}

/// Coarse status of a due date relative to now
pub fn calculate_status(due_date: Option<NaiveDate>, now: DateTime<Utc>) -> CareStatus {
    let Some(due_date) = due_date else {
        return CareStatus::Unknown;
    };

    match diff_days(due_date, now) {
        d if d < 0 => CareStatus::Overdue,
        0 => CareStatus::DueToday,
        1..=DUE_SOON_DAYS => CareStatus::DueSoon,
        _ => CareStatus::Healthy,
    }
}

/// Urgency of a due date relative to now under `policy`
pub fn calculate_urgency(
    due_date: Option<NaiveDate>,
    now: DateTime<Utc>,
    policy: UrgencyPolicy,
) -> CareUrgency {
    match due_date {
        Some(due_date) => policy.classify(diff_days(due_date, now)),
        None => CareUrgency::None,
    }
}

/// Whether the user should act right away
pub fn needs_immediate_attention(urgency: CareUrgency) -> bool {
    matches!(urgency, CareUrgency::Critical | CareUrgency::High)
}
