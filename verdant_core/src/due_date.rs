//! Next-due-date calculation.
//!
//! Day and week schedules step by a fixed number of days. Month and season
//! schedules step by calendar months: when the day of month does not exist
//! in the target month the result is clamped to that month's last day.

use crate::clock::today;
use crate::status::{calculate_status, calculate_urgency, UrgencyPolicy};
use crate::{CareStatus, CareUrgency, DueDateCalculation, Frequency, Schedule};
use chrono::{DateTime, Days, Months, NaiveDate, Utc};

/// Next date care is due after `last_care_date`.
///
/// Returns `None` when there is no last care date, or when the result would
/// fall outside the representable calendar.
pub fn compute_next_due(last_care_date: Option<NaiveDate>, schedule: &Schedule) -> Option<NaiveDate> {
    let last = last_care_date?;
    let interval = schedule.interval();

    match schedule.frequency() {
        Frequency::Daily => last.checked_add_days(Days::new(u64::from(interval))),
        Frequency::Weekly => last.checked_add_days(Days::new(u64::from(interval) * 7)),
        // chrono clamps to the last valid day of the target month.
        Frequency::Monthly => last.checked_add_months(Months::new(interval)),
        Frequency::Seasonal => last.checked_add_months(Months::new(interval.checked_mul(3)?)),
        Frequency::Custom => {
            let days = schedule.custom_days().unwrap_or(interval);
            last.checked_add_days(Days::new(u64::from(days)))
        }
    }
}

/// Full due-date calculation for one schedule at `now`
///
/// `is_overdue` and `days_overdue` compare calendar days: care due today is
/// not overdue at any time of that day, matching [`CareStatus::DueToday`].
pub fn compute_schedule(
    last_care_date: Option<NaiveDate>,
    schedule: &Schedule,
    now: DateTime<Utc>,
    policy: UrgencyPolicy,
) -> DueDateCalculation {
    let days_between_care = schedule.interval_days();

    let Some(next_due) = compute_next_due(last_care_date, schedule) else {
        tracing::debug!("No last care date for {}, status unknown", schedule.care_type());
        return DueDateCalculation {
            next_due_date: None,
            days_between_care,
            is_overdue: false,
            days_overdue: 0,
            status: CareStatus::Unknown,
            urgency: CareUrgency::None,
        };
    };

    let days_past_due = (today(now) - next_due).num_days();

    DueDateCalculation {
        next_due_date: Some(next_due),
        days_between_care,
        is_overdue: days_past_due > 0,
        days_overdue: days_past_due.max(0),
        status: calculate_status(Some(next_due), now),
        urgency: calculate_urgency(Some(next_due), now, policy),
    }
}

/// True when `now` is past the due date plus `grace_days`.
///
/// Compares calendar days; an absent due date is never overdue.
pub fn is_overdue_with_grace_period(
    due_date: Option<NaiveDate>,
    grace_days: u32,
    now: DateTime<Utc>,
) -> bool {
    due_date
        .and_then(|due| due.checked_add_days(Days::new(u64::from(grace_days))))
        .is_some_and(|deadline| today(now) > deadline)
}

/// The date to remind the user, `days_before` the due date
pub fn next_reminder_date(due_date: Option<NaiveDate>, days_before: u32) -> Option<NaiveDate> {
    due_date?.checked_sub_days(Days::new(u64::from(days_before)))
}
