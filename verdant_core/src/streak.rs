//! On-time care streaks.

use crate::{matching_dates, CareEvent, Schedule};

/// Count of consecutive on-time care events, ending at the most recent one.
///
/// Walking back from the newest event of the schedule's care type, each
/// older event extends the streak while the gap to it is at most
/// `interval_days + grace_days`. The first longer gap ends the walk.
pub fn calculate_current_streak(history: &[CareEvent], schedule: &Schedule, grace_days: i64) -> u32 {
    let dates = matching_dates(history, schedule.care_type());
    if dates.is_empty() {
        return 0;
    }

    let max_gap = schedule.interval_days() + grace_days;

    let on_time_gaps = dates
        .windows(2)
        .rev()
        .take_while(|pair| (pair[1] - pair[0]).num_days() <= max_gap)
        .count();

    let streak = u32::try_from(on_time_gaps + 1).unwrap_or(u32::MAX);
    tracing::debug!("Current {} streak: {}", schedule.care_type(), streak);
    streak
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CareType, Frequency};
    use chrono::{Duration, NaiveDate};

    const GRACE: i64 = 7;

    fn events_on(days: &[i64]) -> Vec<CareEvent> {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        days.iter()
            .map(|d| CareEvent::new(start + Duration::days(*d - 1), CareType::Fertilizer))
            .collect()
    }

    fn weekly() -> Schedule {
        Schedule::every(Frequency::Weekly, 1)
    }

    #[test]
    fn test_empty_history() {
        assert_eq!(calculate_current_streak(&[], &weekly(), GRACE), 0);
    }

    #[test]
    fn test_single_event() {
        assert_eq!(calculate_current_streak(&events_on(&[5]), &weekly(), GRACE), 1);
    }

    #[test]
    fn test_on_schedule_weekly() {
        let history = events_on(&[1, 8, 15, 22]);
        assert_eq!(calculate_current_streak(&history, &weekly(), GRACE), 4);
    }

    #[test]
    fn test_gap_within_grace_keeps_streak() {
        // 14-day gap equals interval + grace
        let history = events_on(&[1, 15, 22]);
        assert_eq!(calculate_current_streak(&history, &weekly(), GRACE), 3);
    }

    #[test]
    fn test_recent_gap_resets_streak() {
        let history = events_on(&[1, 8, 15, 40]);
        assert_eq!(calculate_current_streak(&history, &weekly(), GRACE), 1);
    }

    #[test]
    fn test_old_gap_only_cuts_the_tail() {
        let history = events_on(&[1, 30, 37, 44]);
        assert_eq!(calculate_current_streak(&history, &weekly(), GRACE), 3);
    }

    #[test]
    fn test_order_and_other_types_do_not_matter() {
        let mut history = events_on(&[22, 1, 15, 8]);
        history.push(CareEvent::new(
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            CareType::Water,
        ));
        assert_eq!(calculate_current_streak(&history, &weekly(), GRACE), 4);
    }

    #[test]
    fn test_zero_grace() {
        let history = events_on(&[1, 9, 16]);
        assert_eq!(calculate_current_streak(&history, &weekly(), 0), 2);
    }
}
