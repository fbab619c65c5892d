//! Care consistency scoring.
//!
//! The score blends two views of the same history:
//! - frequency: did enough care happen since the plant was added (60%)
//! - timing: were the gaps between care close to the interval (40%)
//!
//! plus a flat bonus of 10 when the latest care is within one interval.
//! The result is capped at 100.

use crate::clock::today;
use crate::{matching_dates, CareEvent, Schedule};
use chrono::{DateTime, NaiveDate, Utc};

const FREQUENCY_WEIGHT: f64 = 0.6;
const TIMING_WEIGHT: f64 = 0.4;
const RECENT_CARE_BONUS: f64 = 10.0;

/// Score (0–100) for how well `history` follows `schedule`.
///
/// Only events of the schedule's care type count. An empty history scores 0;
/// a plant too young to have missed anything scores 100.
pub fn calculate_consistency_score(
    history: &[CareEvent],
    schedule: &Schedule,
    plant_created_at: NaiveDate,
    now: DateTime<Utc>,
) -> u8 {
    let dates = matching_dates(history, schedule.care_type());
    let Some(&latest) = dates.last() else {
        return 0;
    };

    let interval_days = schedule.interval_days();
    let today = today(now);
    let plant_age_days = (today - plant_created_at).num_days().max(0);
    let expected_events = plant_age_days / interval_days;

    if expected_events == 0 {
        tracing::debug!(
            "Plant is {} days old with a {}-day interval, too new to score",
            plant_age_days,
            interval_days
        );
        return 100;
    }

    let frequency_score = (dates.len() as f64 / expected_events as f64 * 100.0).min(100.0);
    let timing_score = timing_score(&dates, interval_days);
    let recent_bonus = if (today - latest).num_days() <= interval_days {
        RECENT_CARE_BONUS
    } else {
        0.0
    };

    let score = (frequency_score * FREQUENCY_WEIGHT + timing_score * TIMING_WEIGHT + recent_bonus)
        .min(100.0);

    tracing::debug!(
        frequency = frequency_score,
        timing = timing_score,
        bonus = recent_bonus,
        "Consistency score {:.1}",
        score
    );

    score.round() as u8
}

/// 100 minus the mean gap deviation as a percentage of the interval.
/// `dates` must be sorted oldest first.
fn timing_score(dates: &[NaiveDate], interval_days: i64) -> f64 {
    if dates.len() < 2 {
        return 100.0;
    }

    let deviations: Vec<i64> = dates
        .windows(2)
        .map(|pair| ((pair[1] - pair[0]).num_days() - interval_days).abs())
        .collect();
    let mean_deviation = deviations.iter().sum::<i64>() as f64 / deviations.len() as f64;

    (100.0 - mean_deviation / interval_days as f64 * 100.0).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CareType, Frequency};
    use chrono::{Duration, TimeZone};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn at(day: NaiveDate) -> DateTime<Utc> {
        Utc.from_utc_datetime(&day.and_hms_opt(12, 0, 0).unwrap())
    }

    fn fertilized_on(start: NaiveDate, offsets: &[i64]) -> Vec<CareEvent> {
        offsets
            .iter()
            .map(|d| CareEvent::new(start + Duration::days(*d), CareType::Fertilizer))
            .collect()
    }

    #[test]
    fn test_empty_history_scores_zero() {
        let schedule = Schedule::every(Frequency::Weekly, 1);
        let score = calculate_consistency_score(&[], &schedule, date(2024, 1, 1), at(date(2024, 6, 1)));
        assert_eq!(score, 0);
    }

    #[test]
    fn test_other_care_types_are_ignored() {
        let schedule = Schedule::every(Frequency::Weekly, 1);
        let history = vec![CareEvent::new(date(2024, 5, 30), CareType::Water)];
        let score = calculate_consistency_score(&history, &schedule, date(2024, 1, 1), at(date(2024, 6, 1)));
        assert_eq!(score, 0);
    }

    #[test]
    fn test_brand_new_plant_scores_full() {
        let schedule = Schedule::every(Frequency::Monthly, 1);
        let created = date(2024, 6, 1);
        let history = fertilized_on(created, &[0]);
        let score = calculate_consistency_score(&history, &schedule, created, at(date(2024, 6, 20)));
        assert_eq!(score, 100);
    }

    #[test]
    fn test_perfect_weekly_history() {
        let schedule = Schedule::every(Frequency::Weekly, 1);
        let created = date(2024, 1, 1);
        // 28 days old -> 4 expected, 4 on-time events, last one 6 days ago.
        let history = fertilized_on(created, &[1, 8, 15, 22]);
        let score = calculate_consistency_score(&history, &schedule, created, at(date(2024, 1, 29)));
        assert_eq!(score, 100);
    }

    #[test]
    fn test_sparse_history_scores_low() {
        let schedule = Schedule::every(Frequency::Weekly, 1);
        let created = date(2024, 1, 1);
        // 70 days -> 10 expected; 2 events 21 days apart; last one 49 days ago.
        let history = fertilized_on(created, &[0, 21]);
        let score = calculate_consistency_score(&history, &schedule, created, at(date(2024, 3, 11)));
        // frequency 20 * 0.6 = 12, timing max(0, 100 - 200) = 0, no bonus
        assert_eq!(score, 12);
    }

    #[test]
    fn test_single_event_has_full_timing() {
        let schedule = Schedule::every(Frequency::Weekly, 1);
        let created = date(2024, 1, 1);
        // 14 days -> 2 expected, 1 event 4 days ago.
        let history = fertilized_on(created, &[10]);
        let score = calculate_consistency_score(&history, &schedule, created, at(date(2024, 1, 15)));
        // 50 * 0.6 + 100 * 0.4 + 10 = 80
        assert_eq!(score, 80);
    }

    #[test]
    fn test_unsorted_history_is_handled() {
        let schedule = Schedule::every(Frequency::Weekly, 1);
        let created = date(2024, 1, 1);
        let mut history = fertilized_on(created, &[1, 8, 15, 22]);
        history.reverse();
        let score = calculate_consistency_score(&history, &schedule, created, at(date(2024, 1, 29)));
        assert_eq!(score, 100);
    }
}
