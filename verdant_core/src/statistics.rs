//! Per-plant care statistics.

use crate::consistency::calculate_consistency_score;
use crate::streak::calculate_current_streak;
use crate::{matching_dates, CareEvent, CarePolicy, PlantCareProfile, PlantCareStatistics};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// Summarize a plant's history against its profile at `now`.
///
/// Totals, the breakdown and `last_care_date` cover every care type. Gap
/// figures, the score and the streak only look at the scheduled care type.
pub fn calculate_plant_care_statistics(
    profile: &PlantCareProfile,
    history: &[CareEvent],
    now: DateTime<Utc>,
    policy: &CarePolicy,
) -> PlantCareStatistics {
    let schedule = &profile.schedule;

    let mut care_type_breakdown = BTreeMap::new();
    for event in history {
        *care_type_breakdown.entry(event.care_type).or_insert(0) += 1;
    }

    let last_care_date = history
        .iter()
        .map(|e| e.date)
        .max()
        .or(profile.last_care_date);

    let dates = matching_dates(history, schedule.care_type());
    let gaps: Vec<i64> = dates
        .windows(2)
        .map(|pair| (pair[1] - pair[0]).num_days())
        .collect();

    let average_care_days = if gaps.is_empty() {
        0.0
    } else {
        let mean = gaps.iter().sum::<i64>() as f64 / gaps.len() as f64;
        (mean * 10.0).round() / 10.0
    };
    let longest_care_gap_days = gaps.iter().copied().max().unwrap_or(0);

    PlantCareStatistics {
        total_care_events: history.len(),
        last_care_date,
        average_care_days,
        care_consistency_score: calculate_consistency_score(
            history,
            schedule,
            profile.plant_created_at,
            now,
        ),
        care_type_breakdown,
        longest_care_gap_days,
        current_care_streak: calculate_current_streak(history, schedule, policy.streak_grace_days),
    }
}
