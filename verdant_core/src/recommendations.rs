//! Care recommendations for a single plant.
//!
//! Three independent checks run in order:
//! 1. Schedule status (overdue, due today, due this week)
//! 2. Repot age
//! 3. Inspection recency
//!
//! A check that passes contributes nothing.

use crate::clock::today;
use crate::due_date::compute_schedule;
use crate::{CareEvent, CarePolicy, CareStatus, CareType, CareUrgency, PlantCareProfile};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which check produced a recommendation
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationKind {
    CareOverdue,
    CareDueToday,
    CareDueSoon,
    Repot,
    FirstRepot,
    BaselineInspection,
    RoutineInspection,
}

/// A single suggested action
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Recommendation {
    pub kind: RecommendationKind,
    pub urgency: CareUrgency,
    pub message: String,
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Recommended actions for a plant at `now`, in check order
pub fn recommended_care_actions(
    profile: &PlantCareProfile,
    history: &[CareEvent],
    now: DateTime<Utc>,
    policy: &CarePolicy,
) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();
    let today = today(now);

    // Scheduled care
    let calc = compute_schedule(
        profile.last_care_date,
        &profile.schedule,
        now,
        policy.urgency_policy,
    );
    let activity = profile.schedule.care_type().activity();
    let schedule_recommendation = match calc.status {
        CareStatus::Overdue => Some((
            RecommendationKind::CareOverdue,
            format!("{activity} is overdue by {} days", calc.days_overdue),
        )),
        CareStatus::DueToday => Some((
            RecommendationKind::CareDueToday,
            format!("{activity} is due today"),
        )),
        CareStatus::DueSoon => Some((
            RecommendationKind::CareDueSoon,
            format!("{activity} is due within the next week"),
        )),
        CareStatus::Healthy | CareStatus::Unknown => None,
    };
    if let Some((kind, message)) = schedule_recommendation {
        recommendations.push(Recommendation {
            kind,
            urgency: calc.urgency,
            message,
        });
    }

    // Repotting
    match profile.last_repot_date {
        Some(repotted) => {
            let age = (today - repotted).num_days();
            if age > policy.repot_interval_days {
                recommendations.push(Recommendation {
                    kind: RecommendationKind::Repot,
                    urgency: CareUrgency::Low,
                    message: format!(
                        "Consider repotting: last repotted {} years ago",
                        age / 365
                    ),
                });
            }
        }
        None => {
            let age = (today - profile.plant_created_at).num_days();
            if age > policy.first_repot_after_days {
                recommendations.push(Recommendation {
                    kind: RecommendationKind::FirstRepot,
                    urgency: CareUrgency::Low,
                    message: "Consider repotting: no repotting has been recorded for this plant"
                        .to_string(),
                });
            }
        }
    }

    // Inspection
    let last_inspection = history
        .iter()
        .filter(|e| e.care_type == CareType::Inspect)
        .map(|e| e.date)
        .max();
    match last_inspection {
        None => recommendations.push(Recommendation {
            kind: RecommendationKind::BaselineInspection,
            urgency: CareUrgency::Low,
            message: "Inspect for pests and disease to establish a baseline".to_string(),
        }),
        Some(inspected) => {
            let age = (today - inspected).num_days();
            if age > policy.inspection_interval_days {
                recommendations.push(Recommendation {
                    kind: RecommendationKind::RoutineInspection,
                    urgency: CareUrgency::Low,
                    message: format!("Routine inspection: last inspected {age} days ago"),
                });
            }
        }
    }

    tracing::debug!("{} recommendations", recommendations.len());
    recommendations
}
