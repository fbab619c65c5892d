//! Core domain types for the Verdant care engine.
//!
//! This module defines the fundamental types used throughout the system:
//! - Care types and logged care events
//! - The plant profile the engine reads from storage
//! - Status and urgency classifications
//! - Engine outputs (due-date calculations, statistics)
//! - Tunable thresholds for the engine

use crate::schedule::Schedule;
use crate::status::UrgencyPolicy;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Care Events
// ============================================================================

/// Kind of care action a user can log
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum CareType {
    Fertilizer,
    Water,
    Repot,
    Prune,
    Inspect,
    Other,
}

impl CareType {
    pub const ALL: [CareType; 6] = [
        CareType::Fertilizer,
        CareType::Water,
        CareType::Repot,
        CareType::Prune,
        CareType::Inspect,
        CareType::Other,
    ];

    /// Snake-case identifier, as used in files and on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            CareType::Fertilizer => "fertilizer",
            CareType::Water => "water",
            CareType::Repot => "repot",
            CareType::Prune => "prune",
            CareType::Inspect => "inspect",
            CareType::Other => "other",
        }
    }

    /// Activity noun used in user-facing messages ("Watering is overdue")
    pub fn activity(&self) -> &'static str {
        match self {
            CareType::Fertilizer => "Fertilizing",
            CareType::Water => "Watering",
            CareType::Repot => "Repotting",
            CareType::Prune => "Pruning",
            CareType::Inspect => "Inspection",
            CareType::Other => "Care",
        }
    }
}

impl fmt::Display for CareType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CareType {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fertilizer" | "fertilize" | "fertilizing" => Ok(CareType::Fertilizer),
            "water" | "watering" => Ok(CareType::Water),
            "repot" | "repotting" => Ok(CareType::Repot),
            "prune" | "pruning" => Ok(CareType::Prune),
            "inspect" | "inspection" => Ok(CareType::Inspect),
            "other" => Ok(CareType::Other),
            other => Err(crate::Error::InvalidCareType(other.to_string())),
        }
    }
}

/// A single logged care action
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CareEvent {
    pub date: NaiveDate,
    pub care_type: CareType,
}

impl CareEvent {
    pub fn new(date: NaiveDate, care_type: CareType) -> Self {
        Self { date, care_type }
    }
}

/// All care events logged for one plant, in no particular order
pub type CareHistory = Vec<CareEvent>;

/// Dates of all events of `care_type`, oldest first
pub fn matching_dates(history: &[CareEvent], care_type: CareType) -> Vec<NaiveDate> {
    let mut dates: Vec<NaiveDate> = history
        .iter()
        .filter(|e| e.care_type == care_type)
        .map(|e| e.date)
        .collect();
    dates.sort_unstable();
    dates
}

// ============================================================================
// Plant Profile
// ============================================================================

/// The subset of a stored plant the engine needs
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlantCareProfile {
    pub schedule: Schedule,
    #[serde(default)]
    pub last_care_date: Option<NaiveDate>,
    pub plant_created_at: NaiveDate,
    #[serde(default)]
    pub last_repot_date: Option<NaiveDate>,
}

// ============================================================================
// Classifications
// ============================================================================

/// Coarse classification of a due date relative to now
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum CareStatus {
    Unknown,
    Healthy,
    DueSoon,
    DueToday,
    Overdue,
}

impl fmt::Display for CareStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CareStatus::Unknown => "unknown",
            CareStatus::Healthy => "healthy",
            CareStatus::DueSoon => "due_soon",
            CareStatus::DueToday => "due_today",
            CareStatus::Overdue => "overdue",
        };
        f.write_str(label)
    }
}

/// Fine-grained prioritization signal
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum CareUrgency {
    None,
    Low,
    Medium,
    High,
    Critical,
}

impl fmt::Display for CareUrgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CareUrgency::None => "none",
            CareUrgency::Low => "low",
            CareUrgency::Medium => "medium",
            CareUrgency::High => "high",
            CareUrgency::Critical => "critical",
        };
        f.write_str(label)
    }
}

// ============================================================================
// Engine Outputs
// ============================================================================

/// Next-due calculation for one schedule, relative to a given now
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct DueDateCalculation {
    pub next_due_date: Option<NaiveDate>,
    pub days_between_care: i64,
    pub is_overdue: bool,
    pub days_overdue: i64,
    pub status: CareStatus,
    pub urgency: CareUrgency,
}

/// Snapshot of a plant's care history
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PlantCareStatistics {
    pub total_care_events: usize,
    pub last_care_date: Option<NaiveDate>,
    pub average_care_days: f64,
    pub care_consistency_score: u8,
    pub care_type_breakdown: BTreeMap<CareType, usize>,
    pub longest_care_gap_days: i64,
    pub current_care_streak: u32,
}

// ============================================================================
// Engine Policy
// ============================================================================

/// Thresholds the engine applies. `Default` holds the standard values.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CarePolicy {
    pub urgency_policy: UrgencyPolicy,
    /// Tolerance added to the interval before a gap breaks a streak
    pub streak_grace_days: i64,
    /// Repot again once the last repot is older than this
    pub repot_interval_days: i64,
    /// Repot a never-repotted plant once it is older than this
    pub first_repot_after_days: i64,
    /// Routine inspection once the last inspection is older than this
    pub inspection_interval_days: i64,
}

impl Default for CarePolicy {
    fn default() -> Self {
        Self {
            urgency_policy: UrgencyPolicy::Standard,
            streak_grace_days: 7,
            repot_interval_days: 730,
            first_repot_after_days: 365,
            inspection_interval_days: 30,
        }
    }
}
