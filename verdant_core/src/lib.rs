#![forbid(unsafe_code)]

//! Core domain model and care-scheduling logic for Verdant.
//!
//! This crate provides:
//! - Domain types (care events, schedules, statuses, statistics)
//! - Schedule resolution from free-form text
//! - Due-date, status and urgency calculation
//! - Consistency scoring, streaks and recommendations
//! - Boundary helpers (config, input loaders, logging, clocks)
//!
//! Every engine function takes the current time as an explicit argument.
//! Only [`clock::SystemClock`] reads the wall clock.

pub mod types;
pub mod error;
pub mod clock;
pub mod config;
pub mod logging;
pub mod schedule;
pub mod due_date;
pub mod status;
pub mod consistency;
pub mod streak;
pub mod statistics;
pub mod recommendations;
pub mod history;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::Config;
pub use schedule::{resolve_schedule, Frequency, Schedule};
pub use due_date::{compute_next_due, compute_schedule, is_overdue_with_grace_period, next_reminder_date};
pub use status::{calculate_status, calculate_urgency, needs_immediate_attention, UrgencyPolicy};
pub use consistency::calculate_consistency_score;
pub use streak::calculate_current_streak;
pub use statistics::calculate_plant_care_statistics;
pub use recommendations::{recommended_care_actions, Recommendation, RecommendationKind};
pub use history::{load_care_history_csv, load_plant_file, PlantFile};
