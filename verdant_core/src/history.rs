//! Loading plant profiles and care logs handed over by the storage layer.
//!
//! Two inputs are supported:
//! - a JSON plant file holding the profile and its care history
//! - a CSV care log with `date,care_type` rows

use crate::{matching_dates, CareEvent, CareHistory, Error, PlantCareProfile, Result};
use chrono::NaiveDate;
use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A plant profile together with its care history
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlantFile {
    pub profile: PlantCareProfile,
    #[serde(default)]
    pub history: CareHistory,
}

impl PlantFile {
    /// Fill an absent `last_care_date` from the newest history event of the
    /// scheduled care type. A date already on the profile is kept.
    pub fn fill_last_care_date(&mut self) {
        if self.profile.last_care_date.is_some() {
            return;
        }
        let care_type = self.profile.schedule.care_type();
        self.profile.last_care_date = matching_dates(&self.history, care_type).last().copied();
        if let Some(date) = self.profile.last_care_date {
            tracing::debug!("Using last {} event on {} as last care date", care_type, date);
        }
    }
}

/// CSV row format for care logs
#[derive(Debug, Deserialize)]
struct CsvRow {
    date: String,
    care_type: String,
}

impl TryFrom<CsvRow> for CareEvent {
    type Error = Error;

    fn try_from(row: CsvRow) -> Result<Self> {
        let date = NaiveDate::parse_from_str(row.date.trim(), "%Y-%m-%d")
            .map_err(|e| Error::InvalidDate(format!("{}: {}", row.date, e)))?;
        let care_type = row.care_type.parse()?;

        Ok(CareEvent { date, care_type })
    }
}

/// Load a plant file (JSON)
pub fn load_plant_file(path: &Path) -> Result<PlantFile> {
    let contents = std::fs::read_to_string(path)?;
    let plant: PlantFile = serde_json::from_str(&contents)?;

    tracing::info!(
        "Loaded plant from {:?} with {} care events",
        path,
        plant.history.len()
    );

    Ok(plant)
}

/// Load care events from a CSV log.
///
/// Rows that fail to parse are skipped with a warning; the file itself must
/// be readable.
pub fn load_care_history_csv(path: &Path) -> Result<CareHistory> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)?;

    let mut events = Vec::new();
    for (index, result) in reader.deserialize::<CsvRow>().enumerate() {
        // +2: one for the header, one for 1-based line numbers
        let line = index + 2;
        match result {
            Ok(row) => match CareEvent::try_from(row) {
                Ok(event) => events.push(event),
                Err(e) => {
                    tracing::warn!("Skipping care log line {}: {}", line, e);
                }
            },
            Err(e) => {
                tracing::warn!("Failed to deserialize care log line {}: {}", line, e);
            }
        }
    }

    tracing::info!("Loaded {} care events from {:?}", events.len(), path);
    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CareType, Frequency};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_load_plant_file_with_text_schedule() {
        crate::logging::init_test();
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("monstera.json");

        let json = r#"{
            "profile": {
                "schedule": "2 weeks",
                "last_care_date": "2024-05-01",
                "plant_created_at": "2023-09-15"
            },
            "history": [
                { "date": "2024-05-01", "care_type": "fertilizer" },
                { "date": "2024-04-17", "care_type": "inspect" }
            ]
        }"#;
        std::fs::write(&path, json).unwrap();

        let plant = load_plant_file(&path).unwrap();
        assert_eq!(plant.profile.schedule.frequency(), Frequency::Weekly);
        assert_eq!(plant.profile.schedule.interval(), 2);
        assert_eq!(plant.profile.last_care_date, Some(date(2024, 5, 1)));
        assert_eq!(plant.profile.last_repot_date, None);
        assert_eq!(plant.history.len(), 2);
        assert_eq!(plant.history[1].care_type, CareType::Inspect);
    }

    #[test]
    fn test_load_plant_file_without_history() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("fern.json");

        let json = r#"{
            "profile": {
                "schedule": { "frequency": "custom", "custom_days": 10, "care_type": "water" },
                "plant_created_at": "2024-01-01",
                "last_repot_date": "2024-02-01"
            }
        }"#;
        std::fs::write(&path, json).unwrap();

        let plant = load_plant_file(&path).unwrap();
        assert_eq!(plant.profile.schedule.custom_days(), Some(10));
        assert_eq!(plant.profile.schedule.care_type(), CareType::Water);
        assert!(plant.history.is_empty());
    }

    #[test]
    fn test_load_plant_file_rejects_invalid_schedule() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("bad.json");

        let json = r#"{
            "profile": {
                "schedule": { "frequency": "weekly", "interval": 0 },
                "plant_created_at": "2024-01-01"
            }
        }"#;
        std::fs::write(&path, json).unwrap();

        assert!(matches!(load_plant_file(&path), Err(Error::Json(_))));
    }

    fn plant_without_last_care(history: CareHistory) -> PlantFile {
        PlantFile {
            profile: PlantCareProfile {
                schedule: crate::Schedule::every(Frequency::Weekly, 1).with_care_type(CareType::Water),
                last_care_date: None,
                plant_created_at: date(2024, 1, 1),
                last_repot_date: None,
            },
            history,
        }
    }

    #[test]
    fn test_fill_last_care_date_from_history() {
        let mut plant = plant_without_last_care(vec![
            CareEvent::new(date(2024, 1, 15), CareType::Water),
            CareEvent::new(date(2024, 1, 1), CareType::Water),
            CareEvent::new(date(2024, 1, 20), CareType::Prune),
        ]);

        plant.fill_last_care_date();
        assert_eq!(plant.profile.last_care_date, Some(date(2024, 1, 15)));
    }

    #[test]
    fn test_fill_last_care_date_keeps_profile_value() {
        let mut plant =
            plant_without_last_care(vec![CareEvent::new(date(2024, 1, 15), CareType::Water)]);
        plant.profile.last_care_date = Some(date(2024, 1, 3));

        plant.fill_last_care_date();
        assert_eq!(plant.profile.last_care_date, Some(date(2024, 1, 3)));
    }

    #[test]
    fn test_fill_last_care_date_without_matching_events() {
        let mut plant =
            plant_without_last_care(vec![CareEvent::new(date(2024, 1, 15), CareType::Inspect)]);

        plant.fill_last_care_date();
        assert_eq!(plant.profile.last_care_date, None);
    }

    #[test]
    fn test_load_missing_plant_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let result = load_plant_file(&temp_dir.path().join("nope.json"));
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_load_care_history_csv_skips_bad_rows() {
        crate::logging::init_test();
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("care.csv");

        let csv = "date,care_type\n\
                   2024-01-01,water\n\
                   2024-01-08, Fertilizer\n\
                   not-a-date,water\n\
                   2024-01-15,misting\n\
                   2024-01-22,inspect\n";
        std::fs::write(&path, csv).unwrap();

        let events = load_care_history_csv(&path).unwrap();
        assert_eq!(
            events,
            vec![
                CareEvent::new(date(2024, 1, 1), CareType::Water),
                CareEvent::new(date(2024, 1, 8), CareType::Fertilizer),
                CareEvent::new(date(2024, 1, 22), CareType::Inspect),
            ]
        );
    }

    #[test]
    fn test_load_missing_csv_is_an_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let result = load_care_history_csv(&temp_dir.path().join("missing.csv"));
        assert!(matches!(result, Err(Error::Csv(_))));
    }
}
