//! Configuration file support for Verdant.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/verdant/config.toml`.

use crate::{CarePolicy, Error, Result, UrgencyPolicy};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub policy: PolicyConfig,

    #[serde(default)]
    pub reminders: ReminderConfig,
}

/// Engine thresholds
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PolicyConfig {
    #[serde(default)]
    pub urgency_policy: UrgencyPolicy,

    #[serde(default = "default_streak_grace_days")]
    pub streak_grace_days: i64,

    #[serde(default = "default_repot_interval_days")]
    pub repot_interval_days: i64,

    #[serde(default = "default_first_repot_after_days")]
    pub first_repot_after_days: i64,

    #[serde(default = "default_inspection_interval_days")]
    pub inspection_interval_days: i64,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            urgency_policy: UrgencyPolicy::default(),
            streak_grace_days: default_streak_grace_days(),
            repot_interval_days: default_repot_interval_days(),
            first_repot_after_days: default_first_repot_after_days(),
            inspection_interval_days: default_inspection_interval_days(),
        }
    }
}

/// Reminder configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReminderConfig {
    #[serde(default = "default_reminder_days_before")]
    pub days_before: u32,
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self {
            days_before: default_reminder_days_before(),
        }
    }
}

// Default value functions
fn default_streak_grace_days() -> i64 {
    CarePolicy::default().streak_grace_days
}

fn default_repot_interval_days() -> i64 {
    CarePolicy::default().repot_interval_days
}

fn default_first_repot_after_days() -> i64 {
    CarePolicy::default().first_repot_after_days
}

fn default_inspection_interval_days() -> i64 {
    CarePolicy::default().inspection_interval_days
}

fn default_reminder_days_before() -> u32 {
    2
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        match Self::default_config_path() {
            Some(config_path) if config_path.exists() => Self::load_from(&config_path),
            config_path => {
                tracing::info!(
                    "No config file found at {:?}, using defaults",
                    config_path
                );
                Ok(Self::default())
            }
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path, if the platform has a config dir
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|base| base.join("verdant").join("config.toml"))
    }

    /// Save the current configuration to the default path
    pub fn save(&self) -> Result<()> {
        let config_path = Self::default_config_path()
            .ok_or_else(|| Error::Config("No config directory on this platform".into()))?;
        self.save_to(&config_path)
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }

    /// Reject thresholds that cannot be meaningful
    pub fn validate(&self) -> Result<()> {
        let policy = &self.policy;
        let thresholds = [
            ("streak_grace_days", policy.streak_grace_days),
            ("repot_interval_days", policy.repot_interval_days),
            ("first_repot_after_days", policy.first_repot_after_days),
            ("inspection_interval_days", policy.inspection_interval_days),
        ];
        for (name, value) in thresholds {
            if value < 0 {
                return Err(Error::Config(format!("{name} must not be negative, got {value}")));
            }
        }
        Ok(())
    }

    /// Engine thresholds from the `[policy]` table
    pub fn care_policy(&self) -> CarePolicy {
        CarePolicy {
            urgency_policy: self.policy.urgency_policy,
            streak_grace_days: self.policy.streak_grace_days,
            repot_interval_days: self.policy.repot_interval_days,
            first_repot_after_days: self.policy.first_repot_after_days,
            inspection_interval_days: self.policy.inspection_interval_days,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_matches_default_policy() {
        let config = Config::default();
        assert_eq!(config.care_policy(), CarePolicy::default());
        assert_eq!(config.reminders.days_before, 2);
    }

    #[test]
    fn test_config_roundtrip() {
        let mut config = Config::default();
        config.policy.urgency_policy = UrgencyPolicy::Graduated;
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();

        assert_eq!(parsed.care_policy(), config.care_policy());
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
[policy]
urgency_policy = "graduated"
streak_grace_days = 3
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        let policy = config.care_policy();
        assert_eq!(policy.urgency_policy, UrgencyPolicy::Graduated);
        assert_eq!(policy.streak_grace_days, 3);
        assert_eq!(policy.repot_interval_days, 730); // default
        assert_eq!(config.reminders.days_before, 2); // default
    }

    #[test]
    fn test_save_and_load_from_path() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.reminders.days_before = 5;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.reminders.days_before, 5);
    }

    #[test]
    fn test_negative_threshold_rejected() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[policy]\ninspection_interval_days = -1\n").unwrap();

        assert!(matches!(Config::load_from(&path), Err(Error::Config(_))));
    }

    #[test]
    fn test_unknown_urgency_policy_rejected() {
        let result: std::result::Result<Config, _> =
            toml::from_str("[policy]\nurgency_policy = \"lenient\"\n");
        assert!(result.is_err());
    }
}
