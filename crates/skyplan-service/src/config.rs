use chrono::{Duration, FixedOffset};
use serde::{Deserialize, Serialize};
use skyplan_rules::SchedulePolicy;
use skyplan_rules::policy::{DEFAULT_MIN_SEPARATION_MINUTES, MAX_SEPARATION_MINUTES};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse service config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("minimum separation must be positive, got {0} minutes")]
    NonPositiveSeparation(i64),
    #[error(
        "minimum separation of {0} minutes exceeds the {max} minute limit",
        max = MAX_SEPARATION_MINUTES
    )]
    SeparationOutOfRange(i64),
    #[error("utc offset of {0} seconds is out of range")]
    InvalidOffset(i32),
}

/// Service settings. Every field has a default, so a partial JSON document
/// (or `{}`) is a valid config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    min_separation_minutes: i64,
    utc_offset_seconds: i32,
    serialize_creates: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            min_separation_minutes: DEFAULT_MIN_SEPARATION_MINUTES,
            utc_offset_seconds: 0,
            serialize_creates: true,
        }
    }
}

impl ServiceConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn min_separation_minutes(mut self, minutes: i64) -> Self {
        self.min_separation_minutes = minutes;
        self
    }

    /// Offset whose wall clock defines a calendar day for the
    /// same-day-destination rule.
    pub fn utc_offset_seconds(mut self, seconds: i32) -> Self {
        self.utc_offset_seconds = seconds;
        self
    }

    /// Hold a service-wide guard from validation until the write lands, so
    /// two concurrent creates cannot both pass validation.
    pub fn serialize_creates(mut self, enabled: bool) -> Self {
        self.serialize_creates = enabled;
        self
    }

    pub fn creates_serialized(&self) -> bool {
        self.serialize_creates
    }

    pub fn build_policy(&self) -> Result<SchedulePolicy, ConfigError> {
        if self.min_separation_minutes <= 0 {
            return Err(ConfigError::NonPositiveSeparation(
                self.min_separation_minutes,
            ));
        }
        let min_separation = Duration::try_minutes(self.min_separation_minutes)
            .filter(|_| self.min_separation_minutes <= MAX_SEPARATION_MINUTES)
            .ok_or(ConfigError::SeparationOutOfRange(
                self.min_separation_minutes,
            ))?;
        let reference_offset = FixedOffset::east_opt(self.utc_offset_seconds)
            .ok_or(ConfigError::InvalidOffset(self.utc_offset_seconds))?;
        Ok(SchedulePolicy {
            min_separation,
            reference_offset,
        })
    }
}
