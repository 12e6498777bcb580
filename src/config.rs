use chrono::{Duration, FixedOffset, Utc};
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::dates::CanonicalDate;
use crate::error::{FestivalError, Result};

pub const DEFAULT_CONFIG_PATH: &str = "campus_fest.toml";

/// Korea Standard Time, the zone the listings are published in.
const DEFAULT_UTC_OFFSET_MINUTES: i32 = 9 * 60;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub timezone: TimezoneConfig,
    pub logging: LoggingConfig,
    pub filters: FilterDefaults,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TimezoneConfig {
    pub utc_offset_minutes: i32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub directory: String,
    pub file_prefix: String,
    pub default_directive: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FilterDefaults {
    pub show_only_active: bool,
}

impl Default for TimezoneConfig {
    fn default() -> Self {
        Self {
            utc_offset_minutes: DEFAULT_UTC_OFFSET_MINUTES,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            directory: "logs".to_string(),
            file_prefix: "campus_fest.log".to_string(),
            default_directive: "campus_fest=info".to_string(),
        }
    }
}

impl Default for FilterDefaults {
    fn default() -> Self {
        Self {
            show_only_active: true,
        }
    }
}

impl TimezoneConfig {
    /// Offset used to turn store timestamps into local wall-clock time.
    pub fn offset(&self) -> Result<FixedOffset> {
        FixedOffset::east_opt(self.utc_offset_minutes * 60).ok_or_else(|| {
            FestivalError::Config(format!(
                "utc_offset_minutes out of range: {}",
                self.utc_offset_minutes
            ))
        })
    }

    /// Current local wall-clock time.
    pub fn now(&self) -> Result<CanonicalDate> {
        let offset = self.offset()?;
        let local = Utc::now().naive_utc() + Duration::seconds(offset.local_minus_utc() as i64);
        Ok(CanonicalDate::new(local))
    }
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let config_content = fs::read_to_string(path).map_err(|e| {
            FestivalError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config: Config = toml::from_str(&config_content)?;
        config.timezone.offset()?;
        Ok(config)
    }

    /// Loads the file when present, otherwise returns the defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }
}
