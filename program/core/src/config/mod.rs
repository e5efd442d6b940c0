//! TOML Configuration File Support
//!
//! The program reads an optional TOML file at
//! `~/.config/conference-program/program.toml`.
//!
//! # Configuration Priority
//!
//! Configuration values are loaded with the following priority (highest first):
//! 1. Overrides supplied by the surface ([`ConfigOverrides`])
//! 2. TOML configuration file
//! 3. Default values (the 2024 conference)
//!
//! This crate never reads environment variables itself; surfaces that want
//! environment overrides translate them into [`ConfigOverrides`].
//!
//! # Example Configuration
//!
//! ```toml
//! [schedule]
//! url = "https://talks.osgeo.org/foss4g-sotm-oceania-2024/schedule/export/schedule.json"
//! timeout_secs = 30
//!
//! [layout]
//! compact_breakpoint = 100
//!
//! [preamble]
//! url = "https://example.org/schedule-preamble.md"
//!
//! [day_titles]
//! "2024-11-05" = "Tuesday 5th (Workshops)"
//!
//! [no_events]
//! "2024-11-05" = "No workshops today"
//!
//! [[speakers]]
//! title = "Jane Doe"
//! short_description = "Keynote"
//! long_description_url = "https://example.org/jane.md"
//! ```

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::date::is_date_string;
use crate::day_maps::{DayTitleMap, NoEventsMap};
use crate::layout::DEFAULT_COMPACT_BREAKPOINT;
use crate::speakers::Speaker;

/// Schedule export used when nothing else is configured
pub const DEFAULT_SCHEDULE_URL: &str =
    "https://talks.osgeo.org/foss4g-sotm-oceania-2024/schedule/export/schedule.json";

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur when loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file at {path}: {source}")]
    ReadError {
        /// The path that was attempted
        path: PathBuf,
        /// The underlying IO error
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("Failed to parse TOML config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

// =============================================================================
// Configuration Source Tracking
// =============================================================================

/// Tracks where a configuration value came from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Value supplied by the surface (environment, command line)
    Override,
    /// Value from TOML configuration file
    File,
    /// Default value
    Default,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Override => write!(f, "override"),
            Self::File => write!(f, "config file"),
            Self::Default => write!(f, "default"),
        }
    }
}

// =============================================================================
// TOML Configuration Structures
// =============================================================================

/// Schedule section of the TOML configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleToml {
    /// Schedule export URL
    pub url: Option<String>,

    /// HTTP timeout in seconds
    pub timeout_secs: Option<u64>,
}

/// Layout section of the TOML configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutToml {
    /// Width in columns below which the compact layout is used
    pub compact_breakpoint: Option<u16>,
}

/// Preamble section of the TOML configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PreambleToml {
    /// Markdown document shown above the program
    pub url: Option<String>,
}

/// Top-level TOML configuration structure
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgramToml {
    /// Schedule section
    pub schedule: ScheduleToml,

    /// Layout section
    pub layout: LayoutToml,

    /// Preamble section
    pub preamble: PreambleToml,

    /// Day labels; replaces the defaults when present
    pub day_titles: Option<DayTitleMap>,

    /// Empty-day texts; replaces the defaults when present
    pub no_events: Option<NoEventsMap>,

    /// Featured speakers
    pub speakers: Vec<Speaker>,
}

// =============================================================================
// Main Configuration Struct
// =============================================================================

/// Resolved program configuration
#[derive(Clone, Debug)]
pub struct ProgramConfig {
    /// Schedule export URL
    pub schedule_url: String,

    /// HTTP timeout for all fetches
    pub request_timeout: Duration,

    /// Width in columns below which the compact layout is used
    pub compact_breakpoint: u16,

    /// Optional preamble document URL
    pub preamble_url: Option<String>,

    /// Day labels
    pub day_titles: DayTitleMap,

    /// Empty-day texts
    pub no_events: NoEventsMap,

    /// Featured speakers
    pub speakers: Vec<Speaker>,

    /// Path to the config file that was loaded (if any)
    pub config_file_path: Option<PathBuf>,

    /// Where the schedule URL came from
    source: ConfigSource,
}

impl Default for ProgramConfig {
    fn default() -> Self {
        Self {
            schedule_url: DEFAULT_SCHEDULE_URL.to_string(),
            request_timeout: Duration::from_secs(30),
            compact_breakpoint: DEFAULT_COMPACT_BREAKPOINT,
            preamble_url: None,
            day_titles: DayTitleMap::conference_2024(),
            no_events: NoEventsMap::conference_2024(),
            speakers: Vec::new(),
            config_file_path: None,
            source: ConfigSource::Default,
        }
    }
}

impl ProgramConfig {
    /// Create a new configuration with default values
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Where the schedule URL came from
    #[must_use]
    pub fn source(&self) -> ConfigSource {
        self.source
    }

    /// Check values that would make the program unusable
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] for an empty schedule URL, a
    /// zero timeout, or a day-map key that is not `YYYY-MM-DD`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.schedule_url.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "schedule url must not be empty".to_string(),
            ));
        }
        if self.request_timeout.is_zero() {
            return Err(ConfigError::ValidationError(
                "timeout_secs must be greater than zero".to_string(),
            ));
        }
        let bad_key = self
            .day_titles
            .dates()
            .chain(self.no_events.dates())
            .find(|d| !is_date_string(d));
        if let Some(key) = bad_key {
            return Err(ConfigError::ValidationError(format!(
                "day map key {key:?} is not a YYYY-MM-DD date"
            )));
        }
        Ok(())
    }
}

// =============================================================================
// Configuration Loading
// =============================================================================

/// Get the default configuration file path
///
/// Returns `$XDG_CONFIG_HOME/conference-program/program.toml` or
/// `~/.config/conference-program/program.toml` if `XDG_CONFIG_HOME` is not set.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("conference-program").join("program.toml"))
}

/// Load configuration from the default path
///
/// # Errors
///
/// Returns an error if the config file exists but cannot be parsed or fails
/// validation. A missing config file is not an error (defaults are used).
pub fn load_config(overrides: &ConfigOverrides) -> Result<ProgramConfig, ConfigError> {
    load_config_from_path(default_config_path(), overrides)
}

/// Load configuration from a specific path
///
/// # Errors
///
/// Returns an error if the specified config file cannot be read, parsed or
/// validated.
pub fn load_config_from_path(
    path: Option<PathBuf>,
    overrides: &ConfigOverrides,
) -> Result<ProgramConfig, ConfigError> {
    // Start with defaults
    let mut config = ProgramConfig::default();

    if let Some(ref config_path) = path {
        if config_path.exists() {
            let toml_content =
                std::fs::read_to_string(config_path).map_err(|e| ConfigError::ReadError {
                    path: config_path.clone(),
                    source: e,
                })?;

            let toml_config: ProgramToml = toml::from_str(&toml_content)?;
            apply_toml_config(&mut config, toml_config);
            config.config_file_path = Some(config_path.clone());

            tracing::info!(
                path = %config_path.display(),
                "Loaded configuration from file"
            );
        } else {
            tracing::debug!(
                path = %config_path.display(),
                "Config file not found, using defaults"
            );
        }
    }

    overrides.apply(&mut config);
    config.validate()?;

    Ok(config)
}

/// Apply TOML configuration values to the config struct
fn apply_toml_config(config: &mut ProgramConfig, toml: ProgramToml) {
    if let Some(url) = toml.schedule.url {
        config.schedule_url = url;
        config.source = ConfigSource::File;
    }
    if let Some(secs) = toml.schedule.timeout_secs {
        config.request_timeout = Duration::from_secs(secs);
    }
    if let Some(breakpoint) = toml.layout.compact_breakpoint {
        config.compact_breakpoint = breakpoint;
    }
    if toml.preamble.url.is_some() {
        config.preamble_url = toml.preamble.url;
    }
    if let Some(titles) = toml.day_titles {
        config.day_titles = titles;
    }
    if let Some(no_events) = toml.no_events {
        config.no_events = no_events;
    }
    if !toml.speakers.is_empty() {
        config.speakers = toml.speakers;
    }
}

// =============================================================================
// Override Support
// =============================================================================

/// Values a surface can force over the file and defaults
#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    /// Schedule URL override
    pub schedule_url: Option<String>,

    /// Timeout override (seconds)
    pub timeout_secs: Option<u64>,

    /// Compact layout breakpoint override
    pub compact_breakpoint: Option<u16>,

    /// Preamble URL override
    pub preamble_url: Option<String>,
}

impl ConfigOverrides {
    /// Create empty overrides
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set schedule URL override
    #[must_use]
    pub fn with_schedule_url(mut self, url: impl Into<String>) -> Self {
        self.schedule_url = Some(url.into());
        self
    }

    /// Set timeout override
    #[must_use]
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    /// Set compact breakpoint override
    #[must_use]
    pub fn with_compact_breakpoint(mut self, columns: u16) -> Self {
        self.compact_breakpoint = Some(columns);
        self
    }

    /// Set preamble URL override
    #[must_use]
    pub fn with_preamble_url(mut self, url: impl Into<String>) -> Self {
        self.preamble_url = Some(url.into());
        self
    }

    /// Apply the overrides to a configuration
    pub fn apply(&self, config: &mut ProgramConfig) {
        if let Some(ref url) = self.schedule_url {
            config.schedule_url.clone_from(url);
            config.source = ConfigSource::Override;
        }
        if let Some(secs) = self.timeout_secs {
            config.request_timeout = Duration::from_secs(secs);
        }
        if let Some(columns) = self.compact_breakpoint {
            config.compact_breakpoint = columns;
        }
        if let Some(ref url) = self.preamble_url {
            config.preamble_url = Some(url.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_default_config() {
        let config = ProgramConfig::default();
        assert_eq!(config.schedule_url, DEFAULT_SCHEDULE_URL);
        assert_eq!(config.compact_breakpoint, DEFAULT_COMPACT_BREAKPOINT);
        assert_eq!(config.source(), ConfigSource::Default);
        assert_eq!(
            config.day_titles.get("2024-11-08"),
            Some("Friday 8th (Community Day)")
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_config_path() {
        if let Some(path) = default_config_path() {
            assert!(path.ends_with("conference-program/program.toml"));
        }
    }

    #[test]
    fn test_parse_valid_toml() {
        let file = write_config(
            r#"
[schedule]
url = "https://example.org/schedule.json"
timeout_secs = 5

[layout]
compact_breakpoint = 80

[preamble]
url = "https://example.org/intro.md"

[day_titles]
"2025-03-01" = "Saturday 1st"

[no_events]
"2025-03-01" = "Nothing on"

[[speakers]]
title = "Jane Doe"
short_description = "Keynote"
long_description_url = "https://example.org/jane.md"
"#,
        );

        let config =
            load_config_from_path(Some(file.path().to_path_buf()), &ConfigOverrides::new())
                .unwrap();
        assert_eq!(config.schedule_url, "https://example.org/schedule.json");
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.compact_breakpoint, 80);
        assert_eq!(config.preamble_url.as_deref(), Some("https://example.org/intro.md"));
        assert_eq!(config.day_titles.get("2025-03-01"), Some("Saturday 1st"));
        assert_eq!(config.day_titles.get("2024-11-05"), None);
        assert_eq!(config.no_events.get("2025-03-01"), Some("Nothing on"));
        assert_eq!(config.speakers.len(), 1);
        assert_eq!(config.speakers[0].title, "Jane Doe");
        assert_eq!(config.source(), ConfigSource::File);
        assert_eq!(config.config_file_path, Some(file.path().to_path_buf()));
    }

    #[test]
    fn test_parse_partial_toml_keeps_default_maps() {
        let file = write_config("[layout]\ncompact_breakpoint = 120\n");
        let config =
            load_config_from_path(Some(file.path().to_path_buf()), &ConfigOverrides::new())
                .unwrap();
        assert_eq!(config.compact_breakpoint, 120);
        assert_eq!(config.schedule_url, DEFAULT_SCHEDULE_URL);
        assert_eq!(config.day_titles, DayTitleMap::conference_2024());
        assert_eq!(config.source(), ConfigSource::Default);
    }

    #[test]
    fn test_missing_file_graceful() {
        let path = PathBuf::from("/nonexistent/conference-program/program.toml");
        let config = load_config_from_path(Some(path), &ConfigOverrides::new()).unwrap();
        assert_eq!(config.schedule_url, DEFAULT_SCHEDULE_URL);
        assert!(config.config_file_path.is_none());
    }

    #[test]
    fn test_malformed_toml_error() {
        let file = write_config("[schedule\nurl = ");
        let err = load_config_from_path(Some(file.path().to_path_buf()), &ConfigOverrides::new())
            .unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_bad_day_key_rejected() {
        let file = write_config("[day_titles]\n\"Tuesday\" = \"Workshops\"\n");
        let err = load_config_from_path(Some(file.path().to_path_buf()), &ConfigOverrides::new())
            .unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
        assert!(err.to_string().contains("Tuesday"));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let overrides = ConfigOverrides::new().with_timeout_secs(0);
        let err = load_config_from_path(None, &overrides).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_overrides_beat_file() {
        let file = write_config("[schedule]\nurl = \"https://file.example/s.json\"\n");
        let overrides = ConfigOverrides::new()
            .with_schedule_url("https://override.example/s.json")
            .with_compact_breakpoint(60)
            .with_preamble_url("https://override.example/intro.md");
        let config = load_config_from_path(Some(file.path().to_path_buf()), &overrides).unwrap();
        assert_eq!(config.schedule_url, "https://override.example/s.json");
        assert_eq!(config.compact_breakpoint, 60);
        assert_eq!(config.preamble_url.as_deref(), Some("https://override.example/intro.md"));
        assert_eq!(config.source(), ConfigSource::Override);
    }

    #[test]
    fn test_config_overrides_empty_no_change() {
        let mut config = ProgramConfig::default();
        ConfigOverrides::new().apply(&mut config);
        assert_eq!(config.schedule_url, DEFAULT_SCHEDULE_URL);
        assert_eq!(config.source(), ConfigSource::Default);
    }

    #[test]
    fn test_config_source_display() {
        assert_eq!(ConfigSource::Override.to_string(), "override");
        assert_eq!(ConfigSource::File.to_string(), "config file");
        assert_eq!(ConfigSource::Default.to_string(), "default");
    }
}
