//! Studio configuration.
//!
//! Sources, later overriding earlier:
//! - Bundled defaults (include_str! from atelier.toml)
//! - `~/.config/atelier/atelier.toml`
//! - `./atelier.toml`
//! - `ATELIER_*` environment variables, `__` separating section and key
//!   (`ATELIER_VIDEO__POLL_INTERVAL_SECS=5`)

use atelier_error::{AtelierResult, ConfigError};
use atelier_models::ModelCatalog;
use atelier_orchestration::PollSettings;
use config::{Config, ConfigBuilder, Environment, File, FileFormat, builder::DefaultState};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, instrument};

const DEFAULT_CONFIG: &str = include_str!("../../../atelier.toml");

/// Video job polling.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Getters)]
#[serde(default)]
pub struct VideoConfig {
    /// Seconds between status queries
    poll_interval_secs: u64,
    /// Give up after this many polls; unbounded when absent
    max_polls: Option<u32>,
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: 10,
            max_polls: None,
        }
    }
}

/// Image history.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Getters)]
#[serde(default)]
pub struct HistoryConfig {
    /// Entries kept
    capacity: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            capacity: atelier_storage::DEFAULT_HISTORY_CAPACITY,
        }
    }
}

/// Prompt ideas.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Getters)]
#[serde(default)]
pub struct IdeasConfig {
    /// Prompts per request
    count: usize,
}

impl Default for IdeasConfig {
    fn default() -> Self {
        Self { count: 4 }
    }
}

/// Local storage.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Default, Getters)]
#[serde(default)]
pub struct StorageConfig {
    /// Root for media and state; the platform data directory when absent
    data_dir: Option<PathBuf>,
}

/// Credential readiness probing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Getters)]
#[serde(default)]
pub struct ReadinessConfig {
    /// Milliseconds between availability probes
    probe_interval_ms: u64,
}

impl Default for ReadinessConfig {
    fn default() -> Self {
        Self {
            probe_interval_ms: 100,
        }
    }
}

/// Top-level studio configuration.
///
/// # Example
///
/// ```
/// use atelier_studio::StudioConfig;
///
/// let config = StudioConfig::from_toml_str("[video]\nmax_polls = 30").unwrap();
/// assert_eq!(*config.video().max_polls(), Some(30));
/// assert_eq!(config.models().voice(), "Kore");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Default, Getters)]
#[serde(default)]
pub struct StudioConfig {
    /// Model ids and narrator voice
    models: ModelCatalog,
    /// Video polling
    video: VideoConfig,
    /// Image history
    history: HistoryConfig,
    /// Prompt ideas
    ideas: IdeasConfig,
    /// Local storage
    storage: StorageConfig,
    /// Readiness probing
    readiness: ReadinessConfig,
}

impl StudioConfig {
    /// Load configuration with precedence:
    /// environment > current dir > home dir > bundled defaults.
    ///
    /// User config files are optional and silently skipped if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if a present source cannot be parsed or a value is
    /// out of range.
    #[instrument]
    pub fn load() -> AtelierResult<Self> {
        debug!("Loading configuration: env > current dir > home dir > bundled defaults");

        let mut builder = Self::defaults();

        if let Some(config_dir) = dirs::config_dir() {
            let home_config = config_dir.join("atelier").join("atelier.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder
            .add_source(File::with_name("atelier").required(false))
            .add_source(
                Environment::with_prefix("ATELIER")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        Self::build(builder)
    }

    /// Load bundled defaults overlaid with one file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> AtelierResult<Self> {
        Self::build(Self::defaults().add_source(File::from(path.as_ref())))
    }

    /// Load bundled defaults overlaid with TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text cannot be parsed.
    pub fn from_toml_str(toml: &str) -> AtelierResult<Self> {
        Self::build(Self::defaults().add_source(File::from_str(toml, FileFormat::Toml)))
    }

    fn defaults() -> ConfigBuilder<DefaultState> {
        Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
    }

    fn build(builder: ConfigBuilder<DefaultState>) -> AtelierResult<Self> {
        let config: Self = builder
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to build configuration: {}", e)))?
            .try_deserialize()
            .map_err(|e| ConfigError::new(format!("Failed to parse configuration: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.history.capacity == 0 {
            return Err(ConfigError::new("history.capacity must be at least 1"));
        }
        if self.ideas.count == 0 {
            return Err(ConfigError::new("ideas.count must be at least 1"));
        }
        if self.video.poll_interval_secs == 0 {
            return Err(ConfigError::new("video.poll_interval_secs must be positive"));
        }
        if self.readiness.probe_interval_ms == 0 {
            return Err(ConfigError::new("readiness.probe_interval_ms must be positive"));
        }
        if self.video.max_polls == Some(0) {
            return Err(ConfigError::new("video.max_polls must be at least 1 when set"));
        }
        Ok(())
    }

    /// Polling cadence for video jobs.
    pub fn poll_settings(&self) -> PollSettings {
        PollSettings::new(
            Duration::from_secs(self.video.poll_interval_secs),
            self.video.max_polls,
        )
    }

    /// Delay between credential availability probes.
    pub fn probe_interval(&self) -> Duration {
        Duration::from_millis(self.readiness.probe_interval_ms)
    }

    /// Root directory for media and persisted state.
    pub fn data_dir(&self) -> PathBuf {
        self.storage
            .data_dir
            .clone()
            .or_else(|| dirs::data_dir().map(|d| d.join("atelier")))
            .unwrap_or_else(|| PathBuf::from(".atelier"))
    }

    /// Directory for downloaded media.
    pub fn media_dir(&self) -> PathBuf {
        self.data_dir().join("media")
    }

    /// File holding small persisted state such as the image history.
    pub fn state_file(&self) -> PathBuf {
        self.data_dir().join("state.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_defaults_parse() {
        let config = StudioConfig::from_toml_str("").unwrap();
        assert_eq!(config, StudioConfig::default());
    }

    #[test]
    fn test_zero_capacity_is_rejected() {
        assert!(StudioConfig::from_toml_str("[history]\ncapacity = 0").is_err());
    }
}
