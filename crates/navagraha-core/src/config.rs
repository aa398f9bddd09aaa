//! Configuration loading and typed config structures for the engine.
//!
//! The canonical configuration lives in `navagraha-config.yaml`. Every
//! section and field has a default, so an empty file (or no file at all)
//! yields the documented behavior. Unknown modifier and comparison names
//! are logged at `warn` and ignored.
//!
//! [`ConfigStore`] holds the current snapshot behind an [`Arc`] so callers
//! pass an explicit, immutable configuration into each computation.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Deserialize;
use tracing::{info, warn};

use crate::classify::{Comparison, TierWeights};
use crate::modifiers::ModifierConfig;

/// Environment variable that overrides `logging.level`.
pub const LOG_LEVEL_ENV: &str = "NAVAGRAHA_LOG_LEVEL";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct EngineConfig {
    /// Factor weights by name.
    #[serde(default)]
    pub modifiers: ModifierConfig,

    /// Anti-cyclicity thresholds and weights.
    #[serde(default)]
    pub corrector: CorrectorConfig,

    /// Day classification parameters.
    #[serde(default)]
    pub classifier: ClassifierConfig,

    /// Period rollup parameters.
    #[serde(default)]
    pub aggregate: AggregateConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Snapshot cache settings for [`ConfigStore`].
    #[serde(default)]
    pub cache: CacheConfig,
}

impl EngineConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// `NAVAGRAHA_LOG_LEVEL` overrides `logging.level`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_yml::from_str(yaml)?;
        config.logging.apply_env_overrides();
        config.classifier.warn_unknown_comparisons();
        Ok(config)
    }
}

/// Anti-cyclicity corrector configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CorrectorConfig {
    /// A planet whose population standard deviation is at or below this
    /// value gets position-based variation.
    #[serde(default = "default_min_std_dev")]
    pub min_std_dev: f64,

    /// Multiplier on the eight-entry variation pattern.
    #[serde(default = "default_variation_weight")]
    pub variation_weight: f64,

    /// Multiplier on the day-of-month offset.
    #[serde(default = "default_calendar_weight")]
    pub calendar_weight: f64,

    /// Smallest allowed difference between adjacent days.
    #[serde(default = "default_min_adjacent_delta")]
    pub min_adjacent_delta: f64,

    /// Multiplier on the pattern when nudging near-duplicate neighbors.
    #[serde(default = "default_nudge_weight")]
    pub nudge_weight: f64,

    /// Variation attempts per planet, doubling the weights each time.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Rounds of (spread pass, adjacent pass) before giving up.
    #[serde(default = "default_max_rounds")]
    pub max_rounds: u32,
}

impl Default for CorrectorConfig {
    fn default() -> Self {
        Self {
            min_std_dev: default_min_std_dev(),
            variation_weight: default_variation_weight(),
            calendar_weight: default_calendar_weight(),
            min_adjacent_delta: default_min_adjacent_delta(),
            nudge_weight: default_nudge_weight(),
            max_attempts: default_max_attempts(),
            max_rounds: default_max_rounds(),
        }
    }
}

/// Day classifier configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClassifierConfig {
    /// Starting composite score.
    #[serde(default = "default_baseline")]
    pub baseline: i32,

    /// Scores at or above this value are favorable.
    #[serde(default = "default_threshold")]
    pub threshold: i32,

    /// Ruling-planet energy at or above this earns the exact tier.
    #[serde(default = "default_energy_high")]
    pub energy_high: u8,

    /// Ruling-planet energy at or above this earns the near tier; below
    /// it earns the far tier.
    #[serde(default = "default_energy_low")]
    pub energy_low: u8,

    /// Tier overrides keyed by comparison name.
    #[serde(default)]
    pub comparisons: BTreeMap<String, TierWeights>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            baseline: default_baseline(),
            threshold: default_threshold(),
            energy_high: default_energy_high(),
            energy_low: default_energy_low(),
            comparisons: BTreeMap::new(),
        }
    }
}

impl ClassifierConfig {
    /// Tier weights for `comparison`: the override when configured,
    /// otherwise the built-in default.
    pub fn tiers(&self, comparison: Comparison) -> TierWeights {
        self.comparisons
            .get(comparison.name())
            .copied()
            .unwrap_or_else(|| comparison.default_tiers())
    }

    /// Replace the tiers for `comparison`.
    pub fn set_tiers(&mut self, comparison: Comparison, tiers: TierWeights) {
        self.comparisons.insert(comparison.name().to_owned(), tiers);
    }

    fn warn_unknown_comparisons(&self) {
        for name in self.comparisons.keys() {
            if Comparison::from_name(name).is_none() {
                warn!(name = %name, "unknown comparison name, keeping defaults");
            }
        }
    }
}

/// Period rollup configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AggregateConfig {
    /// Number of entries in the best-N and worst-N lists.
    #[serde(default = "default_top_n")]
    pub top_n: usize,

    /// Minimum change in mean energy between halves to call a trend.
    #[serde(default = "default_trend_threshold")]
    pub trend_threshold: f64,
}

impl Default for AggregateConfig {
    fn default() -> Self {
        Self {
            top_n: default_top_n(),
            trend_threshold: default_trend_threshold(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

impl LoggingConfig {
    fn apply_env_overrides(&mut self) {
        if let Some(level) = std::env::var(LOG_LEVEL_ENV)
            .ok()
            .filter(|level| !level.trim().is_empty())
        {
            self.level = level;
        }
    }
}

/// Snapshot cache configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CacheConfig {
    /// Seconds a loaded snapshot stays fresh.
    #[serde(default = "default_ttl_seconds")]
    pub ttl_seconds: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: default_ttl_seconds(),
        }
    }
}

// ---------------------------------------------------------------------------
// Snapshot store
// ---------------------------------------------------------------------------

/// Holds the current configuration snapshot and knows when it is stale.
///
/// Nothing in the engine reads global state: callers take a
/// [`snapshot`](Self::snapshot) and pass it down explicitly.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: Option<PathBuf>,
    current: Arc<EngineConfig>,
    loaded_at: Instant,
}

impl ConfigStore {
    /// Load the snapshot from `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let config = EngineConfig::from_file(&path)?;
        info!(path = %path.display(), "loaded engine config");
        Ok(Self {
            path: Some(path),
            current: Arc::new(config),
            loaded_at: Instant::now(),
        })
    }

    /// Wrap an in-memory configuration. Such a store never goes stale.
    pub fn from_config(config: EngineConfig) -> Self {
        Self {
            path: None,
            current: Arc::new(config),
            loaded_at: Instant::now(),
        }
    }

    /// The current snapshot.
    pub fn snapshot(&self) -> Arc<EngineConfig> {
        Arc::clone(&self.current)
    }

    /// How long a snapshot stays fresh.
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.current.cache.ttl_seconds)
    }

    /// Whether the file-backed snapshot has outlived its TTL.
    pub fn is_stale(&self) -> bool {
        self.path.is_some() && self.loaded_at.elapsed() >= self.ttl()
    }

    /// Reload from disk. In-memory stores just reset their load time.
    ///
    /// On error the previous snapshot stays in place.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    pub fn refresh(&mut self) -> Result<Arc<EngineConfig>, ConfigError> {
        if let Some(path) = &self.path {
            let config = EngineConfig::from_file(path)?;
            info!(path = %path.display(), "refreshed engine config");
            self.current = Arc::new(config);
        }
        self.loaded_at = Instant::now();
        Ok(self.snapshot())
    }

    /// The current snapshot, refreshing first if it is stale.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a needed refresh fails.
    pub fn fresh_snapshot(&mut self) -> Result<Arc<EngineConfig>, ConfigError> {
        if self.is_stale() {
            self.refresh()
        } else {
            Ok(self.snapshot())
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions
// ---------------------------------------------------------------------------

const fn default_min_std_dev() -> f64 {
    4.0
}

const fn default_variation_weight() -> f64 {
    1.0
}

const fn default_calendar_weight() -> f64 {
    0.5
}

const fn default_min_adjacent_delta() -> f64 {
    2.0
}

const fn default_nudge_weight() -> f64 {
    0.5
}

const fn default_max_attempts() -> u32 {
    6
}

const fn default_max_rounds() -> u32 {
    4
}

const fn default_baseline() -> i32 {
    50
}

const fn default_threshold() -> i32 {
    50
}

const fn default_energy_high() -> u8 {
    65
}

const fn default_energy_low() -> u8 {
    35
}

const fn default_top_n() -> usize {
    3
}

const fn default_trend_threshold() -> f64 {
    3.0
}

fn default_log_level() -> String {
    "info".to_owned()
}

const fn default_ttl_seconds() -> u64 {
    300
}
