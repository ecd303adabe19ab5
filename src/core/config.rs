use crate::core::currency::Currency;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use std::{fs, path::PathBuf};
use tracing::debug;

pub const ECB_DAILY_URL: &str = "https://www.ecb.europa.eu/stats/eurofxref/eurofxref-daily.xml";

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct FeedConfig {
    pub url: String,
    pub timeout_secs: u64,
    pub retries: usize,
    pub retry_delay_ms: u64,
    pub user_agent: String,
}

impl Default for FeedConfig {
    fn default() -> Self {
        FeedConfig {
            url: ECB_DAILY_URL.to_string(),
            timeout_secs: 10,
            retries: 0,
            retry_delay_ms: 500,
            user_agent: format!("ecbfx/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl FeedConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct CacheConfig {
    pub ttl_minutes: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        CacheConfig { ttl_minutes: 240 }
    }
}

impl CacheConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_minutes.saturating_mul(60))
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub feed: FeedConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    /// Target used by `convert` when none is given.
    #[serde(default = "Currency::eur")]
    pub currency: Currency,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            feed: FeedConfig::default(),
            cache: CacheConfig::default(),
            currency: Currency::eur(),
        }
    }
}

impl AppConfig {
    /// Loads the default config file, falling back to built-in defaults when
    /// it does not exist yet.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!(
                "No config at {}, using defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("in", "codito", "ecbfx")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }
}
