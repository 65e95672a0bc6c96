//! Configuration loading for threadsplit.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thread_splitter::{Platform, PlatformProfile};

#[derive(Debug, Deserialize, Default, Clone)]
pub struct Config {
    pub defaults: Option<DefaultsConfig>,
    pub limits: Option<LimitsConfig>,
    #[serde(default)]
    pub platforms: HashMap<Platform, PlatformConfig>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct DefaultsConfig {
    pub platform: Option<Platform>,
    pub optimize: Option<bool>,
    pub number_posts: Option<bool>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct LimitsConfig {
    pub max_input_chars: Option<usize>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct PlatformConfig {
    pub max_chars: Option<usize>,
}

/// Default input cap in characters
pub const DEFAULT_MAX_INPUT_CHARS: usize = 100_000;

impl Config {
    pub fn default_platform(&self) -> Platform {
        self.defaults
            .as_ref()
            .and_then(|defaults| defaults.platform)
            .unwrap_or(Platform::X)
    }

    pub fn optimize(&self) -> bool {
        self.defaults
            .as_ref()
            .and_then(|defaults| defaults.optimize)
            .unwrap_or(true)
    }

    pub fn number_posts(&self) -> bool {
        self.defaults
            .as_ref()
            .and_then(|defaults| defaults.number_posts)
            .unwrap_or(true)
    }

    /// Largest input accepted without `--force`.
    /// Returns configured value or default (100 000).
    pub fn max_input_chars(&self) -> usize {
        self.limits
            .as_ref()
            .and_then(|limits| limits.max_input_chars)
            .unwrap_or(DEFAULT_MAX_INPUT_CHARS)
    }

    /// Built-in profile with any configured `max_chars` override applied.
    pub fn profile_for(&self, platform: Platform) -> PlatformProfile {
        let profile = platform.profile();
        match self.platforms.get(&platform).and_then(|p| p.max_chars) {
            Some(max_chars) => profile.with_max_chars(max_chars),
            None => profile,
        }
    }
}

pub fn default_config_path() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("", "", "threadsplit")
        .context("Could not determine config directory")?;
    Ok(dirs.config_dir().join("config.toml"))
}

pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config: Config =
        toml::from_str(&contents).context("Failed to parse config file as TOML")?;
    Ok(config)
}
