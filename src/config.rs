// src/config.rs
//
// Application configuration.
//
// Every field has a default; a JSON file only needs the keys it overrides.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::db::get_database_path;
use crate::domain::{ReviewPromptPolicy, RetryPolicy};
use crate::error::AppResult;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Settings database; defaults to {APP_DATA}/adgate/adgate.db
    pub database_path: Option<PathBuf>,

    /// Remote config document; when unset the built-in defaults apply
    pub remote_config_url: Option<String>,

    pub ads: AdConfig,

    pub review: ReviewConfig,
}

impl AppConfig {
    /// Reads a JSON config file
    pub fn load(path: &Path) -> AppResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&raw)?;
        Ok(config)
    }

    pub fn resolve_database_path(&self) -> AppResult<PathBuf> {
        match &self.database_path {
            Some(path) => Ok(path.clone()),
            None => get_database_path(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdConfig {
    pub retry: RetryPolicy,

    /// Delay between start-up and the app-open ad
    pub app_open_delay_ms: u64,

    pub app_open_on_start: bool,
}

impl Default for AdConfig {
    fn default() -> Self {
        Self {
            retry: RetryPolicy::default(),
            app_open_delay_ms: 2_000,
            app_open_on_start: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewConfig {
    /// Launch count from which the first review prompt may appear
    pub initial_min_launches: u64,

    /// Launches to wait after the user declines
    pub snooze_launches: u64,
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            initial_min_launches: ReviewPromptPolicy::DEFAULT_MIN_LAUNCHES,
            snooze_launches: 3,
        }
    }
}
