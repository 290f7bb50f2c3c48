// src/integrations/remote_config.rs
//
// Remote configuration boundary.
//
// ARCHITECTURE:
// - Fetches a flat JSON document of feature flags
// - Missing keys fall back to built-in defaults
// - Returns plain values; RemoteConfigService decides what to keep

use async_trait::async_trait;
use reqwest::{header, Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{AppError, AppResult};

/// Remotely controlled flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    /// Kill switch: disables ad serving without a client release
    #[serde(rename = "disableAds")]
    pub disable_ads: bool,

    /// Length of the introductory trial advertised on the paywall
    #[serde(rename = "trialDuration")]
    pub trial_duration_days: u32,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            disable_ads: false,
            trial_duration_days: 3,
        }
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RemoteConfigProvider: Send + Sync {
    async fn fetch(&self) -> AppResult<RemoteConfig>;
}

/// Fetches the config document over HTTP
pub struct HttpRemoteConfigProvider {
    url: String,
    http_client: Client,
}

impl HttpRemoteConfigProvider {
    pub fn new(url: impl Into<String>) -> AppResult<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(15))
            .build()?;

        Ok(Self {
            url: url.into(),
            http_client,
        })
    }
}

#[async_trait]
impl RemoteConfigProvider for HttpRemoteConfigProvider {
    async fn fetch(&self) -> AppResult<RemoteConfig> {
        let response = self
            .http_client
            .get(&self.url)
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() || e.is_timeout() {
                    AppError::NetworkUnreachable
                } else {
                    AppError::Http(e)
                }
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(AppError::Other(format!(
                "Remote config request failed with status {}",
                status
            )));
        }

        let config = response.json::<RemoteConfig>().await?;
        Ok(config)
    }
}
