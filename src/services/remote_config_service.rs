// src/services/remote_config_service.rs
//
// Remote Config Service - last known remote flags
//
// A failed fetch keeps whatever values were last applied (built-in
// defaults until the first successful fetch).

use std::sync::{Arc, RwLock};

use crate::error::AppResult;
use crate::events::{EventBus, RemoteConfigUpdated};
use crate::integrations::{RemoteConfig, RemoteConfigProvider};
use crate::sync::IgnorePoisonRw;

pub struct RemoteConfigService {
    provider: Option<Arc<dyn RemoteConfigProvider>>,
    event_bus: Arc<EventBus>,
    current: RwLock<RemoteConfig>,
}

impl RemoteConfigService {
    /// `provider` is optional: without one, the defaults stay in effect
    pub fn new(provider: Option<Arc<dyn RemoteConfigProvider>>, event_bus: Arc<EventBus>) -> Self {
        Self {
            provider,
            event_bus,
            current: RwLock::new(RemoteConfig::default()),
        }
    }

    pub fn current(&self) -> RemoteConfig {
        *self.current.read_ignore_poison()
    }

    /// Remote kill switch for all ad formats
    pub fn is_ad_disabled(&self) -> bool {
        self.current.read_ignore_poison().disable_ads
    }

    pub fn trial_duration_days(&self) -> u32 {
        self.current.read_ignore_poison().trial_duration_days
    }

    /// Fetches and applies the remote values
    pub async fn refresh(&self) -> AppResult<RemoteConfig> {
        let Some(provider) = &self.provider else {
            log::debug!("No remote config source configured, keeping defaults");
            return Ok(self.current());
        };

        let config = match provider.fetch().await {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Remote config fetch failed, keeping last values: {}", e);
                return Err(e);
            }
        };

        *self.current.write_ignore_poison() = config;
        log::info!(
            "Remote config applied: disableAds={} trialDuration={}",
            config.disable_ads,
            config.trial_duration_days
        );
        self.event_bus.emit(RemoteConfigUpdated::new(
            config.disable_ads,
            config.trial_duration_days,
        ));
        Ok(config)
    }
}
