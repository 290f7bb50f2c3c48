// src/integrations/simulated.rs
//
// In-process collaborators for running the stack without vendor SDKs
// (local sessions, demos).

use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, Utc};

use crate::domain::{
    AdKind, CreativeHandle, EntitlementState, Offering, PeriodKind, PeriodUnit,
    SubscriptionPeriod,
};
use crate::error::{AppError, AppResult};
use crate::integrations::ad_network::{AdNetwork, PresentationOutcome};
use crate::integrations::attribution::{AttributionProvider, ConversionData};
use crate::integrations::purchases::{PurchaseProvider, PurchaseResult};
use crate::integrations::remote_config::{RemoteConfig, RemoteConfigProvider};
use crate::sync::IgnorePoison;

/// Ad network that fills after a configurable number of failed loads
pub struct SimulatedAdNetwork {
    load_latency: Duration,
    view_duration: Duration,
    failures_remaining: AtomicU32,
    next_creative: AtomicU64,
}

impl SimulatedAdNetwork {
    pub fn new(load_latency: Duration, view_duration: Duration, initial_failures: u32) -> Self {
        Self {
            load_latency,
            view_duration,
            failures_remaining: AtomicU32::new(initial_failures),
            next_creative: AtomicU64::new(1),
        }
    }
}

#[async_trait]
impl AdNetwork for SimulatedAdNetwork {
    async fn load(&self, kind: AdKind) -> AppResult<CreativeHandle> {
        tokio::time::sleep(self.load_latency).await;

        let failed = self
            .failures_remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failed {
            return Err(AppError::AdLoad {
                kind,
                reason: "no fill".to_string(),
            });
        }

        let id = self.next_creative.fetch_add(1, Ordering::SeqCst);
        Ok(CreativeHandle(format!("{}-{}", kind, id)))
    }

    async fn present(&self, kind: AdKind, creative: CreativeHandle) -> AppResult<PresentationOutcome> {
        log::info!("[SIMULATED] showing {} creative {}", kind, creative.0);
        tokio::time::sleep(self.view_duration).await;
        Ok(PresentationOutcome::completed())
    }
}

/// Store that sells a weekly and an annual plan and remembers purchases
pub struct SimulatedPurchaseProvider {
    entitlement: Mutex<EntitlementState>,
}

impl SimulatedPurchaseProvider {
    pub fn new(initial: EntitlementState) -> Self {
        Self {
            entitlement: Mutex::new(initial),
        }
    }

    fn catalog() -> Vec<Offering> {
        vec![
            Offering {
                package_id: "weekly".to_string(),
                product_id: "premium.weekly".to_string(),
                localized_price: "$4.99".to_string(),
                period: Some(SubscriptionPeriod::new(PeriodUnit::Week, 1)),
                trial_days: Some(3),
            },
            Offering {
                package_id: "annual".to_string(),
                product_id: "premium.annual".to_string(),
                localized_price: "$39.99".to_string(),
                period: Some(SubscriptionPeriod::new(PeriodUnit::Year, 1)),
                trial_days: None,
            },
        ]
    }
}

#[async_trait]
impl PurchaseProvider for SimulatedPurchaseProvider {
    async fn entitlement(&self) -> AppResult<EntitlementState> {
        Ok(self.entitlement.lock_ignore_poison().clone())
    }

    async fn offerings(&self) -> AppResult<Vec<Offering>> {
        Ok(Self::catalog())
    }

    async fn purchase(&self, package_id: String) -> AppResult<PurchaseResult> {
        let offering = Self::catalog()
            .into_iter()
            .find(|o| o.package_id == package_id)
            .ok_or(AppError::NotFound)?;

        let (period, days) = match (offering.trial_days, &offering.period) {
            (Some(trial), _) => (PeriodKind::Trial, i64::from(trial)),
            (None, Some(p)) if p.unit == PeriodUnit::Year => (PeriodKind::Paid, 365),
            _ => (PeriodKind::Paid, 7),
        };
        let entitlement =
            EntitlementState::active(period, Some(Utc::now() + ChronoDuration::days(days)));
        *self.entitlement.lock_ignore_poison() = entitlement.clone();

        Ok(PurchaseResult {
            entitlement,
            user_cancelled: false,
        })
    }

    async fn restore(&self) -> AppResult<EntitlementState> {
        Ok(self.entitlement.lock_ignore_poison().clone())
    }

    async fn set_attributes(&self, attributes: Vec<(String, String)>) -> AppResult<()> {
        for (key, value) in attributes {
            log::info!("[SIMULATED] subscriber attribute {} = {}", key, value);
        }
        Ok(())
    }
}

/// Remote config that always serves the same values
pub struct StaticRemoteConfigProvider {
    config: RemoteConfig,
}

impl StaticRemoteConfigProvider {
    pub fn new(config: RemoteConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl RemoteConfigProvider for StaticRemoteConfigProvider {
    async fn fetch(&self) -> AppResult<RemoteConfig> {
        Ok(self.config)
    }
}

/// Attribution source that reports fixed conversion data
pub struct StaticAttributionProvider {
    data: ConversionData,
}

impl StaticAttributionProvider {
    pub fn new(data: ConversionData) -> Self {
        Self { data }
    }
}

#[async_trait]
impl AttributionProvider for StaticAttributionProvider {
    async fn conversion_data(&self) -> AppResult<ConversionData> {
        Ok(self.data.clone())
    }
}
