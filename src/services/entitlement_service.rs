// src/services/entitlement_service.rs
//
// Entitlement Service - premium status owner
//
// CRITICAL RULES:
// - The stored state is only ever replaced wholesale (last write wins)
// - Every applied snapshot is broadcast as EntitlementChanged
// - Purchase-provider failures surface as EntitlementFetch / NetworkUnreachable

use std::sync::{Arc, RwLock};

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::domain::{validate_entitlement, EntitlementState, Offering};
use crate::error::{AppError, AppResult};
use crate::events::{EntitlementChanged, EventBus};
use crate::integrations::{PurchaseProvider, CAMPAIGN_ATTRIBUTE, MEDIA_SOURCE_ATTRIBUTE};
use crate::repositories::{keys, SettingsExt, SettingsRepository};
use crate::sync::IgnorePoisonRw;

/// Result of a purchase attempt, as the paywall sees it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PurchaseOutcome {
    Subscribed,
    NotSubscribed,
    /// The transaction went through but premium is not (yet) active
    Unknown,
}

pub struct EntitlementService {
    provider: Arc<dyn PurchaseProvider>,
    settings: Arc<dyn SettingsRepository>,
    event_bus: Arc<EventBus>,
    state: RwLock<EntitlementState>,
}

impl EntitlementService {
    /// Starts out unknown/inactive until the provider reports
    pub fn new(
        provider: Arc<dyn PurchaseProvider>,
        settings: Arc<dyn SettingsRepository>,
        event_bus: Arc<EventBus>,
    ) -> Self {
        Self {
            provider,
            settings,
            event_bus,
            state: RwLock::new(EntitlementState::unknown()),
        }
    }

    pub fn current(&self) -> EntitlementState {
        self.state.read_ignore_poison().clone()
    }

    pub fn is_premium(&self) -> bool {
        self.state.read_ignore_poison().is_premium()
    }

    /// Replaces the stored entitlement and notifies subscribers.
    ///
    /// Invalid snapshots are rejected and leave the stored state untouched.
    pub fn apply_update(&self, snapshot: EntitlementState) -> AppResult<()> {
        validate_entitlement(&snapshot)?;

        let was_premium = {
            let mut state = self.state.write_ignore_poison();
            let was_premium = state.is_premium();
            *state = snapshot.clone();
            was_premium
        };

        if let Err(e) = self.settings.set(keys::PREMIUM_CACHE, &snapshot) {
            log::warn!("Failed to cache entitlement snapshot: {}", e);
        }

        log::info!(
            "Entitlement updated: active={} period={} (was premium: {})",
            snapshot.is_active,
            snapshot.period,
            was_premium
        );
        self.event_bus.emit(EntitlementChanged::new(snapshot, was_premium));
        Ok(())
    }

    /// Last snapshot persisted by `apply_update`, from this or a previous process
    pub fn cached_snapshot(&self) -> AppResult<Option<EntitlementState>> {
        self.settings.get(keys::PREMIUM_CACHE)
    }

    /// Seeds the in-memory state from the persisted cache.
    ///
    /// Runs before any subscriber is wired, so nothing is broadcast. A cached
    /// active snapshot whose expiration has passed is restored as expired.
    /// The next successful `refresh` replaces whatever was restored here.
    pub fn restore_cached(&self) -> AppResult<Option<EntitlementState>> {
        let Some(mut cached) = self.cached_snapshot()? else {
            return Ok(None);
        };
        if let Err(e) = validate_entitlement(&cached) {
            log::warn!("Ignoring invalid cached entitlement: {}", e);
            return Ok(None);
        }

        if cached.is_active && cached.expiration.is_some_and(|at| at <= Utc::now()) {
            cached = EntitlementState::expired(cached.period, cached.expiration);
        }

        log::info!(
            "Restored cached entitlement: active={} period={}",
            cached.is_active,
            cached.period
        );
        *self.state.write_ignore_poison() = cached.clone();
        Ok(Some(cached))
    }

    /// Queries the provider for the current entitlement and applies it
    pub async fn refresh(&self) -> AppResult<EntitlementState> {
        let snapshot = self
            .provider
            .entitlement()
            .await
            .map_err(AppError::entitlement_fetch)?;

        self.apply_update(snapshot.clone())?;
        Ok(snapshot)
    }

    pub async fn fetch_offerings(&self) -> AppResult<Vec<Offering>> {
        self.provider
            .offerings()
            .await
            .map_err(AppError::entitlement_fetch)
    }

    pub async fn purchase(&self, package_id: &str) -> AppResult<PurchaseOutcome> {
        let result = self
            .provider
            .purchase(package_id.to_string())
            .await
            .map_err(AppError::entitlement_fetch)?;

        if result.user_cancelled {
            log::info!("Purchase of {} cancelled by user", package_id);
            return Ok(PurchaseOutcome::NotSubscribed);
        }

        let active = result.entitlement.is_active;
        self.apply_update(result.entitlement)?;

        Ok(if active {
            PurchaseOutcome::Subscribed
        } else {
            PurchaseOutcome::Unknown
        })
    }

    pub async fn restore_purchases(&self) -> AppResult<EntitlementState> {
        let snapshot = self
            .provider
            .restore()
            .await
            .map_err(AppError::entitlement_fetch)?;

        self.apply_update(snapshot.clone())?;
        Ok(snapshot)
    }

    /// Forwards install campaign data to the purchase provider
    pub async fn set_campaign(&self, media_source: &str, campaign: &str) -> AppResult<()> {
        self.provider
            .set_attributes(vec![
                (MEDIA_SOURCE_ATTRIBUTE.to_string(), media_source.to_string()),
                (CAMPAIGN_ATTRIBUTE.to_string(), campaign.to_string()),
            ])
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PeriodKind;
    use crate::integrations::purchases::{MockPurchaseProvider, PurchaseResult};
    use crate::repositories::settings_repository::test_support::memory_settings;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn service(provider: MockPurchaseProvider) -> (EntitlementService, Arc<EventBus>) {
        let bus = Arc::new(EventBus::new());
        let service = EntitlementService::new(Arc::new(provider), memory_settings(), bus.clone());
        (service, bus)
    }

    #[test]
    fn test_starts_unknown() {
        let (service, _) = service(MockPurchaseProvider::new());
        assert!(!service.is_premium());
        assert_eq!(service.current(), EntitlementState::unknown());
    }

    #[test]
    fn test_apply_update_replaces_and_notifies() {
        let (service, bus) = service(MockPurchaseProvider::new());
        let notified = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&notified);
        bus.subscribe::<EntitlementChanged, _>(move |event| {
            assert!(!event.was_premium);
            assert!(event.is_premium());
            counter.fetch_add(1, Ordering::SeqCst);
        });

        let snapshot = EntitlementState::active(PeriodKind::Paid, None);
        service.apply_update(snapshot.clone()).unwrap();

        assert!(service.is_premium());
        assert_eq!(service.current(), snapshot);
        assert_eq!(notified.load(Ordering::SeqCst), 1);
        assert_eq!(service.cached_snapshot().unwrap(), Some(snapshot));
    }

    #[test]
    fn test_last_write_wins() {
        let (service, _) = service(MockPurchaseProvider::new());
        service
            .apply_update(EntitlementState::active(PeriodKind::Trial, None))
            .unwrap();
        let lapsed = EntitlementState::expired(PeriodKind::Trial, None);
        service.apply_update(lapsed.clone()).unwrap();
        assert_eq!(service.current(), lapsed);
        assert!(!service.is_premium());
    }

    #[test]
    fn test_invalid_snapshot_rejected() {
        let (service, bus) = service(MockPurchaseProvider::new());
        let result = service.apply_update(EntitlementState::active(PeriodKind::None, None));
        assert!(matches!(result, Err(AppError::Domain(_))));
        assert_eq!(service.current(), EntitlementState::unknown());
        assert!(bus.get_event_log().is_empty());
    }

    #[test]
    fn test_restore_cached_seeds_state_silently() {
        let settings = memory_settings();
        let snapshot = EntitlementState::active(PeriodKind::Paid, None);
        {
            let bus = Arc::new(EventBus::new());
            let first = EntitlementService::new(
                Arc::new(MockPurchaseProvider::new()),
                settings.clone(),
                bus,
            );
            first.apply_update(snapshot.clone()).unwrap();
        }

        let bus = Arc::new(EventBus::new());
        let service =
            EntitlementService::new(Arc::new(MockPurchaseProvider::new()), settings, bus.clone());
        assert!(!service.is_premium());

        assert_eq!(service.restore_cached().unwrap(), Some(snapshot));
        assert!(service.is_premium());
        assert!(bus.get_event_log().is_empty());
    }

    #[test]
    fn test_restore_cached_without_cache() {
        let (service, _) = service(MockPurchaseProvider::new());
        assert_eq!(service.restore_cached().unwrap(), None);
        assert_eq!(service.current(), EntitlementState::unknown());
    }

    #[test]
    fn test_restore_cached_expires_lapsed_period() {
        let settings = memory_settings();
        let expiration = Utc::now() - chrono::Duration::days(1);
        settings
            .set(
                keys::PREMIUM_CACHE,
                &EntitlementState::active(PeriodKind::Trial, Some(expiration)),
            )
            .unwrap();

        let service = EntitlementService::new(
            Arc::new(MockPurchaseProvider::new()),
            settings,
            Arc::new(EventBus::new()),
        );
        let restored = service.restore_cached().unwrap().unwrap();

        assert!(!restored.is_active);
        assert_eq!(restored.period, PeriodKind::Trial);
        assert!(!service.is_premium());
    }

    #[tokio::test]
    async fn test_refresh_applies_provider_snapshot() {
        let mut provider = MockPurchaseProvider::new();
        provider
            .expect_entitlement()
            .times(1)
            .returning(|| Ok(EntitlementState::active(PeriodKind::Lifetime, None)));
        let (service, _) = service(provider);

        let snapshot = service.refresh().await.unwrap();
        assert_eq!(snapshot.period, PeriodKind::Lifetime);
        assert!(service.is_premium());
    }

    #[tokio::test]
    async fn test_refresh_failure_keeps_state() {
        let mut provider = MockPurchaseProvider::new();
        provider
            .expect_entitlement()
            .returning(|| Err(AppError::Other("store unavailable".to_string())));
        let (service, _) = service(provider);

        let err = service.refresh().await.unwrap_err();
        assert!(matches!(err, AppError::EntitlementFetch(_)));
        assert_eq!(service.current(), EntitlementState::unknown());
    }

    #[tokio::test]
    async fn test_network_unreachable_is_distinct() {
        let mut provider = MockPurchaseProvider::new();
        provider
            .expect_offerings()
            .returning(|| Err(AppError::NetworkUnreachable));
        let (service, _) = service(provider);

        let err = service.fetch_offerings().await.unwrap_err();
        assert!(matches!(err, AppError::NetworkUnreachable));
    }

    #[tokio::test]
    async fn test_purchase_outcomes() {
        let mut provider = MockPurchaseProvider::new();
        provider
            .expect_purchase()
            .withf(|package_id| package_id == "annual")
            .returning(|_| {
                Ok(PurchaseResult {
                    entitlement: EntitlementState::active(PeriodKind::Paid, None),
                    user_cancelled: false,
                })
            });
        provider
            .expect_purchase()
            .withf(|package_id| package_id == "weekly")
            .returning(|_| {
                Ok(PurchaseResult {
                    entitlement: EntitlementState::unknown(),
                    user_cancelled: true,
                })
            });
        let (service, _) = service(provider);

        assert_eq!(
            service.purchase("weekly").await.unwrap(),
            PurchaseOutcome::NotSubscribed
        );
        assert!(!service.is_premium());

        assert_eq!(
            service.purchase("annual").await.unwrap(),
            PurchaseOutcome::Subscribed
        );
        assert!(service.is_premium());
    }

    #[tokio::test]
    async fn test_purchase_pending_is_unknown() {
        let mut provider = MockPurchaseProvider::new();
        provider.expect_purchase().returning(|_| {
            Ok(PurchaseResult {
                entitlement: EntitlementState::unknown(),
                user_cancelled: false,
            })
        });
        let (service, _) = service(provider);

        assert_eq!(
            service.purchase("weekly").await.unwrap(),
            PurchaseOutcome::Unknown
        );
    }

    #[tokio::test]
    async fn test_restore_applies_snapshot() {
        let mut provider = MockPurchaseProvider::new();
        provider
            .expect_restore()
            .returning(|| Ok(EntitlementState::active(PeriodKind::Paid, None)));
        let (service, _) = service(provider);

        service.restore_purchases().await.unwrap();
        assert!(service.is_premium());
    }

    #[tokio::test]
    async fn test_set_campaign_attributes() {
        let mut provider = MockPurchaseProvider::new();
        provider
            .expect_set_attributes()
            .withf(|attributes| {
                attributes
                    == &vec![
                        ("$mediaSource".to_string(), "facebook".to_string()),
                        ("$campaign".to_string(), "spring".to_string()),
                    ]
            })
            .times(1)
            .returning(|_| Ok(()));
        let (service, _) = service(provider);

        service.set_campaign("facebook", "spring").await.unwrap();
    }
}
