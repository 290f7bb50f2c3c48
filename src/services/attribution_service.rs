// src/services/attribution_service.rs
//
// Attribution Service - forwards install campaign data to the purchase
// provider once per process.
//
// Failures here never block launch: they are logged and dropped.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::events::{AttributionReceived, EventBus};
use crate::integrations::{AttributionProvider, ConversionData};
use crate::services::EntitlementService;

pub struct AttributionService {
    provider: Option<Arc<dyn AttributionProvider>>,
    entitlement: Arc<EntitlementService>,
    event_bus: Arc<EventBus>,
    processed: AtomicBool,
}

impl AttributionService {
    pub fn new(
        provider: Option<Arc<dyn AttributionProvider>>,
        entitlement: Arc<EntitlementService>,
        event_bus: Arc<EventBus>,
    ) -> Self {
        Self {
            provider,
            entitlement,
            event_bus,
            processed: AtomicBool::new(false),
        }
    }

    /// Reads conversion data and tags the subscriber with its campaign.
    ///
    /// Returns the data that was processed, or None when there was nothing to
    /// do (already processed, no provider, or the provider failed).
    pub async fn process_launch_attribution(&self) -> Option<ConversionData> {
        if self.processed.swap(true, Ordering::SeqCst) {
            return None;
        }
        let provider = self.provider.as_ref()?;

        let data = match provider.conversion_data().await {
            Ok(data) => data,
            Err(e) => {
                log::warn!("Attribution data unavailable: {}", e);
                return None;
            }
        };

        if let Some((media_source, campaign)) = data.campaign_data() {
            log::info!("Non-organic install: {} / {}", media_source, campaign);
            if let Err(e) = self.entitlement.set_campaign(media_source, campaign).await {
                log::warn!("Failed to forward campaign attributes: {}", e);
            }
        }

        self.event_bus.emit(AttributionReceived::new(
            !data.is_non_organic(),
            data.media_source.clone(),
            data.campaign.clone(),
        ));
        Some(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::integrations::attribution::MockAttributionProvider;
    use crate::integrations::purchases::MockPurchaseProvider;
    use crate::repositories::settings_repository::test_support::memory_settings;

    fn entitlement_with(provider: MockPurchaseProvider, bus: &Arc<EventBus>) -> Arc<EntitlementService> {
        Arc::new(EntitlementService::new(
            Arc::new(provider),
            memory_settings(),
            bus.clone(),
        ))
    }

    #[tokio::test]
    async fn test_non_organic_forwards_campaign_once() {
        let mut purchases = MockPurchaseProvider::new();
        purchases
            .expect_set_attributes()
            .times(1)
            .returning(|_| Ok(()));
        let mut attribution = MockAttributionProvider::new();
        attribution
            .expect_conversion_data()
            .times(1)
            .returning(|| Ok(ConversionData::non_organic("facebook", "spring")));

        let bus = Arc::new(EventBus::new());
        let service = AttributionService::new(
            Some(Arc::new(attribution)),
            entitlement_with(purchases, &bus),
            bus.clone(),
        );

        assert!(service.process_launch_attribution().await.is_some());
        assert!(service.process_launch_attribution().await.is_none());

        let received: Vec<_> = bus
            .get_event_log()
            .into_iter()
            .filter(|e| e.event_type == "AttributionReceived")
            .collect();
        assert_eq!(received.len(), 1);
    }

    #[tokio::test]
    async fn test_organic_does_not_touch_subscriber() {
        let purchases = MockPurchaseProvider::new();
        let mut attribution = MockAttributionProvider::new();
        attribution
            .expect_conversion_data()
            .returning(|| Ok(ConversionData::organic()));

        let bus = Arc::new(EventBus::new());
        let service = AttributionService::new(
            Some(Arc::new(attribution)),
            entitlement_with(purchases, &bus),
            bus,
        );

        let data = service.process_launch_attribution().await.unwrap();
        assert!(!data.is_non_organic());
    }

    #[tokio::test]
    async fn test_provider_failure_is_swallowed() {
        let mut attribution = MockAttributionProvider::new();
        attribution
            .expect_conversion_data()
            .returning(|| Err(AppError::NetworkUnreachable));

        let bus = Arc::new(EventBus::new());
        let service = AttributionService::new(
            Some(Arc::new(attribution)),
            entitlement_with(MockPurchaseProvider::new(), &bus),
            bus.clone(),
        );

        assert!(service.process_launch_attribution().await.is_none());
        assert!(bus.get_event_log().is_empty());
    }
}
