// src/events/handlers/ad_handler.rs
//
// Ad Event Handler
//
// Bridges entitlement changes to the ad slots.
//
// CRITICAL RULES:
// - Only consumes EntitlementChanged
// - Delegates all slot work to AdService
// - A presentation already on screen is never interrupted
// - Uses closure-based subscription (EventHandler is internal to bus)

use std::sync::Arc;

use crate::domain::AdKind;
use crate::events::{EntitlementChanged, EventBus};
use crate::services::AdService;

// ============================================================================
// HANDLER REGISTRATION
// ============================================================================

pub fn register_ad_handlers(bus: &EventBus, service: Arc<AdService>) {
    bus.subscribe::<EntitlementChanged, _>(move |event| {
        handle_entitlement_changed(&service, event);
    });

    log::debug!("Ad handlers registered");
}

// ============================================================================
// ENTITLEMENT CHANGED HANDLER
// ============================================================================

/// A lapsed subscription brings ads back: preload every idle slot.
fn handle_entitlement_changed(service: &Arc<AdService>, event: &EntitlementChanged) {
    if event.is_premium() {
        if !event.was_premium {
            log::info!("Premium active, ads suppressed");
        }
        return;
    }
    if !event.was_premium || !service.gate_open() {
        return;
    }

    // Slot loads run as tokio tasks
    if tokio::runtime::Handle::try_current().is_err() {
        log::warn!("Premium lapsed outside the runtime, ads will load on next request");
        return;
    }

    log::info!("Premium lapsed, preloading ads");
    for kind in AdKind::ALL {
        service.request_load(kind);
    }
}
