// src/application/state.rs

use std::sync::Arc;

use crate::events::EventBus;
use crate::services::{
    AdService, AttributionService, EntitlementService, LaunchService, RemoteConfigService,
};

/// Application state handed to every command.
/// All fields are Arc-wrapped for thread-safe sharing across commands.
/// Services are built by `app::bootstrap` and passed here.
pub struct AppState {
    pub event_bus: Arc<EventBus>,
    pub entitlement_service: Arc<EntitlementService>,
    pub launch_service: Arc<LaunchService>,
    pub remote_config_service: Arc<RemoteConfigService>,
    pub attribution_service: Arc<AttributionService>,
    pub ad_service: Arc<AdService>,
}
