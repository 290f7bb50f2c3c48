// src/app/bootstrap.rs
//
// Bootstrap - builds the application at process start
//
// Order matters:
// 1. Infrastructure (pool, schema, event bus)
// 2. Repositories
// 3. Services
// 4. Event handler registration
// 5. Launch sequence (launch count, remote config, attribution,
//    entitlement, ad preload)

use std::sync::Arc;

use crate::application::AppState;
use crate::config::AppConfig;
use crate::db::{create_connection_pool, get_connection, initialize_database, ConnectionPool};
use crate::error::AppResult;
use crate::events::handlers::register_ad_handlers;
use crate::events::EventBus;
use crate::integrations::{
    AdNetwork, AttributionProvider, HttpRemoteConfigProvider, PurchaseProvider,
    RemoteConfigProvider,
};
use crate::repositories::{SettingsRepository, SqliteSettingsRepository};
use crate::services::{
    AdService, AttributionService, EntitlementService, LaunchService, RemoteConfigService,
};

/// Vendor-facing collaborators, injected by the host
pub struct Collaborators {
    pub ad_network: Arc<dyn AdNetwork>,
    pub purchases: Arc<dyn PurchaseProvider>,
    /// Falls back to `remote_config_url` from the config, then to defaults
    pub remote_config: Option<Arc<dyn RemoteConfigProvider>>,
    pub attribution: Option<Arc<dyn AttributionProvider>>,
}

/// Opens the settings database, wires every service and runs the launch sequence
pub async fn bootstrap(config: &AppConfig, collaborators: Collaborators) -> AppResult<AppState> {
    let db_path = config.resolve_database_path()?;
    log::info!("Opening settings database at {}", db_path.display());

    let pool = Arc::new(create_connection_pool(&db_path)?);
    let state = build_app_state(config, pool, collaborators)?;
    run_launch_sequence(&state).await;
    Ok(state)
}

/// Wires services on top of an existing pool and counts this launch
pub fn build_app_state(
    config: &AppConfig,
    pool: Arc<ConnectionPool>,
    collaborators: Collaborators,
) -> AppResult<AppState> {
    // 1. INFRASTRUCTURE
    {
        let conn = get_connection(&pool)?;
        initialize_database(&conn)?;
    }
    let event_bus = Arc::new(EventBus::new());

    // 2. REPOSITORIES
    let settings: Arc<dyn SettingsRepository> = Arc::new(SqliteSettingsRepository::new(pool));

    // 3. SERVICES
    let remote_config_provider = match collaborators.remote_config {
        Some(provider) => Some(provider),
        None => match &config.remote_config_url {
            Some(url) => {
                let provider: Arc<dyn RemoteConfigProvider> =
                    Arc::new(HttpRemoteConfigProvider::new(url.clone())?);
                Some(provider)
            }
            None => None,
        },
    };

    let entitlement_service = Arc::new(EntitlementService::new(
        collaborators.purchases,
        settings.clone(),
        event_bus.clone(),
    ));
    // Last known status until the provider answers; offline launches keep it
    if let Err(e) = entitlement_service.restore_cached() {
        log::warn!("Failed to read cached entitlement: {}", e);
    }
    let launch_service = Arc::new(LaunchService::new(
        settings,
        event_bus.clone(),
        config.review.clone(),
    )?);
    let remote_config_service = Arc::new(RemoteConfigService::new(
        remote_config_provider,
        event_bus.clone(),
    ));
    let attribution_service = Arc::new(AttributionService::new(
        collaborators.attribution,
        entitlement_service.clone(),
        event_bus.clone(),
    ));
    let ad_service = Arc::new(AdService::new(
        collaborators.ad_network,
        entitlement_service.clone(),
        launch_service.clone(),
        remote_config_service.clone(),
        event_bus.clone(),
        config.ads.clone(),
    ));

    // 4. EVENT HANDLER REGISTRATION (WIRING)
    register_ad_handlers(&event_bus, ad_service.clone());

    launch_service.record_launch()?;

    Ok(AppState {
        event_bus,
        entitlement_service,
        launch_service,
        remote_config_service,
        attribution_service,
        ad_service,
    })
}

/// Start-of-session work. Every step is best effort; nothing here is fatal.
pub async fn run_launch_sequence(state: &AppState) {
    if let Err(e) = state.remote_config_service.refresh().await {
        log::warn!("Continuing with last known remote config: {}", e);
    }

    state.attribution_service.process_launch_attribution().await;

    if let Err(e) = state.entitlement_service.refresh().await {
        log::warn!("Entitlement unavailable at launch, keeping cached status: {}", e);
    }

    state.ad_service.start();
}
