// src/main.rs
//
// Local session runner: wires the crate against the simulated
// collaborators and walks through one app session.
//
// ADGATE_CONFIG points at an optional JSON config file.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;

use adgate::application::commands;
use adgate::integrations::{
    ConversionData, SimulatedAdNetwork, SimulatedPurchaseProvider, StaticAttributionProvider,
};
use adgate::{bootstrap, AdKind, AdSlotState, AppConfig, AppState, Collaborators, EntitlementState};

fn load_config() -> anyhow::Result<AppConfig> {
    match std::env::var_os("ADGATE_CONFIG") {
        Some(path) => {
            let path = PathBuf::from(path);
            AppConfig::load(&path)
                .with_context(|| format!("Failed to read config from {}", path.display()))
        }
        None => Ok(AppConfig::default()),
    }
}

async fn wait_until_ready(state: &AppState, kind: AdKind) -> bool {
    for _ in 0..100 {
        if state.ad_service.slot_state(kind) == AdSlotState::Ready {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    false
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let config = load_config()?;

    let collaborators = Collaborators {
        ad_network: Arc::new(SimulatedAdNetwork::new(
            Duration::from_millis(300),
            Duration::from_millis(500),
            1,
        )),
        purchases: Arc::new(SimulatedPurchaseProvider::new(EntitlementState::unknown())),
        remote_config: None,
        attribution: Some(Arc::new(StaticAttributionProvider::new(
            ConversionData::organic(),
        ))),
    };

    let state = bootstrap(&config, collaborators)
        .await
        .context("Failed to start")?;

    let launch_count = state.launch_service.launch_count();
    log::info!(
        "Session {} | premium: {} | ads allowed: {}",
        launch_count,
        commands::is_premium(&state),
        state.ad_service.gate_open()
    );

    if state.ad_service.gate_open() {
        if wait_until_ready(&state, AdKind::Interstitial).await {
            let watched = commands::present_interstitial(&state).await;
            log::info!("Interstitial watched to the end: {}", watched);
        }
        if wait_until_ready(&state, AdKind::Rewarded).await {
            let rewarded = commands::present_rewarded(&state).await;
            log::info!("Reward earned: {}", rewarded);
        }
    }

    match commands::request_review_prompt_if_eligible(&state) {
        Ok(decision) => log::info!("Review prompt: {:?}", decision),
        Err(e) => log::warn!("Review prompt check failed: {}", e),
    }

    match commands::fetch_offerings(&state).await {
        Ok(paywall) => {
            for offering in &paywall.offerings {
                log::info!(
                    "Offering {} {} / {}",
                    offering.package_id,
                    offering.price,
                    offering.period_label.as_deref().unwrap_or("-")
                );
            }
        }
        Err(e) => log::warn!("Offerings unavailable: {}", e),
    }

    state.ad_service.shutdown();
    log::info!("Session finished");
    Ok(())
}
