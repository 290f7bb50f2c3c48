// src/application/commands/ad_commands.rs

use crate::application::{dto::AdSlotDto, state::AppState};
use crate::domain::AdKind;

/// Resolves with whether the interstitial was watched to the end
pub async fn present_interstitial(state: &AppState) -> bool {
    state.ad_service.present_interstitial().await
}

/// Resolves with whether the reward was earned
pub async fn present_rewarded(state: &AppState) -> bool {
    state.ad_service.present_rewarded().await
}

pub fn present_app_open(state: &AppState) {
    state.ad_service.present_app_open();
}

/// The paywall reports when it appears and disappears
pub fn set_paywall_visible(state: &AppState, visible: bool) {
    state.ad_service.set_paywall_visible(visible);
}

pub fn get_ad_slots(state: &AppState) -> Vec<AdSlotDto> {
    AdKind::ALL
        .into_iter()
        .map(|kind| AdSlotDto::from(state.ad_service.slot_snapshot(kind)))
        .collect()
}
