// src/application/commands/entitlement_commands.rs

use crate::application::{dto::*, error_handling::ToErrorResponse, state::AppState};

pub fn is_premium(state: &AppState) -> bool {
    state.entitlement_service.is_premium()
}

pub fn get_entitlement(state: &AppState) -> EntitlementDto {
    EntitlementDto::from(state.entitlement_service.current())
}

/// Offerings plus the remotely configured trial length
pub async fn fetch_offerings(state: &AppState) -> Result<PaywallDto, String> {
    let offerings = state
        .entitlement_service
        .fetch_offerings()
        .await
        .to_error_response()?;

    Ok(PaywallDto {
        offerings: offerings.into_iter().map(OfferingDto::from).collect(),
        trial_duration_days: state.remote_config_service.trial_duration_days(),
    })
}

pub async fn purchase_package(
    state: &AppState,
    package_id: String,
) -> Result<PurchaseResultDto, String> {
    let outcome = state
        .entitlement_service
        .purchase(&package_id)
        .await
        .to_error_response()?;

    Ok(PurchaseResultDto {
        outcome,
        entitlement: EntitlementDto::from(state.entitlement_service.current()),
    })
}

pub async fn restore_purchases(state: &AppState) -> Result<EntitlementDto, String> {
    let snapshot = state
        .entitlement_service
        .restore_purchases()
        .await
        .to_error_response()?;

    Ok(EntitlementDto::from(snapshot))
}
