// src/application/dto/mod.rs
//
// Data Transfer Objects
//
// CRITICAL PRINCIPLES:
// - DTOs are UI-friendly representations
// - DTOs NEVER leak domain invariants
// - DTOs are simple, serializable structs
// - Conversion FROM domain entities only (never TO)

use serde::{Deserialize, Serialize};

use crate::domain::{AdSlot, EntitlementState, Offering};
use crate::services::PurchaseOutcome;

// ============================================================================
// ENTITLEMENT DTOs
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitlementDto {
    pub is_premium: bool,
    pub period: String,
    pub expiration: Option<String>,
    /// Ready-made line for the account screen, empty when unknown
    pub expiration_description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfferingDto {
    pub package_id: String,
    pub product_id: String,
    pub price: String,
    pub period_label: Option<String>,
    pub trial_days: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseResultDto {
    pub outcome: PurchaseOutcome,
    pub entitlement: EntitlementDto,
}

/// Paywall copy driven by remote config
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaywallDto {
    pub offerings: Vec<OfferingDto>,
    pub trial_duration_days: u32,
}

// ============================================================================
// AD DTOs
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdSlotDto {
    pub kind: String,
    pub state: String,
    pub failure_count: u32,
}

// ============================================================================
// CONVERSION HELPERS (Domain → DTO)
// ============================================================================

impl From<EntitlementState> for EntitlementDto {
    fn from(state: EntitlementState) -> Self {
        Self {
            is_premium: state.is_premium(),
            period: state.period.to_string(),
            expiration: state.expiration.map(|d| d.to_rfc3339()),
            expiration_description: state.expiration_description(),
        }
    }
}

impl From<Offering> for OfferingDto {
    fn from(offering: Offering) -> Self {
        Self {
            period_label: offering.period.as_ref().map(|p| p.label()),
            package_id: offering.package_id,
            product_id: offering.product_id,
            price: offering.localized_price,
            trial_days: offering.trial_days,
        }
    }
}

impl From<AdSlot> for AdSlotDto {
    fn from(slot: AdSlot) -> Self {
        Self {
            kind: slot.kind.to_string(),
            state: slot.state.to_string(),
            failure_count: slot.failure_count,
        }
    }
}
