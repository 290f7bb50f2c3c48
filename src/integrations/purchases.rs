// src/integrations/purchases.rs
//
// In-app purchase management boundary.
//
// CRITICAL RULES:
// - This is INFRASTRUCTURE, not DOMAIN
// - Providers report entitlement snapshots; they never mutate service state
// - Connectivity failures are reported as AppError::NetworkUnreachable

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{EntitlementState, Offering};
use crate::error::AppResult;

/// Subscriber attribute keys for campaign attribution
pub const MEDIA_SOURCE_ATTRIBUTE: &str = "$mediaSource";
pub const CAMPAIGN_ATTRIBUTE: &str = "$campaign";

/// Provider response to a purchase attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseResult {
    /// Entitlement after the transaction
    pub entitlement: EntitlementState,
    pub user_cancelled: bool,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PurchaseProvider: Send + Sync {
    /// Current premium entitlement of the signed-in customer
    async fn entitlement(&self) -> AppResult<EntitlementState>;

    /// Packages of the current offering
    async fn offerings(&self) -> AppResult<Vec<Offering>>;

    async fn purchase(&self, package_id: String) -> AppResult<PurchaseResult>;

    /// Restores previous transactions and reports the resulting entitlement
    async fn restore(&self) -> AppResult<EntitlementState>;

    /// Attaches subscriber attributes (attribution data)
    async fn set_attributes(&self, attributes: Vec<(String, String)>) -> AppResult<()>;
}
