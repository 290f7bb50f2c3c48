// src/services/mod.rs
//
// Services Module - Orchestration Layer

pub mod ad_service;
pub mod attribution_service;
pub mod entitlement_service;
pub mod launch_service;
pub mod remote_config_service;


// Re-export all services and their types
pub use ad_service::AdService;

pub use attribution_service::AttributionService;

pub use entitlement_service::{
    EntitlementService,
    PurchaseOutcome,
};

pub use launch_service::LaunchService;

pub use remote_config_service::RemoteConfigService;
