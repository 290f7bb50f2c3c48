// src/integrations/mod.rs
//
// External collaborators: purchase management, ad mediation,
// remote config and install attribution.

pub mod ad_network;
pub mod attribution;
pub mod purchases;
pub mod remote_config;
pub mod simulated;

pub use ad_network::{AdNetwork, PresentationOutcome};
pub use attribution::{AttributionProvider, ConversionData};
pub use purchases::{PurchaseProvider, PurchaseResult, CAMPAIGN_ATTRIBUTE, MEDIA_SOURCE_ATTRIBUTE};
pub use remote_config::{HttpRemoteConfigProvider, RemoteConfig, RemoteConfigProvider};
pub use simulated::{
    SimulatedAdNetwork, SimulatedPurchaseProvider, StaticAttributionProvider,
    StaticRemoteConfigProvider,
};
