// src/events/mod.rs
//
// Internal Event System - Public API
//
// EventHandler is internal to the bus and is not exported.

pub mod bus;
pub mod handlers;
pub mod types;

pub use types::DomainEvent;

pub use types::{
    // Ads
    AdDismissed,
    AdLoadFailed,
    AdPresented,
    AdSlotTransitioned,
    ApologyNoticeRequested,
    // Attribution
    AttributionReceived,
    // Entitlement
    EntitlementChanged,
    // Launch
    LaunchRecorded,
    // Remote config
    RemoteConfigUpdated,
    ReviewPromptRequested,
};

pub use bus::{EventBus, EventLogEntry};

/// Initialize a new event bus
pub fn create_event_bus() -> EventBus {
    EventBus::new()
}
