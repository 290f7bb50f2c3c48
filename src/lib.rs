// src/lib.rs
// AdGate - premium entitlement and ad gating for a freemium app
//
// Architecture:
// - Domain-centric: slot state machine, gate and policies live in domain/
// - Event-driven: services publish facts on the EventBus, UI collaborators subscribe
// - Explicit: every dependency is injected through AppState, no globals
// - Collaborators (ad network, purchases, remote config, attribution) are traits

// ============================================================================
// FOUNDATION
// ============================================================================

pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod events;
pub mod repositories;
pub mod services;
pub mod sync;

// ============================================================================
// APPLICATION LAYER
// ============================================================================

pub mod app;
pub mod application;
pub mod integrations;

// ============================================================================
// PUBLIC API - Domain
// ============================================================================

pub use domain::{
    should_show_ad,
    validate_ad_slot,
    validate_entitlement,
    // Ads
    AdKind,
    AdSlot,
    AdSlotState,
    CreativeHandle,
    // Entitlement
    EntitlementState,
    // Launch
    LaunchCounter,
    Offering,
    PeriodKind,
    PeriodUnit,
    RetryPolicy,
    ReviewPromptDecision,
    ReviewPromptPolicy,
    SubscriptionPeriod,
};

// ============================================================================
// PUBLIC API - Error Types
// ============================================================================

pub use error::{AppError, AppResult};

// ============================================================================
// PUBLIC API - Events
// ============================================================================

pub use events::{
    create_event_bus,
    AdDismissed,
    AdLoadFailed,
    AdPresented,
    AdSlotTransitioned,
    ApologyNoticeRequested,
    AttributionReceived,
    DomainEvent,
    EntitlementChanged,
    EventBus,
    EventLogEntry,
    LaunchRecorded,
    RemoteConfigUpdated,
    ReviewPromptRequested,
};

// ============================================================================
// PUBLIC API - Configuration & Database
// ============================================================================

pub use config::{AdConfig, AppConfig, ReviewConfig};
pub use db::{create_connection_pool, initialize_database, ConnectionPool};

// ============================================================================
// PUBLIC API - Services
// ============================================================================

pub use services::{
    AdService,
    AttributionService,
    EntitlementService,
    LaunchService,
    PurchaseOutcome,
    RemoteConfigService,
};

// ============================================================================
// PUBLIC API - Application Layer
// ============================================================================

pub use app::{bootstrap, Collaborators};
pub use application::AppState;

// Re-export application submodules
pub use application::commands;
pub use application::dto;

// ============================================================================
// PUBLIC API - Integrations
// ============================================================================

pub use integrations::{
    AdNetwork, AttributionProvider, ConversionData, PresentationOutcome, PurchaseProvider,
    RemoteConfig, RemoteConfigProvider,
};
