// src/events/types.rs
//
// Facts published by the services.
// Each event records something that has already happened; subscribers
// react, they never veto.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{AdKind, AdSlotState, EntitlementState};

/// Trait that all domain events must implement
pub trait DomainEvent: std::fmt::Debug + Clone {
    /// Unique identifier for this event instance
    fn event_id(&self) -> Uuid;

    /// When this event occurred
    fn occurred_at(&self) -> DateTime<Utc>;

    /// Human-readable event type name
    fn event_type(&self) -> &'static str;
}

// ============================================================================
// ENTITLEMENT EVENTS
// ============================================================================

/// Emitted whenever a new entitlement snapshot replaces the stored one.
///
/// UI screens refresh paywall visibility and ad placement from this.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntitlementChanged {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub entitlement: EntitlementState,
    pub was_premium: bool,
}

impl EntitlementChanged {
    pub fn new(entitlement: EntitlementState, was_premium: bool) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            entitlement,
            was_premium,
        }
    }

    pub fn is_premium(&self) -> bool {
        self.entitlement.is_active
    }
}

impl DomainEvent for EntitlementChanged {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "EntitlementChanged" }
}

// ============================================================================
// AD EVENTS
// ============================================================================

/// Emitted on every slot state change
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdSlotTransitioned {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub kind: AdKind,
    pub from: AdSlotState,
    pub to: AdSlotState,
    pub generation: u64,
}

impl AdSlotTransitioned {
    pub fn new(kind: AdKind, from: AdSlotState, to: AdSlotState, generation: u64) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            kind,
            from,
            to,
            generation,
        }
    }
}

impl DomainEvent for AdSlotTransitioned {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "AdSlotTransitioned" }
}

/// Emitted when the ad network could not deliver a creative
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdLoadFailed {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub kind: AdKind,
    pub failure_count: u32,
    pub reason: String,
    /// None when the retry budget is exhausted
    pub retry_in_ms: Option<u64>,
}

impl AdLoadFailed {
    pub fn new(kind: AdKind, failure_count: u32, reason: String, retry_in_ms: Option<u64>) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            kind,
            failure_count,
            reason,
            retry_in_ms,
        }
    }
}

impl DomainEvent for AdLoadFailed {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "AdLoadFailed" }
}

/// Emitted when an ad starts showing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdPresented {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub kind: AdKind,
}

impl AdPresented {
    pub fn new(kind: AdKind) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            kind,
        }
    }
}

impl DomainEvent for AdPresented {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "AdPresented" }
}

/// Emitted when a presented ad goes away
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdDismissed {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub kind: AdKind,
    /// Watched to the end (interstitial/app-open) or reward earned (rewarded)
    pub completed: bool,
}

impl AdDismissed {
    pub fn new(kind: AdKind, completed: bool) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            kind,
            completed,
        }
    }
}

impl DomainEvent for AdDismissed {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "AdDismissed" }
}

/// Emitted once per install, after the first ad is dismissed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApologyNoticeRequested {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub after_kind: AdKind,
}

impl ApologyNoticeRequested {
    pub fn new(after_kind: AdKind) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            after_kind,
        }
    }
}

impl DomainEvent for ApologyNoticeRequested {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "ApologyNoticeRequested" }
}

// ============================================================================
// LAUNCH EVENTS
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaunchRecorded {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub launch_count: u64,
    pub first_launch: bool,
}

impl LaunchRecorded {
    pub fn new(launch_count: u64) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            launch_count,
            first_launch: launch_count == 1,
        }
    }
}

impl DomainEvent for LaunchRecorded {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "LaunchRecorded" }
}

/// Emitted when the "rate this app" prompt should appear
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewPromptRequested {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub launch_count: u64,
}

impl ReviewPromptRequested {
    pub fn new(launch_count: u64) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            launch_count,
        }
    }
}

impl DomainEvent for ReviewPromptRequested {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "ReviewPromptRequested" }
}

// ============================================================================
// REMOTE CONFIG & ATTRIBUTION EVENTS
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteConfigUpdated {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub disable_ads: bool,
    pub trial_duration_days: u32,
}

impl RemoteConfigUpdated {
    pub fn new(disable_ads: bool, trial_duration_days: u32) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            disable_ads,
            trial_duration_days,
        }
    }
}

impl DomainEvent for RemoteConfigUpdated {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "RemoteConfigUpdated" }
}

/// Emitted once per process with the install's conversion data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttributionReceived {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub organic: bool,
    pub media_source: Option<String>,
    pub campaign: Option<String>,
}

impl AttributionReceived {
    pub fn new(organic: bool, media_source: Option<String>, campaign: Option<String>) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            organic,
            media_source,
            campaign,
        }
    }
}

impl DomainEvent for AttributionReceived {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "AttributionReceived" }
}
