// src/domain/mod.rs
//
// Domain Root - The Single Source of Truth for Domain API
//
// This file MUST declare all domain modules and re-export their public API.
// All other modules import from `crate::domain::*`

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod ad_slot;
pub mod entitlement;
pub mod gate;
pub mod launch;
pub mod retry;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// Entitlement Domain
pub use entitlement::{
    validate_entitlement, EntitlementState, Offering, PeriodKind, PeriodUnit, SubscriptionPeriod,
};

// Ad Slot Domain
pub use ad_slot::{validate_ad_slot, AdKind, AdSlot, AdSlotState, CreativeHandle};

// Gate
pub use gate::should_show_ad;

// Launch tracking
pub use launch::{LaunchCounter, ReviewPromptDecision, ReviewPromptPolicy};

// Retry schedule
pub use retry::RetryPolicy;

// ============================================================================
// DOMAIN ERROR TYPES
// ============================================================================

use thiserror::Error;

/// Domain-level errors
/// These represent violations of business rules and invariants
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    #[error("Invalid state transition: {0}")]
    InvalidStateTransition(String),
}

/// Domain result type
pub type DomainResult<T> = Result<T, DomainError>;
