use super::entity::{EntitlementState, PeriodKind};
use crate::domain::{DomainError, DomainResult};

/// Validates all EntitlementState invariants
pub fn validate_entitlement(state: &EntitlementState) -> DomainResult<()> {
    validate_active_period(state)?;
    validate_lifetime_expiration(state)?;
    Ok(())
}

/// An active entitlement must say how it was obtained
fn validate_active_period(state: &EntitlementState) -> DomainResult<()> {
    if state.is_active && state.period == PeriodKind::None {
        return Err(DomainError::InvariantViolation(
            "active entitlement has no period".to_string(),
        ));
    }
    Ok(())
}

/// Lifetime purchases never expire
fn validate_lifetime_expiration(state: &EntitlementState) -> DomainResult<()> {
    if state.period == PeriodKind::Lifetime && state.expiration.is_some() {
        return Err(DomainError::InvariantViolation(
            "lifetime entitlement carries an expiration".to_string(),
        ));
    }
    Ok(())
}
