use super::entity::{AdSlot, AdSlotState};
use crate::domain::{DomainError, DomainResult};

/// Validates all AdSlot invariants
pub fn validate_ad_slot(slot: &AdSlot) -> DomainResult<()> {
    validate_creative(slot)?;
    validate_generation(slot)?;
    Ok(())
}

/// A creative is held exactly while the slot is Ready
fn validate_creative(slot: &AdSlot) -> DomainResult<()> {
    let holds_creative = slot.creative.is_some();
    if holds_creative != slot.is_ready() {
        return Err(DomainError::InvariantViolation(format!(
            "{} slot in state {} {} a creative",
            slot.kind,
            slot.state,
            if holds_creative { "holds" } else { "lacks" }
        )));
    }
    Ok(())
}

/// Only a never-loaded slot can be at generation 0
fn validate_generation(slot: &AdSlot) -> DomainResult<()> {
    if slot.generation == 0 && slot.state != AdSlotState::Empty {
        return Err(DomainError::InvariantViolation(format!(
            "{} slot left Empty without starting a load",
            slot.kind
        )));
    }
    Ok(())
}

/// Critical AdSlot Invariants:
///
/// 1. A slot cannot be presented unless it is Ready
/// 2. At most one load per slot is in flight (begin_load rejects Loading)
/// 3. Dismissal and failure always lead back to Loading
/// 4. Slots are never destroyed, only reset in place

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ad_slot::{AdKind, CreativeHandle};

    #[test]
    fn test_valid_empty_slot() {
        assert!(validate_ad_slot(&AdSlot::new(AdKind::Interstitial)).is_ok());
    }

    #[test]
    fn test_ready_without_creative_fails() {
        let mut slot = AdSlot::new(AdKind::Interstitial);
        slot.begin_load().unwrap();
        slot.state = AdSlotState::Ready;
        assert!(validate_ad_slot(&slot).is_err());
    }

    #[test]
    fn test_loading_with_creative_fails() {
        let mut slot = AdSlot::new(AdKind::Rewarded);
        slot.begin_load().unwrap();
        slot.creative = Some(CreativeHandle("stale".to_string()));
        assert!(validate_ad_slot(&slot).is_err());
    }

    #[test]
    fn test_generation_zero_outside_empty_fails() {
        let mut slot = AdSlot::new(AdKind::AppOpen);
        slot.state = AdSlotState::Failed;
        assert!(validate_ad_slot(&slot).is_err());
    }
}
