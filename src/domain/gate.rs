// src/domain/gate.rs
//
// Ad gate - the single decision on whether any ad may be shown.

use super::entitlement::EntitlementState;

/// Decides whether an ad may be shown.
///
/// Premium users, the first session after install and a remotely disabled
/// ad configuration each suppress ads on their own.
pub fn should_show_ad(
    entitlement: &EntitlementState,
    is_first_launch: bool,
    remote_kill_switch: bool,
) -> bool {
    !(entitlement.is_active || is_first_launch || remote_kill_switch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entitlement::PeriodKind;

    fn entitlements() -> Vec<EntitlementState> {
        vec![
            EntitlementState::unknown(),
            EntitlementState::active(PeriodKind::Trial, None),
            EntitlementState::active(PeriodKind::Paid, None),
            EntitlementState::active(PeriodKind::Lifetime, None),
            EntitlementState::expired(PeriodKind::Paid, None),
        ]
    }

    #[test]
    fn test_free_returning_user_sees_ads() {
        assert!(should_show_ad(&EntitlementState::unknown(), false, false));
    }

    #[test]
    fn test_active_entitlement_always_suppresses() {
        for entitlement in entitlements().into_iter().filter(|e| e.is_active) {
            for first_launch in [false, true] {
                for kill_switch in [false, true] {
                    assert!(!should_show_ad(&entitlement, first_launch, kill_switch));
                }
            }
        }
    }

    #[test]
    fn test_first_launch_always_suppresses() {
        for entitlement in entitlements() {
            for kill_switch in [false, true] {
                assert!(!should_show_ad(&entitlement, true, kill_switch));
            }
        }
    }

    #[test]
    fn test_kill_switch_suppresses() {
        assert!(!should_show_ad(&EntitlementState::unknown(), false, true));
    }

    #[test]
    fn test_expired_entitlement_sees_ads() {
        let lapsed = EntitlementState::expired(PeriodKind::Trial, None);
        assert!(should_show_ad(&lapsed, false, false));
    }
}
