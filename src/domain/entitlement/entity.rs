use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How the current entitlement was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodKind {
    Trial,
    Paid,
    Lifetime,
    None,
}

/// The user's premium access level, as last reported by the purchase provider.
///
/// Snapshots are replaced wholesale; nothing in the crate patches individual fields
/// of the stored state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitlementState {
    /// Whether premium access is currently granted
    pub is_active: bool,

    /// When the current period ends (absent for lifetime or unknown)
    pub expiration: Option<DateTime<Utc>>,

    pub period: PeriodKind,
}

impl EntitlementState {
    /// State before the purchase provider has reported anything
    pub fn unknown() -> Self {
        Self {
            is_active: false,
            expiration: None,
            period: PeriodKind::None,
        }
    }

    /// An active entitlement of the given period
    pub fn active(period: PeriodKind, expiration: Option<DateTime<Utc>>) -> Self {
        Self {
            is_active: true,
            expiration,
            period,
        }
    }

    /// A lapsed entitlement; the last known period and expiration are kept
    pub fn expired(period: PeriodKind, expiration: Option<DateTime<Utc>>) -> Self {
        Self {
            is_active: false,
            expiration,
            period,
        }
    }

    pub fn is_premium(&self) -> bool {
        self.is_active
    }

    /// Human-readable expiration line for the account screen.
    ///
    /// Empty when no expiration is known.
    pub fn expiration_description(&self) -> String {
        let Some(expiration) = self.expiration else {
            return String::new();
        };

        let formatted = expiration.format("%B %-d, %Y at %H:%M:%S UTC");
        let prefix = if self.period == PeriodKind::Trial {
            "Free Trial "
        } else {
            ""
        };
        format!("{}Expire at {}", prefix, formatted)
    }
}

impl Default for EntitlementState {
    fn default() -> Self {
        Self::unknown()
    }
}

impl std::fmt::Display for PeriodKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PeriodKind::Trial => write!(f, "trial"),
            PeriodKind::Paid => write!(f, "paid"),
            PeriodKind::Lifetime => write!(f, "lifetime"),
            PeriodKind::None => write!(f, "none"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_unknown_is_not_premium() {
        let state = EntitlementState::unknown();
        assert!(!state.is_premium());
        assert_eq!(state.period, PeriodKind::None);
        assert_eq!(state, EntitlementState::default());
    }

    #[test]
    fn test_trial_description_has_prefix() {
        let expiration = Utc.with_ymd_and_hms(2026, 3, 7, 12, 30, 0).unwrap();
        let state = EntitlementState::active(PeriodKind::Trial, Some(expiration));
        assert_eq!(
            state.expiration_description(),
            "Free Trial Expire at March 7, 2026 at 12:30:00 UTC"
        );
    }

    #[test]
    fn test_paid_description_has_no_prefix() {
        let expiration = Utc.with_ymd_and_hms(2026, 12, 1, 0, 0, 0).unwrap();
        let state = EntitlementState::active(PeriodKind::Paid, Some(expiration));
        assert!(state.expiration_description().starts_with("Expire at December 1, 2026"));
    }

    #[test]
    fn test_description_empty_without_expiration() {
        let state = EntitlementState::active(PeriodKind::Lifetime, None);
        assert_eq!(state.expiration_description(), "");
    }
}
