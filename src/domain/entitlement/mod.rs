pub mod entity;
pub mod invariants;
pub mod offering;

pub use entity::{EntitlementState, PeriodKind};
pub use invariants::validate_entitlement;
pub use offering::{Offering, PeriodUnit, SubscriptionPeriod};
