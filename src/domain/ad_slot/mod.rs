pub mod entity;
pub mod invariants;

pub use entity::{AdKind, AdSlot, AdSlotState, CreativeHandle};
pub use invariants::validate_ad_slot;
