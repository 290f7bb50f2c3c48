pub mod entity;

pub use entity::{LaunchCounter, ReviewPromptDecision, ReviewPromptPolicy};
