use serde::{Deserialize, Serialize};

/// Number of process starts since install
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LaunchCounter {
    pub count: u64,
}

impl LaunchCounter {
    pub fn new(count: u64) -> Self {
        Self { count }
    }

    /// Counts one more launch; the counter never decreases
    pub fn increment(&mut self) -> u64 {
        self.count = self.count.saturating_add(1);
        self.count
    }

    /// The first session after install
    pub fn is_first_launch(&self) -> bool {
        self.count == 1
    }
}

/// Outcome of a review-prompt eligibility check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewPromptDecision {
    Show,
    NotEligible,
}

/// When the "rate this app" prompt may appear
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewPromptPolicy {
    /// The user already agreed to rate; never ask again
    pub removed: bool,

    /// Launch count from which the prompt may appear
    pub min_launches: u64,
}

impl ReviewPromptPolicy {
    pub const DEFAULT_MIN_LAUNCHES: u64 = 3;

    pub fn new(removed: bool, min_launches: u64) -> Self {
        Self {
            removed,
            min_launches,
        }
    }

    pub fn decide(&self, launch_count: u64) -> ReviewPromptDecision {
        if !self.removed && launch_count >= self.min_launches {
            ReviewPromptDecision::Show
        } else {
            ReviewPromptDecision::NotEligible
        }
    }

    pub fn accept(&mut self) {
        self.removed = true;
    }

    /// Declining postpones the prompt by `snooze_launches` launches
    pub fn decline(&mut self, launch_count: u64, snooze_launches: u64) {
        self.min_launches = launch_count.saturating_add(snooze_launches);
    }
}

impl Default for ReviewPromptPolicy {
    fn default() -> Self {
        Self::new(false, Self::DEFAULT_MIN_LAUNCHES)
    }
}
