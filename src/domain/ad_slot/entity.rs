use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, DomainResult};

/// Ad surfaces tracked independently of each other
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdKind {
    Interstitial,
    Rewarded,
    AppOpen,
}

impl AdKind {
    pub const ALL: [AdKind; 3] = [AdKind::Interstitial, AdKind::Rewarded, AdKind::AppOpen];
}

/// Lifecycle state of a slot.
///
/// The machine is cyclic: every dismissal or failure leads back to `Loading`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdSlotState {
    Empty,
    Loading,
    Ready,
    Presenting,
    Dismissed,
    Failed,
}

/// Opaque reference to a creative held by the ad network
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreativeHandle(pub String);

/// A single ad-surface placeholder
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdSlot {
    pub kind: AdKind,

    pub state: AdSlotState,

    /// Present only while `Ready`; taken when presentation begins
    pub creative: Option<CreativeHandle>,

    /// Consecutive load failures since the last successful load
    pub failure_count: u32,

    /// Bumped on every fresh load request; identifies the in-flight load
    pub generation: u64,
}

impl AdSlot {
    pub fn new(kind: AdKind) -> Self {
        Self {
            kind,
            state: AdSlotState::Empty,
            creative: None,
            failure_count: 0,
            generation: 0,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.state == AdSlotState::Ready
    }

    /// Empty/Failed/Dismissed -> Loading, starting a new generation.
    ///
    /// Returns the generation the caller must present when completing the load.
    pub fn begin_load(&mut self) -> DomainResult<u64> {
        match self.state {
            AdSlotState::Empty | AdSlotState::Failed | AdSlotState::Dismissed => {
                self.state = AdSlotState::Loading;
                self.creative = None;
                self.generation += 1;
                Ok(self.generation)
            }
            _ => Err(self.invalid(AdSlotState::Loading)),
        }
    }

    /// Failed -> Loading within the current generation (backoff retry)
    pub fn retry_load(&mut self) -> DomainResult<()> {
        if self.state != AdSlotState::Failed {
            return Err(self.invalid(AdSlotState::Loading));
        }
        self.state = AdSlotState::Loading;
        Ok(())
    }

    /// Loading -> Empty when the in-flight load was cancelled.
    ///
    /// The generation is kept so a late completion is recognised as stale.
    pub fn cancel_load(&mut self) -> DomainResult<()> {
        if self.state != AdSlotState::Loading {
            return Err(self.invalid(AdSlotState::Empty));
        }
        self.state = AdSlotState::Empty;
        self.failure_count = 0;
        Ok(())
    }

    /// Loading -> Ready
    pub fn load_succeeded(&mut self, creative: CreativeHandle) -> DomainResult<()> {
        if self.state != AdSlotState::Loading {
            return Err(self.invalid(AdSlotState::Ready));
        }
        self.state = AdSlotState::Ready;
        self.creative = Some(creative);
        self.failure_count = 0;
        Ok(())
    }

    /// Loading -> Failed; returns the consecutive failure count
    pub fn load_failed(&mut self) -> DomainResult<u32> {
        if self.state != AdSlotState::Loading {
            return Err(self.invalid(AdSlotState::Failed));
        }
        self.state = AdSlotState::Failed;
        self.failure_count += 1;
        Ok(self.failure_count)
    }

    /// Ready -> Presenting; hands the creative to the caller
    pub fn begin_presentation(&mut self) -> DomainResult<CreativeHandle> {
        if self.state != AdSlotState::Ready {
            return Err(self.invalid(AdSlotState::Presenting));
        }
        let creative = self.creative.take().ok_or_else(|| {
            DomainError::InvariantViolation(format!("{} slot is ready without a creative", self.kind))
        })?;
        self.state = AdSlotState::Presenting;
        Ok(creative)
    }

    /// Presenting -> Dismissed
    pub fn dismissed(&mut self) -> DomainResult<()> {
        if self.state != AdSlotState::Presenting {
            return Err(self.invalid(AdSlotState::Dismissed));
        }
        self.state = AdSlotState::Dismissed;
        Ok(())
    }

    fn invalid(&self, to: AdSlotState) -> DomainError {
        DomainError::InvalidStateTransition(format!("{}: {} -> {}", self.kind, self.state, to))
    }
}

impl std::fmt::Display for AdKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AdKind::Interstitial => write!(f, "interstitial"),
            AdKind::Rewarded => write!(f, "rewarded"),
            AdKind::AppOpen => write!(f, "app_open"),
        }
    }
}

impl std::fmt::Display for AdSlotState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AdSlotState::Empty => write!(f, "empty"),
            AdSlotState::Loading => write!(f, "loading"),
            AdSlotState::Ready => write!(f, "ready"),
            AdSlotState::Presenting => write!(f, "presenting"),
            AdSlotState::Dismissed => write!(f, "dismissed"),
            AdSlotState::Failed => write!(f, "failed"),
        }
    }
}
