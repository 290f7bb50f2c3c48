// src/integrations/ad_network.rs
//
// Ad mediation boundary.
//
// The mediation SDK is a collaborator: it loads creatives and shows them.
// Slot bookkeeping, gating and retry scheduling live in AdService.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{AdKind, CreativeHandle};
use crate::error::AppResult;

/// How a presentation ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresentationOutcome {
    /// Watched to the end (interstitial/app-open) or reward earned (rewarded)
    pub completed: bool,
}

impl PresentationOutcome {
    pub fn completed() -> Self {
        Self { completed: true }
    }

    pub fn skipped() -> Self {
        Self { completed: false }
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdNetwork: Send + Sync {
    /// Fetches one creative for `kind`.
    ///
    /// Fails with `AppError::AdLoad` when nothing could be filled.
    async fn load(&self, kind: AdKind) -> AppResult<CreativeHandle>;

    /// Shows a loaded creative and resolves once it is dismissed.
    ///
    /// Fails with `AppError::AdPresent` when the creative cannot be shown.
    async fn present(&self, kind: AdKind, creative: CreativeHandle) -> AppResult<PresentationOutcome>;
}
