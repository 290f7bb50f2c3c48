// src/services/launch_service.rs
//
// Launch Service - persisted per-install counters and one-time flags
//
// - Launch counter (first-launch ad suppression, review prompt eligibility)
// - One-time apology notice after the first dismissed ad
// - Review prompt policy

use std::sync::{Arc, Mutex};

use crate::config::ReviewConfig;
use crate::domain::{AdKind, LaunchCounter, ReviewPromptDecision, ReviewPromptPolicy};
use crate::error::AppResult;
use crate::events::{ApologyNoticeRequested, EventBus, LaunchRecorded, ReviewPromptRequested};
use crate::repositories::{keys, SettingsExt, SettingsRepository};
use crate::sync::IgnorePoison;

pub struct LaunchService {
    settings: Arc<dyn SettingsRepository>,
    event_bus: Arc<EventBus>,
    review: ReviewConfig,
    counter: Mutex<LaunchCounter>,
}

impl LaunchService {
    /// Loads the persisted launch counter
    pub fn new(
        settings: Arc<dyn SettingsRepository>,
        event_bus: Arc<EventBus>,
        review: ReviewConfig,
    ) -> AppResult<Self> {
        let count = settings.get_u64(keys::LAUNCH_COUNT)?;

        Ok(Self {
            settings,
            event_bus,
            review,
            counter: Mutex::new(LaunchCounter::new(count)),
        })
    }

    /// Counts this process start. Call exactly once per launch.
    pub fn record_launch(&self) -> AppResult<u64> {
        let count = {
            let mut counter = self.counter.lock_ignore_poison();
            let count = counter.increment();
            self.settings.set(keys::LAUNCH_COUNT, &count)?;
            count
        };

        log::info!("Launch #{} recorded", count);
        self.event_bus.emit(LaunchRecorded::new(count));
        Ok(count)
    }

    pub fn launch_count(&self) -> u64 {
        self.counter.lock_ignore_poison().count
    }

    pub fn is_first_launch(&self) -> bool {
        self.counter.lock_ignore_poison().is_first_launch()
    }

    // ------------------------------------------------------------------------
    // Apology notice
    // ------------------------------------------------------------------------

    pub fn should_show_apology_notice(&self) -> AppResult<bool> {
        Ok(!self.settings.get_bool(keys::APOLOGY_NOTICE_SHOWN)?)
    }

    pub fn mark_apology_notice_shown(&self) -> AppResult<()> {
        self.settings.set(keys::APOLOGY_NOTICE_SHOWN, &true)
    }

    /// Requests the apology notice after an ad was dismissed, once per install.
    ///
    /// Returns whether the notice was requested.
    pub fn request_apology_notice_if_needed(&self, after_kind: AdKind) -> AppResult<bool> {
        if !self.should_show_apology_notice()? {
            return Ok(false);
        }

        self.mark_apology_notice_shown()?;
        self.event_bus.emit(ApologyNoticeRequested::new(after_kind));
        Ok(true)
    }

    // ------------------------------------------------------------------------
    // Review prompt
    // ------------------------------------------------------------------------

    pub fn review_policy(&self) -> AppResult<ReviewPromptPolicy> {
        let removed = self.settings.get_bool(keys::REVIEW_PROMPT_REMOVED)?;
        let min_launches = self
            .settings
            .get::<u64>(keys::REVIEW_PROMPT_MIN_LAUNCHES)?
            .unwrap_or(self.review.initial_min_launches);

        Ok(ReviewPromptPolicy::new(removed, min_launches))
    }

    fn save_review_policy(&self, policy: &ReviewPromptPolicy) -> AppResult<()> {
        self.settings.set(keys::REVIEW_PROMPT_REMOVED, &policy.removed)?;
        self.settings
            .set(keys::REVIEW_PROMPT_MIN_LAUNCHES, &policy.min_launches)?;
        Ok(())
    }

    pub fn request_review_prompt_if_eligible(&self) -> AppResult<ReviewPromptDecision> {
        let launch_count = self.launch_count();
        let decision = self.review_policy()?.decide(launch_count);

        if decision == ReviewPromptDecision::Show {
            self.event_bus.emit(ReviewPromptRequested::new(launch_count));
        }
        Ok(decision)
    }

    /// Accepting removes the prompt for good; declining snoozes it
    pub fn record_review_response(&self, accepted: bool) -> AppResult<()> {
        let mut policy = self.review_policy()?;
        if accepted {
            policy.accept();
        } else {
            policy.decline(self.launch_count(), self.review.snooze_launches);
        }
        self.save_review_policy(&policy)
    }
}
