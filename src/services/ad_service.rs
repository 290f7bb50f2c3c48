// src/services/ad_service.rs
//
// Ad Service - load/show/reload sequencing per ad kind
//
// CRITICAL RULES:
// - Every slot transition happens under that slot's lock; locks are never
//   held across an await
// - At most one load task per slot; the task with the newest generation
//   wins and the other is aborted
// - Load completions carry the slot generation; stale ones are dropped
// - Only a Ready slot can be presented, and only while the gate is open
// - Collaborator failures become `false` outcomes, never errors

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;

use crate::config::AdConfig;
use crate::domain::{
    should_show_ad, validate_ad_slot, AdKind, AdSlot, AdSlotState, CreativeHandle, DomainResult,
};
use crate::error::AppError;
use crate::events::{AdDismissed, AdLoadFailed, AdPresented, AdSlotTransitioned, EventBus};
use crate::integrations::AdNetwork;
use crate::services::{EntitlementService, LaunchService, RemoteConfigService};
use crate::sync::IgnorePoison;

/// A spawned load and the slot generation it was started for
struct LoadTask {
    generation: u64,
    handle: JoinHandle<()>,
}

struct SlotHandle {
    slot: Mutex<AdSlot>,
    task: Mutex<Option<LoadTask>>,
}

impl SlotHandle {
    fn new(kind: AdKind) -> Self {
        Self {
            slot: Mutex::new(AdSlot::new(kind)),
            task: Mutex::new(None),
        }
    }

    /// Keeps the load with the highest generation and aborts the other one.
    ///
    /// Spawners may reach this out of order, so an older load never
    /// displaces a newer one.
    fn install_task(&self, generation: u64, handle: JoinHandle<()>) {
        let mut current = self.task.lock_ignore_poison();
        match current.as_ref() {
            Some(newer) if newer.generation > generation => handle.abort(),
            _ => {
                if let Some(previous) = current.replace(LoadTask { generation, handle }) {
                    previous.handle.abort();
                }
            }
        }
    }

    fn take_task(&self) -> Option<LoadTask> {
        self.task.lock_ignore_poison().take()
    }
}

/// What a finished load call turned into once it re-entered the slot
enum LoadCompletion {
    Loaded,
    Failed(u32, AppError),
    Stale,
}

pub struct AdService {
    network: Arc<dyn AdNetwork>,
    entitlement: Arc<EntitlementService>,
    launch: Arc<LaunchService>,
    remote_config: Arc<RemoteConfigService>,
    event_bus: Arc<EventBus>,
    config: AdConfig,
    slots: HashMap<AdKind, SlotHandle>,
    paywall_visible: AtomicBool,
    app_open_task: Mutex<Option<JoinHandle<()>>>,
}

impl AdService {
    pub fn new(
        network: Arc<dyn AdNetwork>,
        entitlement: Arc<EntitlementService>,
        launch: Arc<LaunchService>,
        remote_config: Arc<RemoteConfigService>,
        event_bus: Arc<EventBus>,
        config: AdConfig,
    ) -> Self {
        let slots = AdKind::ALL
            .into_iter()
            .map(|kind| (kind, SlotHandle::new(kind)))
            .collect();

        Self {
            network,
            entitlement,
            launch,
            remote_config,
            event_bus,
            config,
            slots,
            paywall_visible: AtomicBool::new(false),
            app_open_task: Mutex::new(None),
        }
    }

    // ========================================================================
    // LIFECYCLE
    // ========================================================================

    /// Preloads every slot and schedules the app-open ad.
    ///
    /// Does nothing while the gate is closed.
    pub fn start(self: &Arc<Self>) {
        if !self.gate_open() {
            log::info!("Ads suppressed for this session, skipping preload");
            return;
        }

        for kind in AdKind::ALL {
            self.request_load(kind);
        }

        if self.config.app_open_on_start {
            let this = Arc::clone(self);
            let delay = Duration::from_millis(self.config.app_open_delay_ms);
            let task = tokio::spawn(async move {
                tokio::time::sleep(delay).await;
                this.present(AdKind::AppOpen).await;
            });
            if let Some(previous) = self.app_open_task.lock_ignore_poison().replace(task) {
                previous.abort();
            }
        }
    }

    /// Aborts every pending load and the scheduled app-open ad.
    ///
    /// Slots that were loading go back to Empty, so a later `request_load`
    /// or present starts over.
    pub fn shutdown(&self) {
        for kind in AdKind::ALL {
            if let Some(task) = self.handle(kind).take_task() {
                task.handle.abort();
            }
            let cancelled = self.with_slot(kind, |slot| {
                if slot.state != AdSlotState::Loading {
                    return Ok(());
                }
                slot.cancel_load()
            });
            if let Err(e) = cancelled {
                log::error!("Cannot reset {} slot: {}", kind, e);
            }
        }
        if let Some(task) = self.app_open_task.lock_ignore_poison().take() {
            task.abort();
        }
        log::debug!("Ad service shut down");
    }

    // ========================================================================
    // QUERIES
    // ========================================================================

    pub fn slot_state(&self, kind: AdKind) -> AdSlotState {
        self.handle(kind).slot.lock_ignore_poison().state
    }

    pub fn slot_snapshot(&self, kind: AdKind) -> AdSlot {
        self.handle(kind).slot.lock_ignore_poison().clone()
    }

    pub fn set_paywall_visible(&self, visible: bool) {
        self.paywall_visible.store(visible, Ordering::SeqCst);
    }

    pub fn is_paywall_visible(&self) -> bool {
        self.paywall_visible.load(Ordering::SeqCst)
    }

    /// Whether ads may be shown right now
    pub fn gate_open(&self) -> bool {
        should_show_ad(
            &self.entitlement.current(),
            self.launch.is_first_launch(),
            self.remote_config.is_ad_disabled(),
        )
    }

    // ========================================================================
    // LOADING
    // ========================================================================

    /// Starts a fresh load for an idle slot (Empty, Failed or Dismissed).
    ///
    /// Returns false when the slot is already loading, ready or presenting.
    pub fn request_load(self: &Arc<Self>, kind: AdKind) -> bool {
        let generation = self.with_slot(kind, |slot| match slot.state {
            AdSlotState::Empty | AdSlotState::Failed | AdSlotState::Dismissed => {
                slot.begin_load().map(Some)
            }
            _ => Ok(None),
        });

        let generation = match generation {
            Ok(Some(generation)) => generation,
            Ok(None) => return false,
            Err(e) => {
                log::error!("Cannot start {} load: {}", kind, e);
                return false;
            }
        };

        let task = tokio::spawn(Arc::clone(self).run_load(kind, generation));
        self.handle(kind).install_task(generation, task);
        true
    }

    async fn run_load(self: Arc<Self>, kind: AdKind, generation: u64) {
        loop {
            log::debug!("Loading {} ad (generation {})", kind, generation);
            let result = self.network.load(kind).await;

            let completion = self.with_slot(kind, move |slot| {
                if slot.generation != generation || slot.state != AdSlotState::Loading {
                    return Ok(LoadCompletion::Stale);
                }
                match result {
                    Ok(creative) => {
                        slot.load_succeeded(creative)?;
                        Ok(LoadCompletion::Loaded)
                    }
                    Err(e) => Ok(LoadCompletion::Failed(slot.load_failed()?, e)),
                }
            });

            let (failures, reason) = match completion {
                Ok(LoadCompletion::Loaded) => {
                    log::info!("{} ad ready", kind);
                    return;
                }
                Ok(LoadCompletion::Stale) => {
                    log::debug!("Dropping stale {} load (generation {})", kind, generation);
                    return;
                }
                Ok(LoadCompletion::Failed(failures, reason)) => (failures, reason),
                Err(e) => {
                    log::error!("{} load completion rejected: {}", kind, e);
                    return;
                }
            };

            let delay = self.config.retry.delay_for(failures);
            log::warn!(
                "{} ad failed to load ({} in a row): {}",
                kind,
                failures,
                reason
            );
            self.event_bus.emit(AdLoadFailed::new(
                kind,
                failures,
                reason.to_string(),
                delay.map(|d| d.as_millis() as u64),
            ));

            let Some(delay) = delay else {
                log::warn!("Giving up on {} ad until it is requested again", kind);
                return;
            };
            tokio::time::sleep(delay).await;

            let retry = self.with_slot(kind, |slot| {
                if slot.generation != generation || slot.state != AdSlotState::Failed {
                    return Ok(false);
                }
                slot.retry_load().map(|_| true)
            });
            match retry {
                Ok(true) => continue,
                Ok(false) => return,
                Err(e) => {
                    log::error!("Cannot retry {} load: {}", kind, e);
                    return;
                }
            }
        }
    }

    fn has_pending_load(&self, kind: AdKind) -> bool {
        self.handle(kind)
            .task
            .lock_ignore_poison()
            .as_ref()
            .is_some_and(|task| !task.handle.is_finished())
    }

    // ========================================================================
    // PRESENTATION
    // ========================================================================

    /// Shows an interstitial; resolves with whether it was watched to the end
    pub async fn present_interstitial(self: &Arc<Self>) -> bool {
        self.present(AdKind::Interstitial).await
    }

    /// Shows a rewarded ad; resolves with whether the reward was earned
    pub async fn present_rewarded(self: &Arc<Self>) -> bool {
        self.present(AdKind::Rewarded).await
    }

    /// Shows the app-open ad without waiting for the outcome
    pub fn present_app_open(self: &Arc<Self>) {
        let this = Arc::clone(self);
        tokio::spawn(async move {
            this.present(AdKind::AppOpen).await;
        });
    }

    pub async fn present(self: &Arc<Self>, kind: AdKind) -> bool {
        if !self.gate_open() {
            log::debug!("{} ad suppressed by gate", kind);
            return false;
        }
        if kind != AdKind::Rewarded && self.is_paywall_visible() {
            log::debug!("{} ad suppressed while the paywall is visible", kind);
            return false;
        }

        let started = self.with_slot(kind, |slot| {
            if !slot.is_ready() {
                return Ok(None);
            }
            let generation = slot.generation;
            slot.begin_presentation().map(|creative| Some((creative, generation)))
        });

        let (creative, generation) = match started {
            Ok(Some(started)) => started,
            Ok(None) => {
                self.load_if_idle(kind);
                return false;
            }
            Err(e) => {
                log::error!("Cannot present {} ad: {}", kind, e);
                return false;
            }
        };

        self.event_bus.emit(AdPresented::new(kind));
        let completed = self.show(kind, creative).await;

        let dismissed = self.with_slot(kind, |slot| {
            if slot.generation != generation || slot.state != AdSlotState::Presenting {
                return Ok(false);
            }
            slot.dismissed().map(|_| true)
        });
        if let Err(e) = dismissed {
            log::error!("Cannot dismiss {} ad: {}", kind, e);
        }
        self.event_bus.emit(AdDismissed::new(kind, completed));

        if kind != AdKind::Rewarded {
            if let Err(e) = self.launch.request_apology_notice_if_needed(kind) {
                log::warn!("Failed to update apology notice flag: {}", e);
            }
        }

        self.request_load(kind);
        completed
    }

    async fn show(&self, kind: AdKind, creative: CreativeHandle) -> bool {
        match self.network.present(kind, creative).await {
            Ok(outcome) => outcome.completed,
            Err(e) => {
                log::warn!("{} ad could not be presented: {}", kind, e);
                false
            }
        }
    }

    /// A present call on an idle slot kicks off a load for next time
    fn load_if_idle(self: &Arc<Self>, kind: AdKind) {
        let idle = match self.slot_state(kind) {
            AdSlotState::Empty | AdSlotState::Dismissed => true,
            AdSlotState::Failed => !self.has_pending_load(kind),
            _ => false,
        };
        if idle {
            self.request_load(kind);
        }
    }

    // ========================================================================
    // HELPERS
    // ========================================================================

    fn handle(&self, kind: AdKind) -> &SlotHandle {
        &self.slots[&kind]
    }

    /// Runs `op` under the slot lock, then publishes the transition it made
    fn with_slot<T>(
        &self,
        kind: AdKind,
        op: impl FnOnce(&mut AdSlot) -> DomainResult<T>,
    ) -> DomainResult<T> {
        let (result, transition) = {
            let mut slot = self.handle(kind).slot.lock_ignore_poison();
            let from = slot.state;
            let result = op(&mut slot);

            if let Err(e) = validate_ad_slot(&slot) {
                log::error!("{}", e);
            }

            let transition = (slot.state != from)
                .then(|| AdSlotTransitioned::new(kind, from, slot.state, slot.generation));
            (result, transition)
        };

        if let Some(event) = transition {
            self.event_bus.emit(event);
        }
        result
    }
}
