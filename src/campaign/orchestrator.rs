//! Phase orchestrator: cursor advancement and baseline/overlay reconciliation.
use std::fmt;

use bevy::prelude::*;

use super::{
    actions::{Campaign, PhaseActionSet},
    components::{Phase, PhaseStamp},
    ledger::ActivationLedger,
};

/// World-side operations the orchestrator needs while applying a phase.
pub trait PhaseEnvironment {
    /// Current active flag, or `None` when the entity no longer exists.
    fn active_state(&self, entity: Entity) -> Option<bool>;

    /// Sets the active flag. Returns `false` when the entity no longer exists.
    fn set_active(&mut self, entity: Entity, active: bool) -> bool;

    /// Broadcasts the applied phase to systems outside the orchestrator.
    fn announce(&mut self, stamp: PhaseStamp);

    fn reset_timer_to_idle(&mut self);

    fn refresh_menu_boards(&mut self);
}

/// Handle returned by [`PhaseOrchestrator::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type PhaseCallback = Box<dyn FnMut(PhaseStamp) + Send + Sync>;

#[derive(Default)]
struct PhaseSubscribers {
    entries: Vec<(SubscriptionId, PhaseCallback)>,
    next_id: u64,
}

impl PhaseSubscribers {
    fn insert(&mut self, callback: PhaseCallback) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, callback));
        id
    }

    fn remove(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    fn notify(&mut self, stamp: PhaseStamp) {
        for (_, callback) in self.entries.iter_mut() {
            callback(stamp);
        }
    }
}

/// Counters describing a single phase application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseReport {
    pub stamp: PhaseStamp,
    pub restored: usize,
    pub reasserted: usize,
    pub pruned: usize,
    pub applied: usize,
    pub skipped: usize,
}

impl PhaseReport {
    fn new(stamp: PhaseStamp) -> Self {
        Self {
            stamp,
            restored: 0,
            reasserted: 0,
            pruned: 0,
            applied: 0,
            skipped: 0,
        }
    }
}

/// Owns the campaign, the day/phase cursor and the activation ledger.
#[derive(Resource)]
pub struct PhaseOrchestrator {
    campaign: Campaign,
    day: u32,
    phase: Phase,
    ledger: ActivationLedger,
    subscribers: PhaseSubscribers,
}

impl fmt::Debug for PhaseOrchestrator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PhaseOrchestrator")
            .field("day", &self.day)
            .field("phase", &self.phase)
            .field("campaign_length", &self.campaign.length())
            .field("ledger", &self.ledger)
            .field("subscribers", &self.subscribers.entries.len())
            .finish()
    }
}

impl PhaseOrchestrator {
    /// Places the cursor at the campaign's start. Nothing is applied until
    /// [`Self::reset_campaign`] or [`Self::apply_phase`] runs.
    pub fn new(campaign: Campaign) -> Self {
        let day = campaign.start_day();
        let phase = campaign.start_phase();
        Self {
            campaign,
            day,
            phase,
            ledger: ActivationLedger::default(),
            subscribers: PhaseSubscribers::default(),
        }
    }

    /// Inserts the orchestrator into `world` unless one is already installed,
    /// in which case the existing instance stays authoritative.
    pub fn install(self, world: &mut World) -> bool {
        if world.contains_resource::<Self>() {
            warn!("A phase orchestrator is already installed; discarding the new instance");
            return false;
        }
        world.insert_resource(self);
        true
    }

    pub fn campaign(&self) -> &Campaign {
        &self.campaign
    }

    pub fn ledger(&self) -> &ActivationLedger {
        &self.ledger
    }

    pub fn current_day(&self) -> u32 {
        self.day
    }

    pub fn current_phase(&self) -> Phase {
        self.phase
    }

    pub fn current_stamp(&self) -> PhaseStamp {
        PhaseStamp::new(self.day, self.phase)
    }

    /// Registers a callback invoked synchronously after every phase application.
    ///
    /// Only applications that happen after registration are delivered. Inside
    /// the app the starting phase is applied before the orchestrator resource
    /// exists, so callbacks never see it; read [`Self::current_stamp`] or
    /// listen for `PhaseChangedEvent` to observe it.
    pub fn subscribe(
        &mut self,
        callback: impl FnMut(PhaseStamp) + Send + Sync + 'static,
    ) -> SubscriptionId {
        self.subscribers.insert(Box::new(callback))
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.remove(id)
    }

    /// Moves the cursor to the next phase and applies it. The day saturates at
    /// the campaign length.
    pub fn advance_phase(&mut self, env: &mut impl PhaseEnvironment) -> PhaseReport {
        let next_day = self.campaign.clamp_day(self.day.saturating_add(1));
        match self.phase {
            Phase::Morning => {
                let has_second_phase = self
                    .campaign
                    .day(self.day)
                    .is_some_and(|config| config.has_second_phase);
                if has_second_phase {
                    self.phase = Phase::Night;
                } else {
                    self.day = next_day;
                }
            }
            Phase::Night => {
                self.day = next_day;
                self.phase = Phase::Morning;
            }
        }

        self.apply_phase(env)
    }

    /// Clears every table and re-applies `(day, phase)` from scratch.
    pub fn reset_campaign(
        &mut self,
        env: &mut impl PhaseEnvironment,
        day: u32,
        phase: Phase,
    ) -> PhaseReport {
        let clamped = self.campaign.clamp_day(day);
        if clamped != day {
            debug!("Requested campaign day {day} clamped to {clamped}");
        }

        self.ledger.clear();
        self.day = clamped;
        self.phase = phase;
        self.apply_phase(env)
    }

    /// Applies the current cursor position to the world.
    pub fn apply_phase(&mut self, env: &mut impl PhaseEnvironment) -> PhaseReport {
        let stamp = self.current_stamp();
        let mut report = PhaseReport::new(stamp);

        self.restore_touched(env, &mut report);
        self.reassert_persistent(env, &mut report);

        // Every transient request lands before any persistent one so that
        // persistent state wins on shared entities.
        let global = self.campaign.global_actions(stamp.phase).clone();
        let day_specific = self
            .campaign
            .day(stamp.day)
            .map(|config| config.actions_for(stamp.phase).clone())
            .unwrap_or_default();
        for persistent in [false, true] {
            for set in [&global, &day_specific] {
                self.apply_action_set(env, set, persistent, &mut report);
            }
        }

        self.subscribers.notify(stamp);
        env.announce(stamp);

        if stamp.phase.is_first() {
            env.reset_timer_to_idle();
            env.refresh_menu_boards();
        }

        report
    }

    fn restore_touched(&mut self, env: &mut impl PhaseEnvironment, report: &mut PhaseReport) {
        for entity in self.ledger.take_touched() {
            let Some(current) = env.active_state(entity) else {
                debug!("Dropping bookkeeping for despawned entity {entity}");
                self.ledger.forget(entity);
                report.pruned += 1;
                continue;
            };

            let baseline = match self.ledger.baseline(entity) {
                Some(baseline) => baseline,
                None => {
                    self.ledger.capture_initial(entity, current);
                    current
                }
            };
            env.set_active(entity, baseline);
            report.restored += 1;
        }
    }

    fn reassert_persistent(&mut self, env: &mut impl PhaseEnvironment, report: &mut PhaseReport) {
        for (entity, active) in self.ledger.persistent_entries() {
            if env.set_active(entity, active) {
                report.reasserted += 1;
            } else {
                debug!("Pruning persistent override for despawned entity {entity}");
                self.ledger.forget(entity);
                report.pruned += 1;
            }
        }
    }

    fn apply_action_set(
        &mut self,
        env: &mut impl PhaseEnvironment,
        set: &PhaseActionSet,
        persistent: bool,
        report: &mut PhaseReport,
    ) {
        for (action, requested) in set.requests() {
            if action.persistent != persistent {
                continue;
            }

            let Some(current) = env.active_state(action.entity) else {
                debug!("Skipping action on despawned entity {}", action.entity);
                report.skipped += 1;
                continue;
            };

            self.ledger.capture_initial(action.entity, current);
            env.set_active(action.entity, requested);
            if persistent {
                self.ledger.record_persistent(action.entity, requested);
            } else {
                self.ledger.mark_touched(action.entity);
            }
            report.applied += 1;
        }
    }
}
