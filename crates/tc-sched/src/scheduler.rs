//! The `Scheduler` struct and its tick loop.

use rustc_hash::FxHashMap;
use tc_behavior::{Behavior, BehaviorContext, Request, Requirements};
use tc_core::{BehaviorId, LoopClock, ResourceId, Tick, TriggerId};

use crate::binding::{Binding, BindingAction, CancelTarget, RefirePolicy, Target};
use crate::{NoopObserver, SchedulerObserver};

// ── Slots ─────────────────────────────────────────────────────────────────────

/// Lifecycle state of a behavior known to the scheduler.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Lifecycle {
    Idle,
    Running,
    /// Transient state while `end` runs; never observable between ticks.
    Ending,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Retention {
    /// Registered up front; returns to Idle after it ends.
    Persistent,
    /// Built on demand; dropped after it ends.
    Transient,
}

pub(crate) struct ResourceSlot {
    pub(crate) name:    String,
    pub(crate) owner:   Option<BehaviorId>,
    pub(crate) default: Option<BehaviorId>,
}

pub(crate) struct BehaviorSlot {
    pub(crate) behavior:     Box<dyn Behavior>,
    pub(crate) name:         String,
    /// Read once when the behavior becomes known to the scheduler.
    pub(crate) requirements: Requirements,
    pub(crate) state:        Lifecycle,
    pub(crate) retention:    Retention,
    pub(crate) default_for:  Option<ResourceId>,
}

/// What a fired binding resolved to, computed while the binding is borrowed.
enum Effect {
    Ignore,
    Launch(Launch),
    Replace(BehaviorId, Launch),
    Stop(BehaviorId),
    StopStartedBy(TriggerId),
}

enum Launch {
    Registered(BehaviorId),
    Fresh(Box<dyn Behavior>),
}

// ── Scheduler ─────────────────────────────────────────────────────────────────

/// The cooperative command scheduler.
///
/// `Scheduler` owns every behavior, the ownership table of every resource and
/// every trigger binding, and advances them one fixed-period tick at a time:
///
/// 1. **Requests**: apply what behaviors queued through their
///    [`BehaviorContext`] during the previous tick, in issue order.
/// 2. **Triggers**: poll every binding in bind order and perform the actions
///    of those that fire.
/// 3. **Behaviors**: for each Running behavior in start order (snapshot taken
///    before the phase), `execute` then `is_finished`; finished behaviors are
///    ended with `interrupted = false` and release their resources.
/// 4. **Defaults**: each unowned resource, in declaration order, starts its
///    default behavior.
///
/// Acquisition is all-or-nothing and never waits: every current owner of a
/// required resource is ended with `interrupted = true` before the new
/// behavior's `initialize` runs.
///
/// Runtime operations are total.  Unknown ids are logged at `warn` and
/// ignored.  Create via [`SchedulerBuilder`][crate::SchedulerBuilder].
pub struct Scheduler {
    pub(crate) clock:         LoopClock,
    pub(crate) resources:     Vec<ResourceSlot>,
    pub(crate) behaviors:     FxHashMap<BehaviorId, BehaviorSlot>,
    /// Running behaviors in start order.
    pub(crate) running:       Vec<BehaviorId>,
    pub(crate) requests:      Vec<Request>,
    pub(crate) bindings:      Vec<(TriggerId, Binding)>,
    pub(crate) next_behavior: u64,
    pub(crate) next_trigger:  u32,
}

impl Scheduler {
    // ── Tick loop ─────────────────────────────────────────────────────────

    /// Process exactly one tick.
    pub fn tick(&mut self) -> Tick {
        self.tick_with(&mut NoopObserver)
    }

    /// Process exactly one tick, reporting lifecycle events to `observer`.
    /// Returns the tick just processed.
    pub fn tick_with<O: SchedulerObserver>(&mut self, observer: &mut O) -> Tick {
        let now = self.clock.advance();
        observer.on_tick_start(now);

        self.apply_requests(now, observer);
        self.poll_bindings(now, observer);
        self.run_behaviors(now, observer);
        self.backfill_defaults(now, observer);

        let running = self.running.len();
        tracing::trace!(tick = %now, running, pending = self.requests.len(), "tick complete");
        observer.on_tick_end(now, running);
        now
    }

    /// Run `n` ticks.
    pub fn run_ticks<O: SchedulerObserver>(&mut self, n: u64, observer: &mut O) {
        for _ in 0..n {
            self.tick_with(observer);
        }
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Make a persistent behavior known to the scheduler without starting it.
    pub fn register(&mut self, behavior: impl Behavior) -> BehaviorId {
        self.insert(Box::new(behavior), Retention::Persistent, None)
    }

    /// Start a registered behavior now.  Returns `false` if it was already
    /// running or is unknown.
    pub fn schedule(&mut self, id: BehaviorId) -> bool {
        let now = self.clock.current_tick;
        self.start(id, now, &mut NoopObserver)
    }

    /// Start a one-off behavior now.  It is dropped after it ends.
    pub fn schedule_new(&mut self, behavior: impl Behavior) -> Option<BehaviorId> {
        let now = self.clock.current_tick;
        self.spawn(Box::new(behavior), now, &mut NoopObserver)
    }

    /// Interrupt a running behavior.  Returns `false` if it was not running.
    pub fn cancel(&mut self, id: BehaviorId) -> bool {
        let now = self.clock.current_tick;
        self.interrupt(id, now, &mut NoopObserver)
    }

    /// Interrupt every running behavior, defaults included.  Defaults restart
    /// on the next tick's backfill.
    pub fn cancel_all(&mut self) {
        let now = self.clock.current_tick;
        for id in self.running.clone() {
            self.finish(id, true, now, &mut NoopObserver);
        }
    }

    /// Phase transition.
    ///
    /// `Some(id)` interrupts every running behavior sharing a resource with
    /// `id` and starts it (no-op if it is already running).  `None` interrupts
    /// every running behavior that is not a default; defaults refill idle
    /// resources on the next tick.
    pub fn run_exclusively(&mut self, target: Option<BehaviorId>) {
        let now = self.clock.current_tick;
        self.exclusive(target, now, &mut NoopObserver);
    }

    /// Add a binding.  Its trigger is first polled on the next tick.
    pub fn bind(&mut self, binding: Binding) -> TriggerId {
        let id = TriggerId(self.next_trigger);
        self.next_trigger += 1;
        tracing::debug!(trigger = %id, name = binding.name(), "binding added");
        self.bindings.push((id, binding));
        id
    }

    /// Remove a binding.  A behavior it started keeps running.
    pub fn unbind(&mut self, trigger: TriggerId) -> bool {
        let before = self.bindings.len();
        self.bindings.retain(|(id, _)| *id != trigger);
        let removed = self.bindings.len() != before;
        if !removed {
            tracing::warn!(%trigger, "unbind of unknown trigger ignored");
        }
        removed
    }

    // ── Queries ───────────────────────────────────────────────────────────

    pub fn is_running(&self, id: BehaviorId) -> bool {
        self.state(id) == Some(Lifecycle::Running)
    }

    /// `None` for unknown ids, including transient behaviors that have ended.
    pub fn state(&self, id: BehaviorId) -> Option<Lifecycle> {
        self.behaviors.get(&id).map(|slot| slot.state)
    }

    /// Current owner of `resource`.
    pub fn owner(&self, resource: ResourceId) -> Option<BehaviorId> {
        self.resources.get(resource.index()).and_then(|r| r.owner)
    }

    /// Default behavior attached to `resource`.
    pub fn default_of(&self, resource: ResourceId) -> Option<BehaviorId> {
        self.resources.get(resource.index()).and_then(|r| r.default)
    }

    /// Running behaviors in start order.
    pub fn running(&self) -> &[BehaviorId] {
        &self.running
    }

    pub fn resource_name(&self, resource: ResourceId) -> Option<&str> {
        self.resources.get(resource.index()).map(|r| r.name.as_str())
    }

    pub fn behavior_name(&self, id: BehaviorId) -> Option<&str> {
        self.behaviors.get(&id).map(|slot| slot.name.as_str())
    }

    /// `(resource, name, owner)` for every resource in declaration order.
    pub fn ownership(&self) -> impl Iterator<Item = (ResourceId, &str, Option<BehaviorId>)> + '_ {
        self.resources
            .iter()
            .enumerate()
            .map(|(i, r)| (ResourceId(i as u32), r.name.as_str(), r.owner))
    }

    pub fn binding(&self, trigger: TriggerId) -> Option<&Binding> {
        self.bindings.iter().find(|(id, _)| *id == trigger).map(|(_, b)| b)
    }

    pub fn resource_count(&self) -> usize {
        self.resources.len()
    }

    pub fn behavior_count(&self) -> usize {
        self.behaviors.len()
    }

    pub fn binding_count(&self) -> usize {
        self.bindings.len()
    }

    /// Requests queued by behaviors, to be applied at the next tick.
    pub fn pending_requests(&self) -> usize {
        self.requests.len()
    }

    /// The last tick processed (`Tick::ZERO` before the first).
    pub fn current_tick(&self) -> Tick {
        self.clock.current_tick
    }

    pub fn clock(&self) -> &LoopClock {
        &self.clock
    }

    // ── Tick phases ───────────────────────────────────────────────────────

    fn apply_requests(&mut self, now: Tick, observer: &mut dyn SchedulerObserver) {
        for request in std::mem::take(&mut self.requests) {
            tracing::debug!(tick = %now, ?request, "applying request");
            match request {
                Request::Start(behavior) => {
                    self.spawn(behavior, now, observer);
                }
                Request::StartRegistered(id) => {
                    self.start(id, now, observer);
                }
                Request::Cancel(id) => {
                    self.interrupt(id, now, observer);
                }
                Request::RunExclusively(target) => self.exclusive(target, now, observer),
            }
        }
    }

    fn poll_bindings(&mut self, now: Tick, observer: &mut dyn SchedulerObserver) {
        for index in 0..self.bindings.len() {
            let (trigger, binding) = &mut self.bindings[index];
            let Some(transition) = binding.trigger.poll() else {
                continue;
            };
            tracing::debug!(tick = %now, %trigger, name = binding.name(), ?transition, "trigger fired");
            observer.on_trigger_fired(now, *trigger, transition);
            self.fire(index, now, observer);
        }
    }

    fn run_behaviors(&mut self, now: Tick, observer: &mut dyn SchedulerObserver) {
        for id in self.running.clone() {
            let Some(slot) = self.behaviors.get_mut(&id) else {
                continue;
            };
            if slot.state != Lifecycle::Running {
                continue;
            }
            let mut ctx = BehaviorContext::new(now, id, &mut self.requests);
            slot.behavior.execute(&mut ctx);
            let finished = slot.behavior.is_finished();
            if finished {
                self.finish(id, false, now, observer);
            }
        }
    }

    fn backfill_defaults(&mut self, now: Tick, observer: &mut dyn SchedulerObserver) {
        for index in 0..self.resources.len() {
            let slot = &self.resources[index];
            if slot.owner.is_some() {
                continue;
            }
            let Some(default) = slot.default else {
                continue;
            };
            if !self.is_running(default) {
                self.start(default, now, observer);
            }
        }
    }

    // ── Bindings ──────────────────────────────────────────────────────────

    fn fire(&mut self, index: usize, now: Tick, observer: &mut dyn SchedulerObserver) {
        let behaviors = &self.behaviors;
        let running = |id: BehaviorId| {
            behaviors.get(&id).is_some_and(|s| s.state == Lifecycle::Running)
        };

        let binding = &mut self.bindings[index].1;
        let previous = binding.last_started.filter(|&id| running(id));
        let effect = match &mut binding.action {
            BindingAction::Start { target, refire } => {
                let current = match *target {
                    Target::Registered(id) => Some(id).filter(|&id| running(id)),
                    Target::Factory(_) => previous,
                };
                match (current, *refire) {
                    (Some(_), RefirePolicy::IgnoreWhileRunning) => Effect::Ignore,
                    (Some(id), RefirePolicy::Restart) => Effect::Replace(id, resolve(target)),
                    (None, _) => Effect::Launch(resolve(target)),
                }
            }
            BindingAction::Toggle(target) => {
                let current = match *target {
                    Target::Registered(id) => Some(id).filter(|&id| running(id)),
                    Target::Factory(_) => previous,
                };
                match current {
                    Some(id) => Effect::Stop(id),
                    None => Effect::Launch(resolve(target)),
                }
            }
            BindingAction::Cancel(CancelTarget::Behavior(id)) => Effect::Stop(*id),
            BindingAction::Cancel(CancelTarget::StartedBy(other)) => Effect::StopStartedBy(*other),
        };

        let started = match effect {
            Effect::Ignore => {
                tracing::debug!(tick = %now, "re-fire ignored while running");
                None
            }
            Effect::Launch(l) => self.launch(l, now, observer),
            Effect::Replace(old, l) => {
                self.finish(old, true, now, observer);
                self.launch(l, now, observer)
            }
            Effect::Stop(id) => {
                self.interrupt(id, now, observer);
                None
            }
            Effect::StopStartedBy(other) => {
                let victim = self
                    .bindings
                    .iter()
                    .find(|(id, _)| *id == other)
                    .and_then(|(_, b)| b.last_started);
                if let Some(id) = victim {
                    self.finish(id, true, now, observer);
                }
                None
            }
        };

        if started.is_some() {
            self.bindings[index].1.last_started = started;
        }
    }

    fn launch(&mut self, launch: Launch, now: Tick, observer: &mut dyn SchedulerObserver) -> Option<BehaviorId> {
        match launch {
            Launch::Registered(id) => self.start(id, now, observer).then_some(id),
            Launch::Fresh(behavior) => self.spawn(behavior, now, observer),
        }
    }

    // ── Ownership core ────────────────────────────────────────────────────

    pub(crate) fn insert(
        &mut self,
        behavior: Box<dyn Behavior>,
        retention: Retention,
        default_for: Option<ResourceId>,
    ) -> BehaviorId {
        let id = BehaviorId(self.next_behavior);
        self.next_behavior += 1;
        self.insert_with_id(id, behavior, retention, default_for);
        id
    }

    pub(crate) fn insert_with_id(
        &mut self,
        id: BehaviorId,
        behavior: Box<dyn Behavior>,
        retention: Retention,
        default_for: Option<ResourceId>,
    ) {
        let slot = BehaviorSlot {
            name: behavior.name().to_string(),
            requirements: behavior.requirements(),
            behavior,
            state: Lifecycle::Idle,
            retention,
            default_for,
        };
        self.behaviors.insert(id, slot);
    }

    fn spawn(&mut self, behavior: Box<dyn Behavior>, now: Tick, observer: &mut dyn SchedulerObserver) -> Option<BehaviorId> {
        let id = self.insert(behavior, Retention::Transient, None);
        if self.start(id, now, observer) {
            Some(id)
        } else {
            self.behaviors.remove(&id);
            None
        }
    }

    /// Acquire every required resource for `id` and start it.
    fn start(&mut self, id: BehaviorId, now: Tick, observer: &mut dyn SchedulerObserver) -> bool {
        let Some(slot) = self.behaviors.get(&id) else {
            tracing::warn!(behavior = %id, "start of unknown behavior ignored");
            return false;
        };
        if slot.state == Lifecycle::Running {
            return false;
        }
        if let Some(missing) = slot.requirements.iter().find(|r| r.index() >= self.resources.len()) {
            tracing::warn!(behavior = %id, resource = %missing, "behavior requires an undeclared resource");
            return false;
        }

        let mut victims: Vec<BehaviorId> = Vec::new();
        for resource in &slot.requirements {
            if let Some(owner) = self.resources[resource.index()].owner
                && owner != id
                && !victims.contains(&owner)
            {
                victims.push(owner);
            }
        }
        for victim in victims {
            self.finish(victim, true, now, observer);
        }

        let Some(slot) = self.behaviors.get_mut(&id) else {
            return false;
        };
        for resource in &slot.requirements {
            self.resources[resource.index()].owner = Some(id);
        }
        slot.state = Lifecycle::Running;
        self.running.push(id);

        tracing::debug!(tick = %now, behavior = %id, name = %slot.name, "behavior started");
        observer.on_behavior_start(now, id, &slot.name);

        let mut ctx = BehaviorContext::new(now, id, &mut self.requests);
        slot.behavior.initialize(&mut ctx);
        true
    }

    /// Interrupt `id`, warning if it is unknown.
    fn interrupt(&mut self, id: BehaviorId, now: Tick, observer: &mut dyn SchedulerObserver) -> bool {
        if !self.behaviors.contains_key(&id) {
            tracing::warn!(behavior = %id, "cancel of unknown behavior ignored");
            return false;
        }
        self.finish(id, true, now, observer)
    }

    /// End a running behavior and release everything it owns.
    fn finish(&mut self, id: BehaviorId, interrupted: bool, now: Tick, observer: &mut dyn SchedulerObserver) -> bool {
        let Some(slot) = self.behaviors.get_mut(&id) else {
            return false;
        };
        if slot.state != Lifecycle::Running {
            return false;
        }

        slot.state = Lifecycle::Ending;
        slot.behavior.end(interrupted);
        for resource in &slot.requirements {
            let owner = &mut self.resources[resource.index()].owner;
            if *owner == Some(id) {
                *owner = None;
            }
        }
        slot.state = Lifecycle::Idle;
        self.running.retain(|&r| r != id);
        for (_, binding) in &mut self.bindings {
            if binding.last_started == Some(id) {
                binding.last_started = None;
            }
        }

        tracing::debug!(tick = %now, behavior = %id, name = %slot.name, interrupted, "behavior ended");
        observer.on_behavior_end(now, id, &slot.name, interrupted);

        if slot.retention == Retention::Transient {
            self.behaviors.remove(&id);
        }
        true
    }

    fn exclusive(&mut self, target: Option<BehaviorId>, now: Tick, observer: &mut dyn SchedulerObserver) {
        match target {
            Some(id) => {
                let Some(slot) = self.behaviors.get(&id) else {
                    tracing::warn!(behavior = %id, "run_exclusively of unknown behavior ignored");
                    return;
                };
                if slot.state == Lifecycle::Running {
                    return;
                }
                let wanted = slot.requirements.clone();
                let conflicting: Vec<BehaviorId> = self
                    .running
                    .iter()
                    .copied()
                    .filter(|r| {
                        self.behaviors
                            .get(r)
                            .is_some_and(|s| !s.requirements.is_disjoint(&wanted))
                    })
                    .collect();
                for victim in conflicting {
                    self.finish(victim, true, now, observer);
                }
                self.start(id, now, observer);
            }
            None => {
                let non_default: Vec<BehaviorId> = self
                    .running
                    .iter()
                    .copied()
                    .filter(|r| self.behaviors.get(r).is_some_and(|s| s.default_for.is_none()))
                    .collect();
                tracing::debug!(tick = %now, count = non_default.len(), "running nothing exclusively");
                for victim in non_default {
                    self.finish(victim, true, now, observer);
                }
            }
        }
    }
}

/// Turn a binding target into something startable, building a fresh
/// instance for factories.
fn resolve(target: &mut Target) -> Launch {
    match target {
        Target::Registered(id) => Launch::Registered(*id),
        Target::Factory(factory) => Launch::Fresh(factory.build()),
    }
}
