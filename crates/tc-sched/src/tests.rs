//! Unit tests for tc-sched.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tc_behavior::{Behavior, BehaviorContext, BehaviorFactory, Requirements};
use tc_core::{BehaviorId, ResourceId, Tick, TriggerId};
use tc_trigger::Transition;

use crate::SchedulerObserver;

// ── Helpers ───────────────────────────────────────────────────────────────────

type Log = Rc<RefCell<Vec<String>>>;

type Hook = Box<dyn FnMut(u32, &mut BehaviorContext<'_>)>;

/// Records every lifecycle call into a shared log.  Finishes after
/// `finish_after` executions (`None` = never).  The optional hook runs on
/// every execution with the 1-based execution count.
struct Probe {
    label:        &'static str,
    requirements: Requirements,
    finish_after: Option<u32>,
    executed:     u32,
    hook:         Option<Hook>,
    log:          Log,
}

impl Probe {
    fn new(label: &'static str, log: &Log) -> Self {
        Self {
            label,
            requirements: Requirements::new(),
            finish_after: None,
            executed:     0,
            hook:         None,
            log:          Rc::clone(log),
        }
    }

    fn requiring(mut self, r: ResourceId) -> Self {
        self.requirements.insert(r);
        self
    }

    fn finishing_after(mut self, n: u32) -> Self {
        self.finish_after = Some(n);
        self
    }

    fn with_hook(mut self, hook: impl FnMut(u32, &mut BehaviorContext<'_>) + 'static) -> Self {
        self.hook = Some(Box::new(hook));
        self
    }
}

impl Behavior for Probe {
    fn name(&self) -> &str {
        self.label
    }

    fn requirements(&self) -> Requirements {
        self.requirements.clone()
    }

    fn initialize(&mut self, _ctx: &mut BehaviorContext<'_>) {
        self.executed = 0;
        self.log.borrow_mut().push(format!("{}:init", self.label));
    }

    fn execute(&mut self, ctx: &mut BehaviorContext<'_>) {
        self.executed += 1;
        self.log.borrow_mut().push(format!("{}:exec", self.label));
        if let Some(hook) = self.hook.as_mut() {
            hook(self.executed, ctx);
        }
    }

    fn is_finished(&self) -> bool {
        self.finish_after.is_some_and(|n| self.executed >= n)
    }

    fn end(&mut self, interrupted: bool) {
        self.log.borrow_mut().push(format!("{}:end({interrupted})", self.label));
    }
}

fn new_log() -> Log {
    Rc::new(RefCell::new(Vec::new()))
}

fn drain(log: &Log) -> Vec<String> {
    std::mem::take(&mut *log.borrow_mut())
}

/// Condition yielding `values` in order, then `false`.
fn script(values: &[bool]) -> impl FnMut() -> bool + 'static {
    let mut iter = values.to_vec().into_iter();
    move || iter.next().unwrap_or(false)
}

/// Factory of never-finishing probes on `resource`, counting builds.
fn probe_factory(label: &'static str, resource: ResourceId, log: &Log, builds: &Rc<Cell<u32>>) -> BehaviorFactory {
    let (log, builds) = (Rc::clone(log), Rc::clone(builds));
    BehaviorFactory::new(label, move || {
        builds.set(builds.get() + 1);
        Probe::new(label, &log).requiring(resource)
    })
}

/// Observer recording events as `"T<n> <event>"` strings.
#[derive(Default)]
struct Recorder {
    events: Vec<String>,
    fired:  Vec<(Tick, TriggerId, Transition)>,
}

impl SchedulerObserver for Recorder {
    fn on_trigger_fired(&mut self, tick: Tick, trigger: TriggerId, transition: Transition) {
        self.fired.push((tick, trigger, transition));
        self.events.push(format!("{tick} fire {}", trigger.0));
    }

    fn on_behavior_start(&mut self, tick: Tick, _id: BehaviorId, name: &str) {
        self.events.push(format!("{tick} start {name}"));
    }

    fn on_behavior_end(&mut self, tick: Tick, _id: BehaviorId, name: &str, interrupted: bool) {
        self.events.push(format!("{tick} end {name} {interrupted}"));
    }
}

// ── Ownership core ────────────────────────────────────────────────────────────

#[cfg(test)]
mod ownership_tests {
    use super::*;
    use crate::{Lifecycle, NoopObserver, SchedError, SchedulerBuilder};

    #[test]
    fn default_starts_on_first_tick_and_is_initialised_once() {
        let log = new_log();
        let mut b = SchedulerBuilder::default();
        let drive = b.resource("drive");
        let idle = b.default_behavior(drive, Probe::new("idle", &log).requiring(drive));
        let mut s = b.build().unwrap();

        assert_eq!(s.owner(drive), None);
        assert_eq!(s.state(idle), Some(Lifecycle::Idle));

        s.tick();
        assert_eq!(s.owner(drive), Some(idle));
        for _ in 0..4 {
            s.tick();
        }
        assert!(s.is_running(idle));
        assert_eq!(drain(&log), vec!["idle:init", "idle:exec", "idle:exec", "idle:exec", "idle:exec"]);
        assert_eq!(s.current_tick(), Tick(5));
    }

    #[test]
    fn acquisition_interrupts_owner_before_initialize() {
        let log = new_log();
        let mut b = SchedulerBuilder::default();
        let drive = b.resource("drive");
        let idle = b.default_behavior(drive, Probe::new("idle", &log).requiring(drive));
        let aim = b.register(Probe::new("aim", &log).requiring(drive));
        let mut s = b.build().unwrap();

        s.tick();
        drain(&log);
        assert!(s.schedule(aim));
        assert_eq!(drain(&log), vec!["idle:end(true)", "aim:init"]);
        assert_eq!(s.owner(drive), Some(aim));
        assert_eq!(s.state(idle), Some(Lifecycle::Idle));
        assert!(!s.schedule(aim), "already running");
    }

    #[test]
    fn acquisition_is_all_or_nothing() {
        let log = new_log();
        let mut b = SchedulerBuilder::default();
        let left = b.resource("left");
        let right = b.resource("right");
        let x = b.register(Probe::new("x", &log).requiring(left));
        let y = b.register(Probe::new("y", &log).requiring(right));
        let z = b.register(Probe::new("z", &log).requiring(left).requiring(right));
        let mut s = b.build().unwrap();

        s.schedule(x);
        s.schedule(y);
        drain(&log);
        s.schedule(z);
        assert_eq!(drain(&log), vec!["x:end(true)", "y:end(true)", "z:init"]);
        assert_eq!(s.owner(left), Some(z));
        assert_eq!(s.owner(right), Some(z));
        assert_eq!(s.running(), &[z]);

        // A behavior needing an undeclared resource acquires nothing.
        let bad = s.register(Probe::new("bad", &log).requiring(left).requiring(ResourceId(9)));
        assert!(!s.schedule(bad));
        assert_eq!(s.owner(left), Some(z));
        assert!(drain(&log).is_empty());
    }

    #[test]
    fn every_resource_has_at_most_one_owner() {
        let log = new_log();
        let mut b = SchedulerBuilder::default();
        let r: Vec<ResourceId> = (0..3).map(|i| b.resource(format!("r{i}"))).collect();
        let ids = [
            b.register(Probe::new("a", &log).requiring(r[0]).requiring(r[1])),
            b.register(Probe::new("b", &log).requiring(r[1]).requiring(r[2])),
            b.register(Probe::new("c", &log).requiring(r[2])),
            b.register(Probe::new("d", &log).requiring(r[0]).requiring(r[2])),
        ];
        let mut s = b.build().unwrap();

        for (i, &id) in ids.iter().cycle().take(12).enumerate() {
            s.schedule(id);
            if i % 2 == 0 {
                s.tick();
            }
            for (resource, _, owner) in s.ownership() {
                let holders = s
                    .running()
                    .iter()
                    .filter(|&&b| s.owner(resource) == Some(b))
                    .count();
                assert!(holders <= 1);
                if let Some(owner) = owner {
                    assert!(s.is_running(owner));
                }
            }
            // Running behaviors own all of their requirements.
            for &run in s.running() {
                let owned = s.ownership().filter(|(_, _, o)| *o == Some(run)).count();
                assert!(owned >= 1);
            }
        }
    }

    #[test]
    fn finished_behavior_releases_and_default_refills_same_tick() {
        let log = new_log();
        let mut b = SchedulerBuilder::default();
        let drive = b.resource("drive");
        let idle = b.default_behavior(drive, Probe::new("idle", &log).requiring(drive));
        let nudge = b.register(Probe::new("nudge", &log).requiring(drive).finishing_after(2));
        let mut s = b.build().unwrap();

        s.tick();
        s.schedule(nudge);
        drain(&log);
        s.tick();
        s.tick();
        assert_eq!(drain(&log), vec!["nudge:exec", "nudge:exec", "nudge:end(false)", "idle:init"]);
        assert_eq!(s.owner(drive), Some(idle));
        assert_eq!(s.state(nudge), Some(Lifecycle::Idle));
    }

    #[test]
    fn transient_behaviors_are_dropped_and_ids_never_reused() {
        let log = new_log();
        let mut s = SchedulerBuilder::default().build().unwrap();
        let first = s.schedule_new(Probe::new("once", &log).finishing_after(1)).unwrap();
        assert!(s.is_running(first));
        s.tick();
        assert_eq!(s.state(first), None);
        assert_eq!(s.behavior_count(), 0);

        let second = s.schedule_new(Probe::new("once", &log).finishing_after(1)).unwrap();
        assert!(second > first);
        assert_eq!(drain(&log), vec!["once:init", "once:exec", "once:end(false)", "once:init"]);
    }

    #[test]
    fn composite_holds_union_of_requirements() {
        use tc_behavior::BehaviorExt;

        let log = new_log();
        let mut b = SchedulerBuilder::default();
        let drive = b.resource("drive");
        let intake = b.resource("intake");
        let idle = b.default_behavior(drive, Probe::new("idle", &log).requiring(drive));
        let mut s = b.build().unwrap();
        s.tick();

        let seq = Probe::new("drive-up", &log)
            .requiring(drive)
            .finishing_after(1)
            .and_then(Probe::new("grab", &log).requiring(intake).finishing_after(1));
        let id = s.schedule_new(seq).unwrap();
        assert_eq!(s.owner(drive), Some(id));
        assert_eq!(s.owner(intake), Some(id));

        s.tick();
        s.tick();
        assert_eq!(s.state(id), None);
        s.tick();
        assert_eq!(s.owner(drive), Some(idle));
        assert_eq!(s.owner(intake), None);
    }

    #[test]
    fn cancel_and_cancel_all() {
        let log = new_log();
        let mut b = SchedulerBuilder::default();
        let drive = b.resource("drive");
        let idle = b.default_behavior(drive, Probe::new("idle", &log).requiring(drive));
        let spin = b.register(Probe::new("spin", &log));
        let mut s = b.build().unwrap();
        s.tick();
        s.schedule(spin);

        assert!(s.cancel(spin));
        assert!(!s.cancel(spin));
        s.cancel_all();
        assert!(!s.is_running(idle));
        assert_eq!(s.owner(drive), None);
        s.run_ticks(1, &mut NoopObserver);
        assert!(s.is_running(idle));
    }

    #[test]
    fn default_requires_only_its_own_resource() {
        let log = new_log();
        let mut b = SchedulerBuilder::default();
        let drive = b.resource("drive");
        let lights = b.resource("lights");
        b.default_behavior(drive, Probe::new("idle", &log).requiring(drive).requiring(lights));
        assert!(matches!(
            b.build(),
            Err(SchedError::DefaultRequiresOther { other, .. }) if other == lights
        ));
    }

    #[test]
    fn backfill_never_interrupts_a_non_default() {
        let log = new_log();
        let mut b = SchedulerBuilder::default();
        let drive = b.resource("drive");
        let lights = b.resource("lights");
        let idle = b.default_behavior(drive, Probe::new("idle", &log).requiring(drive));
        b.default_behavior(lights, Probe::new("glow", &log).requiring(lights));
        let blink = b.register(Probe::new("blink", &log).requiring(lights));
        let mut s = b.build().unwrap();

        s.tick();
        drain(&log);
        s.run_exclusively(Some(blink));
        s.tick();
        assert_eq!(drain(&log), vec!["glow:end(true)", "blink:init", "idle:exec", "blink:exec"]);
        assert!(s.is_running(blink));
        assert_eq!(s.owner(lights), Some(blink));
        assert_eq!(s.owner(drive), Some(idle));
    }

    #[test]
    fn deferred_body_cannot_reach_past_declared_requirements() {
        use tc_behavior::Deferred;

        let log = new_log();
        let inner = Rc::clone(&log);
        let mut b = SchedulerBuilder::default();
        let drive = b.resource("drive");
        let lights = b.resource("lights");
        let blink = b.default_behavior(lights, Probe::new("blink", &log).requiring(lights));
        let factory = BehaviorFactory::new("auto", move || Probe::new("autoBody", &inner).requiring(lights));
        let auto = b.register(Deferred::new(factory, [drive]));
        let mut s = b.build().unwrap();

        s.tick();
        drain(&log);
        s.run_exclusively(Some(auto));
        s.tick();
        assert_eq!(drain(&log), vec!["blink:exec"]);
        assert!(!s.is_running(auto));
        assert_eq!(s.owner(drive), None);
        assert_eq!(s.owner(lights), Some(blink));
    }

    #[test]
    fn unknown_ids_are_ignored() {
        let mut b = SchedulerBuilder::default();
        b.resource("drive");
        let mut s = b.build().unwrap();
        let ghost = BehaviorId(999);

        assert!(!s.schedule(ghost));
        assert!(!s.cancel(ghost));
        assert!(!s.unbind(TriggerId(7)));
        s.run_exclusively(Some(ghost));
        assert!(s.running().is_empty());
        assert_eq!(s.owner(ResourceId(42)), None);
        assert_eq!(s.resource_name(ResourceId(0)), Some("drive"));
        assert_eq!(s.behavior_name(ghost), None);
    }
}

// ── Requests and phases ───────────────────────────────────────────────────────

#[cfg(test)]
mod request_tests {
    use super::*;
    use crate::SchedulerBuilder;

    #[test]
    fn requests_apply_at_start_of_next_tick() {
        let log = new_log();
        let mut b = SchedulerBuilder::default();
        let follow = b.register(Probe::new("follow", &log));
        let lead = b.register(Probe::new("lead", &log).with_hook(move |n, ctx| {
            if n == 1 {
                ctx.start_registered(follow);
                ctx.cancel(ctx.id);
            }
        }));
        let mut s = b.build().unwrap();

        s.schedule(lead);
        s.tick();
        assert_eq!(s.pending_requests(), 2);
        assert!(!s.is_running(follow));
        assert!(s.is_running(lead));

        s.tick();
        assert_eq!(s.pending_requests(), 0);
        assert_eq!(
            drain(&log),
            vec!["lead:init", "lead:exec", "follow:init", "lead:end(true)", "follow:exec"]
        );
    }

    #[test]
    fn started_requests_build_transients() {
        let log = new_log();
        let mut b = SchedulerBuilder::default();
        let inner = Rc::clone(&log);
        let parent = b.register(
            Probe::new("parent", &log)
                .finishing_after(1)
                .with_hook(move |_, ctx| ctx.start(Probe::new("child", &inner).finishing_after(1))),
        );
        let mut s = b.build().unwrap();
        s.schedule(parent);
        s.tick();
        s.tick();
        assert_eq!(
            drain(&log),
            vec![
                "parent:init",
                "parent:exec",
                "parent:end(false)",
                "child:init",
                "child:exec",
                "child:end(false)",
            ]
        );
        assert_eq!(s.behavior_count(), 1);
    }

    #[test]
    fn run_exclusively_some_interrupts_only_conflicts() {
        let log = new_log();
        let mut b = SchedulerBuilder::default();
        let drive = b.resource("drive");
        let intake = b.resource("intake");
        let idle = b.default_behavior(drive, Probe::new("idle", &log).requiring(drive));
        let auto = b.register(Probe::new("auto", &log).requiring(drive));
        let mut s = b.build().unwrap();
        s.tick();
        let spin = s.schedule_new(Probe::new("spin", &log).requiring(intake)).unwrap();
        drain(&log);

        s.run_exclusively(Some(auto));
        assert_eq!(drain(&log), vec!["idle:end(true)", "auto:init"]);
        assert!(s.is_running(spin));

        s.run_exclusively(Some(auto));
        assert!(drain(&log).is_empty());
        assert!(s.is_running(auto));
        assert!(!s.is_running(idle));
    }

    #[test]
    fn run_exclusively_none_keeps_defaults() {
        let log = new_log();
        let mut b = SchedulerBuilder::default();
        let drive = b.resource("drive");
        let lights = b.resource("lights");
        let idle = b.default_behavior(drive, Probe::new("idle", &log).requiring(drive));
        let glow = b.default_behavior(lights, Probe::new("glow", &log).requiring(lights));
        let auto = b.register(Probe::new("auto", &log).requiring(drive));
        let mut s = b.build().unwrap();
        s.tick();
        s.run_exclusively(Some(auto));
        let spin = s.schedule_new(Probe::new("spin", &log)).unwrap();

        s.run_exclusively(None);
        assert!(!s.is_running(auto));
        assert_eq!(s.state(spin), None);
        assert!(s.is_running(glow));
        assert_eq!(s.owner(drive), None);

        s.tick();
        assert!(s.is_running(idle));
    }

    #[test]
    fn run_exclusively_can_be_requested_by_a_behavior() {
        let log = new_log();
        let mut b = SchedulerBuilder::default();
        let drive = b.resource("drive");
        let auto = b.register(Probe::new("auto", &log).requiring(drive));
        let kick = b.register(Probe::new("kick", &log).with_hook(move |_, ctx| {
            ctx.request(tc_behavior::Request::RunExclusively(Some(auto)));
        }));
        let mut s = b.build().unwrap();
        s.schedule(kick);
        s.tick();
        assert!(!s.is_running(auto));
        s.tick();
        assert!(s.is_running(auto));
    }
}

// ── Triggers and bindings ─────────────────────────────────────────────────────

#[cfg(test)]
mod binding_tests {
    use super::*;
    use crate::{Binding, CancelTarget, RefirePolicy, SchedError, SchedulerBuilder};
    use tc_trigger::{EdgePolicy, Trigger};

    #[test]
    fn trigger_fires_on_rising_edges_only() {
        let log = new_log();
        let mut b = SchedulerBuilder::default();
        let noop = b.register(Probe::new("noop", &log).finishing_after(1));
        let t = b.bind(Binding::start(
            Trigger::new("T", script(&[false, false, true, true, false, true])),
            noop,
        ));
        let mut s = b.build().unwrap();
        let mut rec = Recorder::default();
        s.run_ticks(6, &mut rec);

        let fired: Vec<u64> = rec.fired.iter().map(|(tick, _, _)| tick.0).collect();
        assert_eq!(fired, vec![3, 6]);
        assert!(rec.fired.iter().all(|&(_, id, tr)| id == t && tr == Transition::Rising));
    }

    /// Drive `drive` with default `idleDrive`; `T` starts `turboDrive` from a
    /// factory.  Condition sequence F,F,F,T,F,T fires on ticks 4 and 6.
    fn turbo_scenario(refire: RefirePolicy) -> (Vec<String>, Recorder, u32) {
        let log = new_log();
        let builds = Rc::new(Cell::new(0));
        let mut b = SchedulerBuilder::default();
        let drive = b.resource("drive");
        let idle = b.default_behavior(drive, Probe::new("idleDrive", &log).requiring(drive));
        b.bind(
            Binding::start(
                Trigger::new("T", script(&[false, false, false, true, false, true])),
                probe_factory("turboDrive", drive, &log, &builds),
            )
            .with_refire(refire),
        );
        let mut s = b.build().unwrap();
        let mut rec = Recorder::default();

        for _ in 0..3 {
            s.tick_with(&mut rec);
            assert_eq!(s.owner(drive), Some(idle));
        }
        s.tick_with(&mut rec);
        let turbo = s.owner(drive).unwrap();
        assert_ne!(turbo, idle);
        assert_eq!(s.behavior_name(turbo), Some("turboDrive"));
        s.tick_with(&mut rec);
        assert!(s.is_running(turbo));
        s.tick_with(&mut rec);
        assert!(!s.is_running(idle));

        let now_owner = s.owner(drive).unwrap();
        match refire {
            RefirePolicy::IgnoreWhileRunning => assert_eq!(now_owner, turbo),
            RefirePolicy::Restart => {
                assert_ne!(now_owner, turbo);
                assert_eq!(s.state(turbo), None);
            }
        }
        let log = drain(&log);
        (log, rec, builds.get())
    }

    #[test]
    fn turbo_scenario_ignore_while_running() {
        let (log, rec, builds) = turbo_scenario(RefirePolicy::IgnoreWhileRunning);
        assert_eq!(builds, 1);
        assert_eq!(
            log,
            vec![
                "idleDrive:init",
                "idleDrive:exec",
                "idleDrive:exec",
                "idleDrive:end(true)",
                "turboDrive:init",
                "turboDrive:exec",
                "turboDrive:exec",
                "turboDrive:exec",
            ]
        );
        assert_eq!(
            rec.events,
            vec![
                "T1 start idleDrive",
                "T4 fire 0",
                "T4 end idleDrive true",
                "T4 start turboDrive",
                "T6 fire 0",
            ]
        );
    }

    #[test]
    fn turbo_scenario_restart() {
        let (log, rec, builds) = turbo_scenario(RefirePolicy::Restart);
        assert_eq!(builds, 2);
        assert_eq!(
            log,
            vec![
                "idleDrive:init",
                "idleDrive:exec",
                "idleDrive:exec",
                "idleDrive:end(true)",
                "turboDrive:init",
                "turboDrive:exec",
                "turboDrive:exec",
                "turboDrive:end(true)",
                "turboDrive:init",
                "turboDrive:exec",
            ]
        );
        assert_eq!(
            &rec.events[4..],
            &["T6 fire 0", "T6 end turboDrive true", "T6 start turboDrive"]
        );
    }

    #[test]
    fn restart_of_registered_target_reinitialises() {
        let log = new_log();
        let mut b = SchedulerBuilder::default();
        let spin = b.register(Probe::new("spin", &log));
        b.bind(Binding::start(Trigger::new("T", script(&[true, false, true])), spin).with_refire(RefirePolicy::Restart));
        let mut s = b.build().unwrap();
        s.run_ticks(3, &mut crate::NoopObserver);
        assert_eq!(
            drain(&log),
            vec!["spin:init", "spin:exec", "spin:exec", "spin:end(true)", "spin:init", "spin:exec"]
        );
    }

    #[test]
    fn toggle_starts_then_stops() {
        let log = new_log();
        let builds = Rc::new(Cell::new(0));
        let mut b = SchedulerBuilder::default();
        let intake = b.resource("intake");
        let t = b.bind(Binding::toggle(
            Trigger::new("toggle", script(&[true, false, true, false, true])),
            probe_factory("roll", intake, &log, &builds),
        ));
        let mut s = b.build().unwrap();

        s.tick();
        let first = s.binding(t).and_then(|b| b.last_started()).unwrap();
        assert!(s.is_running(first));
        s.tick();
        s.tick();
        assert_eq!(s.owner(intake), None);
        s.tick();
        s.tick();
        let second = s.owner(intake).unwrap();
        assert_ne!(first, second);
        assert_eq!(builds.get(), 2);
    }

    #[test]
    fn cancel_on_release_stops_what_press_started() {
        let log = new_log();
        let builds = Rc::new(Cell::new(0));
        let button = Rc::new(Cell::new(false));
        let (press, release) = (Rc::clone(&button), Rc::clone(&button));

        let mut b = SchedulerBuilder::default();
        let shooter = b.resource("shooter");
        let pressed = b.bind(Binding::start(
            Trigger::new("shoot", move || press.get()),
            probe_factory("shoot", shooter, &log, &builds),
        ));
        b.bind(Binding::cancel(
            Trigger::on_falling("shoot released", move || release.get()),
            CancelTarget::StartedBy(pressed),
        ));
        let mut s = b.build().unwrap();

        s.tick();
        button.set(true);
        s.tick();
        s.tick();
        assert!(s.owner(shooter).is_some());
        button.set(false);
        s.tick();
        assert_eq!(s.owner(shooter), None);
        assert_eq!(
            drain(&log),
            vec!["shoot:init", "shoot:exec", "shoot:exec", "shoot:end(true)"]
        );
    }

    #[test]
    fn started_by_leaves_a_run_started_elsewhere() {
        let log = new_log();
        let button = Rc::new(Cell::new(false));
        let (press, release) = (Rc::clone(&button), Rc::clone(&button));

        let mut b = SchedulerBuilder::default();
        let drive = b.resource("drive");
        let aim = b.register(Probe::new("aim", &log).requiring(drive));
        let pressed = b.bind(Binding::start(Trigger::new("aim", move || press.get()), aim));
        b.bind(Binding::cancel(
            Trigger::on_falling("aim released", move || release.get()),
            CancelTarget::StartedBy(pressed),
        ));
        let mut s = b.build().unwrap();

        s.tick();
        button.set(true);
        s.tick();
        assert_eq!(s.binding(pressed).and_then(|b| b.last_started()), Some(aim));

        // The binding's run ends; the host starts the same behavior again.
        assert!(s.cancel(aim));
        assert_eq!(s.binding(pressed).and_then(|b| b.last_started()), None);
        s.run_exclusively(Some(aim));

        button.set(false);
        s.tick();
        assert!(s.is_running(aim));
        assert_eq!(s.owner(drive), Some(aim));
    }

    #[test]
    fn while_high_with_ignore_keeps_one_instance() {
        let log = new_log();
        let builds = Rc::new(Cell::new(0));
        let mut b = SchedulerBuilder::default();
        let drive = b.resource("drive");
        b.bind(Binding::start(
            Trigger::new("held", script(&[true, true, true])).with_policy(EdgePolicy::WhileHigh),
            probe_factory("creep", drive, &log, &builds),
        ));
        let mut s = b.build().unwrap();
        let mut rec = Recorder::default();
        s.run_ticks(3, &mut rec);
        assert_eq!(rec.fired.len(), 3);
        assert_eq!(builds.get(), 1);
    }

    #[test]
    fn bind_and_unbind_at_runtime() {
        let log = new_log();
        let builds = Rc::new(Cell::new(0));
        let mut b = SchedulerBuilder::default();
        let drive = b.resource("drive");
        let mut s = b.build().unwrap();

        let t = s.bind(
            Binding::start(
                Trigger::new("late", script(&[true, false, true])),
                probe_factory("late", drive, &log, &builds),
            )
            .with_refire(RefirePolicy::Restart),
        );
        assert_eq!(s.binding_count(), 1);
        s.tick();
        let started = s.owner(drive).unwrap();
        assert!(s.unbind(t));
        s.tick();
        s.tick();
        assert_eq!(s.owner(drive), Some(started));
        assert_eq!(builds.get(), 1);
    }

    #[test]
    fn builder_rejects_bad_compositions() {
        let log = new_log();

        let mut b = SchedulerBuilder::default();
        b.resource("drive");
        b.resource("drive");
        assert!(matches!(b.build(), Err(SchedError::DuplicateResource(ref n)) if n == "drive"));

        let mut b = SchedulerBuilder::default();
        let drive = b.resource("drive");
        b.default_behavior(drive, Probe::new("idle", &log));
        assert!(matches!(b.build(), Err(SchedError::DefaultMissingRequirement { .. })));

        let mut b = SchedulerBuilder::default();
        let drive = b.resource("drive");
        b.default_behavior(drive, Probe::new("a", &log).requiring(drive));
        b.default_behavior(drive, Probe::new("b", &log).requiring(drive));
        assert!(matches!(b.build(), Err(SchedError::DefaultAlreadySet(_))));

        let mut b = SchedulerBuilder::default();
        b.default_behavior(ResourceId(3), Probe::new("idle", &log).requiring(ResourceId(3)));
        assert!(matches!(b.build(), Err(SchedError::UnknownResource(ResourceId(3)))));

        let mut b = SchedulerBuilder::default();
        b.register(Probe::new("stray", &log).requiring(ResourceId(0)));
        assert!(matches!(b.build(), Err(SchedError::UnknownResource(_))));

        let mut b = SchedulerBuilder::default();
        b.bind(Binding::start(Trigger::new("T", || false), BehaviorId(5)));
        assert!(matches!(b.build(), Err(SchedError::UnknownBehavior { .. })));

        let mut b = SchedulerBuilder::default();
        b.bind(Binding::cancel(Trigger::new("T", || false), CancelTarget::StartedBy(TriggerId(4))));
        assert!(matches!(b.build(), Err(SchedError::UnknownTrigger { .. })));

        let config = tc_core::LoopConfig { period_ms: 0, ..Default::default() };
        assert!(matches!(
            SchedulerBuilder::new(config).build(),
            Err(SchedError::Core(_))
        ));
    }
}
