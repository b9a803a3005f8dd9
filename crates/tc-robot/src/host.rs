//! The host loop: phase control, input replay and status reporting.
//!
//! ```text
//!  tick:  1 ........ D | D+1 ........ D+A | D+A+1 ..........
//!  phase: Disabled     | Autonomous       | Teleop
//!         run nothing  | run autonomous   | run nothing (defaults refill)
//! ```
//!
//! `D` is `RobotConfig::disabled_ticks`, `A` is `LoopConfig::autonomous_ticks`.

use std::fmt;
use std::time::{Duration, Instant};

use tc_core::{BehaviorId, Tick, TriggerId};
use tc_sched::SchedulerObserver;
use tc_trigger::Transition;

use crate::config::RobotConfig;
use crate::container::RobotContainer;
use crate::script::InputScript;

/// Robot operating phase.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    Disabled,
    Autonomous,
    Teleop,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Phase::Disabled => "disabled",
            Phase::Autonomous => "autonomous",
            Phase::Teleop => "teleop",
        })
    }
}

/// Phase boundaries in host ticks.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PhasePlan {
    pub disabled_ticks:   u64,
    pub autonomous_ticks: u64,
}

impl PhasePlan {
    pub fn from_config(config: &RobotConfig) -> Self {
        Self {
            disabled_ticks:   config.disabled_ticks,
            autonomous_ticks: config.loop_config.autonomous_ticks,
        }
    }

    pub fn phase_at(&self, tick: u64) -> Phase {
        if tick <= self.disabled_ticks {
            Phase::Disabled
        } else if tick <= self.disabled_ticks + self.autonomous_ticks {
            Phase::Autonomous
        } else {
            Phase::Teleop
        }
    }

    /// First tick of the teleop phase.
    pub fn teleop_start(&self) -> u64 {
        self.disabled_ticks + self.autonomous_ticks + 1
    }
}

// ── Run statistics ────────────────────────────────────────────────────────────

/// Counts scheduler events over a run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunStats {
    pub ticks:       u64,
    pub fired:       u64,
    pub started:     u64,
    pub completed:   u64,
    pub interrupted: u64,
    pub last_tick:   Tick,
}

impl SchedulerObserver for RunStats {
    fn on_tick_end(&mut self, tick: Tick, _running: usize) {
        self.ticks += 1;
        self.last_tick = tick;
    }

    fn on_trigger_fired(&mut self, _tick: Tick, _trigger: TriggerId, _transition: Transition) {
        self.fired += 1;
    }

    fn on_behavior_start(&mut self, _tick: Tick, _id: BehaviorId, _name: &str) {
        self.started += 1;
    }

    fn on_behavior_end(&mut self, _tick: Tick, _id: BehaviorId, _name: &str, interrupted: bool) {
        if interrupted {
            self.interrupted += 1;
        } else {
            self.completed += 1;
        }
    }
}

// ── Host ──────────────────────────────────────────────────────────────────────

/// Drives a [`RobotContainer`] one period at a time.
pub struct Host {
    container:       RobotContainer,
    plan:            PhasePlan,
    script:          InputScript,
    phase:           Phase,
    period:          Duration,
    status_interval: u64,
    realtime:        bool,
}

impl Host {
    /// A host starting in the disabled phase.
    pub fn new(container: RobotContainer, config: &RobotConfig, script: InputScript) -> Self {
        Self {
            container,
            plan: PhasePlan::from_config(config),
            script,
            phase: Phase::Disabled,
            period: Duration::from_millis(u64::from(config.loop_config.period_ms)),
            status_interval: config.loop_config.status_interval_ticks,
            realtime: false,
        }
    }

    /// Sleep out the remainder of each period instead of running flat out.
    pub fn realtime(mut self, realtime: bool) -> Self {
        self.realtime = realtime;
        self
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn plan(&self) -> PhasePlan {
        self.plan
    }

    pub fn container(&self) -> &RobotContainer {
        &self.container
    }

    pub fn container_mut(&mut self) -> &mut RobotContainer {
        &mut self.container
    }

    /// Advance one tick: apply scripted selections, switch phase if due,
    /// replay scripted input, tick the scheduler.
    pub fn step<O: SchedulerObserver>(&mut self, observer: &mut O) -> Tick {
        let next = self.container.scheduler().current_tick().0 + 1;

        for selection in self.script.selections_at(next) {
            if let Err(e) = self.container.selectors().select(&selection.selector, &selection.label) {
                tracing::warn!(tick = next, error = %e, "scripted selection rejected");
            }
        }

        let phase = self.plan.phase_at(next);
        if phase != self.phase {
            self.enter(phase, next);
        }
        self.container.input().update(self.script.state_at(next));

        let tick = self.container.scheduler_mut().tick_with(observer);
        if self.status_interval > 0 && tick.0 % self.status_interval == 0 {
            self.log_status();
        }
        tick
    }

    /// Run `ticks` ticks and return what happened.
    pub fn run(&mut self, ticks: u64) -> RunStats {
        let mut stats = RunStats::default();
        let mut deadline = Instant::now();
        for _ in 0..ticks {
            self.step(&mut stats);
            if self.realtime {
                deadline += self.period;
                let now = Instant::now();
                if deadline > now {
                    std::thread::sleep(deadline - now);
                } else {
                    deadline = now;
                }
            }
        }
        stats
    }

    /// Phase transition, performed just before tick `tick` runs.
    fn enter(&mut self, phase: Phase, tick: u64) {
        tracing::info!(tick, from = %self.phase, to = %phase, "phase change");
        let input = self.container.input().clone();
        match phase {
            Phase::Disabled => {
                input.set_system_active(false);
                self.container.scheduler_mut().run_exclusively(None);
            }
            Phase::Autonomous => {
                input.set_system_active(true);
                let routine = self.container.autonomous_behavior();
                self.container.scheduler_mut().run_exclusively(Some(routine));
            }
            Phase::Teleop => {
                input.set_system_active(true);
                self.container.scheduler_mut().run_exclusively(None);
            }
        }
        self.phase = phase;
    }

    fn log_status(&self) {
        let scheduler = self.container.scheduler();
        let owners = scheduler
            .ownership()
            .map(|(_, resource, owner)| {
                let name = owner.and_then(|id| scheduler.behavior_name(id)).unwrap_or("-");
                format!("{resource}={name}")
            })
            .collect::<Vec<_>>()
            .join(" ");
        let (left, right) = self.container.subsystems().drive.borrow().speeds();
        tracing::info!(
            clock = %scheduler.clock(),
            phase = %self.phase,
            running = scheduler.running().len(),
            %owners,
            left = format_args!("{left:.2}"),
            right = format_args!("{right:.2}"),
            "status"
        );
    }
}
