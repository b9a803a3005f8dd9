//! Control-loop time model.
//!
//! # Design
//!
//! Time is a monotonically increasing `Tick` counter advanced once per
//! scheduler period.  The mapping to wall-clock time is held in `LoopClock`:
//!
//!   elapsed_ms = tick * period_ms
//!
//! Integer ticks keep all timing arithmetic exact.  Behaviors that need a
//! duration express it in ticks.
//!
//! The default period is 20 ms (50 Hz), the usual cadence of a robot
//! controller's main loop.

use std::fmt;

use crate::{CoreError, CoreResult};

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute tick counter.  Tick 0 is "before the first tick"; the first
/// call to `Scheduler::tick` processes tick 1.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── LoopClock ─────────────────────────────────────────────────────────────────

/// Converts between tick counts and elapsed loop time.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LoopClock {
    /// Milliseconds one tick represents.  Default: 20.
    pub period_ms: u32,
    /// The current tick — advanced by `LoopClock::advance()` each period.
    pub current_tick: Tick,
}

impl LoopClock {
    pub fn new(period_ms: u32) -> Self {
        Self { period_ms, current_tick: Tick::ZERO }
    }

    /// Advance the clock by one tick and return the new tick.
    #[inline]
    pub fn advance(&mut self) -> Tick {
        self.current_tick = Tick(self.current_tick.0 + 1);
        self.current_tick
    }

    /// Elapsed loop time since tick 0, in milliseconds.
    #[inline]
    pub fn elapsed_ms(&self) -> u64 {
        self.current_tick.0 * self.period_ms as u64
    }
}

impl fmt::Display for LoopClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ms = self.elapsed_ms();
        write!(f, "{} ({}.{:03} s)", self.current_tick, ms / 1_000, ms % 1_000)
    }
}

// ── LoopConfig ────────────────────────────────────────────────────────────────

/// Host loop configuration.
///
/// Typically loaded from a JSON file by the host binary and passed to the
/// scheduler and phase controller.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LoopConfig {
    /// Milliseconds between ticks.  Must be non-zero.
    pub period_ms: u32,

    /// Total ticks for a bounded run.  `None` runs until stopped.
    pub total_ticks: Option<u64>,

    /// Log a status line every N ticks.  0 disables status lines.
    pub status_interval_ticks: u64,

    /// Ticks spent in the autonomous phase before switching to teleop.
    pub autonomous_ticks: u64,
}

impl LoopConfig {
    pub const DEFAULT_PERIOD_MS: u32 = 20;

    /// Reject configurations the loop cannot run with.
    pub fn validate(&self) -> CoreResult<()> {
        if self.period_ms == 0 {
            return Err(CoreError::Config("period_ms must be greater than zero".into()));
        }
        if let Some(total) = self.total_ticks
            && total < self.autonomous_ticks
        {
            return Err(CoreError::Config(format!(
                "total_ticks ({total}) is shorter than autonomous_ticks ({})",
                self.autonomous_ticks
            )));
        }
        Ok(())
    }

    /// The tick at which a bounded run ends (inclusive), if any.
    #[inline]
    pub fn end_tick(&self) -> Option<Tick> {
        self.total_ticks.map(Tick)
    }

    /// Construct a `LoopClock` pre-configured for this run.
    pub fn make_clock(&self) -> LoopClock {
        LoopClock::new(self.period_ms)
    }
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            period_ms:             Self::DEFAULT_PERIOD_MS,
            total_ticks:           None,
            status_interval_ticks: 50,
            autonomous_ticks:      750, // 15 s at 50 Hz
        }
    }
}
