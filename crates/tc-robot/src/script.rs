//! Scripted operator input: what the driver holds on each tick, plus
//! dashboard selections made mid-run.

use crate::container::DRIVE_MODE_SELECTOR;
use crate::operator::GamepadState;

#[derive(Clone, Debug)]
struct Segment {
    from:  u64,
    until: u64,
    state: GamepadState,
}

/// A selection the dashboard makes at a given tick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selection {
    pub tick:     u64,
    pub selector: String,
    pub label:    String,
}

/// A gamepad timeline over host ticks.
///
/// Segments cover `[from, until)`; where they overlap the one added last
/// wins.  Ticks outside every segment read as a released gamepad.
#[derive(Clone, Debug, Default)]
pub struct InputScript {
    segments:   Vec<Segment>,
    selections: Vec<Selection>,
}

impl InputScript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hold `state` on ticks `from..until`.
    pub fn hold(mut self, from: u64, until: u64, state: GamepadState) -> Self {
        self.segments.push(Segment { from, until, state });
        self
    }

    /// Select `label` on `selector` just before `tick` runs.
    pub fn select_at(mut self, tick: u64, selector: impl Into<String>, label: impl Into<String>) -> Self {
        self.selections.push(Selection { tick, selector: selector.into(), label: label.into() });
        self
    }

    pub fn state_at(&self, tick: u64) -> GamepadState {
        self.segments
            .iter()
            .rev()
            .find(|s| (s.from..s.until).contains(&tick))
            .map(|s| s.state)
            .unwrap_or_default()
    }

    pub fn selections_at(&self, tick: u64) -> impl Iterator<Item = &Selection> {
        self.selections.iter().filter(move |s| s.tick == tick)
    }

    /// Tick of the last scripted event, if any.
    pub fn last_tick(&self) -> Option<u64> {
        let segments = self.segments.iter().map(|s| s.until.saturating_sub(1));
        let selections = self.selections.iter().map(|s| s.tick);
        segments.chain(selections).max()
    }

    /// A short teleop drill starting at `teleop_start`: drive, intake while
    /// driving, shoot, then pick arcade on the dashboard.  The running default
    /// drive keeps tank mode until it is next restarted.
    pub fn demo(teleop_start: u64) -> Self {
        let t = teleop_start;
        let forward = GamepadState { left_y: 0.5, right_y: 0.5, ..Default::default() };
        let intaking = GamepadState { intake: true, ..forward };
        let shooting = GamepadState { shoot: true, ..Default::default() };
        Self::new()
            .hold(t, t + 100, forward)
            .hold(t + 100, t + 150, intaking)
            .hold(t + 200, t + 205, shooting)
            .select_at(t + 260, DRIVE_MODE_SELECTOR, "Dual Stick Arcade")
            .hold(t + 300, t + 400, forward)
    }
}
