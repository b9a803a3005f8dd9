//! Operator input: a gamepad snapshot refreshed by the host before each tick.

use std::cell::RefCell;
use std::rc::Rc;

/// One sample of the driver's controller.  Stick Y is positive forward.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct GamepadState {
    pub left_x:  f64,
    pub left_y:  f64,
    pub right_x: f64,
    pub right_y: f64,
    /// Right bumper.
    pub boost:   bool,
    /// Left bumper.
    pub slow:    bool,
    /// A button.
    pub intake:  bool,
    /// B button.
    pub shoot:   bool,
    /// Back button: abort whatever the buttons started.
    pub cancel:  bool,
}

/// Shared, host-updated view of the operator controls and robot state.
///
/// Trigger conditions and the drive behavior hold clones; the host writes a
/// new snapshot once per tick.
#[derive(Clone, Default)]
pub struct OperatorInput {
    pad:    Rc<RefCell<GamepadState>>,
    active: Rc<RefCell<bool>>,
}

impl OperatorInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&self, state: GamepadState) {
        *self.pad.borrow_mut() = state;
    }

    pub fn pad(&self) -> GamepadState {
        *self.pad.borrow()
    }

    /// Whether the robot is enabled (autonomous or teleop).
    pub fn set_system_active(&self, active: bool) {
        *self.active.borrow_mut() = active;
    }

    pub fn is_system_active(&self) -> bool {
        *self.active.borrow()
    }

    /// A trigger condition reading one button.
    pub fn button(&self, read: fn(&GamepadState) -> bool) -> impl FnMut() -> bool + 'static {
        let pad = Rc::clone(&self.pad);
        move || read(&pad.borrow())
    }

    /// A trigger condition reading the system-active flag.
    pub fn system_active(&self) -> impl FnMut() -> bool + 'static {
        let active = Rc::clone(&self.active);
        move || *active.borrow()
    }
}
