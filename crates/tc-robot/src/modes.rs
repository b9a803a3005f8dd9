//! Selectable modes and the drive math they imply.

use std::fmt;

/// How operator sticks map to wheel outputs.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DriveMode {
    /// Left stick Y drives the left side, right stick Y the right side.
    Tank,
    /// Left stick Y is speed, right stick X is turn.
    DualStickArcade,
    /// Left stick Y is speed, left stick X is turn.
    SingleStickArcade,
}

/// The routine run during the autonomous phase.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AutoPattern {
    DoNothing,
    DriveForward,
    ThreeNote,
}

impl fmt::Display for DriveMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DriveMode::Tank => "Tank",
            DriveMode::DualStickArcade => "Dual Stick Arcade",
            DriveMode::SingleStickArcade => "Single Stick Arcade",
        })
    }
}

impl fmt::Display for AutoPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AutoPattern::DoNothing => "Do Nothing",
            AutoPattern::DriveForward => "Drive Forward",
            AutoPattern::ThreeNote => "Three Note",
        })
    }
}

// ── Drive math ────────────────────────────────────────────────────────────────

/// Zero inputs inside `±deadband`, rescale the rest to keep full range.
pub fn apply_deadband(value: f64, deadband: f64) -> f64 {
    if value.abs() < deadband {
        0.0
    } else {
        value.signum() * (value.abs() - deadband) / (1.0 - deadband)
    }
}

/// Speed/turn to `(left, right)`, scaled down together if either side
/// would exceed 1.
pub fn arcade(speed: f64, turn: f64) -> (f64, f64) {
    let (left, right) = (speed + turn, speed - turn);
    let max = left.abs().max(right.abs());
    if max > 1.0 {
        (left / max, right / max)
    } else {
        (left, right)
    }
}

pub fn tank(left: f64, right: f64) -> (f64, f64) {
    (left.clamp(-1.0, 1.0), right.clamp(-1.0, 1.0))
}
