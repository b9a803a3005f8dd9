//! A no-op behavior — requires nothing and finishes immediately.

use crate::Behavior;

/// A [`Behavior`] that does nothing and reports finished on its first check.
///
/// Stands in for "run nothing" wherever a behavior value is required, e.g.
/// the `DoNothing` autonomous pattern.
pub struct NoopBehavior;

impl Behavior for NoopBehavior {
    fn name(&self) -> &str {
        "noop"
    }

    fn is_finished(&self) -> bool {
        true
    }
}
