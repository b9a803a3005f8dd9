//! `Trigger` — a named condition with its edge detector.

use std::fmt;

use crate::{Condition, EdgeDetector, EdgePolicy, Transition};

pub struct Trigger {
    name:      String,
    condition: Box<dyn Condition>,
    detector:  EdgeDetector,
}

impl Trigger {
    /// Rising-edge trigger over `condition`.
    pub fn new(name: impl Into<String>, condition: impl Condition) -> Self {
        Self {
            name:      name.into(),
            condition: Box::new(condition),
            detector:  EdgeDetector::new(EdgePolicy::Rising),
        }
    }

    pub fn on_falling(name: impl Into<String>, condition: impl Condition) -> Self {
        Self::new(name, condition).with_policy(EdgePolicy::Falling)
    }

    pub fn while_high(name: impl Into<String>, condition: impl Condition) -> Self {
        Self::new(name, condition).with_policy(EdgePolicy::WhileHigh)
    }

    pub fn with_policy(mut self, policy: EdgePolicy) -> Self {
        self.detector = EdgeDetector::new(policy);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn policy(&self) -> EdgePolicy {
        self.detector.policy()
    }

    /// Evaluate the condition once and report whether the trigger fires.
    pub fn poll(&mut self) -> Option<Transition> {
        let value = self.condition.evaluate();
        let fired = self.detector.poll(value);
        tracing::trace!(trigger = %self.name, value, ?fired, "trigger polled");
        fired
    }
}

impl fmt::Debug for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Trigger")
            .field("name", &self.name)
            .field("detector", &self.detector)
            .finish_non_exhaustive()
    }
}
