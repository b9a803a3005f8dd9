//! Edge detection over a polled boolean.

/// When a trigger fires.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum EdgePolicy {
    /// `false → true`.
    #[default]
    Rising,
    /// `true → false`.
    Falling,
    /// Either edge.
    Changed,
    /// Every poll the condition is `true`.
    WhileHigh,
    /// Every poll the condition is `false`.
    WhileLow,
}

/// What the detector saw on a firing poll.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Transition {
    Rising,
    Falling,
    High,
    Low,
}

/// One bit of history plus a policy.
///
/// `previous` starts `false`, so a condition that is already `true` on the
/// first poll counts as a rising edge.
#[derive(Clone, Debug, Default)]
pub struct EdgeDetector {
    policy:   EdgePolicy,
    previous: bool,
}

impl EdgeDetector {
    pub fn new(policy: EdgePolicy) -> Self {
        Self { policy, previous: false }
    }

    pub fn policy(&self) -> EdgePolicy {
        self.policy
    }

    /// Value seen on the most recent poll (`false` before the first).
    pub fn previous(&self) -> bool {
        self.previous
    }

    /// Feed this poll's value.  `previous` is updated whether or not the
    /// detector fires.
    pub fn poll(&mut self, current: bool) -> Option<Transition> {
        let previous = std::mem::replace(&mut self.previous, current);
        match self.policy {
            EdgePolicy::Rising if current && !previous => Some(Transition::Rising),
            EdgePolicy::Falling if !current && previous => Some(Transition::Falling),
            EdgePolicy::Changed if current != previous => Some(if current {
                Transition::Rising
            } else {
                Transition::Falling
            }),
            EdgePolicy::WhileHigh if current => Some(Transition::High),
            EdgePolicy::WhileLow if !current => Some(Transition::Low),
            _ => None,
        }
    }

    /// Forget history; the next poll compares against `false`.
    pub fn reset(&mut self) {
        self.previous = false;
    }
}
