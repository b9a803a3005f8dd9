//! `Condition` — a boolean sampled once per poll.
//!
//! Any `FnMut() -> bool` closure is a condition, so operator inputs are bound
//! by capturing whatever snapshot the host refreshes before each tick.
//! Conditions compose with [`ConditionExt`]:
//!
//! ```rust
//! use tc_trigger::{Condition, ConditionExt};
//!
//! let mut armed = (|| true).and(|| false).negate();
//! assert!(armed.evaluate());
//! ```

// ── Trait ─────────────────────────────────────────────────────────────────────

/// A boolean input polled by a [`Trigger`][crate::Trigger].
///
/// # Contract
///
/// - Called exactly once per poll.
/// - Must not block; stateful conditions (see [`Debounce`]) rely on being
///   evaluated every poll.
pub trait Condition: 'static {
    fn evaluate(&mut self) -> bool;
}

impl<F: FnMut() -> bool + 'static> Condition for F {
    #[inline]
    fn evaluate(&mut self) -> bool {
        self()
    }
}

// ── Combinators ───────────────────────────────────────────────────────────────

/// Both conditions hold.  Both sides are evaluated on every poll.
pub struct And<A: Condition, B: Condition> {
    left:  A,
    right: B,
}

impl<A: Condition, B: Condition> Condition for And<A, B> {
    fn evaluate(&mut self) -> bool {
        let l = self.left.evaluate();
        let r = self.right.evaluate();
        l && r
    }
}

/// Either condition holds.  Both sides are evaluated on every poll.
pub struct Or<A: Condition, B: Condition> {
    left:  A,
    right: B,
}

impl<A: Condition, B: Condition> Condition for Or<A, B> {
    fn evaluate(&mut self) -> bool {
        let l = self.left.evaluate();
        let r = self.right.evaluate();
        l || r
    }
}

pub struct Not<C: Condition> {
    inner: C,
}

impl<C: Condition> Condition for Not<C> {
    fn evaluate(&mut self) -> bool {
        !self.inner.evaluate()
    }
}

/// Output changes only after the raw input has held its new value for
/// `ticks` consecutive polls.  Starts `false`.
pub struct Debounce<C: Condition> {
    inner:  C,
    ticks:  u32,
    stable: bool,
    streak: u32,
}

impl<C: Condition> Condition for Debounce<C> {
    fn evaluate(&mut self) -> bool {
        let raw = self.inner.evaluate();
        if raw == self.stable {
            self.streak = 0;
        } else {
            self.streak += 1;
            if self.streak >= self.ticks {
                self.stable = raw;
                self.streak = 0;
            }
        }
        self.stable
    }
}

/// Extension trait that adds the combinators to every `Condition`.
pub trait ConditionExt: Condition + Sized {
    fn and<B: Condition>(self, other: B) -> And<Self, B> {
        And { left: self, right: other }
    }

    fn or<B: Condition>(self, other: B) -> Or<Self, B> {
        Or { left: self, right: other }
    }

    fn negate(self) -> Not<Self> {
        Not { inner: self }
    }

    /// `ticks` of 0 or 1 passes changes through on the poll they appear.
    fn debounce(self, ticks: u32) -> Debounce<Self> {
        Debounce { inner: self, ticks, stable: false, streak: 0 }
    }
}

impl<C: Condition + Sized> ConditionExt for C {}
