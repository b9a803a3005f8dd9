//! Decorators that wrap a single behavior.
//!
//! `Until` and `Timeout` add an extra stop condition on top of the inner
//! completion predicate.  When the extra condition is what stops the
//! behavior, the inner behavior is ended with `interrupted = true`.

use crate::{Behavior, BehaviorContext, Requirements};

// ── Until ─────────────────────────────────────────────────────────────────────

/// Stops `inner` as soon as `condition` returns `true` (checked after each
/// execute).
pub struct Until<B: Behavior> {
    inner:     B,
    condition: Box<dyn FnMut() -> bool>,
    stopped:   bool,
}

impl<B: Behavior> Until<B> {
    pub fn new(inner: B, condition: impl FnMut() -> bool + 'static) -> Self {
        Self { inner, condition: Box::new(condition), stopped: false }
    }
}

impl<B: Behavior> Behavior for Until<B> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn requirements(&self) -> Requirements {
        self.inner.requirements()
    }

    fn initialize(&mut self, ctx: &mut BehaviorContext<'_>) {
        self.stopped = false;
        self.inner.initialize(ctx);
    }

    fn execute(&mut self, ctx: &mut BehaviorContext<'_>) {
        self.inner.execute(ctx);
        self.stopped = (self.condition)();
    }

    fn is_finished(&self) -> bool {
        self.stopped || self.inner.is_finished()
    }

    fn end(&mut self, interrupted: bool) {
        let cut_short = self.stopped && !self.inner.is_finished();
        self.inner.end(interrupted || cut_short);
    }
}

// ── Timeout ───────────────────────────────────────────────────────────────────

/// Stops `inner` after it has executed `ticks` times.
///
/// This is the layer that turns a behavior which never finishes into one
/// that is bounded; the scheduler itself has no timeout.
pub struct Timeout<B: Behavior> {
    inner:   B,
    ticks:   u64,
    elapsed: u64,
}

impl<B: Behavior> Timeout<B> {
    pub fn new(inner: B, ticks: u64) -> Self {
        Self { inner, ticks, elapsed: 0 }
    }

    fn timed_out(&self) -> bool {
        self.elapsed >= self.ticks
    }
}

impl<B: Behavior> Behavior for Timeout<B> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn requirements(&self) -> Requirements {
        self.inner.requirements()
    }

    fn initialize(&mut self, ctx: &mut BehaviorContext<'_>) {
        self.elapsed = 0;
        self.inner.initialize(ctx);
    }

    fn execute(&mut self, ctx: &mut BehaviorContext<'_>) {
        self.inner.execute(ctx);
        self.elapsed += 1;
    }

    fn is_finished(&self) -> bool {
        self.timed_out() || self.inner.is_finished()
    }

    fn end(&mut self, interrupted: bool) {
        let cut_short = self.timed_out() && !self.inner.is_finished();
        self.inner.end(interrupted || cut_short);
    }
}

// ── Named ─────────────────────────────────────────────────────────────────────

/// Overrides the name of `inner`.
pub struct Named<B: Behavior> {
    inner: B,
    name:  String,
}

impl<B: Behavior> Named<B> {
    pub fn new(inner: B, name: impl Into<String>) -> Self {
        Self { inner, name: name.into() }
    }
}

impl<B: Behavior> Behavior for Named<B> {
    fn name(&self) -> &str {
        &self.name
    }

    fn requirements(&self) -> Requirements {
        self.inner.requirements()
    }

    fn initialize(&mut self, ctx: &mut BehaviorContext<'_>) {
        self.inner.initialize(ctx);
    }

    fn execute(&mut self, ctx: &mut BehaviorContext<'_>) {
        self.inner.execute(ctx);
    }

    fn is_finished(&self) -> bool {
        self.inner.is_finished()
    }

    fn end(&mut self, interrupted: bool) {
        self.inner.end(interrupted);
    }
}
