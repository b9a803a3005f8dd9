//! `BehaviorFactory` — a reusable recipe for fresh behavior instances.
//!
//! Trigger bindings hold factories instead of behavior values so that every
//! fire can construct a new instance.  Anything the recipe reads (a selector,
//! a shared subsystem handle) is captured explicitly when the factory is
//! created and resolved when [`BehaviorFactory::build`] runs — never later.

use std::fmt;

use tc_core::ResourceId;

use crate::{Behavior, BehaviorContext, Requirements};

/// A named closure producing boxed behaviors.
pub struct BehaviorFactory {
    name:  String,
    build: Box<dyn FnMut() -> Box<dyn Behavior>>,
    built: u64,
}

impl BehaviorFactory {
    pub fn new<B, F>(name: impl Into<String>, mut build: F) -> Self
    where
        B: Behavior,
        F: FnMut() -> B + 'static,
    {
        Self {
            name:  name.into(),
            build: Box::new(move || Box::new(build()) as Box<dyn Behavior>),
            built: 0,
        }
    }

    /// Like [`new`][Self::new] for closures that already return a box, e.g.
    /// when the concrete type depends on a selector value.
    pub fn boxed(name: impl Into<String>, build: impl FnMut() -> Box<dyn Behavior> + 'static) -> Self {
        Self { name: name.into(), build: Box::new(build), built: 0 }
    }

    /// Construct a fresh instance.
    pub fn build(&mut self) -> Box<dyn Behavior> {
        self.built += 1;
        (self.build)()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// How many instances this factory has produced.
    pub fn built_count(&self) -> u64 {
        self.built
    }
}

impl fmt::Debug for BehaviorFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BehaviorFactory")
            .field("name", &self.name)
            .field("built", &self.built)
            .finish()
    }
}

// ── Deferred ──────────────────────────────────────────────────────────────────

/// A persistent behavior that builds its body from a factory every time it
/// is initialised.
///
/// Requirements are declared up front because the scheduler reads them once
/// at registration.  A body requiring anything outside them is dropped at
/// `initialize` with a `warn`, and the `Deferred` then reports finished.
/// Useful for default and autonomous behaviors whose shape depends on a
/// selector: the selection is read at each start, never mid-run.
pub struct Deferred {
    factory:      BehaviorFactory,
    requirements: Requirements,
    body:         Option<Box<dyn Behavior>>,
}

impl Deferred {
    pub fn new(factory: BehaviorFactory, requirements: impl IntoIterator<Item = ResourceId>) -> Self {
        Self { factory, requirements: requirements.into_iter().collect(), body: None }
    }

    /// Name of the body currently running, if any.
    pub fn body_name(&self) -> Option<&str> {
        self.body.as_ref().map(|b| b.name())
    }
}

impl Behavior for Deferred {
    fn name(&self) -> &str {
        self.factory.name()
    }

    fn requirements(&self) -> Requirements {
        self.requirements.clone()
    }

    fn initialize(&mut self, ctx: &mut BehaviorContext<'_>) {
        let body = self.factory.build();
        let extra: Vec<ResourceId> = body.requirements().difference(&self.requirements).copied().collect();
        if !extra.is_empty() {
            tracing::warn!(
                behavior = self.factory.name(),
                body = body.name(),
                ?extra,
                "deferred body requires undeclared resources; not running it"
            );
            self.body = None;
            return;
        }
        self.body.insert(body).initialize(ctx);
    }

    fn execute(&mut self, ctx: &mut BehaviorContext<'_>) {
        if let Some(body) = self.body.as_mut() {
            body.execute(ctx);
        }
    }

    fn is_finished(&self) -> bool {
        self.body.as_ref().is_none_or(|b| b.is_finished())
    }

    fn end(&mut self, interrupted: bool) {
        if let Some(mut body) = self.body.take() {
            body.end(interrupted);
        }
    }
}
