//! Composite behaviors: sequential and parallel groups.
//!
//! A group is itself a [`Behavior`]; the scheduler only ever sees the group.
//! Its requirements are the union of its children's, acquired all at once
//! when the group starts and held until the whole group ends.
//!
//! Children that are still running when a group ends are ended with
//! `interrupted = true`.

use crate::{Behavior, BehaviorContext, BehaviorError, BehaviorResult, Requirements};

// ── Sequence ──────────────────────────────────────────────────────────────────

/// Runs its children one after another.  A child that finishes is ended and
/// the next one initialised within the same tick.
pub struct Sequence {
    name:         String,
    children:     Vec<Box<dyn Behavior>>,
    current:      usize,
    requirements: Requirements,
}

impl Sequence {
    pub fn new(name: impl Into<String>, children: Vec<Box<dyn Behavior>>) -> Self {
        let requirements = children.iter().flat_map(|c| c.requirements()).collect();
        Self { name: name.into(), children, current: 0, requirements }
    }

    /// Append another child.  Only meaningful before the sequence is started.
    pub fn push(&mut self, child: Box<dyn Behavior>) {
        self.requirements.extend(child.requirements());
        self.children.push(child);
    }

    /// Index of the child currently running (`len()` once finished).
    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl Behavior for Sequence {
    fn name(&self) -> &str {
        &self.name
    }

    fn requirements(&self) -> Requirements {
        self.requirements.clone()
    }

    fn initialize(&mut self, ctx: &mut BehaviorContext<'_>) {
        self.current = 0;
        if let Some(first) = self.children.first_mut() {
            first.initialize(ctx);
        }
    }

    fn execute(&mut self, ctx: &mut BehaviorContext<'_>) {
        let Some(child) = self.children.get_mut(self.current) else {
            return;
        };
        child.execute(ctx);
        if child.is_finished() {
            child.end(false);
            self.current += 1;
            if let Some(next) = self.children.get_mut(self.current) {
                next.initialize(ctx);
            }
        }
    }

    fn is_finished(&self) -> bool {
        self.current >= self.children.len()
    }

    fn end(&mut self, interrupted: bool) {
        if interrupted
            && let Some(child) = self.children.get_mut(self.current)
        {
            child.end(true);
        }
    }
}

// ── Parallel ──────────────────────────────────────────────────────────────────

/// When a [`Parallel`] group counts as finished.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ParallelPolicy {
    /// Every child has finished.
    All,
    /// Any child has finished; the others are interrupted.
    Race,
    /// The first child (the deadline) has finished; the others are interrupted.
    Deadline,
}

/// Runs its children side by side.  Children must not share resources.
pub struct Parallel {
    name:         String,
    policy:       ParallelPolicy,
    children:     Vec<(Box<dyn Behavior>, bool)>,
    requirements: Requirements,
}

impl Parallel {
    /// Build a group, rejecting children whose requirements overlap.
    pub fn new(
        name:     impl Into<String>,
        policy:   ParallelPolicy,
        children: Vec<Box<dyn Behavior>>,
    ) -> BehaviorResult<Self> {
        let name = name.into();
        let mut requirements = Requirements::new();
        for child in &children {
            for resource in child.requirements() {
                if !requirements.insert(resource) {
                    return Err(BehaviorError::OverlappingRequirements { group: name, resource });
                }
            }
        }
        Ok(Self {
            name,
            policy,
            children: children.into_iter().map(|c| (c, false)).collect(),
            requirements,
        })
    }

    pub fn policy(&self) -> ParallelPolicy {
        self.policy
    }

    /// Number of children still running.
    pub fn running_children(&self) -> usize {
        self.children.iter().filter(|(_, running)| *running).count()
    }
}

impl Behavior for Parallel {
    fn name(&self) -> &str {
        &self.name
    }

    fn requirements(&self) -> Requirements {
        self.requirements.clone()
    }

    fn initialize(&mut self, ctx: &mut BehaviorContext<'_>) {
        for (child, running) in &mut self.children {
            child.initialize(ctx);
            *running = true;
        }
    }

    fn execute(&mut self, ctx: &mut BehaviorContext<'_>) {
        for (child, running) in &mut self.children {
            if !*running {
                continue;
            }
            child.execute(ctx);
            if child.is_finished() {
                child.end(false);
                *running = false;
            }
        }
    }

    fn is_finished(&self) -> bool {
        match self.policy {
            ParallelPolicy::All => self.children.iter().all(|(_, running)| !running),
            ParallelPolicy::Race => {
                self.children.is_empty() || self.children.iter().any(|(_, running)| !running)
            }
            ParallelPolicy::Deadline => self.children.first().is_none_or(|(_, running)| !running),
        }
    }

    fn end(&mut self, _interrupted: bool) {
        for (child, running) in &mut self.children {
            if *running {
                child.end(true);
                *running = false;
            }
        }
    }
}
