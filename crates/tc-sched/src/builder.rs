//! Builder for constructing a validated [`Scheduler`].

use rustc_hash::FxHashMap;
use tc_behavior::Behavior;
use tc_core::{BehaviorId, LoopConfig, ResourceId, TriggerId};

use crate::binding::{Binding, BindingAction, CancelTarget, Target};
use crate::scheduler::{ResourceSlot, Retention};
use crate::{SchedError, SchedResult, Scheduler};

/// Collects resources, default behaviors, registered behaviors and bindings,
/// then validates them together in [`build`][Self::build].
///
/// Methods take `&mut self` and hand back the id they allocate, so ids can be
/// captured by later bindings before the scheduler exists.
///
/// # Example
///
/// ```rust,ignore
/// let mut b = SchedulerBuilder::new(LoopConfig::default());
/// let drive = b.resource("drive");
/// b.default_behavior(drive, RunBehavior::new("idleDrive", || {}).requires(drive));
/// b.bind(Binding::start(Trigger::new("turbo", turbo_pressed), turbo_factory));
/// let mut scheduler = b.build()?;
/// scheduler.tick();
/// ```
pub struct SchedulerBuilder {
    config:     LoopConfig,
    resources:  Vec<String>,
    defaults:   Vec<(ResourceId, BehaviorId, Box<dyn Behavior>)>,
    registered: Vec<(BehaviorId, Box<dyn Behavior>)>,
    bindings:   Vec<Binding>,
    next_id:    u64,
}

impl SchedulerBuilder {
    pub fn new(config: LoopConfig) -> Self {
        Self {
            config,
            resources:  Vec::new(),
            defaults:   Vec::new(),
            registered: Vec::new(),
            bindings:   Vec::new(),
            next_id:    0,
        }
    }

    /// Declare a resource.  Names must be unique.
    pub fn resource(&mut self, name: impl Into<String>) -> ResourceId {
        let id = ResourceId(self.resources.len() as u32);
        self.resources.push(name.into());
        id
    }

    /// Attach the behavior that runs whenever nothing else owns `resource`.
    /// It must require `resource` and nothing else.
    pub fn default_behavior(&mut self, resource: ResourceId, behavior: impl Behavior) -> BehaviorId {
        let id = self.allocate();
        self.defaults.push((resource, id, Box::new(behavior)));
        id
    }

    /// Register a persistent behavior, e.g. an autonomous routine the host
    /// starts with `run_exclusively`.
    pub fn register(&mut self, behavior: impl Behavior) -> BehaviorId {
        let id = self.allocate();
        self.registered.push((id, Box::new(behavior)));
        id
    }

    /// Add a binding.  Bindings are polled in the order they are added.
    pub fn bind(&mut self, binding: Binding) -> TriggerId {
        let id = TriggerId(self.bindings.len() as u32);
        self.bindings.push(binding);
        id
    }

    /// Validate everything and return a scheduler at tick 0 with nothing
    /// running.  Defaults start on the first tick.
    pub fn build(self) -> SchedResult<Scheduler> {
        self.config.validate()?;

        // ── Resources ─────────────────────────────────────────────────────
        let mut resources: Vec<ResourceSlot> = Vec::with_capacity(self.resources.len());
        for name in self.resources {
            if resources.iter().any(|r| r.name == name) {
                return Err(SchedError::DuplicateResource(name));
            }
            resources.push(ResourceSlot { name, owner: None, default: None });
        }

        let mut scheduler = Scheduler {
            clock:         self.config.make_clock(),
            resources,
            behaviors:     FxHashMap::default(),
            running:       Vec::new(),
            requests:      Vec::new(),
            bindings:      Vec::new(),
            next_behavior: self.next_id,
            next_trigger:  0,
        };

        // ── Behaviors ─────────────────────────────────────────────────────
        for (id, behavior) in self.registered {
            check_requirements(&scheduler, &*behavior)?;
            scheduler.insert_with_id(id, behavior, Retention::Persistent, None);
        }

        for (resource, id, behavior) in self.defaults {
            let Some(slot) = scheduler.resources.get(resource.index()) else {
                return Err(SchedError::UnknownResource(resource));
            };
            if slot.default.is_some() {
                return Err(SchedError::DefaultAlreadySet(slot.name.clone()));
            }
            let requirements = behavior.requirements();
            if !requirements.contains(&resource) {
                return Err(SchedError::DefaultMissingRequirement {
                    resource: slot.name.clone(),
                    behavior: behavior.name().to_string(),
                });
            }
            // Backfill must never interrupt a non-default.
            if let Some(&other) = requirements.iter().find(|&&r| r != resource) {
                return Err(SchedError::DefaultRequiresOther {
                    resource: slot.name.clone(),
                    behavior: behavior.name().to_string(),
                    other,
                });
            }
            check_requirements(&scheduler, &*behavior)?;
            scheduler.resources[resource.index()].default = Some(id);
            scheduler.insert_with_id(id, behavior, Retention::Persistent, Some(resource));
        }

        // ── Bindings ──────────────────────────────────────────────────────
        let trigger_count = self.bindings.len() as u32;
        for binding in self.bindings {
            match &binding.action {
                BindingAction::Start { target: Target::Registered(id), .. }
                | BindingAction::Toggle(Target::Registered(id))
                | BindingAction::Cancel(CancelTarget::Behavior(id)) => {
                    if !scheduler.behaviors.contains_key(id) {
                        return Err(SchedError::UnknownBehavior {
                            binding:  binding.name().to_string(),
                            behavior: *id,
                        });
                    }
                }
                BindingAction::Cancel(CancelTarget::StartedBy(trigger)) => {
                    if trigger.0 >= trigger_count {
                        return Err(SchedError::UnknownTrigger {
                            binding: binding.name().to_string(),
                            trigger: *trigger,
                        });
                    }
                }
                BindingAction::Start { target: Target::Factory(_), .. }
                | BindingAction::Toggle(Target::Factory(_)) => {}
            }
            scheduler.bind(binding);
        }

        tracing::info!(
            resources = scheduler.resource_count(),
            behaviors = scheduler.behavior_count(),
            bindings = scheduler.binding_count(),
            period_ms = scheduler.clock.period_ms,
            "scheduler built"
        );
        Ok(scheduler)
    }

    fn allocate(&mut self) -> BehaviorId {
        let id = BehaviorId(self.next_id);
        self.next_id += 1;
        id
    }
}

impl Default for SchedulerBuilder {
    fn default() -> Self {
        Self::new(LoopConfig::default())
    }
}

fn check_requirements(scheduler: &Scheduler, behavior: &dyn Behavior) -> SchedResult<()> {
    match behavior
        .requirements()
        .into_iter()
        .find(|r| r.index() >= scheduler.resource_count())
    {
        Some(resource) => Err(SchedError::UnknownResource(resource)),
        None => Ok(()),
    }
}
