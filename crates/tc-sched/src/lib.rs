//! `tc-sched` — the cooperative command scheduler.
//!
//! # Tick
//!
//! ```text
//! tick():
//!   ① Requests  — apply what behaviors queued through BehaviorContext last
//!                 tick (Start, StartRegistered, Cancel, RunExclusively).
//!   ② Triggers  — poll every binding in bind order; on fire:
//!                   Start { target, refire } → acquire target
//!                   Cancel(target)           → interrupt it
//!                   Toggle(target)           → interrupt if running, else acquire
//!   ③ Behaviors — execute → is_finished → end(false) + release, in start order.
//!   ④ Defaults  — every unowned resource starts its default behavior.
//! ```
//!
//! Acquisition interrupts every current owner of a required resource with
//! `end(true)` before the new behavior's `initialize`.  A behavior owns all
//! of its resources or none of them.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use tc_behavior::{BehaviorFactory, RunBehavior};
//! use tc_core::LoopConfig;
//! use tc_sched::{Binding, RefirePolicy, SchedulerBuilder};
//! use tc_trigger::Trigger;
//!
//! let mut b = SchedulerBuilder::new(LoopConfig::default());
//! let drive = b.resource("drive");
//! b.default_behavior(drive, RunBehavior::new("idleDrive", || {}).requires(drive));
//! b.bind(
//!     Binding::start(
//!         Trigger::new("turbo", move || pad.turbo()),
//!         BehaviorFactory::new("turboDrive", move || RunBehavior::new("turboDrive", || {}).requires(drive)),
//!     )
//!     .with_refire(RefirePolicy::Restart),
//! );
//! let mut scheduler = b.build()?;
//! loop { scheduler.tick(); }
//! ```

pub mod binding;
pub mod builder;
pub mod error;
pub mod observer;
pub mod scheduler;

#[cfg(test)]
mod tests;

pub use binding::{Binding, BindingAction, CancelTarget, RefirePolicy, Target};
pub use builder::SchedulerBuilder;
pub use error::{SchedError, SchedResult};
pub use observer::{NoopObserver, SchedulerObserver};
pub use scheduler::{Lifecycle, Scheduler};
