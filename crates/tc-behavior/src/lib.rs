//! `tc-behavior` — the behavior trait, building blocks, and composition.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                      |
//! |----------------|---------------------------------------------------------------|
//! | [`model`]      | `Behavior` trait, `Requirements`                              |
//! | [`context`]    | `BehaviorContext<'a>` — tick, own id, request queue           |
//! | [`request`]    | `Request` enum (`Start`, `StartRegistered`, `Cancel`, …)      |
//! | [`functional`] | `FunctionalBehavior`, `InstantBehavior`, `RunBehavior`, `WaitTicks` |
//! | [`group`]      | `Sequence`, `Parallel`, `ParallelPolicy`                      |
//! | [`decorator`]  | `Until`, `Timeout`, `Named`                                   |
//! | [`ext`]        | `BehaviorExt` fluent combinators                              |
//! | [`factory`]    | `BehaviorFactory`, `Deferred`                                 |
//! | [`noop`]       | `NoopBehavior` — the "run nothing" behavior                   |
//! | [`error`]      | `BehaviorError`, `BehaviorResult<T>`                          |
//!
//! # Design notes
//!
//! Behaviors are single-threaded: the scheduler drives them from one host
//! loop, so the trait carries no `Send`/`Sync` bound and implementations may
//! hold `Rc<RefCell<_>>` handles to the subsystems they drive.
//!
//! Behaviors cannot call into the scheduler while it is running them.  All
//! scheduling changes go through [`BehaviorContext`] as [`Request`]s and are
//! applied at the start of the next tick.

pub mod context;
pub mod decorator;
pub mod error;
pub mod ext;
pub mod factory;
pub mod functional;
pub mod group;
pub mod model;
pub mod noop;
pub mod request;


pub use context::BehaviorContext;
pub use decorator::{Named, Timeout, Until};
pub use error::{BehaviorError, BehaviorResult};
pub use ext::BehaviorExt;
pub use factory::{BehaviorFactory, Deferred};
pub use functional::{FunctionalBehavior, InstantBehavior, RunBehavior, WaitTicks};
pub use group::{Parallel, ParallelPolicy, Sequence};
pub use model::{Behavior, Requirements};
pub use noop::NoopBehavior;
pub use request::Request;
