//! `tc-core` — foundational types for the `tickcmd` command scheduler.
//!
//! This crate is a dependency of every other `tc-*` crate.  It intentionally
//! has no `tc-*` dependencies and a single required external one
//! (`thiserror`), plus optional `serde`.
//!
//! # What lives here
//!
//! | Module    | Contents                                        |
//! |-----------|-------------------------------------------------|
//! | [`ids`]   | `ResourceId`, `BehaviorId`, `TriggerId`         |
//! | [`time`]  | `Tick`, `LoopClock`, `LoopConfig`               |
//! | [`error`] | `CoreError`, `CoreResult`                       |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |
//!           | Required by the host binary's JSON config loader.          |

pub mod error;
pub mod ids;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use ids::{BehaviorId, ResourceId, TriggerId};
pub use time::{LoopClock, LoopConfig, Tick};
