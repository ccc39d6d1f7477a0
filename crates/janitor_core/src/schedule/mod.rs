//! Cleaning schedule rotation.
//!
//! # Responsibility
//! - Map a civil date to the tasks due that day across four recurrence tiers.
//! - Own the canonical task-name text used as completion-log join keys.
//!
//! # Invariants
//! - Computation is pure: no I/O, no shared state, no randomness.
//! - `Daily` and `Yearly` tiers never depend on the date.
//! - Task names are returned exactly as declared in the rotation tables.

pub mod catalog;
pub mod date;
pub mod engine;

pub use catalog::{TaskCatalog, Tier};
pub use date::{CivilDate, DateParseError};
pub use engine::{compute_tasks, month_cycle, week_index};
