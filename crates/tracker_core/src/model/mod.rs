//! Domain records persisted by the tracker.
//!
//! # Responsibility
//! - Define the canonical `User` and `Exercise` shapes used by core logic.
//!
//! # Invariants
//! - Ids are generated by storage and never reused or mutated.
//! - Records are immutable once stored; removal happens only by cascade.

pub mod exercise;
pub mod user;
