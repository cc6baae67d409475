//! Planner domain model.
//!
//! # Responsibility
//! - Define the canonical data structures shared by resolution, storage and
//!   the session layer.
//! - Split week identity (`week`) from week content (`period`) so calendar
//!   math never depends on planner data.
//!
//! # Invariants
//! - Every todo row is identified by a stable `TodoId`.
//! - Week identity is the `(year, month, week_number)` triple; nothing else
//!   participates in key equality.
//!
//! # See also
//! - docs/architecture/state-model.md

pub mod period;
pub mod week;
