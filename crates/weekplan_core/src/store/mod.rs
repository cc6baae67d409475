//! Period-state storage.
//!
//! # Responsibility
//! - Hold per-week planner records keyed by period identity.
//! - Keep snapshot transitions pure so callers never observe a half-applied
//!   update.
//!
//! # See also
//! - docs/architecture/state-model.md

pub mod period_store;
