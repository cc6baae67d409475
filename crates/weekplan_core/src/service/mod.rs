//! Session-facing planner services.
//!
//! # Responsibility
//! - Own the store snapshot and current week identity for one session.
//! - Expose the view-facing operation surface behind one trait seam.
//!
//! # See also
//! - docs/architecture/state-model.md

pub mod session;
