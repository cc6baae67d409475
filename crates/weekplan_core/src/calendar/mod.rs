//! Calendar-week resolution entry points.
//!
//! # Responsibility
//! - Map calendar dates to the week identity displayed by the planner.
//! - Keep all date arithmetic pure and stateless; no clock access here.
//!
//! # See also
//! - docs/architecture/week-resolution.md

pub mod resolve;
