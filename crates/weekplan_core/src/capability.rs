//! Injected runtime capabilities.
//!
//! # Responsibility
//! - Declare the two ambient effects the planner core relies on: minting
//!   todo ids and reading today's date.
//! - Ship the production implementations alongside deterministic doubles so
//!   tests and demos can script exact ids and dates.
//!
//! # Invariants
//! - Core logic never calls `Uuid::new_v4` or the system clock directly;
//!   every effect flows through one of these traits.
//! - [`SequentialTodoIdSource`] mints strictly increasing, never-nil ids.

use crate::model::period::TodoId;
use chrono::{Local, NaiveDate};
use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

/// Source of fresh todo ids.
///
/// Implementations must never return the nil id and must never return the
/// same id twice from one source instance.
pub trait TodoIdSource {
    fn next_id(&self) -> TodoId;
}

/// Source of the current calendar date.
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// Production id source backed by random v4 uuids.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidTodoIdSource;

impl TodoIdSource for UuidTodoIdSource {
    fn next_id(&self) -> TodoId {
        Uuid::new_v4()
    }
}

/// Deterministic id source for tests and demos.
///
/// Ids are the integers `1, 2, 3, ..` embedded in the uuid value space, so
/// expected ids can be written down in assertions.
#[derive(Debug, Default)]
pub struct SequentialTodoIdSource {
    counter: AtomicU64,
}

impl SequentialTodoIdSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of ids drawn so far.
    pub fn drawn(&self) -> u64 {
        self.counter.load(Ordering::Relaxed)
    }
}

impl TodoIdSource for SequentialTodoIdSource {
    fn next_id(&self) -> TodoId {
        let sequence = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        Uuid::from_u128(u128::from(sequence))
    }
}

/// Production clock reading the local calendar date.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Clock pinned to one date for tests and demos.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    today: NaiveDate,
}

impl FixedClock {
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.today
    }
}

#[cfg(test)]
mod tests {
    use super::{Clock, FixedClock, SequentialTodoIdSource, TodoIdSource, UuidTodoIdSource};
    use chrono::NaiveDate;
    use uuid::Uuid;

    #[test]
    fn sequential_ids_are_monotonic_and_counted() {
        let ids = SequentialTodoIdSource::new();
        assert_eq!(ids.drawn(), 0);
        let first = ids.next_id();
        let second = ids.next_id();
        assert_eq!(first, Uuid::from_u128(1));
        assert_eq!(second, Uuid::from_u128(2));
        assert_eq!(ids.drawn(), 2);
    }

    #[test]
    fn random_ids_are_distinct_and_never_nil() {
        let ids = UuidTodoIdSource;
        let first = ids.next_id();
        let second = ids.next_id();
        assert_ne!(first, second);
        assert!(!first.is_nil());
    }

    #[test]
    fn fixed_clock_reports_the_pinned_date() {
        let date = NaiveDate::from_ymd_opt(2024, 8, 14).unwrap();
        assert_eq!(FixedClock::new(date).today(), date);
    }
}
