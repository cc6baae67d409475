//! Core domain logic for the weekly planner.
//! This crate is the single source of truth for calendar and period
//! invariants.

pub mod calendar;
pub mod capability;
pub mod logging;
pub mod model;
pub mod service;
pub mod store;

pub use calendar::resolve::{
    first_monday_of_month, format_display, monday_on_or_before, next_week, previous_week,
    resolve_week, week_dates, CalendarError, CalendarResult,
};
pub use capability::{
    Clock, FixedClock, SequentialTodoIdSource, SystemClock, TodoIdSource, UuidTodoIdSource,
};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::period::{
    Habit, PeriodRecord, Todo, TodoId, MAX_HABITS_PER_PERIOD, MAX_TODOS_PER_DAY,
};
pub use model::week::{PeriodKey, PeriodKeyParseError, WeekInfo, Weekday};
pub use service::session::{PlannerError, PlannerSession, WeekPlanner};
pub use store::period_store::PeriodStore;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
