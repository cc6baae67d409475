//! Planner session holder and view-facing surface.
//!
//! # Responsibility
//! - Own the one store snapshot and the current week identity of a session.
//! - Drive navigation through the calendar resolver and materialize the
//!   arrived week's record.
//! - Forward field mutations to the store at the current key, swapping the
//!   owned snapshot as one reducer step per event.
//!
//! # Invariants
//! - The session is the sole holder of the store; every event derives the
//!   next snapshot from the immediately preceding one.
//! - `current` is always a resolver-produced triple; navigation and month
//!   selection re-canonicalize through `resolve_week`.
//! - Mutations are total: capacity gates and unknown targets degrade to
//!   no-ops, logged at debug with metadata only.
//!
//! # See also
//! - docs/architecture/state-model.md

use crate::calendar::resolve::{
    format_display, next_week, previous_week, resolve_week, week_dates, CalendarError,
};
use crate::capability::{Clock, TodoIdSource};
use crate::model::period::{PeriodRecord, TodoId};
use crate::model::week::{WeekInfo, Weekday};
use crate::store::period_store::PeriodStore;
use chrono::NaiveDate;
use log::{debug, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// Errors from session navigation and month selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlannerError {
    /// Selected month outside `1..=12`.
    MonthOutOfRange(u32),
    /// Calendar derivation failed.
    Calendar(CalendarError),
}

impl Display for PlannerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MonthOutOfRange(month) => {
                write!(f, "selected month {month} is outside 1..=12")
            }
            Self::Calendar(err) => write!(f, "{err}"),
        }
    }
}

impl Error for PlannerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::MonthOutOfRange(_) => None,
            Self::Calendar(err) => Some(err),
        }
    }
}

impl From<CalendarError> for PlannerError {
    fn from(value: CalendarError) -> Self {
        Self::Calendar(value)
    }
}

/// View-facing planner operation surface.
///
/// The view layer depends on this trait rather than on the concrete session
/// type, so rendering code can be driven by any implementation and tests by
/// a scripted one. Mutations address the current week and return nothing:
/// capacity gates and unknown ids or indices are silent no-ops.
pub trait WeekPlanner {
    fn go_previous_week(&mut self) -> Result<(), PlannerError>;
    fn go_next_week(&mut self) -> Result<(), PlannerError>;
    fn go_today(&mut self) -> Result<(), PlannerError>;
    /// Moves to `month` in the current year, keeping the week number where
    /// the target month owns it and rolling forward where it does not.
    fn select_month(&mut self, month: u32) -> Result<(), PlannerError>;
    /// Highlights one weekday; session-local, no store effect.
    fn select_day(&mut self, day: Weekday);

    fn add_todo(&mut self, day: Weekday);
    fn remove_todo(&mut self, day: Weekday, id: TodoId);
    fn toggle_todo(&mut self, day: Weekday, id: TodoId);
    fn set_todo_text(&mut self, day: Weekday, id: TodoId, text: &str);

    fn add_habit(&mut self);
    fn remove_habit(&mut self, index: usize);
    fn rename_habit(&mut self, index: usize, name: &str);
    fn set_habit_check(&mut self, index: usize, day: Weekday, checked: bool);

    fn set_memo(&mut self, day: Weekday, text: &str);
    fn set_insight(&mut self, day: Weekday, text: &str);

    fn current_week(&self) -> WeekInfo;
    fn selected_day(&self) -> Weekday;
    fn current_record(&self) -> Arc<PeriodRecord>;
    fn current_dates(&self) -> Result<[NaiveDate; 7], PlannerError>;
    /// Caption for the displayed range: `YY/MM/DD(MON) ~ YY/MM/DD(SUN)`.
    fn date_range_label(&self) -> Result<String, PlannerError>;
}

/// Session-scoped owner of the planner state.
///
/// Generic over the injected id source and clock: production wiring uses
/// random uuids and the system date, tests and demos script both.
pub struct PlannerSession<I: TodoIdSource, C: Clock> {
    store: PeriodStore,
    current: WeekInfo,
    selected_day: Weekday,
    ids: I,
    clock: C,
}

impl<I: TodoIdSource, C: Clock> PlannerSession<I, C> {
    /// Opens a session on the week containing the clock's current date and
    /// materializes that week's record.
    ///
    /// Errs only when the clock reports a date at the very edge of the
    /// representable calendar, where no full week contains it.
    pub fn start(ids: I, clock: C) -> Result<Self, PlannerError> {
        let current = resolve_week(clock.today())?;
        let store = PeriodStore::new().visit(current.key(), &ids);
        info!(
            "event=session_start module=service status=ok key={}",
            current.key()
        );
        Ok(Self {
            store,
            current,
            selected_day: Weekday::Mon,
            ids,
            clock,
        })
    }

    /// The owned store snapshot, for persistence collaborators and tests.
    pub fn store(&self) -> &PeriodStore {
        &self.store
    }

    /// Moves the session to `week` and materializes its record.
    fn arrive(&mut self, event: &str, week: WeekInfo) {
        self.current = week;
        self.store = self.store.visit(week.key(), &self.ids);
        debug!(
            "event={event} module=service status=ok key={} periods={}",
            week.key(),
            self.store.len()
        );
    }

    /// Swaps in the successor snapshot produced by one store mutation.
    fn apply(&mut self, event: &str, next: PeriodStore) {
        let key = self.current.key();
        let changed = match (self.store.record(&key), next.record(&key)) {
            (Some(before), Some(after)) => !Arc::ptr_eq(&before, &after),
            (None, Some(_)) => true,
            _ => false,
        };
        let status = if changed { "ok" } else { "noop" };
        debug!("event={event} module=service status={status} key={key}");
        self.store = next;
    }
}

impl<I: TodoIdSource, C: Clock> WeekPlanner for PlannerSession<I, C> {
    fn go_previous_week(&mut self) -> Result<(), PlannerError> {
        let week = previous_week(&self.current)?;
        self.arrive("week_prev", week);
        Ok(())
    }

    fn go_next_week(&mut self) -> Result<(), PlannerError> {
        let week = next_week(&self.current)?;
        self.arrive("week_next", week);
        Ok(())
    }

    fn go_today(&mut self) -> Result<(), PlannerError> {
        let week = resolve_week(self.clock.today())?;
        self.arrive("week_today", week);
        Ok(())
    }

    fn select_month(&mut self, month: u32) -> Result<(), PlannerError> {
        if !(1..=12).contains(&month) {
            return Err(PlannerError::MonthOutOfRange(month));
        }
        // Take the hypothetical (year, month, current week number) Monday
        // and re-resolve it, so the session always sits on a canonical
        // triple even when the target month owns fewer weeks.
        let hypothetical = WeekInfo::new(self.current.year, month, self.current.week_number);
        let monday = week_dates(&hypothetical)?[0];
        self.arrive("month_select", resolve_week(monday)?);
        Ok(())
    }

    fn select_day(&mut self, day: Weekday) {
        self.selected_day = day;
        debug!(
            "event=day_select module=service status=ok day={}",
            day.as_str()
        );
    }

    fn add_todo(&mut self, day: Weekday) {
        let next = self.store.add_todo(self.current.key(), day, &self.ids);
        self.apply("todo_add", next);
    }

    fn remove_todo(&mut self, day: Weekday, id: TodoId) {
        let next = self.store.remove_todo(self.current.key(), day, id, &self.ids);
        self.apply("todo_remove", next);
    }

    fn toggle_todo(&mut self, day: Weekday, id: TodoId) {
        let next = self.store.toggle_todo(self.current.key(), day, id, &self.ids);
        self.apply("todo_toggle", next);
    }

    fn set_todo_text(&mut self, day: Weekday, id: TodoId, text: &str) {
        let next = self.store.set_todo_text(self.current.key(), day, id, text, &self.ids);
        self.apply("todo_text", next);
    }

    fn add_habit(&mut self) {
        let next = self.store.add_habit(self.current.key(), &self.ids);
        self.apply("habit_add", next);
    }

    fn remove_habit(&mut self, index: usize) {
        let next = self.store.remove_habit(self.current.key(), index, &self.ids);
        self.apply("habit_remove", next);
    }

    fn rename_habit(&mut self, index: usize, name: &str) {
        let next = self.store.rename_habit(self.current.key(), index, name, &self.ids);
        self.apply("habit_rename", next);
    }

    fn set_habit_check(&mut self, index: usize, day: Weekday, checked: bool) {
        let next = self.store.set_habit_check(self.current.key(), index, day, checked, &self.ids);
        self.apply("habit_check", next);
    }

    fn set_memo(&mut self, day: Weekday, text: &str) {
        let next = self.store.set_memo(self.current.key(), day, text, &self.ids);
        self.apply("memo_set", next);
    }

    fn set_insight(&mut self, day: Weekday, text: &str) {
        let next = self.store.set_insight(self.current.key(), day, text, &self.ids);
        self.apply("insight_set", next);
    }

    fn current_week(&self) -> WeekInfo {
        self.current
    }

    fn selected_day(&self) -> Weekday {
        self.selected_day
    }

    fn current_record(&self) -> Arc<PeriodRecord> {
        self.store.record_or_empty(&self.current.key(), &self.ids)
    }

    fn current_dates(&self) -> Result<[NaiveDate; 7], PlannerError> {
        Ok(week_dates(&self.current)?)
    }

    fn date_range_label(&self) -> Result<String, PlannerError> {
        let dates = week_dates(&self.current)?;
        Ok(format!(
            "{}({}) ~ {}({})",
            format_display(dates[0]),
            Weekday::Mon.label(),
            format_display(dates[6]),
            Weekday::Sun.label()
        ))
    }
}
