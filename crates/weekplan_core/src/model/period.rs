//! Planner period content model.
//!
//! # Responsibility
//! - Model one week's content: habit grid, per-day todos, memos, insights.
//! - Enforce the capacity gates on habit and todo growth.
//! - Express every mutation as an explicit copy-on-write patch that either
//!   yields a changed record or reports "nothing to do".
//!
//! # Invariants
//! - `habits` never exceeds [`MAX_HABITS_PER_PERIOD`]; no weekday todo
//!   bucket exceeds [`MAX_TODOS_PER_DAY`].
//! - Patch helpers never mutate `self`. They return `None` when the target
//!   is absent, the value already matches, or a capacity gate blocks growth;
//!   a returned record always differs from the original.
//! - A capacity-gated [`PeriodRecord::with_todo_added`] draws no id from
//!   the source.
//!
//! # See also
//! - docs/architecture/state-model.md

use crate::capability::TodoIdSource;
use crate::model::week::Weekday;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Stable identity of one todo row.
///
/// Ids outlive reordering and text edits, so removal and toggling address a
/// row even after its neighbors changed.
pub type TodoId = Uuid;

/// Upper bound on habit rows tracked in one period.
pub const MAX_HABITS_PER_PERIOD: usize = 10;

/// Upper bound on todo rows in one weekday bucket.
pub const MAX_TODOS_PER_DAY: usize = 10;

/// One todo row in a weekday bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: TodoId,
    pub checked: bool,
    pub text: String,
}

impl Todo {
    /// Creates an unchecked todo with empty text.
    pub fn new(id: TodoId) -> Self {
        Self {
            id,
            checked: false,
            text: String::new(),
        }
    }
}

/// One habit row with a seven-day check grid.
///
/// `checks` is indexed by [`Weekday::index`], Monday first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Habit {
    pub name: String,
    pub checks: [bool; 7],
}

impl Habit {
    /// Creates an unnamed habit with no checks set.
    pub fn blank() -> Self {
        Self {
            name: String::new(),
            checks: [false; 7],
        }
    }
}

/// Content of one planner period (one displayed week).
///
/// The record is a value: every mutation goes through a `with_*` patch
/// helper that clones, applies one change, and returns the replacement.
/// Fields stay private so the capacity invariants cannot be bypassed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodRecord {
    habits: Vec<Habit>,
    todos: BTreeMap<Weekday, Vec<Todo>>,
    memos: BTreeMap<Weekday, String>,
    insights: BTreeMap<Weekday, String>,
}

impl PeriodRecord {
    /// Builds the canonical starting record for a freshly visited week:
    /// one blank habit, one blank todo per weekday, empty memo and insight
    /// text per weekday.
    ///
    /// Each call mints fresh todo ids, so two empties are never equal.
    pub fn empty_with(ids: &impl TodoIdSource) -> Self {
        let mut todos = BTreeMap::new();
        let mut memos = BTreeMap::new();
        let mut insights = BTreeMap::new();
        for day in Weekday::ALL {
            todos.insert(day, vec![Todo::new(ids.next_id())]);
            memos.insert(day, String::new());
            insights.insert(day, String::new());
        }
        Self {
            habits: vec![Habit::blank()],
            todos,
            memos,
            insights,
        }
    }

    /// All habit rows in insertion order.
    pub fn habits(&self) -> &[Habit] {
        &self.habits
    }

    /// Todo rows for one weekday, oldest first.
    pub fn todos(&self, day: Weekday) -> &[Todo] {
        match self.todos.get(&day) {
            Some(bucket) => bucket,
            None => &[],
        }
    }

    /// Memo text for one weekday; empty string when nothing was written.
    pub fn memo(&self, day: Weekday) -> &str {
        self.memos.get(&day).map(String::as_str).unwrap_or("")
    }

    /// Insight text for one weekday; empty string when nothing was written.
    pub fn insight(&self, day: Weekday) -> &str {
        self.insights.get(&day).map(String::as_str).unwrap_or("")
    }

    /// Total todo rows across all weekdays.
    pub fn total_todos(&self) -> usize {
        self.todos.values().map(Vec::len).sum()
    }

    /// Checked todo rows across all weekdays.
    pub fn checked_todos(&self) -> usize {
        self.todos
            .values()
            .flatten()
            .filter(|todo| todo.checked)
            .count()
    }

    /// Appends a fresh blank todo to `day`.
    ///
    /// Returns `None` without drawing an id when the bucket already holds
    /// [`MAX_TODOS_PER_DAY`] rows.
    pub fn with_todo_added(&self, day: Weekday, ids: &impl TodoIdSource) -> Option<Self> {
        if self.todos(day).len() >= MAX_TODOS_PER_DAY {
            return None;
        }
        let mut next = self.clone();
        next.todos
            .entry(day)
            .or_default()
            .push(Todo::new(ids.next_id()));
        Some(next)
    }

    /// Removes the todo with `id` from `day`; `None` if no such row.
    pub fn with_todo_removed(&self, day: Weekday, id: TodoId) -> Option<Self> {
        if !self.todos(day).iter().any(|todo| todo.id == id) {
            return None;
        }
        let mut next = self.clone();
        if let Some(bucket) = next.todos.get_mut(&day) {
            bucket.retain(|todo| todo.id != id);
        }
        Some(next)
    }

    /// Flips the checked flag of the todo with `id`; `None` if no such row.
    pub fn with_todo_toggled(&self, day: Weekday, id: TodoId) -> Option<Self> {
        let mut next = self.clone();
        let todo = next
            .todos
            .get_mut(&day)?
            .iter_mut()
            .find(|todo| todo.id == id)?;
        todo.checked = !todo.checked;
        Some(next)
    }

    /// Replaces the text of the todo with `id`.
    ///
    /// `None` if no such row or the text already matches.
    pub fn with_todo_text(&self, day: Weekday, id: TodoId, text: &str) -> Option<Self> {
        let current = self.todos(day).iter().find(|todo| todo.id == id)?;
        if current.text == text {
            return None;
        }
        let mut next = self.clone();
        let todo = next
            .todos
            .get_mut(&day)?
            .iter_mut()
            .find(|todo| todo.id == id)?;
        todo.text = text.to_string();
        Some(next)
    }

    /// Appends a blank habit row.
    ///
    /// Returns `None` when [`MAX_HABITS_PER_PERIOD`] rows already exist.
    pub fn with_habit_added(&self) -> Option<Self> {
        if self.habits.len() >= MAX_HABITS_PER_PERIOD {
            return None;
        }
        let mut next = self.clone();
        next.habits.push(Habit::blank());
        Some(next)
    }

    /// Removes the habit row at `index`; `None` if out of bounds.
    pub fn with_habit_removed(&self, index: usize) -> Option<Self> {
        if index >= self.habits.len() {
            return None;
        }
        let mut next = self.clone();
        next.habits.remove(index);
        Some(next)
    }

    /// Renames the habit row at `index`.
    ///
    /// `None` if out of bounds or the name already matches.
    pub fn with_habit_renamed(&self, index: usize, name: &str) -> Option<Self> {
        let current = self.habits.get(index)?;
        if current.name == name {
            return None;
        }
        let mut next = self.clone();
        if let Some(habit) = next.habits.get_mut(index) {
            habit.name = name.to_string();
        }
        Some(next)
    }

    /// Sets one cell of the habit check grid to `checked`.
    ///
    /// `None` if `index` is out of bounds or the cell already holds the
    /// value.
    pub fn with_habit_check(&self, index: usize, day: Weekday, checked: bool) -> Option<Self> {
        if self.habits.get(index)?.checks[day.index()] == checked {
            return None;
        }
        let mut next = self.clone();
        if let Some(habit) = next.habits.get_mut(index) {
            habit.checks[day.index()] = checked;
        }
        Some(next)
    }

    /// Replaces the memo text for `day`; `None` if it already matches.
    pub fn with_memo(&self, day: Weekday, text: &str) -> Option<Self> {
        if self.memo(day) == text {
            return None;
        }
        let mut next = self.clone();
        next.memos.insert(day, text.to_string());
        Some(next)
    }

    /// Replaces the insight text for `day`; `None` if it already matches.
    pub fn with_insight(&self, day: Weekday, text: &str) -> Option<Self> {
        if self.insight(day) == text {
            return None;
        }
        let mut next = self.clone();
        next.insights.insert(day, text.to_string());
        Some(next)
    }
}
