//! Keyed period-state store with copy-on-write snapshots.
//!
//! # Responsibility
//! - Map period keys to week records, sparsely: only visited weeks occupy
//!   an entry.
//! - Express every mutation as a pure snapshot transition that shares every
//!   untouched record with its predecessor.
//!
//! # Invariants
//! - Mutating one key never changes another key's record; unrelated records
//!   stay `Arc`-identical across snapshots.
//! - A structural no-op (capacity gate, unknown id or index, equal value)
//!   yields a snapshot sharing every record with the prior one.
//! - Reads never insert. Records materialize on [`PeriodStore::visit`] or on
//!   a mutation that produces a changed record.
//!
//! # See also
//! - docs/architecture/state-model.md

use crate::capability::TodoIdSource;
use crate::model::period::{PeriodRecord, TodoId};
use crate::model::week::{PeriodKey, Weekday};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Sparse mapping from period key to week record.
///
/// The store is a value: mutating operations take `&self` and return the
/// successor snapshot. Records live behind `Arc`, so a snapshot transition
/// copies only the key map and the one record it replaces; every other
/// record is shared. One session-scoped owner holds the current snapshot
/// and swaps it on each event.
#[derive(Debug, Clone, Default)]
pub struct PeriodStore {
    records: BTreeMap<PeriodKey, Arc<PeriodRecord>>,
}

impl PeriodStore {
    /// Creates an empty store; records materialize as weeks are visited.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of materialized periods.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether `key` has a materialized record.
    pub fn contains(&self, key: &PeriodKey) -> bool {
        self.records.contains_key(key)
    }

    /// Materialized `(key, record)` pairs in key order.
    ///
    /// This is the surface an external persistence collaborator consumes;
    /// the store itself never serializes.
    pub fn iter(&self) -> impl Iterator<Item = (&PeriodKey, &Arc<PeriodRecord>)> {
        self.records.iter()
    }

    /// The stored record for `key`, if one has materialized.
    pub fn record(&self, key: &PeriodKey) -> Option<Arc<PeriodRecord>> {
        self.records.get(key).map(Arc::clone)
    }

    /// The stored record for `key`, or a fresh canonical-empty record.
    ///
    /// Never inserts: a fresh record drawn here only reaches the store
    /// through the mutating call that follows, if any.
    pub fn record_or_empty(&self, key: &PeriodKey, ids: &impl TodoIdSource) -> Arc<PeriodRecord> {
        match self.records.get(key) {
            Some(record) => Arc::clone(record),
            None => Arc::new(PeriodRecord::empty_with(ids)),
        }
    }

    /// Materializes the canonical empty record at `key` if absent.
    ///
    /// Navigation calls this on every arrival, so a visited week keeps one
    /// stable record (and stable todo ids) across revisits.
    pub fn visit(&self, key: PeriodKey, ids: &impl TodoIdSource) -> PeriodStore {
        if self.records.contains_key(&key) {
            return self.clone();
        }
        let mut records = self.records.clone();
        records.insert(key, Arc::new(PeriodRecord::empty_with(ids)));
        PeriodStore { records }
    }

    /// Copy-on-write combinator behind every mutation.
    ///
    /// Applies `patch` to the stored-or-canonical-empty record at `key`.
    /// `Some(next)` replaces that key's record in the successor snapshot;
    /// `None` is a structural no-op and the successor shares every record.
    pub fn with_record(
        &self,
        key: PeriodKey,
        ids: &impl TodoIdSource,
        patch: impl FnOnce(&PeriodRecord) -> Option<PeriodRecord>,
    ) -> PeriodStore {
        let base = self.record_or_empty(&key, ids);
        match patch(&base) {
            Some(next) => {
                let mut records = self.records.clone();
                records.insert(key, Arc::new(next));
                PeriodStore { records }
            }
            None => self.clone(),
        }
    }

    /// Appends a blank todo to `day`; no-op when the bucket holds 10.
    pub fn add_todo(&self, key: PeriodKey, day: Weekday, ids: &impl TodoIdSource) -> PeriodStore {
        self.with_record(key, ids, |record| record.with_todo_added(day, ids))
    }

    /// Removes the todo with `id` from `day`; no-op when absent.
    pub fn remove_todo(
        &self,
        key: PeriodKey,
        day: Weekday,
        id: TodoId,
        ids: &impl TodoIdSource,
    ) -> PeriodStore {
        self.with_record(key, ids, |record| record.with_todo_removed(day, id))
    }

    /// Flips the checked flag of the todo with `id`; no-op when absent.
    pub fn toggle_todo(
        &self,
        key: PeriodKey,
        day: Weekday,
        id: TodoId,
        ids: &impl TodoIdSource,
    ) -> PeriodStore {
        self.with_record(key, ids, |record| record.with_todo_toggled(day, id))
    }

    /// Replaces the text of the todo with `id`; no-op when absent or equal.
    pub fn set_todo_text(
        &self,
        key: PeriodKey,
        day: Weekday,
        id: TodoId,
        text: &str,
        ids: &impl TodoIdSource,
    ) -> PeriodStore {
        self.with_record(key, ids, |record| record.with_todo_text(day, id, text))
    }

    /// Appends a blank habit row; no-op when the period holds 10.
    pub fn add_habit(&self, key: PeriodKey, ids: &impl TodoIdSource) -> PeriodStore {
        self.with_record(key, ids, |record| record.with_habit_added())
    }

    /// Removes the habit row at `index`; no-op when out of bounds.
    pub fn remove_habit(
        &self,
        key: PeriodKey,
        index: usize,
        ids: &impl TodoIdSource,
    ) -> PeriodStore {
        self.with_record(key, ids, |record| record.with_habit_removed(index))
    }

    /// Renames the habit row at `index`; no-op when out of bounds or equal.
    pub fn rename_habit(
        &self,
        key: PeriodKey,
        index: usize,
        name: &str,
        ids: &impl TodoIdSource,
    ) -> PeriodStore {
        self.with_record(key, ids, |record| record.with_habit_renamed(index, name))
    }

    /// Sets one habit check cell; no-op when out of bounds or equal.
    pub fn set_habit_check(
        &self,
        key: PeriodKey,
        index: usize,
        day: Weekday,
        checked: bool,
        ids: &impl TodoIdSource,
    ) -> PeriodStore {
        self.with_record(key, ids, |record| record.with_habit_check(index, day, checked))
    }

    /// Replaces the memo text for `day`; no-op when equal.
    pub fn set_memo(
        &self,
        key: PeriodKey,
        day: Weekday,
        text: &str,
        ids: &impl TodoIdSource,
    ) -> PeriodStore {
        self.with_record(key, ids, |record| record.with_memo(day, text))
    }

    /// Replaces the insight text for `day`; no-op when equal.
    pub fn set_insight(
        &self,
        key: PeriodKey,
        day: Weekday,
        text: &str,
        ids: &impl TodoIdSource,
    ) -> PeriodStore {
        self.with_record(key, ids, |record| record.with_insight(day, text))
    }
}
