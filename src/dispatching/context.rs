//! Run state passed to eligibility checks and ranking rules.

use std::collections::HashMap;

use crate::config::RosterConfig;
use crate::models::{Preference, PreferenceTable, ShiftKind, ShiftSlot, WeekGrid};

/// Mutable state of one builder run plus the read-only inputs rules need.
///
/// Holds the partial schedule built so far and the per-run shift counters.
/// Lifetime counters stay on [`crate::models::Employee`]; nothing here is
/// persisted.
#[derive(Debug, Clone)]
pub struct RosterContext<'a> {
    /// Policy for this run.
    pub config: &'a RosterConfig,
    /// Raw preference table.
    pub preferences: &'a PreferenceTable,
    /// Ordered days and shift types.
    pub grid: &'a WeekGrid,
    /// Weekly cap for this run.
    pub max_shifts_per_week: u32,
    /// Slot key → assigned employee ids, in selection order.
    assignments: HashMap<String, Vec<String>>,
    /// Employee id → shifts assigned this run.
    run_counts: HashMap<String, u32>,
    /// Employee id → day shifts assigned this run.
    day_counts: HashMap<String, u32>,
    /// Employee id → night shifts assigned this run.
    night_counts: HashMap<String, u32>,
}

impl<'a> RosterContext<'a> {
    /// Creates a context with nothing assigned yet.
    pub fn new(
        config: &'a RosterConfig,
        preferences: &'a PreferenceTable,
        grid: &'a WeekGrid,
        max_shifts_per_week: u32,
    ) -> Self {
        Self {
            config,
            preferences,
            grid,
            max_shifts_per_week,
            assignments: HashMap::new(),
            run_counts: HashMap::new(),
            day_counts: HashMap::new(),
            night_counts: HashMap::new(),
        }
    }

    /// Seeds a prior assignment (for tests and resumed runs).
    pub fn with_assignment(mut self, slot: &ShiftSlot, employee_id: impl Into<String>) -> Self {
        self.record_assignment(slot, employee_id);
        self
    }

    /// Records an assignment and bumps the run counters.
    pub fn record_assignment(&mut self, slot: &ShiftSlot, employee_id: impl Into<String>) {
        let employee_id = employee_id.into();
        *self.run_counts.entry(employee_id.clone()).or_insert(0) += 1;
        match slot.kind {
            ShiftKind::Day => *self.day_counts.entry(employee_id.clone()).or_insert(0) += 1,
            ShiftKind::Night => *self.night_counts.entry(employee_id.clone()).or_insert(0) += 1,
            ShiftKind::Other => {}
        }
        self.assignments
            .entry(slot.key.as_str().to_string())
            .or_default()
            .push(employee_id);
    }

    /// Employee ids assigned to a slot so far.
    pub fn assigned_to(&self, slot_key: &str) -> &[String] {
        self.assignments
            .get(slot_key)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Whether an employee already sits in a slot.
    pub fn is_assigned(&self, slot_key: &str, employee_id: &str) -> bool {
        self.assigned_to(slot_key).iter().any(|id| id == employee_id)
    }

    /// Shifts assigned to an employee during this run.
    pub fn shifts_this_run(&self, employee_id: &str) -> u32 {
        self.run_counts.get(employee_id).copied().unwrap_or(0)
    }

    /// Day shifts assigned to an employee during this run.
    pub fn day_shifts_this_run(&self, employee_id: &str) -> u32 {
        self.day_counts.get(employee_id).copied().unwrap_or(0)
    }

    /// Night shifts assigned to an employee during this run.
    pub fn night_shifts_this_run(&self, employee_id: &str) -> u32 {
        self.night_counts.get(employee_id).copied().unwrap_or(0)
    }

    /// Interpreted preference of an employee for a slot.
    pub fn preference(&self, employee_id: &str, slot: &ShiftSlot) -> Preference {
        self.preferences
            .preference(employee_id, slot.key.as_str(), &self.config.preference_codes)
    }

    /// Consumes the context, returning the slot assignments.
    pub fn into_assignments(self) -> HashMap<String, Vec<String>> {
        self.assignments
    }
}
