//! Roster (solution) model.
//!
//! A [`WeeklyRoster`] is the proposed assignment produced by one builder
//! run: who sits in each slot, the display form, which slots are short of
//! staff, and how many shifts each employee picked up this run.
//!
//! Maps are ordered (`BTreeMap`) so identical runs serialize identically.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::ShiftSlot;

/// Result of one weekly builder run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyRoster {
    /// Enumerated slots, in fill order.
    pub slots: Vec<ShiftSlot>,
    /// Slot key → assigned employee ids, in selection order.
    pub schedule_by_ids: BTreeMap<String, Vec<String>>,
    /// Slot key → joined display names, or the unfilled label.
    pub schedule_by_names: BTreeMap<String, String>,
    /// Slot keys assigned fewer employees than capacity, in fill order.
    pub unfilled_slots: Vec<String>,
    /// Employee id → shifts assigned this run (0 for unassigned employees).
    pub shifts_this_run: BTreeMap<String, u32>,
    /// Employee id → day shifts assigned this run.
    pub day_shifts_this_run: BTreeMap<String, u32>,
    /// Employee id → night shifts assigned this run.
    pub night_shifts_this_run: BTreeMap<String, u32>,
}

impl WeeklyRoster {
    /// Creates an empty roster.
    pub fn new() -> Self {
        Self::default()
    }

    /// Employee ids assigned to a slot (empty for unknown keys).
    pub fn assigned_to(&self, slot_key: &str) -> &[String] {
        self.schedule_by_ids
            .get(slot_key)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Whether an employee is assigned to a slot.
    pub fn is_assigned(&self, slot_key: &str, employee_id: &str) -> bool {
        self.assigned_to(slot_key).iter().any(|id| id == employee_id)
    }

    /// Slot keys an employee was assigned to, in fill order.
    pub fn slots_for_employee(&self, employee_id: &str) -> Vec<&str> {
        self.slots
            .iter()
            .map(|s| s.key.as_str())
            .filter(|key| self.is_assigned(key, employee_id))
            .collect()
    }

    /// Shifts an employee picked up this run.
    pub fn shifts_for(&self, employee_id: &str) -> u32 {
        self.shifts_this_run.get(employee_id).copied().unwrap_or(0)
    }

    /// Total number of seat assignments.
    pub fn assignment_count(&self) -> usize {
        self.schedule_by_ids.values().map(Vec::len).sum()
    }

    /// Whether every slot reached capacity.
    pub fn is_fully_staffed(&self) -> bool {
        self.unfilled_slots.is_empty()
    }
}
