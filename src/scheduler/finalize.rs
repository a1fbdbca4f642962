//! Counter fold applied once a proposed roster is accepted.
//!
//! The builder never touches lifetime counters. After the operator accepts
//! (and possibly edits) a week, [`finalize_week`] returns the employees with
//! every counter bumped for the shifts worked and the on-call rotation moved
//! one step.

use std::collections::BTreeMap;

use tracing::{debug, info};

use crate::config::RosterConfig;
use crate::models::{Employee, OnCallRotation, ShiftKind};

/// Employees and rotation after a week is committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinalizedWeek {
    /// Updated employees, sorted by lowercase name then id.
    pub employees: Vec<Employee>,
    /// Advanced rotation, when one was supplied.
    pub on_call: Option<OnCallRotation>,
}

/// Adds one week's assignments to the lifetime counters.
///
/// Every id in a slot adds one to `total_shifts_assigned` and, for day or
/// night slots, one to the matching counter. Ids not on the roster are
/// ignored, as are repeated roster entries after the first.
pub fn apply_assignments(
    employees: &[Employee],
    schedule_by_ids: &BTreeMap<String, Vec<String>>,
    config: &RosterConfig,
) -> Vec<Employee> {
    let mut by_id: BTreeMap<&str, Employee> = BTreeMap::new();
    for e in employees {
        by_id.entry(e.id.as_str()).or_insert_with(|| e.clone());
    }

    for (slot_key, ids) in schedule_by_ids {
        let kind = config.shift_kind_of_key(slot_key);
        for id in ids {
            let Some(employee) = by_id.get_mut(id.as_str()) else {
                debug!(employee_id = %id, slot = %slot_key, "Skipping unknown employee");
                continue;
            };
            employee.total_shifts_assigned = employee.total_shifts_assigned.saturating_add(1);
            match kind {
                ShiftKind::Day => {
                    employee.total_day_shifts_assigned =
                        employee.total_day_shifts_assigned.saturating_add(1)
                }
                ShiftKind::Night => {
                    employee.total_night_shifts_assigned =
                        employee.total_night_shifts_assigned.saturating_add(1)
                }
                ShiftKind::Other => {}
            }
        }
    }

    let mut updated: Vec<Employee> = by_id.into_values().collect();
    updated.sort_by(|a, b| {
        a.name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.id.cmp(&b.id))
    });
    updated
}

/// Commits a week: folds the counters and advances the on-call rotation.
pub fn finalize_week(
    employees: &[Employee],
    schedule_by_ids: &BTreeMap<String, Vec<String>>,
    config: &RosterConfig,
    on_call: Option<&OnCallRotation>,
) -> FinalizedWeek {
    let employees = apply_assignments(employees, schedule_by_ids, config);

    let on_call = on_call.map(|rotation| {
        let mut next = rotation.clone();
        next.advance();
        next
    });

    info!(
        employees = employees.len(),
        slots = schedule_by_ids.len(),
        on_call = on_call.as_ref().and_then(|r| r.current()).unwrap_or("-"),
        "Week finalized"
    );

    FinalizedWeek { employees, on_call }
}
