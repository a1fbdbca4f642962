//! Hard eligibility rules for placing an employee in a slot.
//!
//! A candidate may be ranked for a slot only if all of these hold:
//!
//! 1. not already assigned to the slot;
//! 2. preference for the slot is not the forbidden code;
//! 3. shifts assigned this run are below the weekly cap;
//! 4. the no-consecutive-shift rule holds:
//!    - a day slot (other than on the first day) rejects whoever works the
//!      previous day's night slot;
//!    - a night slot rejects whoever works the same day's day slot.
//!
//! Nothing else is adjacent: back-to-back nights and back-to-back days are
//! allowed, a day slot is never checked against the same day's night slot,
//! and the week does not wrap from the last night to the first day.

use thiserror::Error;

use crate::dispatching::RosterContext;
use crate::models::{Employee, ShiftKind, ShiftSlot, SlotKey};

/// Reason a candidate was rejected for a slot.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Ineligibility {
    /// Already holds a seat in this slot.
    #[error("already assigned to this slot")]
    AlreadyAssigned,

    /// Marked the slot as cannot-work.
    #[error("slot is marked as forbidden")]
    Forbidden,

    /// Reached the weekly cap.
    #[error("weekly cap reached ({assigned}/{cap})")]
    WeeklyCapReached { assigned: u32, cap: u32 },

    /// Working this slot would make back-to-back shifts.
    #[error("consecutive with assignment to {conflicting_slot}")]
    ConsecutiveShift { conflicting_slot: SlotKey },
}

/// Checks whether `employee` may be considered for `slot`.
///
/// Rules are checked in order and the first failure is returned.
pub fn check_eligibility(
    employee: &Employee,
    slot: &ShiftSlot,
    context: &RosterContext<'_>,
) -> Result<(), Ineligibility> {
    let id = employee.id.as_str();

    if context.is_assigned(slot.key.as_str(), id) {
        return Err(Ineligibility::AlreadyAssigned);
    }

    if context.preference(id, slot).is_forbidden() {
        return Err(Ineligibility::Forbidden);
    }

    let assigned = context.shifts_this_run(id);
    if assigned >= context.max_shifts_per_week {
        return Err(Ineligibility::WeeklyCapReached {
            assigned,
            cap: context.max_shifts_per_week,
        });
    }

    if let Some(conflicting_slot) = consecutive_conflict(id, slot, context) {
        return Err(Ineligibility::ConsecutiveShift { conflicting_slot });
    }

    Ok(())
}

/// Whether `employee` passes every eligibility rule for `slot`.
pub fn is_eligible(employee: &Employee, slot: &ShiftSlot, context: &RosterContext<'_>) -> bool {
    check_eligibility(employee, slot, context).is_ok()
}

fn consecutive_conflict(
    employee_id: &str,
    slot: &ShiftSlot,
    context: &RosterContext<'_>,
) -> Option<SlotKey> {
    let neighbour = match slot.kind {
        ShiftKind::Day => context
            .grid
            .previous_day_key(slot.day_index, &context.config.night_shift_type)?,
        ShiftKind::Night => SlotKey::new(&slot.day, &context.config.day_shift_type),
        ShiftKind::Other => return None,
    };

    context
        .is_assigned(neighbour.as_str(), employee_id)
        .then_some(neighbour)
}
