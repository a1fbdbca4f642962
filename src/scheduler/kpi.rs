//! Roster quality metrics (KPIs).
//!
//! Computes coverage and fairness indicators from a built roster.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Fill Rate | Filled seats / total seats |
//! | Unfilled Slots | Slots below capacity |
//! | Empty Slots | Slots with nobody assigned |
//! | Load Spread | max - min shifts this run across the roster |
//! | Idle Employees | Employees with no shift this run |

use crate::models::WeeklyRoster;

/// Roster performance indicators.
#[derive(Debug, Clone, PartialEq)]
pub struct RosterKpi {
    /// Slots times seats per slot.
    pub total_seats: usize,
    /// Seats actually assigned.
    pub filled_seats: usize,
    /// Fraction of seats filled (0.0..1.0, 1.0 for an empty grid).
    pub fill_rate: f64,
    /// Slots assigned fewer employees than capacity.
    pub unfilled_slot_count: usize,
    /// Slots with no employee at all.
    pub empty_slot_count: usize,
    /// Fewest shifts any employee received this run.
    pub min_shifts: u32,
    /// Most shifts any employee received this run.
    pub max_shifts: u32,
    /// `max_shifts - min_shifts`.
    pub load_spread: u32,
    /// Employees who received no shift this run.
    pub idle_employees: usize,
}

impl RosterKpi {
    /// Computes KPIs from a roster and the per-slot capacity it was built with.
    pub fn calculate(roster: &WeeklyRoster, seats_per_slot: usize) -> Self {
        let total_seats = roster.slots.len() * seats_per_slot;
        let filled_seats = roster.assignment_count();

        let fill_rate = if total_seats == 0 {
            1.0
        } else {
            filled_seats as f64 / total_seats as f64
        };

        let empty_slot_count = roster
            .slots
            .iter()
            .filter(|s| roster.assigned_to(s.key.as_str()).is_empty())
            .count();

        let min_shifts = roster.shifts_this_run.values().copied().min().unwrap_or(0);
        let max_shifts = roster.shifts_this_run.values().copied().max().unwrap_or(0);
        let idle_employees = roster.shifts_this_run.values().filter(|&&n| n == 0).count();

        Self {
            total_seats,
            filled_seats,
            fill_rate,
            unfilled_slot_count: roster.unfilled_slots.len(),
            empty_slot_count,
            min_shifts,
            max_shifts,
            load_spread: max_shifts - min_shifts,
            idle_employees,
        }
    }

    /// Whether the roster meets the given quality thresholds.
    pub fn meets_thresholds(&self, min_fill_rate: f64, max_spread: u32) -> bool {
        self.fill_rate >= min_fill_rate && self.load_spread <= max_spread
    }
}
