//! Weekly roster builder, counter fold, and KPI evaluation.
//!
//! # Algorithm
//!
//! `WeeklyScheduleBuilder` fills slots in day-major order with a greedy,
//! rule-ranked, non-backtracking heuristic. It is not optimal, but it is
//! fast, deterministic, and never fails.
//!
//! # Finalization
//!
//! `finalize_week` folds an accepted week into the employees' lifetime
//! counters and advances the on-call rotation.
//!
//! # KPI
//!
//! `RosterKpi` computes coverage and fairness metrics: fill rate, unfilled
//! and empty slots, and the spread of shifts per employee.

mod builder;
mod finalize;
mod kpi;

pub use builder::{RosterRequest, WeeklyScheduleBuilder};
pub use finalize::{apply_assignments, finalize_week, FinalizedWeek};
pub use kpi::RosterKpi;
