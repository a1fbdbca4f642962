//! Built-in ranking rules.
//!
//! # Categories
//!
//! - **Load**: RUN_LOAD, LIFETIME_LOAD
//! - **Preference**: PREFERENCE
//! - **Exposure**: SHIFT_TYPE_EXPOSURE
//!
//! # Score Convention
//! All rules return lower scores for candidates that should be picked first.

use tracing::debug;

use super::{RankingRule, RosterContext, RuleScore};
use crate::models::{Employee, Preference, ShiftSlot};

/// Converts a preference into a ranking score.
///
/// | Preference | Score |
/// |------------|-------|
/// | Preferred | 0 |
/// | Neutral / absent | 1 |
/// | Forbidden, anomalous | `f64::INFINITY` |
///
/// Forbidden candidates never reach ranking (the eligibility filter drops
/// them), so in practice only malformed values score infinity.
pub fn preference_score(preference: &Preference) -> RuleScore {
    match preference {
        Preference::Preferred => 0.0,
        Preference::Neutral => 1.0,
        Preference::Forbidden | Preference::Anomalous(_) => f64::INFINITY,
    }
}

// ======================== Load rules ========================

/// Shifts already assigned during the current run.
///
/// Spreads the week being built evenly before anything else.
#[derive(Debug, Clone, Copy)]
pub struct RunLoad;

impl RankingRule for RunLoad {
    fn name(&self) -> &'static str {
        "RUN_LOAD"
    }

    fn evaluate(
        &self,
        employee: &Employee,
        _slot: &ShiftSlot,
        context: &RosterContext<'_>,
    ) -> RuleScore {
        context.shifts_this_run(&employee.id) as f64
    }

    fn description(&self) -> &'static str {
        "Fewest shifts this run"
    }
}

/// Lifetime shift total.
///
/// Balances load across past weeks.
#[derive(Debug, Clone, Copy)]
pub struct LifetimeLoad;

impl RankingRule for LifetimeLoad {
    fn name(&self) -> &'static str {
        "LIFETIME_LOAD"
    }

    fn evaluate(
        &self,
        employee: &Employee,
        _slot: &ShiftSlot,
        _context: &RosterContext<'_>,
    ) -> RuleScore {
        employee.total_shifts_assigned as f64
    }

    fn description(&self) -> &'static str {
        "Fewest lifetime shifts"
    }
}

// ======================== Preference rules ========================

/// Stated preference for the slot, scored by [`preference_score`].
#[derive(Debug, Clone, Copy)]
pub struct PreferenceRule;

impl RankingRule for PreferenceRule {
    fn name(&self) -> &'static str {
        "PREFERENCE"
    }

    fn evaluate(
        &self,
        employee: &Employee,
        slot: &ShiftSlot,
        context: &RosterContext<'_>,
    ) -> RuleScore {
        let preference = context.preference(&employee.id, slot);
        if let Preference::Anomalous(raw) = &preference {
            debug!(
                employee_id = %employee.id,
                slot = %slot.key,
                value = %raw,
                "Scoring unrecognized preference value"
            );
        }
        preference_score(&preference)
    }

    fn description(&self) -> &'static str {
        "Preferred before neutral before malformed"
    }
}

// ======================== Exposure rules ========================

/// Lifetime count of the slot's shift kind.
///
/// Day slots look at the day total, night slots at the night total. Other
/// shift types score 0 for everyone, so the rule never separates them.
#[derive(Debug, Clone, Copy)]
pub struct ShiftTypeExposure;

impl RankingRule for ShiftTypeExposure {
    fn name(&self) -> &'static str {
        "SHIFT_TYPE_EXPOSURE"
    }

    fn evaluate(
        &self,
        employee: &Employee,
        slot: &ShiftSlot,
        _context: &RosterContext<'_>,
    ) -> RuleScore {
        employee.lifetime_shifts_of_kind(slot.kind) as f64
    }

    fn description(&self) -> &'static str {
        "Fewest lifetime shifts of this type"
    }
}
