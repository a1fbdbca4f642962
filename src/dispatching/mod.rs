//! Candidate ranking for shift slots.
//!
//! Eligible candidates for a slot are ordered by a chain of ranking rules
//! evaluated in sequence; a later rule is consulted only when every earlier
//! rule ties. The roster default chain is:
//!
//! 1. [`rules::RunLoad`]: shifts already assigned this run
//! 2. [`rules::LifetimeLoad`]: lifetime shift total
//! 3. [`rules::PreferenceRule`]: stated preference for the slot
//! 4. [`rules::ShiftTypeExposure`]: lifetime day or night total
//! 5. employee id, lexicographic ([`TieBreaker::ById`])
//!
//! # Usage
//!
//! ```
//! use u_roster::dispatching::{rules, RuleEngine, TieBreaker};
//!
//! let engine = RuleEngine::new()
//!     .with_rule(rules::RunLoad)
//!     .with_rule(rules::PreferenceRule)
//!     .with_final_tie_breaker(TieBreaker::ById);
//! assert_eq!(engine.rule_names(), vec!["RUN_LOAD", "PREFERENCE"]);
//! ```

mod context;
mod engine;
pub mod rules;

pub use context::RosterContext;
pub use engine::{RuleEngine, TieBreaker};
pub use rules::preference_score;

use crate::models::{Employee, ShiftSlot};
use std::fmt::Debug;

/// Score returned by a ranking rule.
///
/// Lower scores = ranked first.
pub type RuleScore = f64;

/// A rule that scores a candidate for a slot.
///
/// # Score Convention
/// **Lower score = better candidate.** Scores may be `f64::INFINITY`;
/// two infinite scores tie.
pub trait RankingRule: Send + Sync + Debug {
    /// Rule name (e.g., "RUN_LOAD").
    fn name(&self) -> &'static str;

    /// Scores `employee` for `slot` given the run so far.
    fn evaluate(
        &self,
        employee: &Employee,
        slot: &ShiftSlot,
        context: &RosterContext<'_>,
    ) -> RuleScore;

    /// Rule description.
    fn description(&self) -> &'static str {
        self.name()
    }
}
