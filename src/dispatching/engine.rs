//! Rule engine for candidate ranking.
//!
//! Composes ranking rules into a lexicographic order with a configurable
//! final tie-breaker.

use std::cmp::Ordering;
use std::sync::Arc;

use super::rules;
use super::{RankingRule, RosterContext, RuleScore};
use crate::models::{Employee, ShiftSlot};

/// How ties are broken after all rules are exhausted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TieBreaker {
    /// Keep input order (stable sort).
    #[default]
    NextRule,
    /// Deterministic by employee ID (lexicographic).
    ById,
}

/// A composable rule engine for candidate ranking.
///
/// Rules are applied in sequence; the next rule is used only when the
/// previous ones tie within `epsilon`.
///
/// # Example
/// ```
/// use u_roster::dispatching::RuleEngine;
///
/// let engine = RuleEngine::roster_default();
/// assert_eq!(
///     engine.rule_names(),
///     vec!["RUN_LOAD", "LIFETIME_LOAD", "PREFERENCE", "SHIFT_TYPE_EXPOSURE"]
/// );
/// ```
#[derive(Clone)]
pub struct RuleEngine {
    rules: Vec<Arc<dyn RankingRule>>,
    tie_breaker: TieBreaker,
    epsilon: f64,
}

impl RuleEngine {
    /// Creates an empty rule engine.
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            tie_breaker: TieBreaker::NextRule,
            epsilon: 1e-9,
        }
    }

    /// The ranking used by the weekly builder: run load, lifetime load,
    /// preference, shift-type exposure, then employee id.
    pub fn roster_default() -> Self {
        Self::new()
            .with_rule(rules::RunLoad)
            .with_rule(rules::LifetimeLoad)
            .with_rule(rules::PreferenceRule)
            .with_rule(rules::ShiftTypeExposure)
            .with_final_tie_breaker(TieBreaker::ById)
    }

    /// Appends a rule to the chain.
    pub fn with_rule<R: RankingRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Sets the final tie-breaking strategy.
    pub fn with_final_tie_breaker(mut self, tie_breaker: TieBreaker) -> Self {
        self.tie_breaker = tie_breaker;
        self
    }

    /// Names of the rules in evaluation order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Sorts candidates, best first.
    ///
    /// Returns indices into `candidates`.
    pub fn sort_indices(
        &self,
        candidates: &[&Employee],
        slot: &ShiftSlot,
        context: &RosterContext<'_>,
    ) -> Vec<usize> {
        if candidates.is_empty() {
            return Vec::new();
        }

        let scores: Vec<Vec<RuleScore>> = candidates
            .iter()
            .map(|e| self.evaluate(e, slot, context))
            .collect();

        let mut indices: Vec<usize> = (0..candidates.len()).collect();
        indices.sort_by(|&a, &b| {
            self.compare_scores(&scores[a], &scores[b])
                .then_with(|| self.break_tie(candidates[a], candidates[b]))
        });
        indices
    }

    /// Returns the index of the best candidate.
    pub fn select_best(
        &self,
        candidates: &[&Employee],
        slot: &ShiftSlot,
        context: &RosterContext<'_>,
    ) -> Option<usize> {
        self.sort_indices(candidates, slot, context).first().copied()
    }

    /// Scores a single candidate with every rule, in chain order.
    pub fn evaluate(
        &self,
        employee: &Employee,
        slot: &ShiftSlot,
        context: &RosterContext<'_>,
    ) -> Vec<RuleScore> {
        self.rules
            .iter()
            .map(|rule| rule.evaluate(employee, slot, context))
            .collect()
    }

    fn compare_scores(&self, a: &[RuleScore], b: &[RuleScore]) -> Ordering {
        for (score_a, score_b) in a.iter().zip(b) {
            // inf - inf is NaN, so two infinite scores fall through as a tie
            if (score_a - score_b).abs() > self.epsilon {
                return score_a.partial_cmp(score_b).unwrap_or(Ordering::Equal);
            }
        }
        Ordering::Equal
    }

    fn break_tie(&self, a: &Employee, b: &Employee) -> Ordering {
        match &self.tie_breaker {
            TieBreaker::NextRule => Ordering::Equal,
            TieBreaker::ById => a.id.cmp(&b.id),
        }
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RuleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleEngine")
            .field("rules", &self.rule_names())
            .field("tie_breaker", &self.tie_breaker)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RosterConfig;
    use crate::models::{PreferenceTable, WeekGrid};

    fn grid() -> WeekGrid {
        WeekGrid::new(["Mon", "Tue"], ["Day", "Night"])
    }

    fn ids<'e>(candidates: &[&'e Employee], order: &[usize]) -> Vec<&'e str> {
        order.iter().map(|&i| candidates[i].id.as_str()).collect()
    }

    #[test]
    fn test_run_load_first() {
        let config = RosterConfig::default();
        let prefs = PreferenceTable::new();
        let grid = grid();
        let slots = grid.slots(&config);

        // A has already worked this run, B has a heavier history
        let a = Employee::new("A");
        let b = Employee::new("B").with_totals(50, 25, 25);
        let ctx = RosterContext::new(&config, &prefs, &grid, 3)
            .with_assignment(&slots[0], "A");

        let candidates = [&a, &b];
        let order = RuleEngine::roster_default().sort_indices(&candidates, &slots[2], &ctx);
        assert_eq!(ids(&candidates, &order), vec!["B", "A"]);
    }

    #[test]
    fn test_lifetime_load_before_preference() {
        let config = RosterConfig::default();
        let prefs = PreferenceTable::new().with("B", "Mon_Day", "1");
        let grid = grid();
        let slots = grid.slots(&config);
        let ctx = RosterContext::new(&config, &prefs, &grid, 3);

        let a = Employee::new("A").with_totals(1, 1, 0);
        let b = Employee::new("B").with_totals(2, 2, 0);
        let candidates = [&b, &a];
        let order = RuleEngine::roster_default().sort_indices(&candidates, &slots[0], &ctx);
        assert_eq!(ids(&candidates, &order), vec!["A", "B"]);
    }

    #[test]
    fn test_preference_before_exposure() {
        let config = RosterConfig::default();
        let prefs = PreferenceTable::new().with("B", "Mon_Night", "1");
        let grid = grid();
        let slots = grid.slots(&config);
        let ctx = RosterContext::new(&config, &prefs, &grid, 3);

        let a = Employee::new("A").with_totals(4, 4, 0);
        let b = Employee::new("B").with_totals(4, 0, 4);
        let candidates = [&a, &b];
        let order = RuleEngine::roster_default().sort_indices(&candidates, &slots[1], &ctx);
        assert_eq!(ids(&candidates, &order), vec!["B", "A"]);
    }

    #[test]
    fn test_exposure_uses_slot_kind() {
        let config = RosterConfig::default();
        let prefs = PreferenceTable::new();
        let grid = grid();
        let slots = grid.slots(&config);
        let ctx = RosterContext::new(&config, &prefs, &grid, 3);

        let day_heavy = Employee::new("A").with_totals(4, 3, 1);
        let night_heavy = Employee::new("B").with_totals(4, 1, 3);
        let candidates = [&day_heavy, &night_heavy];
        let engine = RuleEngine::roster_default();

        let day_order = engine.sort_indices(&candidates, &slots[0], &ctx);
        assert_eq!(ids(&candidates, &day_order), vec!["B", "A"]);

        let night_order = engine.sort_indices(&candidates, &slots[1], &ctx);
        assert_eq!(ids(&candidates, &night_order), vec!["A", "B"]);
    }

    #[test]
    fn test_by_id_tie_breaker() {
        let config = RosterConfig::default();
        let prefs = PreferenceTable::new();
        let grid = grid();
        let slots = grid.slots(&config);
        let ctx = RosterContext::new(&config, &prefs, &grid, 3);

        let b = Employee::new("B");
        let a = Employee::new("A");
        let c = Employee::new("C");
        let candidates = [&b, &c, &a];
        let order = RuleEngine::roster_default().sort_indices(&candidates, &slots[0], &ctx);
        assert_eq!(ids(&candidates, &order), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_next_rule_keeps_input_order() {
        let config = RosterConfig::default();
        let prefs = PreferenceTable::new();
        let grid = grid();
        let slots = grid.slots(&config);
        let ctx = RosterContext::new(&config, &prefs, &grid, 3);

        let b = Employee::new("B");
        let a = Employee::new("A");
        let candidates = [&b, &a];
        let engine = RuleEngine::new().with_rule(rules::RunLoad);
        let order = engine.sort_indices(&candidates, &slots[0], &ctx);
        assert_eq!(ids(&candidates, &order), vec!["B", "A"]);
    }

    #[test]
    fn test_anomalous_preference_ranks_last() {
        let config = RosterConfig::default();
        let prefs = PreferenceTable::new()
            .with("A", "Mon_Day", "maybe")
            .with("B", "Mon_Day", "??");
        let grid = grid();
        let slots = grid.slots(&config);
        let ctx = RosterContext::new(&config, &prefs, &grid, 3);

        let a = Employee::new("A");
        let b = Employee::new("B");
        let c = Employee::new("C").with_totals(0, 9, 9);
        let candidates = [&a, &b, &c];
        let order = RuleEngine::roster_default().sort_indices(&candidates, &slots[0], &ctx);
        // two infinite scores tie and fall through to the id
        assert_eq!(ids(&candidates, &order), vec!["C", "A", "B"]);
    }

    #[test]
    fn test_empty_candidates() {
        let config = RosterConfig::default();
        let prefs = PreferenceTable::new();
        let grid = grid();
        let slots = grid.slots(&config);
        let ctx = RosterContext::new(&config, &prefs, &grid, 3);

        let engine = RuleEngine::roster_default();
        assert!(engine.sort_indices(&[], &slots[0], &ctx).is_empty());
        assert!(engine.select_best(&[], &slots[0], &ctx).is_none());
    }

    #[test]
    fn test_evaluate_scores() {
        let config = RosterConfig::default();
        let prefs = PreferenceTable::new().with("A", "Mon_Night", "1");
        let grid = grid();
        let slots = grid.slots(&config);
        let ctx = RosterContext::new(&config, &prefs, &grid, 3)
            .with_assignment(&slots[0], "A");

        let a = Employee::new("A").with_totals(7, 4, 3);
        let scores = RuleEngine::roster_default().evaluate(&a, &slots[1], &ctx);
        assert_eq!(scores, vec![1.0, 7.0, 0.0, 3.0]);
    }
}
