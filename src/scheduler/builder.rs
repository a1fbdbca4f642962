//! Weekly schedule builder.
//!
//! # Algorithm
//!
//! 1. Enumerate slots day-major, type-minor.
//! 2. For each slot, until it holds `seats_per_slot` employees:
//!    filter the roster through the eligibility rules, rank the survivors
//!    with the rule engine, and seat the best one.
//! 3. A slot with no eligible candidate left is recorded as unfilled.
//!
//! Greedy and non-backtracking: a seated employee is never moved, even if a
//! later slot would have needed them more.
//!
//! # Complexity
//! O(s * c * n log n) where s=slots, c=seats per slot, n=employees.

use std::collections::{BTreeMap, HashSet};

use tracing::{debug, info, trace, warn};

use crate::config::RosterConfig;
use crate::dispatching::{RosterContext, RuleEngine};
use crate::eligibility::check_eligibility;
use crate::models::{
    Employee, Preference, PreferenceTable, ShiftSlot, SlotKey, WeekGrid, WeeklyRoster,
};

/// Input container for one builder run.
#[derive(Debug, Clone)]
pub struct RosterRequest {
    /// Employees available this week.
    pub employees: Vec<Employee>,
    /// Raw preference table.
    pub preferences: PreferenceTable,
    /// Days and shift types to fill.
    pub grid: WeekGrid,
    /// Maximum shifts any employee may take this week.
    pub max_shifts_per_week: u32,
}

impl RosterRequest {
    /// Creates a request for the standard week with the default weekly cap.
    pub fn new(employees: Vec<Employee>, preferences: PreferenceTable) -> Self {
        Self::from_config(employees, preferences, &RosterConfig::default())
    }

    /// Creates a request for the standard week using `config`'s weekly cap.
    pub fn from_config(
        employees: Vec<Employee>,
        preferences: PreferenceTable,
        config: &RosterConfig,
    ) -> Self {
        Self {
            employees,
            preferences,
            grid: WeekGrid::standard(),
            max_shifts_per_week: config.max_shifts_per_week,
        }
    }

    /// Sets the grid.
    pub fn with_grid(mut self, grid: WeekGrid) -> Self {
        self.grid = grid;
        self
    }

    /// Sets the weekly cap.
    pub fn with_max_shifts_per_week(mut self, cap: u32) -> Self {
        self.max_shifts_per_week = cap;
        self
    }
}

/// Greedy weekly schedule builder.
///
/// Pure: owns no state between runs, performs no I/O, and returns the same
/// roster for the same input regardless of roster order.
///
/// # Example
///
/// ```
/// use u_roster::config::RosterConfig;
/// use u_roster::models::{Employee, PreferenceTable, WeekGrid};
/// use u_roster::scheduler::WeeklyScheduleBuilder;
///
/// let employees = vec![
///     Employee::new("E1").with_name("Alice"),
///     Employee::new("E2").with_name("Bob"),
/// ];
/// let grid = WeekGrid::new(["Monday"], ["Day"]);
///
/// let builder = WeeklyScheduleBuilder::new(RosterConfig::default());
/// let roster = builder.build(&employees, &PreferenceTable::new(), &grid, 3);
/// assert_eq!(roster.schedule_by_ids["Monday_Day"], vec!["E1", "E2"]);
/// assert_eq!(roster.schedule_by_names["Monday_Day"], "Alice, Bob");
/// assert!(roster.unfilled_slots.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct WeeklyScheduleBuilder {
    config: RosterConfig,
    rule_engine: RuleEngine,
}

impl WeeklyScheduleBuilder {
    /// Creates a builder with the default ranking.
    pub fn new(config: RosterConfig) -> Self {
        Self {
            config,
            rule_engine: RuleEngine::roster_default(),
        }
    }

    /// Replaces the ranking.
    pub fn with_rule_engine(mut self, engine: RuleEngine) -> Self {
        self.rule_engine = engine;
        self
    }

    /// The policy this builder runs with.
    pub fn config(&self) -> &RosterConfig {
        &self.config
    }

    /// Builds one week's roster.
    ///
    /// Never fails. Preference entries for unknown employees or slots are
    /// ignored; if `employees` repeats an id, the first occurrence is used.
    /// A grid that repeats a day or shift type yields each slot key once.
    pub fn build(
        &self,
        employees: &[Employee],
        preferences: &PreferenceTable,
        grid: &WeekGrid,
        max_shifts_per_week: u32,
    ) -> WeeklyRoster {
        let seats = self.config.seats_per_slot;
        let slots = unique_slots(grid.slots(&self.config));

        let mut by_id: BTreeMap<&str, &Employee> = BTreeMap::new();
        for e in employees {
            by_id.entry(e.id.as_str()).or_insert(e);
        }
        let pool: Vec<&Employee> = by_id.values().copied().collect();

        info!(
            employees = pool.len(),
            slots = slots.len(),
            seats_per_slot = seats,
            max_shifts_per_week,
            "Building weekly roster"
        );
        if pool.is_empty() {
            warn!("Roster is empty, every slot will be unfilled");
        }

        let mut ctx = RosterContext::new(&self.config, preferences, grid, max_shifts_per_week);

        for slot in &slots {
            for (employee_id, value) in anomalous_preferences(&pool, slot, &ctx) {
                warn!(
                    employee_id,
                    slot = %slot.key,
                    value = %value,
                    "Unrecognized preference value, ranking candidate last"
                );
            }

            while ctx.assigned_to(slot.key.as_str()).len() < seats {
                let eligible: Vec<&Employee> = pool
                    .iter()
                    .copied()
                    .filter(|e| match check_eligibility(e, slot, &ctx) {
                        Ok(()) => true,
                        Err(reason) => {
                            trace!(
                                employee_id = %e.id,
                                slot = %slot.key,
                                %reason,
                                "Candidate rejected"
                            );
                            false
                        }
                    })
                    .collect();

                let chosen = match self.rule_engine.select_best(&eligible, slot, &ctx) {
                    Some(idx) => eligible[idx],
                    None => break,
                };

                debug!(
                    employee_id = %chosen.id,
                    slot = %slot.key,
                    candidates = eligible.len(),
                    scores = ?self.rule_engine.evaluate(chosen, slot, &ctx),
                    "Seat assigned"
                );
                ctx.record_assignment(slot, chosen.id.clone());
            }

            let filled = ctx.assigned_to(slot.key.as_str()).len();
            if filled < seats {
                warn!(slot = %slot.key, filled, seats, "Slot left short-staffed");
            }
        }

        let mut roster = WeeklyRoster::new();
        for e in &pool {
            roster
                .shifts_this_run
                .insert(e.id.clone(), ctx.shifts_this_run(&e.id));
            roster
                .day_shifts_this_run
                .insert(e.id.clone(), ctx.day_shifts_this_run(&e.id));
            roster
                .night_shifts_this_run
                .insert(e.id.clone(), ctx.night_shifts_this_run(&e.id));
        }

        let mut assignments = ctx.into_assignments();
        for slot in &slots {
            let key = slot.key.as_str();
            let ids = assignments.remove(key).unwrap_or_default();

            if ids.len() < seats {
                roster.unfilled_slots.push(key.to_string());
            }

            let names: Vec<&str> = ids
                .iter()
                .filter_map(|id| by_id.get(id.as_str()))
                .map(|e| e.display_name())
                .collect();
            let display = if names.is_empty() {
                self.config.unfilled_label.clone()
            } else {
                names.join(self.config.name_separator.as_str())
            };

            roster.schedule_by_names.insert(key.to_string(), display);
            roster.schedule_by_ids.insert(key.to_string(), ids);
        }
        roster.slots = slots;

        info!(
            assigned = roster.assignment_count(),
            unfilled = roster.unfilled_slots.len(),
            "Weekly roster built"
        );

        roster
    }

    /// Builds from a request.
    pub fn build_request(&self, request: &RosterRequest) -> WeeklyRoster {
        self.build(
            &request.employees,
            &request.preferences,
            &request.grid,
            request.max_shifts_per_week,
        )
    }
}

/// Drops slots whose key was already enumerated, keeping the first.
fn unique_slots(slots: Vec<ShiftSlot>) -> Vec<ShiftSlot> {
    let total = slots.len();
    let mut seen: HashSet<SlotKey> = HashSet::new();
    let unique: Vec<ShiftSlot> = slots
        .into_iter()
        .filter(|s| seen.insert(s.key.clone()))
        .collect();
    if unique.len() < total {
        warn!(
            dropped = total - unique.len(),
            "Grid repeats a day or shift type, duplicate slots ignored"
        );
    }
    unique
}

/// Candidates whose raw preference for `slot` matches none of the codes.
fn anomalous_preferences<'e>(
    pool: &[&'e Employee],
    slot: &ShiftSlot,
    context: &RosterContext<'_>,
) -> Vec<(&'e str, String)> {
    pool.iter()
        .filter_map(|e| match context.preference(&e.id, slot) {
            Preference::Anomalous(raw) => Some((e.id.as_str(), raw)),
            _ => None,
        })
        .collect()
}

impl Default for WeeklyScheduleBuilder {
    fn default() -> Self {
        Self::new(RosterConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatching::rules;

    fn employee(id: &str, name: &str) -> Employee {
        Employee::new(id).with_name(name)
    }

    fn build(
        employees: &[Employee],
        prefs: &PreferenceTable,
        grid: &WeekGrid,
        cap: u32,
    ) -> WeeklyRoster {
        WeeklyScheduleBuilder::default()
            .build(employees, prefs, grid, cap)
    }

    #[test]
    fn test_single_employee_day_night() {
        let employees = vec![employee("E1", "Alice")];
        let grid = WeekGrid::new(["Mon"], ["Day", "Night"]);
        let roster = build(&employees, &PreferenceTable::new(), &grid, 3);

        assert_eq!(roster.schedule_by_ids["Mon_Day"], vec!["E1"]);
        assert!(roster.schedule_by_ids["Mon_Night"].is_empty());
        assert_eq!(roster.schedule_by_names["Mon_Day"], "Alice");
        assert_eq!(roster.schedule_by_names["Mon_Night"], "UNFILLED");
        assert_eq!(roster.unfilled_slots, vec!["Mon_Day", "Mon_Night"]);
        assert_eq!(roster.shifts_this_run["E1"], 1);
        assert_eq!(roster.day_shifts_this_run["E1"], 1);
        assert_eq!(roster.night_shifts_this_run["E1"], 0);
    }

    #[test]
    fn test_two_tied_employees_fill_slot() {
        let employees = vec![employee("B", "Bob"), employee("A", "Ann")];
        let grid = WeekGrid::new(["Mon"], ["Day"]);
        let roster = build(&employees, &PreferenceTable::new(), &grid, 3);

        assert_eq!(roster.schedule_by_ids["Mon_Day"], vec!["A", "B"]);
        assert_eq!(roster.schedule_by_names["Mon_Day"], "Ann, Bob");
        assert!(roster.unfilled_slots.is_empty());
    }

    #[test]
    fn test_forbidden_everywhere_never_assigned() {
        let employees = vec![employee("A", "Ann"), employee("B", "Bob")];
        let grid = WeekGrid::new(["Mon", "Tue"], ["Day", "Night"]);
        let mut prefs = PreferenceTable::new();
        for slot in grid.slots(&RosterConfig::default()) {
            prefs.set("A", slot.key.as_str(), "0");
        }

        let roster = build(&employees, &prefs, &grid, 7);
        for ids in roster.schedule_by_ids.values() {
            assert!(!ids.iter().any(|id| id == "A"));
        }
        assert_eq!(roster.shifts_this_run["A"], 0);
        // B alone cannot fill any two-seat slot
        assert_eq!(roster.unfilled_slots.len(), 4);
    }

    #[test]
    fn test_lower_lifetime_load_chosen_first() {
        let employees = vec![
            employee("A", "Ann").with_totals(5, 3, 2),
            employee("B", "Bob").with_totals(2, 1, 1),
            employee("C", "Cy").with_totals(9, 5, 4),
        ];
        let grid = WeekGrid::new(["Mon"], ["Day"]);
        let roster = build(&employees, &PreferenceTable::new(), &grid, 3);

        assert_eq!(roster.schedule_by_ids["Mon_Day"], vec!["B", "A"]);
        assert_eq!(roster.shifts_this_run["C"], 0);
    }

    #[test]
    fn test_preference_breaks_lifetime_tie() {
        let employees = vec![
            employee("A", "Ann"),
            employee("B", "Bob"),
            employee("C", "Cy"),
        ];
        let prefs = PreferenceTable::new().with("C", "Mon_Day", "1");
        let grid = WeekGrid::new(["Mon"], ["Day"]);
        let roster = build(&employees, &prefs, &grid, 3);

        assert_eq!(roster.schedule_by_ids["Mon_Day"], vec!["C", "A"]);
    }

    #[test]
    fn test_weekly_cap_respected() {
        let employees = vec![employee("A", "Ann"), employee("B", "Bob")];
        let grid = WeekGrid::new(["Mon", "Tue", "Wed"], ["Day"]);
        let roster = build(&employees, &PreferenceTable::new(), &grid, 2);

        assert_eq!(roster.shifts_this_run["A"], 2);
        assert_eq!(roster.shifts_this_run["B"], 2);
        assert!(roster.schedule_by_ids["Wed_Day"].is_empty());
        assert_eq!(roster.unfilled_slots, vec!["Wed_Day"]);
    }

    #[test]
    fn test_night_then_next_day_blocked_in_loop() {
        // Four employees, Mon_Night goes to whoever is left after Mon_Day
        let employees: Vec<Employee> = ["A", "B", "C", "D"]
            .iter()
            .map(|id| employee(id, id))
            .collect();
        let grid = WeekGrid::new(["Mon", "Tue"], ["Day", "Night"]);
        let roster = build(&employees, &PreferenceTable::new(), &grid, 3);

        assert_eq!(roster.schedule_by_ids["Mon_Day"], vec!["A", "B"]);
        assert_eq!(roster.schedule_by_ids["Mon_Night"], vec!["C", "D"]);
        // C and D worked Mon_Night, so Tue_Day falls back to A and B
        assert_eq!(roster.schedule_by_ids["Tue_Day"], vec!["A", "B"]);
        // A and B just worked Tue_Day, so Tue_Night goes to C and D
        assert_eq!(roster.schedule_by_ids["Tue_Night"], vec!["C", "D"]);
        assert!(roster.unfilled_slots.is_empty());
    }

    #[test]
    fn test_unknown_preferences_ignored() {
        let employees = vec![employee("A", "Ann")];
        let prefs = PreferenceTable::new()
            .with("ghost", "Mon_Day", "1")
            .with("A", "Sun_Funday", "0");
        let grid = WeekGrid::new(["Mon"], ["Day"]);
        let roster = build(&employees, &prefs, &grid, 3);

        assert_eq!(roster.schedule_by_ids["Mon_Day"], vec!["A"]);
        assert!(!roster.shifts_this_run.contains_key("ghost"));
    }

    #[test]
    fn test_empty_roster_all_unfilled() {
        let grid = WeekGrid::standard();
        let roster = build(&[], &PreferenceTable::new(), &grid, 3);

        assert_eq!(roster.unfilled_slots.len(), 14);
        assert!(roster.schedule_by_names.values().all(|n| n == "UNFILLED"));
        assert!(roster.shifts_this_run.is_empty());
    }

    #[test]
    fn test_empty_grid_empty_result() {
        let employees = vec![employee("A", "Ann")];
        let grid = WeekGrid::new(Vec::<String>::new(), ["Day", "Night"]);
        let roster = build(&employees, &PreferenceTable::new(), &grid, 3);

        assert!(roster.slots.is_empty());
        assert!(roster.schedule_by_ids.is_empty());
        assert!(roster.unfilled_slots.is_empty());
        assert_eq!(roster.shifts_this_run["A"], 0);
    }

    #[test]
    fn test_duplicate_roster_id_first_wins() {
        let employees = vec![employee("A", "First"), employee("A", "Second")];
        let grid = WeekGrid::new(["Mon"], ["Day"]);
        let roster = build(&employees, &PreferenceTable::new(), &grid, 3);

        assert_eq!(roster.schedule_by_ids["Mon_Day"], vec!["A"]);
        assert_eq!(roster.schedule_by_names["Mon_Day"], "First");
    }

    #[test]
    fn test_duplicate_day_keeps_assignments() {
        let employees: Vec<Employee> = ["A", "B", "C", "D"]
            .iter()
            .map(|id| employee(id, id))
            .collect();
        let grid = WeekGrid::new(["Mon", "Mon"], ["Day", "Night"]);
        let roster = build(&employees, &PreferenceTable::new(), &grid, 3);

        assert_eq!(roster.slots.len(), 2);
        assert_eq!(roster.schedule_by_ids["Mon_Day"], vec!["A", "B"]);
        assert_eq!(roster.schedule_by_ids["Mon_Night"], vec!["C", "D"]);
        assert_eq!(roster.schedule_by_names["Mon_Day"], "A, B");
        assert!(roster.unfilled_slots.is_empty());

        let total: u32 = roster.shifts_this_run.values().sum();
        assert_eq!(total as usize, roster.assignment_count());
        assert_eq!(roster.assignment_count(), 4);
    }

    #[test]
    fn test_duplicate_shift_type_listed_once() {
        let employees = vec![employee("A", "Ann")];
        let grid = WeekGrid::new(["Mon"], ["Day", "Day"]);
        let roster = build(&employees, &PreferenceTable::new(), &grid, 3);

        assert_eq!(roster.schedule_by_ids["Mon_Day"], vec!["A"]);
        assert_eq!(roster.unfilled_slots, vec!["Mon_Day"]);
        assert_eq!(roster.shifts_this_run["A"], 1);
    }

    #[test]
    fn test_anomalous_preferences_reported_once_per_slot() {
        let config = RosterConfig::default();
        let prefs = PreferenceTable::new()
            .with("A", "Mon_Day", "maybe")
            .with("B", "Mon_Day", "1")
            .with("C", "Mon_Night", "??");
        let grid = WeekGrid::new(["Mon"], ["Day", "Night"]);
        let slots = grid.slots(&config);
        let ctx = RosterContext::new(&config, &prefs, &grid, 3);

        let a = employee("A", "Ann");
        let b = employee("B", "Bob");
        let c = employee("C", "Cy");
        let pool = [&a, &b, &c];

        assert_eq!(
            anomalous_preferences(&pool, &slots[0], &ctx),
            vec![("A", "maybe".to_string())]
        );
        assert_eq!(
            anomalous_preferences(&pool, &slots[1], &ctx),
            vec![("C", "??".to_string())]
        );
    }

    #[test]
    fn test_custom_config() {
        let config = RosterConfig::default()
            .with_seats_per_slot(3)
            .with_unfilled_label("-");
        let employees = vec![employee("A", "Ann"), employee("B", "Bob")];
        let grid = WeekGrid::new(["Mon"], ["Day", "Night"]);
        let roster = WeeklyScheduleBuilder::new(config)
            .build(&employees, &PreferenceTable::new(), &grid, 3);

        assert_eq!(roster.schedule_by_ids["Mon_Day"].len(), 2);
        assert_eq!(roster.schedule_by_names["Mon_Night"], "-");
        assert_eq!(roster.unfilled_slots, vec!["Mon_Day", "Mon_Night"]);
    }

    #[test]
    fn test_custom_rule_engine() {
        // Lifetime load only: the heavy employee is never picked over the light one
        let employees = vec![
            employee("A", "Ann").with_totals(10, 5, 5),
            employee("B", "Bob"),
        ];
        let config = RosterConfig::default().with_seats_per_slot(1);
        let engine = RuleEngine::new().with_rule(rules::LifetimeLoad);
        let grid = WeekGrid::new(["Mon", "Tue"], ["Day"]);
        let roster = WeeklyScheduleBuilder::new(config)
            .with_rule_engine(engine)
            .build(&employees, &PreferenceTable::new(), &grid, 3);

        assert_eq!(roster.schedule_by_ids["Mon_Day"], vec!["B"]);
        assert_eq!(roster.schedule_by_ids["Tue_Day"], vec!["B"]);
    }

    #[test]
    fn test_build_request() {
        let request = RosterRequest::new(
            vec![employee("A", "Ann"), employee("B", "Bob")],
            PreferenceTable::new(),
        )
        .with_grid(WeekGrid::new(["Mon"], ["Day"]))
        .with_max_shifts_per_week(1);

        let roster = WeeklyScheduleBuilder::default().build_request(&request);
        assert_eq!(roster.schedule_by_ids["Mon_Day"], vec!["A", "B"]);
    }

    #[test]
    fn test_request_from_config() {
        let config = RosterConfig::default().with_max_shifts_per_week(5);
        let request = RosterRequest::from_config(Vec::new(), PreferenceTable::new(), &config);
        assert_eq!(request.max_shifts_per_week, 5);
        assert_eq!(request.grid, WeekGrid::standard());
    }
}
