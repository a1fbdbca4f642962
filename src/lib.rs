//! Weekly shift roster builder.
//!
//! Fills a week of (day, shift type) slots with employees, two per slot by
//! default, under hard rules and soft fairness goals:
//!
//! - nobody works a slot they marked as forbidden;
//! - nobody exceeds the weekly shift cap;
//! - nobody works a night and then the next morning's day shift, or a day
//!   and then the same evening's night shift;
//! - load is spread evenly within the week and across past weeks, stated
//!   preferences are honoured, and day/night exposure is balanced.
//!
//! The builder is greedy and never fails: slots nobody can fill are reported
//! as unfilled.
//!
//! # Modules
//!
//! - **`config`**: Rostering policy (`RosterConfig`), loadable from TOML
//! - **`models`**: Domain types — `Employee`, `PreferenceTable`, `WeekGrid`,
//!   `ShiftSlot`, `WeeklyRoster`, `OnCallRotation`
//! - **`eligibility`**: Hard rules deciding who may take a slot
//! - **`dispatching`**: Rule-based candidate ranking
//! - **`scheduler`**: Weekly builder, counter fold, and roster KPIs
//! - **`validation`**: Input integrity checks (duplicate IDs, unknown
//!   preference references, malformed preference values)
//!
//! # Example
//!
//! ```
//! use u_roster::config::RosterConfig;
//! use u_roster::models::{Employee, PreferenceTable, WeekGrid};
//! use u_roster::scheduler::{finalize_week, RosterKpi, WeeklyScheduleBuilder};
//!
//! let config = RosterConfig::default();
//! let employees: Vec<Employee> = ["Ann", "Bob", "Cy", "Dee", "Eve", "Fay"]
//!     .iter()
//!     .enumerate()
//!     .map(|(i, name)| Employee::new(format!("E{i}")).with_name(*name))
//!     .collect();
//! let preferences = PreferenceTable::new().with("E0", "Sunday_Night", "0");
//!
//! let builder = WeeklyScheduleBuilder::new(config.clone());
//! let roster = builder.build(&employees, &preferences, &WeekGrid::standard(), 3);
//! assert!(!roster.is_assigned("Sunday_Night", "E0"));
//!
//! let kpi = RosterKpi::calculate(&roster, config.seats_per_slot);
//! assert!(kpi.fill_rate > 0.0);
//!
//! let week = finalize_week(&employees, &roster.schedule_by_ids, &config, None);
//! let total: u32 = week.employees.iter().map(|e| e.total_shifts_assigned).sum();
//! assert_eq!(total as usize, roster.assignment_count());
//! ```

pub mod config;
pub mod dispatching;
pub mod eligibility;
pub mod models;
pub mod scheduler;
pub mod validation;
