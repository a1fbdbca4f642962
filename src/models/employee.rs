//! Employee model.
//!
//! Employees are the people placed into shift slots. Besides identity they
//! carry three lifetime counters owned by the persistence layer; the builder
//! only reads them (for fairness ranking) and returns per-run counts for the
//! caller to fold back in.

use serde::{Deserialize, Serialize};

use super::ShiftKind;

/// An employee eligible for rostering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique, opaque employee identifier.
    pub id: String,
    /// Display name. Never used for assignment logic.
    #[serde(default)]
    pub name: String,
    /// Lifetime number of shifts assigned.
    #[serde(default)]
    pub total_shifts_assigned: u32,
    /// Lifetime number of day shifts assigned.
    #[serde(default)]
    pub total_day_shifts_assigned: u32,
    /// Lifetime number of night shifts assigned.
    #[serde(default)]
    pub total_night_shifts_assigned: u32,
}

impl Employee {
    /// Creates an employee with zeroed lifetime counters.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            total_shifts_assigned: 0,
            total_day_shifts_assigned: 0,
            total_night_shifts_assigned: 0,
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets all three lifetime counters.
    pub fn with_totals(mut self, total: u32, day: u32, night: u32) -> Self {
        self.total_shifts_assigned = total;
        self.total_day_shifts_assigned = day;
        self.total_night_shifts_assigned = night;
        self
    }

    /// Lifetime count matching a shift kind.
    ///
    /// Shift types that are neither day nor night have no dedicated counter
    /// and report 0.
    pub fn lifetime_shifts_of_kind(&self, kind: ShiftKind) -> u32 {
        match kind {
            ShiftKind::Day => self.total_day_shifts_assigned,
            ShiftKind::Night => self.total_night_shifts_assigned,
            ShiftKind::Other => 0,
        }
    }

    /// Name used for display, falling back to the id when no name is set.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.id
        } else {
            &self.name
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_employee_builder() {
        let e = Employee::new("E1").with_name("Alice").with_totals(10, 6, 4);
        assert_eq!(e.id, "E1");
        assert_eq!(e.name, "Alice");
        assert_eq!(e.total_shifts_assigned, 10);
        assert_eq!(e.lifetime_shifts_of_kind(ShiftKind::Day), 6);
        assert_eq!(e.lifetime_shifts_of_kind(ShiftKind::Night), 4);
        assert_eq!(e.lifetime_shifts_of_kind(ShiftKind::Other), 0);
    }

    #[test]
    fn test_display_name_fallback() {
        assert_eq!(Employee::new("E1").display_name(), "E1");
        assert_eq!(Employee::new("E1").with_name("Bob").display_name(), "Bob");
    }

    #[test]
    fn test_missing_counters_default_to_zero() {
        let e: Employee = serde_json::from_str(r#"{"id": "E7", "name": "Gil"}"#).unwrap();
        assert_eq!(e.total_shifts_assigned, 0);
        assert_eq!(e.total_day_shifts_assigned, 0);
        assert_eq!(e.total_night_shifts_assigned, 0);
    }
}
