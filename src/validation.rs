//! Input validation for weekly roster requests.
//!
//! The builder itself never fails: it ignores unknown preference entries and
//! ranks malformed values last. Callers that want to surface bad input
//! instead of silently absorbing it run [`validate_request`] first. Detects:
//! - Empty rosters, empty and duplicate employee IDs
//! - Duplicate days and shift types in the grid
//! - A zero weekly cap
//! - Preference rows or columns that match no employee or slot
//! - Preference values outside the configured codes

use std::collections::HashSet;

use crate::config::RosterConfig;
use crate::models::Preference;
use crate::scheduler::RosterRequest;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// No employees to schedule.
    EmptyRoster,
    /// Two employees share the same ID.
    DuplicateId,
    /// An employee has an empty ID.
    EmptyId,
    /// A day appears twice in the grid.
    DuplicateDay,
    /// A shift type appears twice in the grid.
    DuplicateShiftType,
    /// The weekly cap is zero, so nothing can be assigned.
    ZeroWeeklyCap,
    /// A preference row names an employee not on the roster.
    UnknownEmployee,
    /// A preference column names a slot not in the grid.
    UnknownSlot,
    /// A preference value matches none of the configured codes.
    InvalidPreference,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a roster request against a policy.
///
/// Checks:
/// 1. The roster is not empty
/// 2. No employee ID is empty or repeated
/// 3. No day or shift type is repeated
/// 4. The weekly cap is positive
/// 5. Every preference row names a roster employee
/// 6. Every preference column names a grid slot
/// 7. Every preference value is one of the configured codes
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_request(request: &RosterRequest, config: &RosterConfig) -> ValidationResult {
    let mut errors = Vec::new();

    if request.employees.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyRoster,
            "Roster has no employees",
        ));
    }

    let mut employee_ids = HashSet::new();
    for e in &request.employees {
        if e.id.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyId,
                format!("Employee '{}' has an empty ID", e.name),
            ));
        }
        if !employee_ids.insert(e.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate employee ID: {}", e.id),
            ));
        }
    }

    let mut days = HashSet::new();
    for day in &request.grid.days {
        if !days.insert(day.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateDay,
                format!("Duplicate day: {day}"),
            ));
        }
    }

    let mut shift_types = HashSet::new();
    for shift_type in &request.grid.shift_types {
        if !shift_types.insert(shift_type.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateShiftType,
                format!("Duplicate shift type: {shift_type}"),
            ));
        }
    }

    if request.max_shifts_per_week == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::ZeroWeeklyCap,
            "Weekly cap is 0, no shift can be assigned",
        ));
    }

    let slot_keys: HashSet<String> = request
        .grid
        .slots(config)
        .into_iter()
        .map(|s| s.key.into_string())
        .collect();

    // Sorted so the error list is stable across runs
    let mut rows: Vec<_> = request.preferences.rows().collect();
    rows.sort_by_key(|(id, _)| *id);

    for (employee_id, row) in rows {
        if !employee_ids.contains(employee_id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownEmployee,
                format!("Preferences reference unknown employee '{employee_id}'"),
            ));
        }

        let mut cells: Vec<_> = row.iter().collect();
        cells.sort();

        for (slot_key, raw) in cells {
            if !slot_keys.contains(slot_key) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownSlot,
                    format!("Preferences of '{employee_id}' reference unknown slot '{slot_key}'"),
                ));
            }
            if let Preference::Anomalous(value) =
                Preference::parse(Some(raw.as_str()), &config.preference_codes)
            {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidPreference,
                    format!("Invalid preference '{value}' for '{employee_id}' in '{slot_key}'"),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
