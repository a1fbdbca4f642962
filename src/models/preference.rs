//! Employee shift preferences.
//!
//! The table is kept in its raw form (employee id → slot key → string) the
//! way the preference provider supplies it, and interpreted per lookup
//! against the configured [`PreferenceCodes`]. It need not be dense: a
//! missing employee row or slot column means neutral.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::config::PreferenceCodes;

/// Interpreted preference of one employee for one slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Preference {
    /// Must not be assigned.
    Forbidden,
    /// Explicitly wants the slot.
    Preferred,
    /// Available; no stated preference.
    Neutral,
    /// Unrecognized raw value. Eligible, but ranked last on preference.
    Anomalous(String),
}

impl Preference {
    /// Interprets a raw value. `None` (no entry) is neutral.
    pub fn parse(raw: Option<&str>, codes: &PreferenceCodes) -> Self {
        match raw {
            None => Self::Neutral,
            Some(v) if v == codes.forbidden => Self::Forbidden,
            Some(v) if v == codes.preferred => Self::Preferred,
            Some(v) if v == codes.neutral => Self::Neutral,
            Some(v) => Self::Anomalous(v.to_string()),
        }
    }

    /// Whether this is the hard veto.
    pub fn is_forbidden(&self) -> bool {
        matches!(self, Self::Forbidden)
    }
}

/// Raw preference table: employee id → slot key → raw value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PreferenceTable {
    entries: HashMap<String, HashMap<String, String>>,
}

impl PreferenceTable {
    /// Creates an empty table (everyone neutral everywhere).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a raw value, replacing any previous one.
    pub fn set(
        &mut self,
        employee_id: impl Into<String>,
        slot_key: impl Into<String>,
        value: impl Into<String>,
    ) {
        self.entries
            .entry(employee_id.into())
            .or_default()
            .insert(slot_key.into(), value.into());
    }

    /// Builder form of [`set`](Self::set).
    pub fn with(
        mut self,
        employee_id: impl Into<String>,
        slot_key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.set(employee_id, slot_key, value);
        self
    }

    /// Raw value for an employee and slot, if any.
    pub fn raw(&self, employee_id: &str, slot_key: &str) -> Option<&str> {
        self.entries
            .get(employee_id)
            .and_then(|row| row.get(slot_key))
            .map(String::as_str)
    }

    /// Interpreted preference for an employee and slot.
    pub fn preference(
        &self,
        employee_id: &str,
        slot_key: &str,
        codes: &PreferenceCodes,
    ) -> Preference {
        Preference::parse(self.raw(employee_id, slot_key), codes)
    }

    /// Iterates over employee rows.
    pub fn rows(&self) -> impl Iterator<Item = (&str, &HashMap<String, String>)> {
        self.entries.iter().map(|(id, row)| (id.as_str(), row))
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<HashMap<String, HashMap<String, String>>> for PreferenceTable {
    fn from(entries: HashMap<String, HashMap<String, String>>) -> Self {
        Self { entries }
    }
}
