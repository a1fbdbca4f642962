//! Shift slots and the weekly grid.
//!
//! A slot is one (day, shift type) cell of the week. [`WeekGrid::slots`]
//! enumerates them day-major, type-minor; the builder fills slots strictly
//! in that order, so earlier slots get first claim on scarce candidates.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::RosterConfig;

/// Separator between day and shift type in a rendered slot key.
pub const SLOT_KEY_SEPARATOR: char = '_';

/// Classification of a shift type against the configured day/night labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShiftKind {
    /// The configured day shift.
    Day,
    /// The configured night shift.
    Night,
    /// Any other shift type. Not subject to the consecutive-shift rule.
    Other,
}

/// Composite slot key, rendered as `"<Day>_<Type>"`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotKey(String);

impl SlotKey {
    /// Builds the key for a day and shift type.
    pub fn new(day: &str, shift_type: &str) -> Self {
        Self(format!("{day}{SLOT_KEY_SEPARATOR}{shift_type}"))
    }

    /// The rendered key.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the key, returning the rendered string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SlotKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// One cell of the weekly grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftSlot {
    /// Day label.
    pub day: String,
    /// Position of `day` in the ordered day list.
    pub day_index: usize,
    /// Shift type label.
    pub shift_type: String,
    /// Day/night classification of `shift_type`.
    pub kind: ShiftKind,
    /// Rendered key.
    pub key: SlotKey,
}

impl ShiftSlot {
    /// Creates a slot, classifying its shift type with `config`.
    pub fn new(day: &str, day_index: usize, shift_type: &str, config: &RosterConfig) -> Self {
        Self {
            day: day.to_string(),
            day_index,
            shift_type: shift_type.to_string(),
            kind: config.shift_kind(shift_type),
            key: SlotKey::new(day, shift_type),
        }
    }
}

/// Ordered days and shift types defining one week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekGrid {
    /// Days in chronological order.
    pub days: Vec<String>,
    /// Shift types in fill order within a day.
    pub shift_types: Vec<String>,
}

impl WeekGrid {
    /// Creates a grid from ordered days and shift types.
    pub fn new<D, T>(days: D, shift_types: T) -> Self
    where
        D: IntoIterator,
        D::Item: Into<String>,
        T: IntoIterator,
        T::Item: Into<String>,
    {
        Self {
            days: days.into_iter().map(Into::into).collect(),
            shift_types: shift_types.into_iter().map(Into::into).collect(),
        }
    }

    /// Sunday through Saturday, `Day` then `Night`.
    pub fn standard() -> Self {
        Self::new(
            [
                "Sunday",
                "Monday",
                "Tuesday",
                "Wednesday",
                "Thursday",
                "Friday",
                "Saturday",
            ],
            ["Day", "Night"],
        )
    }

    /// Enumerates slots day-major, type-minor.
    ///
    /// Empty days or empty shift types yield no slots.
    pub fn slots(&self, config: &RosterConfig) -> Vec<ShiftSlot> {
        self.days
            .iter()
            .enumerate()
            .flat_map(|(day_index, day)| {
                self.shift_types
                    .iter()
                    .map(move |stype| ShiftSlot::new(day, day_index, stype, config))
            })
            .collect()
    }

    /// Key of the slot for `shift_type` on the day before `day_index`.
    ///
    /// `None` on the first day; the week does not wrap.
    pub fn previous_day_key(&self, day_index: usize, shift_type: &str) -> Option<SlotKey> {
        let prev = day_index.checked_sub(1)?;
        self.days.get(prev).map(|day| SlotKey::new(day, shift_type))
    }

    /// Number of slots in the grid.
    pub fn slot_count(&self) -> usize {
        self.days.len() * self.shift_types.len()
    }
}
