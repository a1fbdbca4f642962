//! Rostering policy configuration.
//!
//! Every constant the builder relies on (seats per slot, the weekly cap,
//! preference codes, the day/night shift type labels, display labels) lives
//! in [`RosterConfig`], so eligibility and scoring can be exercised in
//! isolation with non-default policies.
//!
//! The defaults reproduce the deployed policy: 2 seats per slot, at most 3
//! shifts per employee per week, preference codes `"0"` / `"1"` / `""`,
//! shift types `Day` and `Night`.
//!
//! # Loading
//!
//! ```
//! use u_roster::config::RosterConfig;
//!
//! let config = RosterConfig::from_toml_str("seats_per_slot = 3").unwrap();
//! assert_eq!(config.seats_per_slot, 3);
//! assert_eq!(config.max_shifts_per_week, 3);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::ShiftKind;

/// Errors raised while loading or validating a [`RosterConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The TOML document could not be parsed.
    #[error("failed to parse roster config: {0}")]
    Parse(#[from] toml::de::Error),

    /// The configuration could not be rendered as TOML.
    #[error("failed to serialize roster config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// Slots must hold at least one employee.
    #[error("seats_per_slot must be at least 1")]
    ZeroSeats,

    /// The weekly cap must be positive.
    #[error("max_shifts_per_week must be at least 1")]
    ZeroWeeklyCap,

    /// Two preference codes share the same string.
    #[error("preference codes must be distinct: {code:?} is used for both {a} and {b}")]
    AmbiguousPreferenceCode {
        code: String,
        a: &'static str,
        b: &'static str,
    },

    /// The day and night shift type labels are empty or equal.
    #[error("invalid shift type labels: day={day:?}, night={night:?}")]
    InvalidShiftTypes { day: String, night: String },
}

/// Raw preference values understood by the builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreferenceCodes {
    /// Employee must not be assigned (hard veto).
    pub forbidden: String,
    /// Employee explicitly wants the slot.
    pub preferred: String,
    /// Employee is available; also the meaning of a missing entry.
    pub neutral: String,
}

impl Default for PreferenceCodes {
    fn default() -> Self {
        Self {
            forbidden: "0".to_string(),
            preferred: "1".to_string(),
            neutral: String::new(),
        }
    }
}

/// Policy for one builder run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RosterConfig {
    /// Employees required per slot.
    pub seats_per_slot: usize,
    /// Default weekly cap used by [`crate::scheduler::RosterRequest::from_config`].
    pub max_shifts_per_week: u32,
    /// Shift type label treated as the day shift.
    pub day_shift_type: String,
    /// Shift type label treated as the night shift.
    pub night_shift_type: String,
    /// Display value for a slot with nobody assigned.
    pub unfilled_label: String,
    /// Separator between names in `schedule_by_names`.
    pub name_separator: String,
    /// Raw preference codes.
    pub preference_codes: PreferenceCodes,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            seats_per_slot: 2,
            max_shifts_per_week: 3,
            day_shift_type: "Day".to_string(),
            night_shift_type: "Night".to_string(),
            unfilled_label: "UNFILLED".to_string(),
            name_separator: ", ".to_string(),
            preference_codes: PreferenceCodes::default(),
        }
    }
}

impl RosterConfig {
    /// Creates the default policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses and validates a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Renders the configuration as TOML.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string(self)?)
    }

    /// Sets the number of seats per slot.
    pub fn with_seats_per_slot(mut self, seats: usize) -> Self {
        self.seats_per_slot = seats;
        self
    }

    /// Sets the default weekly cap.
    pub fn with_max_shifts_per_week(mut self, cap: u32) -> Self {
        self.max_shifts_per_week = cap;
        self
    }

    /// Sets the day and night shift type labels.
    pub fn with_shift_types(mut self, day: impl Into<String>, night: impl Into<String>) -> Self {
        self.day_shift_type = day.into();
        self.night_shift_type = night.into();
        self
    }

    /// Sets the preference codes.
    pub fn with_preference_codes(mut self, codes: PreferenceCodes) -> Self {
        self.preference_codes = codes;
        self
    }

    /// Sets the label shown for empty slots.
    pub fn with_unfilled_label(mut self, label: impl Into<String>) -> Self {
        self.unfilled_label = label.into();
        self
    }

    /// Checks the policy for internal consistency.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.seats_per_slot == 0 {
            return Err(ConfigError::ZeroSeats);
        }
        if self.max_shifts_per_week == 0 {
            return Err(ConfigError::ZeroWeeklyCap);
        }

        let codes = &self.preference_codes;
        let pairs = [
            (&codes.forbidden, "forbidden", &codes.preferred, "preferred"),
            (&codes.forbidden, "forbidden", &codes.neutral, "neutral"),
            (&codes.preferred, "preferred", &codes.neutral, "neutral"),
        ];
        for (x, a, y, b) in pairs {
            if x == y {
                return Err(ConfigError::AmbiguousPreferenceCode {
                    code: x.clone(),
                    a,
                    b,
                });
            }
        }

        if self.day_shift_type.is_empty()
            || self.night_shift_type.is_empty()
            || self.day_shift_type == self.night_shift_type
        {
            return Err(ConfigError::InvalidShiftTypes {
                day: self.day_shift_type.clone(),
                night: self.night_shift_type.clone(),
            });
        }

        Ok(())
    }

    /// Classifies a shift type label.
    pub fn shift_kind(&self, shift_type: &str) -> ShiftKind {
        if shift_type == self.day_shift_type {
            ShiftKind::Day
        } else if shift_type == self.night_shift_type {
            ShiftKind::Night
        } else {
            ShiftKind::Other
        }
    }

    /// Classifies a rendered slot key (`"<Day>_<Type>"`) by its type suffix.
    pub fn shift_kind_of_key(&self, key: &str) -> ShiftKind {
        let has_type = |t: &str| {
            key.strip_suffix(t)
                .is_some_and(|rest| rest.ends_with(crate::models::SLOT_KEY_SEPARATOR))
        };
        if has_type(&self.day_shift_type) {
            ShiftKind::Day
        } else if has_type(&self.night_shift_type) {
            ShiftKind::Night
        } else {
            ShiftKind::Other
        }
    }
}
