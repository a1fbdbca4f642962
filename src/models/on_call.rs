//! On-call rotation.
//!
//! A fixed rotation order of employee ids with a pointer to whoever is on
//! call this week. The pointer advances by one, wrapping, each time a week
//! is finalized.

use serde::{Deserialize, Serialize};

/// On-call rotation state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnCallRotation {
    /// Employee ids in rotation order.
    #[serde(default)]
    pub rotation_order: Vec<String>,
    /// Index into `rotation_order` of the current on-call employee.
    #[serde(default)]
    pub current_index: usize,
}

impl OnCallRotation {
    /// Creates a rotation starting at the first entry.
    pub fn new<I>(order: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self {
            rotation_order: order.into_iter().map(Into::into).collect(),
            current_index: 0,
        }
    }

    /// Sets the current index.
    pub fn with_current_index(mut self, index: usize) -> Self {
        self.current_index = index;
        self
    }

    /// Id of the employee on call, if the index points into the rotation.
    pub fn current(&self) -> Option<&str> {
        self.rotation_order
            .get(self.current_index)
            .map(String::as_str)
    }

    /// Moves to the next employee, wrapping. No-op on an empty rotation.
    pub fn advance(&mut self) {
        if !self.rotation_order.is_empty() {
            self.current_index = (self.current_index + 1) % self.rotation_order.len();
        }
    }

    /// Whether the rotation has no members.
    pub fn is_empty(&self) -> bool {
        self.rotation_order.is_empty()
    }
}
