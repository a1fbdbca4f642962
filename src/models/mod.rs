//! Rostering domain models.
//!
//! Provides the data types exchanged with the builder's collaborators: the
//! roster provider supplies [`Employee`]s and a [`PreferenceTable`], the
//! builder enumerates [`ShiftSlot`]s from a [`WeekGrid`] and returns a
//! [`WeeklyRoster`].
//!
//! # Domain Mappings
//!
//! | u-roster | Ward | Help desk | Security |
//! |----------|------|-----------|----------|
//! | Employee | Nurse | Agent | Guard |
//! | ShiftSlot | Day/night ward shift | Support window | Patrol watch |
//! | WeeklyRoster | Ward rota | Desk rota | Watch bill |

mod employee;
mod on_call;
mod preference;
mod roster;
mod slot;

pub use employee::Employee;
pub use on_call::OnCallRotation;
pub use preference::{Preference, PreferenceTable};
pub use roster::WeeklyRoster;
pub use slot::{ShiftKind, ShiftSlot, SlotKey, WeekGrid, SLOT_KEY_SEPARATOR};
