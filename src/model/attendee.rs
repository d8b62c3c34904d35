//! Attendee records for both check-in variants.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{Checkpoint, Station, Step};

/// Which stations an attendee has passed.
///
/// Flags only ever go from `false` to `true`. Visiting the VIP room
/// or exiting both imply having entered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendeeStatus {
    pub entered: bool,
    pub visited_vip: bool,
    pub exited: bool,
}

impl AttendeeStatus {
    /// A copy of this status with the flag for `station` set.
    #[must_use]
    pub fn passed(self, station: Station) -> Self {
        match station {
            Station::Entrada => Self {
                entered: true,
                ..self
            },
            Station::SalaVip => Self {
                visited_vip: true,
                ..self
            },
            Station::Saida => Self {
                exited: true,
                ..self
            },
        }
    }

    /// `visited_vip => entered` and `exited => entered`.
    pub fn is_consistent(self) -> bool {
        (!self.visited_vip || self.entered) && (!self.exited || self.entered)
    }
}

/// An attendee in the station-gated variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attendee {
    pub name: String,

    #[serde(rename = "canAccessVIP")]
    pub can_access_vip: bool,

    pub status: AttendeeStatus,
}

impl Attendee {
    /// A fresh attendee who has passed no station yet.
    pub fn new(name: impl Into<String>, can_access_vip: bool) -> Self {
        Self {
            name: name.into(),
            can_access_vip,
            status: AttendeeStatus::default(),
        }
    }

    /// A copy of this attendee carrying `status`.
    #[must_use]
    pub fn with_status(&self, status: AttendeeStatus) -> Self {
        Self {
            status,
            ..self.clone()
        }
    }
}

/// An attendee in the sequential variant. Never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepAttendee {
    pub name: String,
    pub required_step: Step,
}

impl StepAttendee {
    pub fn new(name: impl Into<String>, required_step: Step) -> Self {
        Self {
            name: name.into(),
            required_step,
        }
    }
}

/// The most recent admission, kept for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LastCheckIn {
    pub name: String,
    pub checkpoint: Checkpoint,
    pub at: Timestamp,
}

impl LastCheckIn {
    pub fn now(name: impl Into<String>, checkpoint: Checkpoint) -> Self {
        Self {
            name: name.into(),
            checkpoint,
            at: Timestamp::now(),
        }
    }
}
