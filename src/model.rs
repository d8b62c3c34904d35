//! Core data model for check-in.
//!
//! These types describe the event floor: attendees keyed by tag,
//! the checkpoints they pass (stations or sequential steps),
//! and the outcome of each admission attempt.

mod attendee;
mod checkpoint;
mod directory;
mod outcome;
pub mod seed;

pub use attendee::{Attendee, AttendeeStatus, LastCheckIn, StepAttendee};
pub use checkpoint::{Checkpoint, Station, Step, UnknownCheckpoint};
pub use directory::{Directory, TagId};
pub use outcome::{Outcome, Rejection};
