//! Seed directories used on first launch and after a reset.

use super::{Attendee, Directory, Step, StepAttendee, TagId};

const ROSTER: [(&str, &str, bool); 4] = [
    ("TAG123", "João", false),
    ("TAG456", "Maria", true),
    ("TAG789", "Ana", true),
    ("TAG000", "Carlos", false),
];

fn tag(raw: &str) -> TagId {
    TagId(raw.to_string())
}

/// Four attendees, two of them VIP-eligible, none checked in.
pub fn station_directory() -> Directory<Attendee> {
    ROSTER
        .into_iter()
        .map(|(id, name, vip)| (tag(id), Attendee::new(name, vip)))
        .collect()
}

/// The same four tags, each cleared for one step in flow order.
pub fn step_directory() -> Directory<StepAttendee> {
    ROSTER
        .into_iter()
        .zip(Step::ALL)
        .map(|((id, name, _), step)| (tag(id), StepAttendee::new(name, step)))
        .collect()
}
