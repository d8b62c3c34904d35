//! Output formatting for CLI display.

use crate::model::{Attendee, AttendeeStatus, Directory, Step, StepAttendee};

/// One line per attendee: tag, name, VIP eligibility, stations passed.
pub(super) fn format_station_directory(directory: &Directory<Attendee>) -> String {
    if directory.is_empty() {
        return "No attendees".to_string();
    }
    directory
        .iter()
        .map(|(tag, a)| {
            let vip = if a.can_access_vip { "vip" } else { "   " };
            format!(
                "{tag:<8}  {:<12}  {vip}  {}",
                a.name,
                format_passed(a.status)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_passed(status: AttendeeStatus) -> String {
    let passed: Vec<&str> = [
        (status.entered, "entered"),
        (status.visited_vip, "vip room"),
        (status.exited, "exited"),
    ]
    .into_iter()
    .filter_map(|(set, label)| set.then_some(label))
    .collect();

    if passed.is_empty() {
        "[not checked in]".to_string()
    } else {
        format!("[{}]", passed.join(", "))
    }
}

/// One line per attendee with their step; `>` marks who can pass now.
pub(super) fn format_step_directory(directory: &Directory<StepAttendee>, current: Step) -> String {
    if directory.is_empty() {
        return "No attendees".to_string();
    }
    directory
        .iter()
        .map(|(tag, a)| {
            let marker = if a.required_step == current { ">" } else { " " };
            format!("{marker} {tag:<8}  {:<12}  {}", a.name, a.required_step)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
