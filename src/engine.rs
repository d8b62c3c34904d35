//! Admission engine: pure decisions over a checkpoint and an attendee record.
//!
//! Nothing here touches storage or session state. Each evaluation takes
//! the current checkpoint and a record by value or reference and returns
//! an outcome, an optional replacement (new record or next step), and a
//! message for the operator. The session controllers apply the result.

pub mod station;
pub mod step;

use crate::model::TagId;

/// Operator message for a tag with no directory entry.
pub fn unknown_tag_message(tag: &TagId) -> String {
    format!("No attendee registered for tag {tag}.")
}
