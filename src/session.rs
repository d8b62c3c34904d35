//! Session controllers.
//!
//! A controller owns the directory, the current checkpoint, and the
//! snapshot store. Each scan flows the same way:
//!
//! 1. Acquire a tag (scoped; the engine never runs if this fails).
//! 2. Resolve it in the directory; unknown tags stop here.
//! 3. Ask the engine for a verdict.
//! 4. On admission, save the new snapshot, then commit it in memory.
//! 5. Hand the report (or the fault) to the presenter.
//!
//! Nothing here runs concurrently. One scan finishes before the next starts.

mod station;
mod step;

pub use station::StationDesk;
pub use step::StepDesk;

use crate::engine;
use crate::model::{Checkpoint, Outcome, Rejection, TagId};
use crate::storage::StorageError;
use crate::tag::ScanError;

/// Faults that keep a scan from producing a verdict.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("tag acquisition failed: {0}")]
    Scan(#[from] ScanError),

    #[error("snapshot failed: {0}")]
    Persistence(#[from] StorageError),
}

/// The verdict for one scan, as shown to the operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanReport {
    pub tag: TagId,
    pub checkpoint: Checkpoint,
    pub outcome: Outcome,

    /// The resolved attendee's name. `None` for unknown tags.
    pub attendee: Option<String>,

    pub message: String,
}

impl ScanReport {
    fn unknown_tag(tag: &TagId, checkpoint: Checkpoint) -> Self {
        Self {
            tag: tag.clone(),
            checkpoint,
            outcome: Outcome::Rejected(Rejection::UnknownTag),
            attendee: None,
            message: engine::unknown_tag_message(tag),
        }
    }
}
