//! Outcome of an admission attempt.

use super::Step;

/// Why an attendee was turned away.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// No attendee is registered for the scanned tag.
    UnknownTag,

    /// The attendee already passed this station.
    DuplicateCheckIn,

    /// A prior station has not been passed (e.g. VIP room before entering).
    PreconditionNotMet,

    /// The attendee is not eligible for this station at all.
    NotEligible,

    /// The attendee's step is not the session's current step.
    WrongStep { required: Step, current: Step },
}

/// Verdict for one scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Admitted,
    Rejected(Rejection),
}

impl Outcome {
    pub fn is_admitted(self) -> bool {
        matches!(self, Self::Admitted)
    }

    /// Stable machine-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Admitted => "ADMITTED",
            Self::Rejected(Rejection::UnknownTag) => "REJECTED_UNKNOWN_TAG",
            Self::Rejected(Rejection::DuplicateCheckIn) => "REJECTED_DUPLICATE",
            Self::Rejected(Rejection::PreconditionNotMet) => "REJECTED_PRECONDITION",
            Self::Rejected(Rejection::NotEligible) => "REJECTED_NOT_ELIGIBLE",
            Self::Rejected(Rejection::WrongStep { .. }) => "REJECTED_WRONG_STEP",
        }
    }
}
