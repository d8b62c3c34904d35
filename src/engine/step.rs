//! Sequential step-gated admission.
//!
//! The session holds one current step shared by every attendee.
//! An attendee passes only when their required step is the current one,
//! and each admission moves the session to the next step.

use crate::model::{Outcome, Rejection, Step, StepAttendee};

/// Result of evaluating one attendee against the session's step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    pub outcome: Outcome,

    /// The session's new step. Only present when admitted.
    pub next_step: Option<Step>,

    pub message: String,
}

/// Decide whether `attendee` may pass while the session is at `current`.
pub fn evaluate(current: Step, attendee: &StepAttendee) -> Evaluation {
    let required = attendee.required_step;
    if required != current {
        return Evaluation {
            outcome: Outcome::Rejected(Rejection::WrongStep { required, current }),
            next_step: None,
            message: format!(
                "{} is cleared for {required}, but the current step is {current}.",
                attendee.name
            ),
        };
    }

    let next = current.next();
    Evaluation {
        outcome: Outcome::Admitted,
        next_step: Some(next),
        message: format!("{} passed {current}. Next step: {next}.", attendee.name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrong_step_is_rejected_with_both_steps() {
        let attendee = StepAttendee::new("Ana", Step::Vip);
        let evaluation = evaluate(Step::Entry, &attendee);

        assert_eq!(
            evaluation.outcome,
            Outcome::Rejected(Rejection::WrongStep {
                required: Step::Vip,
                current: Step::Entry,
            })
        );
        assert!(evaluation.next_step.is_none());
        assert!(evaluation.message.contains("VIP"));
        assert!(evaluation.message.contains("ENTRY"));
    }

    #[test]
    fn matching_step_advances() {
        let attendee = StepAttendee::new("Maria", Step::Entry);
        let evaluation = evaluate(Step::Entry, &attendee);

        assert_eq!(evaluation.outcome, Outcome::Admitted);
        assert_eq!(evaluation.next_step, Some(Step::Vip));
    }

    #[test]
    fn exit_wraps_to_register() {
        let attendee = StepAttendee::new("Carlos", Step::Exit);
        let evaluation = evaluate(Step::Exit, &attendee);

        assert_eq!(evaluation.outcome, Outcome::Admitted);
        assert_eq!(evaluation.next_step, Some(Step::Register));
    }

    #[test]
    fn four_admissions_in_order_cycle_back() {
        let attendees: Vec<StepAttendee> = Step::ALL
            .into_iter()
            .map(|step| StepAttendee::new(step.as_str(), step))
            .collect();

        let mut current = Step::Register;
        for attendee in &attendees {
            current = evaluate(current, attendee).next_step.unwrap();
        }
        assert_eq!(current, Step::Register);
    }
}
