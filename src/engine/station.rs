//! Station-gated admission.
//!
//! Each station has an ordered list of checks; the first failing check
//! decides the rejection. An attendee who passes every check has the
//! station's flag set on a new record. No other field changes.

use crate::model::{Attendee, Outcome, Rejection, Station};

/// Result of evaluating one attendee at one station.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    pub outcome: Outcome,

    /// The attendee with the station's flag set. Only present when admitted.
    pub updated: Option<Attendee>,

    pub message: String,
}

/// A precondition that rejects the attendee when `fails` holds.
struct Check {
    fails: fn(&Attendee) -> bool,
    rejection: Rejection,
    message: fn(&str) -> String,
}

const ENTRADA: &[Check] = &[Check {
    fails: |a| a.status.entered,
    rejection: Rejection::DuplicateCheckIn,
    message: |name| format!("{name} already checked in at the entrance."),
}];

const SALA_VIP: &[Check] = &[
    Check {
        fails: |a| !a.status.entered,
        rejection: Rejection::PreconditionNotMet,
        message: |name| format!("{name} has not entered the event yet."),
    },
    Check {
        fails: |a| !a.can_access_vip,
        rejection: Rejection::NotEligible,
        message: |name| format!("{name} does not have VIP room access."),
    },
    Check {
        fails: |a| a.status.visited_vip,
        rejection: Rejection::DuplicateCheckIn,
        message: |name| format!("{name} already visited the VIP room."),
    },
];

const SAIDA: &[Check] = &[
    Check {
        fails: |a| !a.status.entered,
        rejection: Rejection::PreconditionNotMet,
        message: |name| format!("Invalid exit: {name} never entered the event."),
    },
    Check {
        fails: |a| a.status.exited,
        rejection: Rejection::DuplicateCheckIn,
        message: |name| format!("{name} already checked out."),
    },
];

fn checks(station: Station) -> &'static [Check] {
    match station {
        Station::Entrada => ENTRADA,
        Station::SalaVip => SALA_VIP,
        Station::Saida => SAIDA,
    }
}

fn admitted_message(station: Station, name: &str) -> String {
    match station {
        Station::Entrada => format!("Entry authorized. Welcome, {name}!"),
        Station::SalaVip => format!("Welcome to the VIP room, {name}. Enjoy the champagne!"),
        Station::Saida => format!("See you soon, {name}! Hope to see you at the next party."),
    }
}

/// Decide whether `attendee` may pass `station`.
pub fn evaluate(station: Station, attendee: &Attendee) -> Evaluation {
    if let Some(check) = checks(station).iter().find(|c| (c.fails)(attendee)) {
        return Evaluation {
            outcome: Outcome::Rejected(check.rejection),
            updated: None,
            message: (check.message)(&attendee.name),
        };
    }

    Evaluation {
        outcome: Outcome::Admitted,
        updated: Some(attendee.with_status(attendee.status.passed(station))),
        message: admitted_message(station, &attendee.name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::model::AttendeeStatus;

    fn admit(station: Station, attendee: &Attendee) -> Attendee {
        let evaluation = evaluate(station, attendee);
        assert_eq!(evaluation.outcome, Outcome::Admitted, "{}", evaluation.message);
        evaluation.updated.unwrap()
    }

    #[test]
    fn entrance_admits_fresh_attendee() {
        let attendee = Attendee::new("João", false);
        let evaluation = evaluate(Station::Entrada, &attendee);

        assert_eq!(evaluation.outcome, Outcome::Admitted);
        let updated = evaluation.updated.unwrap();
        assert_eq!(
            updated.status,
            AttendeeStatus {
                entered: true,
                visited_vip: false,
                exited: false,
            }
        );
        assert!(evaluation.message.contains("João"));
    }

    #[test]
    fn vip_before_entry_is_a_precondition_failure() {
        let attendee = Attendee::new("Maria", true);
        let evaluation = evaluate(Station::SalaVip, &attendee);

        assert_eq!(
            evaluation.outcome,
            Outcome::Rejected(Rejection::PreconditionNotMet)
        );
        assert!(evaluation.updated.is_none());
        assert!(evaluation.message.contains("has not entered"));
    }

    #[test]
    fn vip_flow_for_eligible_attendee() {
        let attendee = Attendee::new("Maria", true);
        let entered = admit(Station::Entrada, &attendee);
        let visited = admit(Station::SalaVip, &entered);

        assert!(visited.status.entered);
        assert!(visited.status.visited_vip);
        assert!(!visited.status.exited);

        let again = evaluate(Station::SalaVip, &visited);
        assert_eq!(again.outcome, Outcome::Rejected(Rejection::DuplicateCheckIn));
        assert!(again.updated.is_none());
    }

    #[test]
    fn non_vip_is_not_eligible_after_entry() {
        let attendee = Attendee::new("Carlos", false);
        let entered = admit(Station::Entrada, &attendee);
        let evaluation = evaluate(Station::SalaVip, &entered);

        assert_eq!(evaluation.outcome, Outcome::Rejected(Rejection::NotEligible));
        assert!(evaluation.updated.is_none());
        assert!(!entered.status.visited_vip);
    }

    #[test]
    fn entry_check_precedes_eligibility_check() {
        // Not entered and not eligible: the entry precondition wins.
        let attendee = Attendee::new("Carlos", false);
        let evaluation = evaluate(Station::SalaVip, &attendee);

        assert_eq!(
            evaluation.outcome,
            Outcome::Rejected(Rejection::PreconditionNotMet)
        );
    }

    #[test]
    fn exit_without_entry_is_invalid() {
        let attendee = Attendee::new("Ana", true);
        let evaluation = evaluate(Station::Saida, &attendee);

        assert_eq!(
            evaluation.outcome,
            Outcome::Rejected(Rejection::PreconditionNotMet)
        );
        assert!(evaluation.message.contains("never entered"));
    }

    #[test]
    fn exit_twice_is_a_duplicate() {
        let attendee = Attendee::new("Ana", true);
        let entered = admit(Station::Entrada, &attendee);
        let exited = admit(Station::Saida, &entered);

        assert!(exited.status.exited);
        assert!(!exited.status.visited_vip);

        let again = evaluate(Station::Saida, &exited);
        assert_eq!(again.outcome, Outcome::Rejected(Rejection::DuplicateCheckIn));
    }

    #[test]
    fn repeated_rejections_never_produce_updates() {
        let attendee = Attendee::new("João", false);
        let entered = admit(Station::Entrada, &attendee);

        for _ in 0..3 {
            let evaluation = evaluate(Station::Entrada, &entered);
            assert_eq!(
                evaluation.outcome,
                Outcome::Rejected(Rejection::DuplicateCheckIn)
            );
            assert!(evaluation.updated.is_none());
        }
    }

    #[test]
    fn every_admission_keeps_status_consistent() {
        // Drive all station orders over both eligibility kinds.
        for vip in [false, true] {
            for first in Station::ALL {
                for second in Station::ALL {
                    for third in Station::ALL {
                        let mut attendee = Attendee::new("Any", vip);
                        for station in [first, second, third] {
                            if let Some(updated) = evaluate(station, &attendee).updated {
                                attendee = updated;
                            }
                            assert!(attendee.status.is_consistent());
                        }
                    }
                }
            }
        }
    }
}
