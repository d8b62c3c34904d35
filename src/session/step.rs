//! Step desk: one shared step that advances on every admission.

use std::io;

use tracing::{debug, info, warn};

use crate::engine;
use crate::model::{
    Checkpoint, Directory, LastCheckIn, Outcome, Rejection, Step, StepAttendee, TagId, seed,
};
use crate::present::Presenter;
use crate::storage::{self, Persistence, SnapshotKey, StorageError};
use crate::tag::{self, TagReader};

use super::{ScanReport, SessionError};

/// Controller for the sequential variant.
///
/// The current step belongs to the session, not to any attendee.
/// Operators never set it; it moves one position per admission.
pub struct StepDesk<S> {
    store: S,
    directory: Directory<StepAttendee>,
    step: Step,
    last: Option<LastCheckIn>,
}

impl<S: Persistence> StepDesk<S> {
    /// Opens the desk, restoring the directory and current step.
    ///
    /// Missing snapshots are seeded (`REGISTER` for the step) and saved.
    pub fn open(mut store: S) -> Result<Self, StorageError> {
        let directory = match storage::load_snapshot(&store, SnapshotKey::StepDirectory)? {
            Some(directory) => directory,
            None => {
                let directory = seed::step_directory();
                storage::save_snapshot(&mut store, SnapshotKey::StepDirectory, &directory)?;
                info!(attendees = directory.len(), "seeded step directory");
                directory
            }
        };

        let step = match storage::load_snapshot(&store, SnapshotKey::CurrentStep)? {
            Some(step) => step,
            None => {
                storage::save_snapshot(&mut store, SnapshotKey::CurrentStep, &Step::Register)?;
                Step::Register
            }
        };
        debug!(attendees = directory.len(), %step, "step desk open");

        Ok(Self {
            store,
            directory,
            step,
            last: None,
        })
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn directory(&self) -> &Directory<StepAttendee> {
        &self.directory
    }

    /// Runs an already-read tag against the current step.
    pub fn admit(&mut self, tag: &TagId) -> Result<ScanReport, SessionError> {
        let step = self.step;
        let checkpoint = Checkpoint::Step(step);

        let Some(attendee) = self.directory.get(tag) else {
            warn!(%tag, %step, "unknown tag");
            return Ok(ScanReport::unknown_tag(tag, checkpoint));
        };

        let name = attendee.name.clone();
        let evaluation = engine::step::evaluate(step, attendee);

        match (evaluation.outcome, evaluation.next_step) {
            (Outcome::Admitted, Some(next)) => {
                storage::save_snapshot(&mut self.store, SnapshotKey::CurrentStep, &next)?;
                self.step = next;
                self.last = Some(LastCheckIn::now(&name, checkpoint));
                info!(%tag, attendee = %name, passed = %step, %next, "admitted");
            }
            (Outcome::Rejected(Rejection::WrongStep { required, current }), _) => {
                warn!(%tag, attendee = %name, %required, %current, "wrong step");
            }
            (outcome, _) => {
                warn!(%tag, attendee = %name, %step, outcome = outcome.label(), "rejected");
            }
        }

        Ok(ScanReport {
            tag: tag.clone(),
            checkpoint,
            outcome: evaluation.outcome,
            attendee: Some(name),
            message: evaluation.message,
        })
    }

    /// Reads one tag from `reader` and admits it.
    pub fn scan<R: TagReader + ?Sized>(
        &mut self,
        reader: &mut R,
    ) -> Result<ScanReport, SessionError> {
        let tag = tag::scan(reader)?;
        self.admit(&tag)
    }

    /// Scans and forwards the verdict or fault to `presenter`.
    ///
    /// After an admission the presenter is also told the new step.
    pub fn scan_and_present<R, P>(&mut self, reader: &mut R, presenter: &mut P) -> io::Result<()>
    where
        R: TagReader + ?Sized,
        P: Presenter + ?Sized,
    {
        match self.scan(reader) {
            Ok(report) => {
                presenter.report(&report, self.last.as_ref())?;
                if report.outcome.is_admitted() {
                    presenter.step_advanced(self.step)?;
                }
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, step = %self.step, "scan failed");
                presenter.fault(&e)
            }
        }
    }

    /// Restores the seed directory and rewinds to `REGISTER`.
    pub fn reset(&mut self) -> Result<(), StorageError> {
        let directory = seed::step_directory();
        storage::save_snapshot(&mut self.store, SnapshotKey::StepDirectory, &directory)?;
        storage::save_snapshot(&mut self.store, SnapshotKey::CurrentStep, &Step::Register)?;
        self.directory = directory;
        self.step = Step::Register;
        self.last = None;
        info!("step session reset");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::session::testing::{RecordingPresenter, tag};
    use crate::storage::MemoryStore;
    use crate::tag::SimulatedReader;
    use crate::tag::testing::TrackedReader;

    // Seed order: TAG123 REGISTER, TAG456 ENTRY, TAG789 VIP, TAG000 EXIT.

    fn desk() -> StepDesk<MemoryStore> {
        StepDesk::open(MemoryStore::new()).unwrap()
    }

    fn desk_at(step: Step) -> StepDesk<MemoryStore> {
        let mut store = MemoryStore::new();
        storage::save_snapshot(&mut store, SnapshotKey::CurrentStep, &step).unwrap();
        StepDesk::open(store).unwrap()
    }

    #[test]
    fn first_open_starts_at_register() {
        let desk = desk();

        assert_eq!(desk.step(), Step::Register);
        assert_eq!(desk.directory().len(), 4);
        assert!(desk.store.raw(SnapshotKey::CurrentStep).is_some());
    }

    #[test]
    fn wrong_step_leaves_session_step() {
        let mut desk = desk_at(Step::Entry);

        let report = desk.admit(&tag("TAG789")).unwrap();

        assert_eq!(
            report.outcome,
            Outcome::Rejected(Rejection::WrongStep {
                required: Step::Vip,
                current: Step::Entry,
            })
        );
        assert_eq!(desk.step(), Step::Entry);
    }

    #[test]
    fn matching_step_advances_session() {
        let mut desk = desk_at(Step::Entry);

        let report = desk.admit(&tag("TAG456")).unwrap();

        assert_eq!(report.outcome, Outcome::Admitted);
        assert_eq!(desk.step(), Step::Vip);
        assert_eq!(desk.last.as_ref().unwrap().name, "Maria");
    }

    #[test]
    fn full_cycle_wraps_exit_to_register() {
        let mut desk = desk();
        let order = ["TAG123", "TAG456", "TAG789", "TAG000"];
        let expected = [Step::Entry, Step::Vip, Step::Exit, Step::Register];

        for (raw, want) in order.into_iter().zip(expected) {
            let report = desk.admit(&tag(raw)).unwrap();
            assert_eq!(report.outcome, Outcome::Admitted, "{}", report.message);
            assert_eq!(desk.step(), want);
        }

        // And around again.
        desk.admit(&tag("TAG123")).unwrap();
        assert_eq!(desk.step(), Step::Entry);
    }

    #[test]
    fn step_survives_reopen() {
        let mut desk = desk();
        desk.admit(&tag("TAG123")).unwrap();
        desk.admit(&tag("TAG456")).unwrap();

        let reopened = StepDesk::open(desk.store).unwrap();
        assert_eq!(reopened.step(), Step::Vip);
    }

    #[test]
    fn unknown_tag_changes_nothing() {
        let mut desk = desk_at(Step::Vip);
        let writes = desk.store.writes();

        let report = desk.admit(&tag("NOPE")).unwrap();

        assert_eq!(report.outcome, Outcome::Rejected(Rejection::UnknownTag));
        assert_eq!(desk.step(), Step::Vip);
        assert_eq!(desk.store.writes(), writes);
    }

    #[test]
    fn failed_save_keeps_current_step() {
        let mut desk = desk();
        desk.store.set_fail_writes(true);

        let err = desk.admit(&tag("TAG123")).unwrap_err();

        assert!(matches!(err, SessionError::Persistence(_)));
        assert_eq!(desk.step(), Step::Register);
        assert!(desk.last.as_ref().is_none());
    }

    #[test]
    fn presenter_sees_new_step_after_admission() {
        let mut desk = desk();
        let mut presenter = RecordingPresenter::default();

        let mut early = TrackedReader::new(SimulatedReader::with_tag("TAG456"));
        desk.scan_and_present(&mut early, &mut presenter).unwrap();
        let mut ready = TrackedReader::new(SimulatedReader::with_tag("TAG123"));
        desk.scan_and_present(&mut ready, &mut presenter).unwrap();

        assert_eq!(presenter.reports.len(), 2);
        assert!(!presenter.reports[0].outcome.is_admitted());
        assert!(presenter.reports[1].outcome.is_admitted());
        assert_eq!(presenter.steps, vec![Step::Entry]);
        assert_eq!(early.releases + ready.releases, 2);
    }

    #[test]
    fn cancelled_scan_is_a_fault() {
        let mut desk = desk();
        let mut presenter = RecordingPresenter::default();
        let mut reader = SimulatedReader::cancelled();

        desk.scan_and_present(&mut reader, &mut presenter).unwrap();

        assert_eq!(presenter.faults.len(), 1);
        assert!(presenter.faults[0].contains("cancelled"));
        assert_eq!(desk.step(), Step::Register);
    }

    #[test]
    fn reset_rewinds_to_register() {
        let mut desk = desk();
        desk.admit(&tag("TAG123")).unwrap();

        desk.reset().unwrap();

        assert_eq!(desk.step(), Step::Register);
        let saved: Option<Step> =
            storage::load_snapshot(&desk.store, SnapshotKey::CurrentStep).unwrap();
        assert_eq!(saved, Some(Step::Register));
    }
}
