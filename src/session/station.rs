//! Station desk: operator-selected station, per-attendee flags.

use std::io;

use tracing::{debug, info, warn};

use crate::engine;
use crate::model::{Attendee, Checkpoint, Directory, LastCheckIn, Station, TagId, seed};
use crate::present::Presenter;
use crate::storage::{self, Persistence, SnapshotKey, StorageError};
use crate::tag::{self, TagReader};

use super::{ScanReport, SessionError};

/// Controller for the station-gated variant.
///
/// The station is whatever the operator last selected; no order between
/// stations is enforced here beyond what each station's checks require.
pub struct StationDesk<S> {
    store: S,
    directory: Directory<Attendee>,
    station: Station,
    last: Option<LastCheckIn>,
}

impl<S: Persistence> StationDesk<S> {
    /// Opens the desk at `station`, restoring the directory snapshot.
    ///
    /// On first launch there is no snapshot; the seed directory is used
    /// and saved immediately. A snapshot holding a record that visited the
    /// VIP room or exited without entering is refused.
    pub fn open(mut store: S, station: Station) -> Result<Self, StorageError> {
        let directory = match storage::load_snapshot(&store, SnapshotKey::StationDirectory)? {
            Some(directory) => directory,
            None => {
                let directory = seed::station_directory();
                storage::save_snapshot(&mut store, SnapshotKey::StationDirectory, &directory)?;
                info!(attendees = directory.len(), "seeded station directory");
                directory
            }
        };
        if let Some((tag, _)) = directory.iter().find(|(_, a)| !a.status.is_consistent()) {
            return Err(StorageError::Inconsistent {
                key: SnapshotKey::StationDirectory,
                tag: tag.clone(),
            });
        }
        debug!(attendees = directory.len(), %station, "station desk open");

        Ok(Self {
            store,
            directory,
            station,
            last: None,
        })
    }

    pub fn station(&self) -> Station {
        self.station
    }

    /// Switches the station consulted by the next scan. Saves nothing.
    pub fn select_station(&mut self, station: Station) {
        debug!(from = %self.station, to = %station, "station selected");
        self.station = station;
    }

    pub fn directory(&self) -> &Directory<Attendee> {
        &self.directory
    }

    /// Runs an already-read tag through the current station.
    pub fn admit(&mut self, tag: &TagId) -> Result<ScanReport, SessionError> {
        let station = self.station;
        let checkpoint = Checkpoint::Station(station);

        let Some(attendee) = self.directory.get(tag) else {
            warn!(%tag, %station, "unknown tag");
            return Ok(ScanReport::unknown_tag(tag, checkpoint));
        };

        let name = attendee.name.clone();
        let evaluation = engine::station::evaluate(station, attendee);

        match evaluation.updated {
            Some(updated) => {
                debug_assert!(updated.status.is_consistent());
                let directory = self.directory.with_record(tag.clone(), updated);
                storage::save_snapshot(&mut self.store, SnapshotKey::StationDirectory, &directory)?;
                self.directory = directory;
                self.last = Some(LastCheckIn::now(&name, checkpoint));
                info!(%tag, attendee = %name, %station, "admitted");
            }
            None => {
                warn!(
                    %tag,
                    attendee = %name,
                    %station,
                    outcome = evaluation.outcome.label(),
                    "rejected"
                );
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
    pub fn scan_and_present<R, P>(&mut self, reader: &mut R, presenter: &mut P) -> io::Result<()>
    where
        R: TagReader + ?Sized,
        P: Presenter + ?Sized,
    {
        match self.scan(reader) {
            Ok(report) => presenter.report(&report, self.last.as_ref()),
            Err(e) => {
                warn!(error = %e, station = %self.station, "scan failed");
                presenter.fault(&e)
            }
        }
    }

    /// Restores the seed directory and saves it.
    pub fn reset(&mut self) -> Result<(), StorageError> {
        let directory = seed::station_directory();
        storage::save_snapshot(&mut self.store, SnapshotKey::StationDirectory, &directory)?;
        self.directory = directory;
        self.last = None;
        info!("station directory reset");
        Ok(())
    }
}
