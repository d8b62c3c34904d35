//! Operator-facing output.
//!
//! Controllers hand every scan result to a [`Presenter`]. The terminal
//! implementation writes one line per event.

use std::io::{self, Write};

use jiff::{Timestamp, tz::TimeZone};

use crate::model::{LastCheckIn, Station, Step};
use crate::session::{ScanReport, SessionError};

/// Receives what the operator should see.
pub trait Presenter {
    /// The operator switched stations.
    fn station_selected(&mut self, station: Station) -> io::Result<()>;

    /// The sequential session moved to a new step.
    fn step_advanced(&mut self, step: Step) -> io::Result<()>;

    /// A scan produced a verdict.
    fn report(&mut self, report: &ScanReport, last: Option<&LastCheckIn>) -> io::Result<()>;

    /// A scan could not produce a verdict.
    fn fault(&mut self, error: &SessionError) -> io::Result<()>;

    /// Free-form text: listings, help, prompts.
    fn notice(&mut self, text: &str) -> io::Result<()>;
}

/// Writes plain lines to any `Write`.
pub struct TerminalPresenter<W> {
    out: W,
}

impl<W: Write> TerminalPresenter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> Presenter for TerminalPresenter<W> {
    fn station_selected(&mut self, station: Station) -> io::Result<()> {
        writeln!(self.out, "Current station: {station}")
    }

    fn step_advanced(&mut self, step: Step) -> io::Result<()> {
        writeln!(self.out, "Current step: {step}")
    }

    fn report(&mut self, report: &ScanReport, last: Option<&LastCheckIn>) -> io::Result<()> {
        let mark = if report.outcome.is_admitted() {
            "✅"
        } else {
            "🚫"
        };
        let who = report.attendee.as_deref().unwrap_or("unknown");
        writeln!(
            self.out,
            "{mark} [{}] {} {} ({who})  {}",
            report.outcome.label(),
            report.checkpoint,
            report.tag,
            report.message
        )?;
        if let Some(last) = last {
            writeln!(
                self.out,
                "Last: {} - Action: {} at {}",
                last.name,
                last.checkpoint,
                wall_clock(last.at, TimeZone::system())
            )?;
        }
        Ok(())
    }

    fn fault(&mut self, error: &SessionError) -> io::Result<()> {
        writeln!(self.out, "⚠️  [ERROR] {error}")
    }

    fn notice(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{text}")
    }
}

/// `at` as hours, minutes and seconds on the operator's clock.
fn wall_clock(at: Timestamp, tz: TimeZone) -> String {
    at.to_zoned(tz).strftime("%H:%M:%S").to_string()
}
