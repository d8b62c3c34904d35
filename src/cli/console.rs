//! Interactive desk console.
//!
//! Reads one operator command per line. A scan is handled to completion
//! before the next line is read.

use std::io;

use crate::model::Station;
use crate::present::Presenter;
use crate::session::{StationDesk, StepDesk};
use crate::storage::Persistence;
use crate::tag::SimulatedReader;

use super::format::{format_station_directory, format_step_directory};

const STATION_HELP: &str = "Commands: station <entrada|sala-vip|saida>, scan [tag], fault [reason], \
cancel, list, help, quit";
const STEP_HELP: &str = "Commands: scan [tag], fault [reason], cancel, list, help, quit";

/// One parsed console line.
#[derive(Debug, PartialEq, Eq)]
enum Line {
    Station(String),
    /// Any line that presents something to the reader.
    Scan(SimulatedReader),
    List,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

fn parse(line: &str) -> Line {
    let mut words = line.split_whitespace();
    let Some(command) = words.next() else {
        return Line::Empty;
    };
    let arg = words.collect::<Vec<_>>().join(" ");

    match command.to_ascii_lowercase().as_str() {
        "station" => Line::Station(arg),
        // A bare `scan` presents a tag without an identifier.
        "scan" if arg.is_empty() => Line::Scan(SimulatedReader::blank()),
        "scan" => Line::Scan(SimulatedReader::with_tag(arg)),
        "fault" if arg.is_empty() => Line::Scan(SimulatedReader::faulty("reader fault")),
        "fault" => Line::Scan(SimulatedReader::faulty(arg)),
        "cancel" => Line::Scan(SimulatedReader::cancelled()),
        "list" | "ls" => Line::List,
        "help" | "?" => Line::Help,
        "quit" | "exit" | "q" => Line::Quit,
        other => Line::Unknown(other.to_string()),
    }
}

/// Runs the station desk console until `quit` or end of input.
pub(super) fn run_stations<S, L, P>(
    desk: &mut StationDesk<S>,
    lines: L,
    presenter: &mut P,
) -> io::Result<()>
where
    S: Persistence,
    L: IntoIterator<Item = io::Result<String>>,
    P: Presenter + ?Sized,
{
    presenter.notice(STATION_HELP)?;
    presenter.station_selected(desk.station())?;

    for line in lines {
        match parse(&line?) {
            Line::Station(name) => match name.parse::<Station>() {
                Ok(station) => {
                    desk.select_station(station);
                    presenter.station_selected(station)?;
                }
                Err(e) => presenter.notice(&e.to_string())?,
            },
            Line::Scan(mut reader) => desk.scan_and_present(&mut reader, &mut *presenter)?,
            Line::List => presenter.notice(&format_station_directory(desk.directory()))?,
            Line::Help => presenter.notice(STATION_HELP)?,
            Line::Quit => break,
            Line::Empty => {}
            Line::Unknown(command) => {
                presenter.notice(&format!("unknown command: {command}"))?;
            }
        }
    }
    Ok(())
}

/// Runs the step desk console until `quit` or end of input.
pub(super) fn run_steps<S, L, P>(
    desk: &mut StepDesk<S>,
    lines: L,
    presenter: &mut P,
) -> io::Result<()>
where
    S: Persistence,
    L: IntoIterator<Item = io::Result<String>>,
    P: Presenter + ?Sized,
{
    presenter.notice(STEP_HELP)?;
    presenter.step_advanced(desk.step())?;

    for line in lines {
        match parse(&line?) {
            Line::Station(_) => {
                presenter.notice("the step advances on its own; there is no station to pick")?;
            }
            Line::Scan(mut reader) => desk.scan_and_present(&mut reader, &mut *presenter)?,
            Line::List => {
                presenter.notice(&format_step_directory(desk.directory(), desk.step()))?;
            }
            Line::Help => presenter.notice(STEP_HELP)?,
            Line::Quit => break,
            Line::Empty => {}
            Line::Unknown(command) => {
                presenter.notice(&format!("unknown command: {command}"))?;
            }
        }
    }
    Ok(())
}
