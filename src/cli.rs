//! CLI interface for check-in.
//!
//! Two groups of commands, one per check-in variant:
//!
//! - `checkin stations ...`: the operator picks a station; each attendee
//!   carries entrance, VIP room and exit flags.
//! - `checkin steps ...`: one shared step (register, entry, VIP, exit) that
//!   advances on every admission.
//!
//! `scan` handles a single tag and exits. `session` keeps one desk open and
//! reads operator commands from stdin until `quit`.

mod console;
mod format;

use std::io::{self, BufRead};
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use tracing::debug;

use crate::config::Config;
use crate::model::Station;
use crate::present::TerminalPresenter;
use crate::session::{StationDesk, StepDesk};
use crate::storage::Storage;
use crate::tag::SimulatedReader;

use format::{format_station_directory, format_step_directory};

/// Check-in: admit attendees at event checkpoints by tag.
#[derive(Debug, Parser)]
#[command(name = "checkin", after_long_help = WORKFLOW_HELP)]
pub struct Cli {
    /// Directory holding the snapshots.
    /// Overrides `CHECKIN_DATA_DIR` and `data-dir` in the config file.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

const WORKFLOW_HELP: &str = r"Workflow: a night at the door
  1. checkin stations session --station entrada
     > scan TAG456
     > station sala-vip
     > scan TAG456
     > quit
  2. checkin stations list

Sequential flow:
  checkin steps status
  checkin steps scan --tag TAG123";

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Station check-in: entrance, VIP room, and exit, tracked per attendee.
    Stations {
        #[command(subcommand)]
        command: StationCommand,
    },

    /// Sequential check-in: one shared step that advances on each admission.
    Steps {
        #[command(subcommand)]
        command: StepCommand,
    },
}

#[derive(Debug, Subcommand)]
pub enum StationCommand {
    /// List attendees and the stations they have passed.
    List,

    /// Admit one tag at a station.
    Scan {
        /// Station to check in at. Defaults to the configured station.
        #[arg(long, value_enum)]
        station: Option<StationArg>,

        /// Tag identifier, as the reader would report it.
        #[arg(long)]
        tag: String,
    },

    /// Interactive desk: switch stations and scan tags from stdin.
    Session {
        /// Station to open at. Defaults to the configured station.
        #[arg(long, value_enum)]
        station: Option<StationArg>,
    },

    /// Restore the seed directory, clearing every flag.
    Reset,
}

#[derive(Debug, Subcommand)]
pub enum StepCommand {
    /// Show the current step and who is cleared for each step.
    Status,

    /// Admit one tag against the current step.
    Scan {
        /// Tag identifier, as the reader would report it.
        #[arg(long)]
        tag: String,
    },

    /// Interactive desk: scan tags from stdin.
    Session,

    /// Restore the seed directory and rewind to REGISTER.
    Reset,
}

/// CLI-facing station, mapped to the domain `Station`.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StationArg {
    /// Event entrance.
    Entrada,
    /// VIP room.
    SalaVip,
    /// Event exit.
    Saida,
}

impl StationArg {
    fn to_domain(self) -> Station {
        match self {
            Self::Entrada => Station::Entrada,
            Self::SalaVip => Station::SalaVip,
            Self::Saida => Station::Saida,
        }
    }
}

/// Run the CLI, returning an error message on failure.
pub fn run(config: &Config) -> Result<(), String> {
    let cli = Cli::parse();

    let root = config
        .resolve_data_dir(cli.data_dir)
        .ok_or("could not determine home directory")?;
    let storage = Storage::new(&root)
        .map_err(|e| format!("failed to initialize storage at {}: {e}", root.display()))?;
    debug!(root = %storage.root().display(), "storage ready");

    match cli.command {
        Command::Stations { command } => {
            let station_or_default =
                |arg: Option<StationArg>| arg.map_or(config.default_station(), StationArg::to_domain);
            match command {
                StationCommand::List => cmd_station_list(storage),
                StationCommand::Scan { station, tag } => {
                    cmd_station_scan(storage, station_or_default(station), &tag)
                }
                StationCommand::Session { station } => {
                    cmd_station_session(storage, station_or_default(station))
                }
                StationCommand::Reset => cmd_station_reset(storage),
            }
        }
        Command::Steps { command } => match command {
            StepCommand::Status => cmd_step_status(storage),
            StepCommand::Scan { tag } => cmd_step_scan(storage, &tag),
            StepCommand::Session => cmd_step_session(storage),
            StepCommand::Reset => cmd_step_reset(storage),
        },
    }
}

fn open_station_desk(storage: Storage, station: Station) -> Result<StationDesk<Storage>, String> {
    StationDesk::open(storage, station).map_err(|e| format!("failed to open station desk: {e}"))
}

fn open_step_desk(storage: Storage) -> Result<StepDesk<Storage>, String> {
    StepDesk::open(storage).map_err(|e| format!("failed to open step desk: {e}"))
}

fn terminal() -> TerminalPresenter<io::StdoutLock<'static>> {
    TerminalPresenter::new(io::stdout().lock())
}

fn cmd_station_list(storage: Storage) -> Result<(), String> {
    let desk = open_station_desk(storage, Station::Entrada)?;
    println!("{}", format_station_directory(desk.directory()));
    Ok(())
}

fn cmd_station_scan(storage: Storage, station: Station, tag: &str) -> Result<(), String> {
    let mut desk = open_station_desk(storage, station)?;
    let mut reader = SimulatedReader::with_tag(tag);
    desk.scan_and_present(&mut reader, &mut terminal())
        .map_err(|e| format!("failed to write output: {e}"))
}

fn cmd_station_session(storage: Storage, station: Station) -> Result<(), String> {
    let mut desk = open_station_desk(storage, station)?;
    let stdin = io::stdin().lock();
    console::run_stations(&mut desk, stdin.lines(), &mut terminal())
        .map_err(|e| format!("console failed: {e}"))
}

fn cmd_station_reset(storage: Storage) -> Result<(), String> {
    let mut desk = open_station_desk(storage, Station::Entrada)?;
    desk.reset()
        .map_err(|e| format!("failed to reset station directory: {e}"))?;
    eprintln!("Station directory reset ({} attendees)", desk.directory().len());
    Ok(())
}

fn cmd_step_status(storage: Storage) -> Result<(), String> {
    let desk = open_step_desk(storage)?;
    println!("Current step: {}", desk.step());
    println!("{}", format_step_directory(desk.directory(), desk.step()));
    Ok(())
}

fn cmd_step_scan(storage: Storage, tag: &str) -> Result<(), String> {
    let mut desk = open_step_desk(storage)?;
    let mut reader = SimulatedReader::with_tag(tag);
    desk.scan_and_present(&mut reader, &mut terminal())
        .map_err(|e| format!("failed to write output: {e}"))
}

fn cmd_step_session(storage: Storage) -> Result<(), String> {
    let mut desk = open_step_desk(storage)?;
    let stdin = io::stdin().lock();
    console::run_steps(&mut desk, stdin.lines(), &mut terminal())
        .map_err(|e| format!("console failed: {e}"))
}

fn cmd_step_reset(storage: Storage) -> Result<(), String> {
    let mut desk = open_step_desk(storage)?;
    desk.reset()
        .map_err(|e| format!("failed to reset step session: {e}"))?;
    eprintln!("Step session reset to {}", desk.step());
    Ok(())
}
