mod cli;
mod config;
mod engine;
mod model;
mod present;
mod session;
mod storage;
mod tag;

use std::{io, process};

use tracing_subscriber::EnvFilter;

use config::Config;

/// Environment variable holding a tracing filter, e.g. `checkin=debug`.
const LOG_ENV: &str = "CHECKIN_LOG";

fn main() {
    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config: {e}");
            process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = cli::run(&config) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

/// Logs go to stderr so command output on stdout stays clean.
fn init_logging(config: &Config) {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        EnvFilter::new(config.log_filter.as_deref().unwrap_or("warn"))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}
