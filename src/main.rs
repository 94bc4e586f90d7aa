mod cli;
mod error;

use clap::Parser;
use exn::ResultExt;
use kikoeru_config::Config;
use kikoeru_location::{Location, TrackRef};
use kikoeru_records::{NormalizeOptions, WorkRow, normalize};
use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command, media_kind};
use crate::error::{ErrorKind, Result};

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:?}");
            ExitCode::FAILURE
        },
    }
}

/// Logs go to stderr so stdout stays machine-readable. Defaults to `warn`,
/// override with `RUST_LOG`.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Join { base, fragments } => {
            let base = base.parse::<Location>().or_raise(|| ErrorKind::Location)?;
            print_line(&base.join(&fragments))
        },
        Command::Locate {
            download,
            root_folder,
            work_dir,
            subfolder,
            title,
        } => {
            let config = Config::load(cli.config.as_deref()).or_raise(|| ErrorKind::Config)?;
            let track = TrackRef {
                root_folder: &root_folder,
                work_dir: &work_dir,
                subfolder: &subfolder,
                title: &title,
            };
            let resolved = config
                .media_locator()
                .resolve(media_kind(download), &track)
                .or_raise(|| ErrorKind::Location)?;
            info!(offload = resolved.is_offload(), "resolved track");
            print_line(resolved.as_str())
        },
        Command::Normalize { date_only, input } => {
            let rows: Vec<WorkRow> = serde_json::from_str(&read_input(input.as_deref())?).or_raise(|| ErrorKind::Input)?;
            let options = NormalizeOptions::default().with_date_only(date_only);
            let works = normalize(rows, &options).or_raise(|| ErrorKind::Records)?;
            let mut stdout = io::stdout().lock();
            serde_json::to_writer_pretty(&mut stdout, &works).or_raise(|| ErrorKind::Output)?;
            writeln!(stdout).or_raise(|| ErrorKind::Output)
        },
    }
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path).or_raise(|| ErrorKind::Input),
        None => io::read_to_string(io::stdin()).or_raise(|| ErrorKind::Input),
    }
}

fn print_line(line: &str) -> Result<()> {
    writeln!(io::stdout().lock(), "{line}").or_raise(|| ErrorKind::Output)
}
