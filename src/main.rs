#[macro_use]
mod errors;
mod args;
mod eval;
mod exec;
mod state;
mod table;

use std::ffi::OsString;
use std::io::{stdout, Write};
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use crossterm::tty::IsTty;
use tracing_subscriber::EnvFilter;

use args::Cli;
use errors::DispatchError;
use eval::{Dispatcher, Outcome};
use exec::ProcessImage;
use state::Configuration;

fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();
    // Styling is only worth it when a person is reading the output
    let config = Configuration::from(&cli).with_styling(stdout().is_tty());

    match run(cli, config) {
        Ok(code) => code,
        Err(e) => handle_error(e),
    }
}

fn run(cli: Cli, config: Configuration) -> Result<ExitCode> {
    // The Dispatcher type is responsible for resolving command names to records in the table,
    // and the ProcessImage type for replacing this process with the resolved script
    let table = table::load(&config.source)?;
    let dispatcher = Dispatcher::new(table, &config);
    let runner = ProcessImage::new(config.script_dir.clone());
    tracing::debug!(records = dispatcher.table().len(), "command table ready");

    // Resolution works on the full argument vector, program name first
    let mut args = vec![OsString::from(&config.program_name)];
    args.extend(cli.command);

    let mut out = stdout().lock();
    let outcome = dispatcher.dispatch(&args, &runner, &mut out)?;
    out.flush()?;

    Ok(match outcome {
        Outcome::Exited(code) => ExitCode::from(u8::try_from(code).unwrap_or(1)),
        Outcome::Listed | Outcome::Helped | Outcome::Unknown => ExitCode::SUCCESS,
    })
}

// Prints an appropriate error message for the given error and picks the exit status
fn handle_error(error: anyhow::Error) -> ExitCode {
    eprintln!("Error: {}", error);

    match error.downcast_ref::<DispatchError>() {
        Some(e) => ExitCode::from(e.exit_code()),
        None => ExitCode::FAILURE,
    }
}

// Logs go to stderr so they never mix with help output
fn init_tracing() {
    let filter =
        EnvFilter::try_from_env("DARKFLOWS_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));

    if let Err(e) = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
    {
        eprintln!("Failed to initialize logging: {}", e);
    }
}
