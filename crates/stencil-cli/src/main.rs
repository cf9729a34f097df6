//! `stencil`: render directive templates and generate CRUD boilerplate.
//!
//! `main` parses arguments, installs logging, loads layered configuration
//! and dispatches to one handler in [`commands`]. Every failure comes back
//! as a [`CliError`] and leaves the process with its category's exit code:
//! 1 internal, 2 usage, 3 not found, 4 configuration.

use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, instrument};

use crate::{
    cli::{Cli, Commands},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod output;

/// Exit code for argument errors reported by clap.
const USAGE_EXIT: u8 = 2;

fn main() -> ExitCode {
    // a missing .env is fine
    let _ = dotenvy::dotenv();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version land here as well, on stdout
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::from(USAGE_EXIT)
            } else {
                ExitCode::SUCCESS
            };
        }
    };
    let verbose = cli.global.verbose > 0;

    // flushes --log-file on drop
    let _log_guard = match logging::init_logging(&cli.global) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialise logging: {e:#}");
            return ExitCode::FAILURE;
        }
    };
    debug!(command = ?cli.command, "arguments parsed");

    let config = match AppConfig::load(cli.global.config.as_ref()) {
        Ok(config) => config,
        Err(e) => {
            let err = CliError::ConfigError {
                message: format!("{e:#}"),
                source: Some(e.into()),
            };
            // no config yet, so colour follows the flags alone
            let color = OutputManager::new(&cli.global, &AppConfig::default()).supports_color();
            return report(err, verbose, color);
        }
    };

    let output = OutputManager::new(&cli.global, &config);
    let color = output.supports_color();
    match run(cli, config, output) {
        Ok(()) => {
            debug!("command finished");
            ExitCode::SUCCESS
        }
        Err(err) => report(err, verbose, color),
    }
}

#[instrument(skip_all)]
fn run(cli: Cli, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let Cli { global, command } = cli;
    match command {
        Commands::Render(args) => commands::render::execute(args, global, config, output),
        Commands::Generate(args) => commands::generate::execute(args, global, config, output),
        Commands::List(args) => commands::list::execute(args, global, config, output),
        Commands::Init(args) => commands::init::execute(args, global, config, output),
        Commands::Completions(args) => commands::completions::execute(args),
        Commands::Config(sub) => commands::config::execute(sub, config, output),
    }
}

/// Log `err`, print its report to stderr and pick the exit code.
fn report(err: CliError, verbose: bool, color: bool) -> ExitCode {
    err.log();
    let text = if color {
        err.format_colored(verbose)
    } else {
        err.format_plain(verbose)
    };
    eprint!("{text}");
    ExitCode::from(err.exit_code())
}
