//! Tracing subscriber setup.
//!
//! The library crates only emit events; this is the one place a subscriber
//! gets installed. `RUST_LOG` wins when set. Otherwise `-q` means ERROR,
//! no flag WARN, and each `-v` steps through INFO, DEBUG and TRACE.

use std::io::IsTerminal as _;
use std::path::Path;

use anyhow::Context as _;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{
    EnvFilter, filter::LevelFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt,
};

use crate::cli::GlobalArgs;

/// Crates whose events pass the default filter.
const CRATES: [&str; 3] = ["stencil", "stencil_core", "stencil_adapters"];

/// Install the global subscriber: stderr always, plus `--log-file` if given.
///
/// The returned guard owns the file writer's worker thread; keep it alive
/// until exit or buffered lines are lost.
pub fn init_logging(args: &GlobalArgs) -> anyhow::Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(level_for(args))));

    let stderr_layer = fmt::layer()
        .without_time()
        .with_target(false)
        .with_ansi(!args.no_color && std::io::stderr().is_terminal())
        .with_writer(std::io::stderr);

    let (file_layer, guard) = match args.log_file.as_deref() {
        Some(path) => {
            let (writer, guard) = file_writer(path)?;
            let layer = fmt::layer().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("a tracing subscriber is already installed")?;

    Ok(guard)
}

fn level_for(args: &GlobalArgs) -> LevelFilter {
    if args.quiet {
        return LevelFilter::ERROR;
    }
    match args.verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

fn default_directives(level: LevelFilter) -> String {
    CRATES
        .iter()
        .map(|krate| format!("{krate}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Appending, non-rotating, non-blocking writer; creates missing parents.
fn file_writer(path: &Path) -> anyhow::Result<(NonBlocking, WorkerGuard)> {
    let file_name = path
        .file_name()
        .with_context(|| format!("log file path has no file name: {}", path.display()))?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create log directory {}", dir.display()))?;

    Ok(tracing_appender::non_blocking(
        tracing_appender::rolling::never(dir, file_name),
    ))
}
