//! Terminal output for command handlers.
//!
//! Two channels share stdout. Status lines (`success`, `info`, headers,
//! table rows) are chatter and disappear under `--quiet`. [`OutputManager::emit`]
//! carries the command's actual result (rendered text, JSON listings) and is
//! always written.

use std::io::{self, IsTerminal};
use std::time::Duration;

use console::Term;
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;

use crate::cli::GlobalArgs;
use crate::config::AppConfig;

#[derive(Debug, Clone, Copy)]
enum Status {
    Success,
    Warning,
    Info,
}

impl Status {
    fn symbol(self) -> &'static str {
        match self {
            Self::Success => "\u{2713}",
            Self::Warning => "\u{26a0}",
            Self::Info => "\u{2139}",
        }
    }

    fn paint(self, symbol: &str, msg: &str) -> String {
        match self {
            Self::Success => format!("{} {}", symbol.green().bold(), msg.green()),
            Self::Warning => format!("{} {}", symbol.yellow().bold(), msg.yellow()),
            Self::Info => format!("{} {}", symbol.blue().bold(), msg.blue()),
        }
    }
}

pub struct OutputManager {
    quiet: bool,
    color: bool,
    interactive: bool,
    term: Term,
}

impl OutputManager {
    /// Colour is off when stdout is piped, with `--no-color`/`NO_COLOR`,
    /// or when `output.no_color` is set in config.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        let interactive = io::stdout().is_terminal();
        Self {
            quiet: args.quiet,
            color: interactive && !args.no_color && !config.output.no_color,
            interactive,
            term: Term::stdout(),
        }
    }

    /// Command result, written byte for byte and even in quiet mode.
    pub fn emit(&self, content: &str) -> io::Result<()> {
        self.term.write_str(content)?;
        self.term.flush()
    }

    /// A one-line result such as a config value or template name.
    pub fn emit_line(&self, line: &str) -> io::Result<()> {
        self.term.write_line(line)
    }

    pub fn print(&self, msg: &str) -> io::Result<()> {
        self.chatter(|| msg.to_owned())
    }

    pub fn success(&self, msg: &str) -> io::Result<()> {
        self.status(Status::Success, msg)
    }

    pub fn warning(&self, msg: &str) -> io::Result<()> {
        self.status(Status::Warning, msg)
    }

    pub fn info(&self, msg: &str) -> io::Result<()> {
        self.status(Status::Info, msg)
    }

    pub fn header(&self, text: &str) -> io::Result<()> {
        self.chatter(|| {
            if self.color {
                text.cyan().bold().to_string()
            } else {
                text.to_owned()
            }
        })
    }

    /// Spinner for a long step; hidden in quiet mode and when piped.
    pub fn spinner(&self, message: &str) -> ProgressBar {
        if self.quiet || !self.interactive {
            return ProgressBar::hidden();
        }
        let spinner = ProgressBar::new_spinner();
        let style = ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        spinner.set_style(style);
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(Duration::from_millis(80));
        spinner
    }

    pub fn supports_color(&self) -> bool {
        self.color
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    /// Stdout is a terminal, so prompts and spinners make sense.
    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    fn status(&self, status: Status, msg: &str) -> io::Result<()> {
        self.chatter(|| {
            if self.color {
                status.paint(status.symbol(), msg)
            } else {
                format!("{} {msg}", status.symbol())
            }
        })
    }

    fn chatter(&self, line: impl FnOnce() -> String) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(&line())
    }
}
