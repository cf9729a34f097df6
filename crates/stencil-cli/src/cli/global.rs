//! Flags accepted by every subcommand, before or after its name.

use std::path::PathBuf;

use clap::{ArgAction, Args, builder::FalseyValueParser};

#[derive(Debug, Clone, Default, Args)]
pub struct GlobalArgs {
    /// More log output: -v info, -vv debug, -vvv trace
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only print command results and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Plain output without ANSI colours (also set by NO_COLOR)
    #[arg(long, global = true, env = "NO_COLOR", value_parser = FalseyValueParser::new())]
    pub no_color: bool,

    /// Read settings from FILE instead of the discovered config
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Load user templates from DIR on top of the built-ins
    #[arg(long, global = true, value_name = "DIR")]
    pub templates: Option<PathBuf>,

    /// Copy log output to FILE, uncoloured
    #[arg(long, global = true, value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}
