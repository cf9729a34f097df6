//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use stencil_core::domain::FieldSpec;

pub mod global;
pub use global::GlobalArgs;

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "stencil",
    bin_name = "stencil",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Template-driven CRUD boilerplate generator",
    long_about = "Stencil renders directive templates ({{name}}, {{#each}}, {{#if}}, \
                  {{helper arg}}) against JSON data and generates TypeScript CRUD \
                  boilerplate for a model.",
    after_help = "EXAMPLES:\n\
        \x20 stencil generate user-profile -f email:email -f age:number? -o src/users\n\
        \x20 stencil render types --context model.json\n\
        \x20 stencil render --inline 'Hello {{pascalCase name}}' --set name=user-profile\n\
        \x20 stencil list --format json\n\
        \x20 stencil completions bash > /usr/share/bash-completion/completions/stencil",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Render one template against a JSON context.
    #[command(
        visible_alias = "r",
        about = "Render a template",
        after_help = "EXAMPLES:\n\
            \x20 stencil render types --context user.json\n\
            \x20 cat user.json | stencil render service --context -\n\
            \x20 stencil render --inline '{{#each items}}{{@index}}:{{name}}\\n{{/each}}' --context items.json"
    )]
    Render(RenderArgs),

    /// Generate CRUD files for a model.
    #[command(
        visible_alias = "g",
        about = "Generate CRUD boilerplate for a model",
        after_help = "EXAMPLES:\n\
            \x20 stencil generate user -f name -f email:email -f active:boolean\n\
            \x20 stencil generate order -f total:number -f placedAt:date -t types -t mock\n\
            \x20 stencil generate user -f email:email --dry-run"
    )]
    Generate(GenerateArgs),

    /// List available templates.
    #[command(
        visible_alias = "ls",
        about = "List available templates",
        after_help = "EXAMPLES:\n\
            \x20 stencil list\n\
            \x20 stencil list --format json\n\
            \x20 stencil --templates ./templates list"
    )]
    List(ListArgs),

    /// Initialise a Stencil configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 stencil init           # user config location\n\
            \x20 stencil init --local   # .stencil.toml in CWD\n\
            \x20 stencil init --eject   # also copy built-in templates to the templates dir"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 stencil completions bash > ~/.local/share/bash-completion/completions/stencil\n\
            \x20 stencil completions zsh  > ~/.zfunc/_stencil\n\
            \x20 stencil completions fish > ~/.config/fish/completions/stencil.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the Stencil configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 stencil config get generate.output_dir\n\
            \x20 stencil config list\n\
            \x20 stencil config path"
    )]
    Config(ConfigCommands),
}

// ── render ────────────────────────────────────────────────────────────────────

/// Arguments for `stencil render`.
#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Template name, or the template body itself with `--inline`.
    #[arg(value_name = "NAME", help = "Template name (or body with --inline)")]
    pub name: String,

    /// JSON file holding the render context; `-` reads standard input.
    #[arg(
        long = "context",
        value_name = "FILE",
        help = "JSON context file ('-' for stdin)"
    )]
    pub context: Option<PathBuf>,

    /// Top-level context overrides, applied after `--context`.
    #[arg(
        long = "set",
        value_name = "KEY=VALUE",
        value_parser = parse_assignment,
        help = "Set a context value (VALUE is parsed as JSON, else taken as a string)"
    )]
    pub set: Vec<(String, String)>,

    /// Write the result to a file instead of stdout.
    #[arg(short = 'o', long = "output", value_name = "FILE", help = "Output file")]
    pub output: Option<PathBuf>,

    /// Treat NAME as an anonymous template body.
    #[arg(long = "inline", help = "Treat NAME as the template body")]
    pub inline: bool,
}

/// Split `key=value` at the first `=`.
fn parse_assignment(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected KEY=VALUE, got '{raw}'")),
    }
}

// ── generate ──────────────────────────────────────────────────────────────────

/// Arguments for `stencil generate`.
#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Model name in any case style, e.g. `user-profile` or `UserProfile`.
    #[arg(value_name = "MODEL", help = "Model name")]
    pub model: String,

    /// Model fields as `name[:type][?]`.
    #[arg(
        short = 'f',
        long = "field",
        value_name = "NAME:TYPE",
        required = true,
        help = "Field spec, e.g. email:email or age:number? (repeatable)"
    )]
    pub fields: Vec<FieldSpec>,

    /// Output directory (defaults to `generate.output_dir`).
    #[arg(short = 'o', long = "output", value_name = "DIR", help = "Output directory")]
    pub output: Option<PathBuf>,

    /// Templates to render, in order (defaults to `generate.templates`).
    #[arg(
        id = "template",
        short = 't',
        long = "template",
        value_name = "NAME",
        help = "Template to render (repeatable)"
    )]
    pub templates: Vec<String>,

    /// Overwrite existing files.
    #[arg(long = "force", help = "Overwrite existing files")]
    pub force: bool,

    /// Preview what would be written without touching disk.
    #[arg(long = "dry-run", help = "Show what would be generated without writing")]
    pub dry_run: bool,

    /// Skip the confirmation prompt.
    #[arg(short = 'y', long = "yes", help = "Skip confirmation and write immediately")]
    pub yes: bool,
}

// ── list ──────────────────────────────────────────────────────────────────────

/// Arguments for `stencil list`.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Output format (defaults to `output.format`).
    #[arg(long = "format", value_enum, help = "Output format")]
    pub format: Option<ListFormat>,
}

/// Output format for the `list` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// One name per line.
    List,
    /// JSON array.
    Json,
    /// CSV rows.
    Csv,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `stencil init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Write to `.stencil.toml` in the current directory.
    #[arg(
        long = "local",
        help = "Create local configuration in current directory"
    )]
    pub local: bool,

    /// Copy the built-in templates into the templates directory as `.tpl`
    /// files for customisation.
    #[arg(long = "eject", help = "Write built-in templates to the templates directory")]
    pub eject: bool,

    /// Overwrite existing files.
    #[arg(short = 'f', long = "force", help = "Overwrite existing files")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `stencil completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `stencil config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `templates.dir`.
        key: String,
    },
    /// Print the effective configuration.
    List,
    /// Print the path to the user configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
