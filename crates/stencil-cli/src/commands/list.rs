//! Implementation of the `stencil list` command.

use clap::ValueEnum as _;

use stencil_core::{application::TemplateInfo, error::StencilError};

use crate::{
    cli::{GlobalArgs, ListArgs, ListFormat},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

pub fn execute(
    args: ListArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let format = match args.format {
        Some(format) => format,
        None => configured_format(&config)?,
    };

    let service = super::load_templates(&global, &config)?;
    let templates = service.list();

    match format {
        ListFormat::Table => {
            if templates.is_empty() {
                output.warning("No templates available")?;
                return Ok(());
            }
            output.header("Available Templates:")?;
            for t in &templates {
                output.print(&table_row(t))?;
            }
        }

        // JSON bypasses quiet mode: it must stay parseable in pipes.
        ListFormat::Json => {
            let json =
                serde_json::to_string_pretty(&templates).map_err(|e| StencilError::Internal {
                    message: format!("failed to serialise template list: {e}"),
                })?;
            output.emit_line(&json)?;
        }

        ListFormat::List => {
            for t in &templates {
                output.emit_line(&t.name)?;
            }
        }

        ListFormat::Csv => {
            output.emit(&csv(&templates))?;
        }
    }

    Ok(())
}

/// `output.format` from config, which clap never saw.
fn configured_format(config: &AppConfig) -> CliResult<ListFormat> {
    ListFormat::from_str(&config.output.format, true).map_err(|_| CliError::ConfigError {
        message: format!(
            "invalid output.format '{}': expected table, list, json or csv",
            config.output.format
        ),
        source: None,
    })
}

fn table_row(t: &TemplateInfo) -> String {
    format!("  {:<16} .{:<5} {:>4} lines", t.name, t.extension, t.lines)
}

fn csv(templates: &[TemplateInfo]) -> String {
    let mut out = String::from("name,extension,lines\n");
    for t in templates {
        out.push_str(&format!("{},{},{}\n", t.name, t.extension, t.lines));
    }
    out
}
