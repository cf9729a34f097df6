//! Implementation of the `stencil generate` command.
//!
//! Responsibility: translate CLI arguments into a [`GenerateRequest`], call
//! the core generate service, and display results.

use tracing::{debug, info, instrument};

use stencil_adapters::LocalFilesystem;
use stencil_core::application::{GenerateRequest, GenerateService, GenerationReport};

use crate::{
    cli::{GenerateArgs, GlobalArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Execute the `stencil generate` command.
///
/// Dispatch sequence:
/// 1. Resolve output directory and template list (flags, then config)
/// 2. Plan: validate and render everything in memory
/// 3. Early-exit if `--dry-run`
/// 4. Confirm with user unless `--yes`, `--quiet` or piped
/// 5. Write via `GenerateService`
#[instrument(skip_all, fields(model = %args.model))]
pub fn execute(
    args: GenerateArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let request = build_request(&args, &config);
    debug!(
        output_dir = %request.output_dir.display(),
        templates = ?request.templates,
        fields = request.fields.len(),
        "request resolved"
    );

    let engine = super::load_templates(&global, &config)?.into_engine();
    let service = GenerateService::new(engine, Box::new(LocalFilesystem::new()));

    let plan = service.plan(&request)?;

    if args.dry_run {
        output.info(&format!(
            "Dry run: would generate {} file(s) for '{}'",
            plan.files.len(),
            plan.model
        ))?;
        show_plan(&plan, &output)?;
        return Ok(());
    }

    if !output.is_quiet() && !args.yes && output.is_interactive() {
        output.header(&format!("Generating '{}'", plan.model))?;
        show_plan(&plan, &output)?;
        if !confirm()? {
            return Err(CliError::Cancelled);
        }
    }

    let spinner = output.spinner(&format!("Writing {} files...", plan.files.len()));
    let result = service.generate(&request);
    spinner.finish_and_clear();
    let report = result?;

    for file in &report.files {
        let verb = if file.existed { "Overwrote" } else { "Created" };
        output.success(&format!("{verb} {}", file.path.display()))?;
    }
    info!(model = %report.model, files = report.files.len(), "generation completed");

    Ok(())
}

/// Flags win; empty flags fall back to `[generate]` config.
fn build_request(args: &GenerateArgs, config: &AppConfig) -> GenerateRequest {
    GenerateRequest {
        model: args.model.clone(),
        fields: args.fields.clone(),
        output_dir: args
            .output
            .clone()
            .unwrap_or_else(|| config.generate.output_dir.clone()),
        templates: if args.templates.is_empty() {
            config.generate.templates.clone()
        } else {
            args.templates.clone()
        },
        force: args.force,
    }
}

fn show_plan(plan: &GenerationReport, out: &OutputManager) -> CliResult<()> {
    for file in &plan.files {
        let note = if file.existed { "  (exists)" } else { "" };
        out.print(&format!(
            "  {:<8} {}{note}",
            file.template,
            file.path.display()
        ))?;
    }
    Ok(())
}

#[cfg(feature = "interactive")]
fn confirm() -> CliResult<bool> {
    dialoguer::Confirm::new()
        .with_prompt("Write these files?")
        .default(true)
        .interact()
        .map_err(|e| CliError::IoError {
            message: "failed to read confirmation input".into(),
            source: std::io::Error::other(e.to_string()),
        })
}

#[cfg(not(feature = "interactive"))]
fn confirm() -> CliResult<bool> {
    use std::io::{self, Write};

    use crate::error::IntoCli;

    print!("Write these files? [Y/n] ");
    io::stdout()
        .flush()
        .with_cli_context(|| "failed to flush stdout")?;

    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .with_cli_context(|| "failed to read confirmation input")?;

    let input = input.trim().to_ascii_lowercase();
    Ok(input.is_empty() || input == "y" || input == "yes")
}
