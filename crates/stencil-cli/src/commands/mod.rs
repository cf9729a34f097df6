//! Command handlers, one module per subcommand.
//!
//! Handlers translate parsed arguments into core service calls and display
//! the results. No rendering or generation logic lives here.

use std::path::PathBuf;

use tracing::debug;

use stencil_adapters::{BuiltinTemplates, FilesystemTemplateLoader};
use stencil_core::application::TemplateService;

use crate::{cli::GlobalArgs, config::AppConfig, error::CliResult};

pub mod completions;
pub mod config;
pub mod generate;
pub mod init;
pub mod list;
pub mod render;

/// Directory `init --eject` writes to when none is configured.
pub const DEFAULT_TEMPLATES_DIR: &str = "templates";

/// `--templates` wins over `templates.dir`.
pub fn templates_dir(global: &GlobalArgs, config: &AppConfig) -> Option<PathBuf> {
    global
        .templates
        .clone()
        .or_else(|| config.templates.dir.clone())
}

/// Build a template service holding the built-ins (unless disabled) with
/// the user templates directory layered on top.
pub fn load_templates(global: &GlobalArgs, config: &AppConfig) -> CliResult<TemplateService> {
    let mut service = TemplateService::default();

    if config.templates.include_builtin {
        service.install(&BuiltinTemplates::new())?;
    }
    if let Some(dir) = templates_dir(global, config) {
        let installed = service.install(&FilesystemTemplateLoader::new(&dir))?;
        debug!(dir = %dir.display(), installed, "user templates loaded");
    }

    Ok(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn builtins_load_by_default() {
        let service = load_templates(&GlobalArgs::default(), &AppConfig::default()).unwrap();
        let names: Vec<String> = service.list().into_iter().map(|t| t.name).collect();
        assert_eq!(names, vec!["form", "list", "mock", "service", "types"]);
    }

    #[test]
    fn user_templates_override_builtins_by_name() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("types.ts.tpl"), "custom {{modelName}}").unwrap();
        fs::write(dir.path().join("card.tsx.tpl"), "<Card />").unwrap();

        let global = GlobalArgs {
            templates: Some(dir.path().to_path_buf()),
            ..GlobalArgs::default()
        };
        let service = load_templates(&global, &AppConfig::default()).unwrap();
        let engine = service.engine();

        assert_eq!(service.list().len(), 6);
        let out = engine
            .render("types", &serde_json::json!({"modelName": "User"}))
            .unwrap();
        assert_eq!(out.content, "custom User");
    }

    #[test]
    fn builtins_can_be_disabled() {
        let mut config = AppConfig::default();
        config.templates.include_builtin = false;
        let service = load_templates(&GlobalArgs::default(), &config).unwrap();
        assert!(service.list().is_empty());
    }

    #[test]
    fn flag_beats_config_dir() {
        let mut config = AppConfig::default();
        config.templates.dir = Some(PathBuf::from("from-config"));
        let global = GlobalArgs {
            templates: Some(PathBuf::from("from-flag")),
            ..GlobalArgs::default()
        };
        assert_eq!(templates_dir(&global, &config), Some(PathBuf::from("from-flag")));
        assert_eq!(
            templates_dir(&GlobalArgs::default(), &config),
            Some(PathBuf::from("from-config"))
        );
    }
}
