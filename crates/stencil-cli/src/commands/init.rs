//! `stencil init` — create a default configuration file and, with
//! `--eject`, editable copies of the built-in templates.

use std::path::{Path, PathBuf};

use tracing::info;

use stencil_adapters::{BuiltinTemplates, LocalFilesystem, TEMPLATE_SUFFIX};
use stencil_core::{application::ports::Filesystem, domain::Template};

use crate::{
    cli::{GlobalArgs, InitArgs},
    config::{AppConfig, LOCAL_CONFIG_FILE},
    error::{CliError, CliResult},
    output::OutputManager,
};

use super::DEFAULT_TEMPLATES_DIR;

pub fn execute(
    args: InitArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    output.info("Initialising configuration...")?;

    let filesystem = LocalFilesystem::new();
    let config_path = if args.local {
        PathBuf::from(LOCAL_CONFIG_FILE)
    } else {
        AppConfig::config_path()
    };

    let mut fresh = AppConfig::default();
    let templates_dir = if args.eject {
        let dir = super::templates_dir(&global, &config)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_TEMPLATES_DIR));
        Some(persisted_templates_dir(dir, args.local)?)
    } else {
        None
    };
    fresh.templates.dir = templates_dir.clone();

    // An existing config is left alone without --force.
    if filesystem.exists(&config_path) && !args.force {
        output.warning(&format!(
            "Config already exists at {}  (use --force to overwrite)",
            config_path.display(),
        ))?;
    } else {
        let toml = fresh.to_toml().map_err(|e| CliError::ConfigError {
            message: format!("Failed to serialise default config: {e}"),
            source: Some(Box::new(e)),
        })?;
        filesystem.write_file(&config_path, &toml)?;
        output.success(&format!(
            "Configuration created at {}",
            config_path.display(),
        ))?;
    }

    if let Some(dir) = templates_dir {
        let written = eject(&filesystem, &dir, args.force)?;
        info!(dir = %dir.display(), written, "built-in templates ejected");
        output.success(&format!(
            "Wrote {written} templates to {}",
            dir.display()
        ))?;
    }

    Ok(())
}

/// The user config is read from every working directory, so a relative
/// templates dir only survives in the project-local `.stencil.toml`.
fn persisted_templates_dir(dir: PathBuf, local: bool) -> CliResult<PathBuf> {
    if local || dir.is_absolute() {
        return Ok(dir);
    }
    std::path::absolute(&dir).map_err(|source| CliError::IoError {
        message: format!("failed to resolve templates directory {}", dir.display()),
        source,
    })
}

/// `types` + `ts` → `types.ts.tpl`, which the loader maps back to the same
/// name and extension.
fn ejected_file_name(template: &Template) -> String {
    format!(
        "{}.{}{}",
        template.name(),
        template.extension(),
        TEMPLATE_SUFFIX
    )
}

/// Write every built-in template into `dir`. Refuses to overwrite without
/// `force`, checking all targets before the first write.
fn eject(filesystem: &dyn Filesystem, dir: &Path, force: bool) -> CliResult<usize> {
    let files: Vec<(PathBuf, Template)> = BuiltinTemplates::templates()
        .into_iter()
        .map(|t| (dir.join(ejected_file_name(&t)), t))
        .collect();

    if !force {
        if let Some((path, _)) = files.iter().find(|(path, _)| filesystem.exists(path)) {
            return Err(CliError::OutputExists { path: path.clone() });
        }
    }

    filesystem.create_dir_all(dir)?;
    for (path, template) in &files {
        filesystem.write_file(path, template.body())?;
    }
    Ok(files.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use stencil_adapters::{FilesystemTemplateLoader, MemoryFilesystem};
    use stencil_core::application::ports::TemplateSource;

    #[test]
    fn ejected_names_round_trip_through_the_loader_rules() {
        let template = Template::new("form", "", "tsx");
        assert_eq!(ejected_file_name(&template), "form.tsx.tpl");
    }

    #[test]
    fn user_config_gets_an_absolute_templates_dir() {
        let dir = persisted_templates_dir(PathBuf::from("templates"), false).unwrap();
        assert!(dir.is_absolute());
        assert!(dir.ends_with("templates"));
        assert_eq!(
            persisted_templates_dir(PathBuf::from("templates"), true).unwrap(),
            PathBuf::from("templates")
        );
    }

    #[test]
    fn eject_writes_every_builtin() {
        let fs = MemoryFilesystem::new();
        let written = eject(&fs, Path::new("templates"), false).unwrap();
        assert_eq!(written, 5);
        assert!(fs.exists(Path::new("templates/types.ts.tpl")));
        assert!(fs.exists(Path::new("templates/list.tsx.tpl")));
    }

    #[test]
    fn eject_refuses_to_overwrite_without_force() {
        let fs = MemoryFilesystem::new()
            .with_file("templates/mock.ts.tpl", "mine")
            .unwrap();

        let err = eject(&fs, Path::new("templates"), false).unwrap_err();
        assert!(matches!(err, CliError::OutputExists { .. }));
        assert_eq!(fs.read_file(Path::new("templates/mock.ts.tpl")).unwrap(), "mine");
        assert_eq!(fs.list_files().len(), 1);

        eject(&fs, Path::new("templates"), true).unwrap();
        assert_ne!(fs.read_file(Path::new("templates/mock.ts.tpl")).unwrap(), "mine");
    }

    #[test]
    fn ejected_directory_loads_back_identically() {
        let dir = tempfile::TempDir::new().unwrap();
        eject(&LocalFilesystem::new(), dir.path(), false).unwrap();

        let mut loaded = FilesystemTemplateLoader::new(dir.path()).load().unwrap();
        loaded.sort_by(|a, b| a.name().cmp(b.name()));
        let mut builtin = BuiltinTemplates::templates();
        builtin.sort_by(|a, b| a.name().cmp(b.name()));
        assert_eq!(loaded, builtin);
    }
}
