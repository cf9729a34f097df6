//! Implementation of the `stencil render` command.
//!
//! Builds a JSON context from `--context` and `--set`, renders one template
//! (or an inline body) and writes the text to stdout or `-o FILE`.

use std::io::Read as _;
use std::path::Path;

use serde_json::{Map, Value};
use tracing::{info, instrument};

use stencil_adapters::LocalFilesystem;
use stencil_core::{application::ports::Filesystem, error::StencilError};

use crate::{
    cli::{GlobalArgs, RenderArgs},
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

/// Reads the context from standard input.
const STDIN_MARKER: &str = "-";

#[instrument(skip_all, fields(inline = args.inline))]
pub fn execute(
    args: RenderArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let mut context = read_context(args.context.as_deref())?;
    apply_assignments(&mut context, &args.set)?;

    let service = super::load_templates(&global, &config)?;
    let engine = service.engine();
    let content = if args.inline {
        engine
            .render_str(&args.name, &context)
            .map_err(StencilError::from)?
    } else {
        engine
            .render(&args.name, &context)
            .map_err(StencilError::from)?
            .content
    };

    match &args.output {
        Some(path) => {
            LocalFilesystem::new().write_file(path, &content)?;
            info!(path = %path.display(), bytes = content.len(), "render written");
            output.success(&format!("Wrote {}", path.display()))?;
        }
        None => output.emit(&content)?,
    }

    Ok(())
}

/// Parse the context file (or stdin); no file means an empty object.
fn read_context(source: Option<&Path>) -> CliResult<Value> {
    let Some(path) = source else {
        return Ok(Value::Object(Map::new()));
    };

    let (origin, raw) = if path == Path::new(STDIN_MARKER) {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .with_cli_context(|| "failed to read context from stdin")?;
        ("stdin".to_string(), buf)
    } else {
        let raw = std::fs::read_to_string(path)
            .with_cli_context(|| format!("failed to read context file '{}'", path.display()))?;
        (path.display().to_string(), raw)
    };

    parse_context(&origin, &raw)
}

fn parse_context(origin: &str, raw: &str) -> CliResult<Value> {
    serde_json::from_str(raw).map_err(|source| CliError::InvalidContext {
        origin: origin.to_string(),
        source,
    })
}

/// Apply `--set` pairs. Values are JSON when they parse as JSON and plain
/// strings otherwise; dotted keys create nested objects.
fn apply_assignments(context: &mut Value, assignments: &[(String, String)]) -> CliResult<()> {
    if assignments.is_empty() {
        return Ok(());
    }
    let Value::Object(root) = context else {
        return Err(CliError::InvalidInput {
            message: "--set requires the context to be a JSON object".into(),
            source: None,
        });
    };

    for (key, raw) in assignments {
        let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.clone()));
        insert_path(root, key, key, value)?;
    }
    Ok(())
}

fn insert_path(
    target: &mut Map<String, Value>,
    full_key: &str,
    key: &str,
    value: Value,
) -> CliResult<()> {
    let Some((head, rest)) = key.split_once('.') else {
        target.insert(key.to_string(), value);
        return Ok(());
    };

    let entry = target
        .entry(head.to_string())
        .or_insert_with(|| Value::Object(Map::new()));
    match entry {
        Value::Object(inner) => insert_path(inner, full_key, rest, value),
        _ => Err(CliError::InvalidInput {
            message: format!("cannot set '{full_key}': '{head}' is not an object"),
            source: None,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn set(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn missing_context_is_empty_object() {
        assert_eq!(read_context(None).unwrap(), json!({}));
    }

    #[test]
    fn context_file_is_parsed() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("ctx.json");
        std::fs::write(&path, r#"{"name": "user"}"#).unwrap();
        assert_eq!(read_context(Some(&path)).unwrap(), json!({"name": "user"}));
    }

    #[test]
    fn malformed_context_names_its_origin() {
        let err = parse_context("ctx.json", "{ nope").unwrap_err();
        assert!(matches!(err, CliError::InvalidContext { ref origin, .. } if origin == "ctx.json"));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn assignments_parse_json_then_fall_back_to_strings() {
        let mut ctx = json!({"name": "old"});
        apply_assignments(
            &mut ctx,
            &set(&[("name", "user-profile"), ("count", "3"), ("flags", "[true]")]),
        )
        .unwrap();
        assert_eq!(
            ctx,
            json!({"name": "user-profile", "count": 3, "flags": [true]})
        );
    }

    #[test]
    fn dotted_keys_build_nested_objects() {
        let mut ctx = json!({"user": {"id": 1}});
        apply_assignments(&mut ctx, &set(&[("user.name", "Ada"), ("meta.tag", "x")])).unwrap();
        assert_eq!(
            ctx,
            json!({"user": {"id": 1, "name": "Ada"}, "meta": {"tag": "x"}})
        );
    }

    #[test]
    fn dotted_key_through_a_scalar_is_rejected() {
        let mut ctx = json!({"user": "Ada"});
        let err = apply_assignments(&mut ctx, &set(&[("user.name", "x")])).unwrap_err();
        assert!(err.to_string().contains("'user' is not an object"));
    }

    #[test]
    fn assignments_need_an_object_context() {
        let mut ctx = json!([1, 2]);
        assert!(apply_assignments(&mut ctx, &set(&[("a", "b")])).is_err());
        // without assignments any JSON value is a valid context
        assert!(apply_assignments(&mut ctx, &[]).is_ok());
    }
}
