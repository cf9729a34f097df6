//! `{{#each path}} ... {{/each}}` expansion.

use std::convert::Infallible;

use serde_json::Value;
use tracing::trace;

use crate::domain::value;
use crate::engine::{
    HelperRegistry, RenderError, pipeline,
    scope::{LoopBindings, Scope},
    syntax::{self, Block, BlockKind, Tag},
};

/// Expand every top-level `each` block in `src`.
///
/// Nested blocks are expanded by the per-element pipeline run, so each level
/// sees its own loop bindings.
pub(crate) fn expand(
    src: &str,
    scope: &Scope<'_>,
    helpers: &HelperRegistry,
) -> Result<String, RenderError> {
    let directives = syntax::scan(src);
    let blocks = syntax::top_level_blocks(&directives, BlockKind::Each);
    if blocks.is_empty() {
        return Ok(src.to_owned());
    }
    syntax::splice(src, &blocks, |block| expand_block(src, block, scope, helpers))
}

fn expand_block(
    src: &str,
    block: &Block<'_>,
    scope: &Scope<'_>,
    helpers: &HelperRegistry,
) -> Result<String, RenderError> {
    let resolved = scope.resolve(block.path);
    let Some(Value::Array(items)) = resolved.as_deref() else {
        trace!(path = block.path, "each over a non-sequence, block dropped");
        return Ok(String::new());
    };

    let body = &src[block.body.clone()];
    let mut out = String::new();
    for (index, element) in items.iter().enumerate() {
        let bindings = LoopBindings::new(index, items.len(), element);
        let bound = bind_element(body, element, &bindings);
        let element_scope = scope.for_element(element, bindings);
        out.push_str(&pipeline(&bound, &element_scope, helpers)?);
    }
    Ok(out)
}

/// First, limited pass over one element's copy of the body: substitute loop
/// bindings and the element's own top-level fields.
///
/// Bodies of nested `each` blocks are skipped; their `@` bindings belong to
/// the inner loop.
fn bind_element(body: &str, element: &Value, bindings: &LoopBindings) -> String {
    let directives = syntax::scan(body);
    let mut depth = 0usize;
    syntax::rewrite(body, &directives, |directive| {
        Ok::<_, Infallible>(match directive.tag {
            Tag::Open { kind: BlockKind::Each, .. } => {
                depth += 1;
                None
            }
            Tag::Close(BlockKind::Each) => {
                depth = depth.saturating_sub(1);
                None
            }
            Tag::Variable(path) if depth == 0 => lookup(path, element, bindings),
            _ => None,
        })
    })
    .unwrap_or_else(|never| match never {})
}

fn lookup(path: &str, element: &Value, bindings: &LoopBindings) -> Option<String> {
    match path.strip_prefix('@') {
        Some(name) => bindings.get(name).map(|v| value::stringify(&v)),
        None => element.as_object()?.get(path).map(value::stringify),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn run(src: &str, ctx: Value) -> String {
        expand(src, &Scope::root(&ctx), &HelperRegistry::with_builtins()).unwrap()
    }

    #[test]
    fn index_and_fields_per_element() {
        let out = run(
            "{{#each items}}{{@index}}:{{name}}\n{{/each}}",
            json!({"items": [{"name": "A"}, {"name": "B"}]}),
        );
        assert_eq!(out, "0:A\n1:B\n");
    }

    #[test]
    fn non_sequence_drops_block() {
        assert_eq!(run("a{{#each items}}X{{/each}}b", json!({"items": 5})), "ab");
        assert_eq!(run("{{#each items}}X{{/each}}", json!({})), "");
        assert_eq!(run("{{#each items}}X{{/each}}", json!({"items": {"a": 1}})), "");
    }

    #[test]
    fn empty_sequence_is_empty() {
        assert_eq!(run("[{{#each items}}X{{/each}}]", json!({"items": []})), "[]");
    }

    #[test]
    fn first_last_and_key_bindings() {
        let out = run(
            "{{#each items}}{{@key}}={{@first}}/{{@last}};{{/each}}",
            json!({"items": [{"key": "a"}, {"x": 1}, {"key": "c"}]}),
        );
        assert_eq!(out, "a=true/false;1=false/false;c=false/true;");
    }

    #[test]
    fn outer_context_visible_inside_loop() {
        let out = run(
            "{{#each fields}}{{modelName}}.{{name}} {{/each}}",
            json!({"modelName": "User", "fields": [{"name": "id"}, {"name": "email"}]}),
        );
        assert_eq!(out, "User.id User.email ");
    }

    #[test]
    fn nested_loops_form_cross_product() {
        let out = run(
            "{{#each rows}}{{#each cols}}{{r}}{{c}},{{/each}}|{{/each}}",
            json!({
                "rows": [{"r": 1}, {"r": 2}],
                "cols": [{"c": "a"}, {"c": "b"}]
            }),
        );
        assert_eq!(out, "1a,1b,|2a,2b,|");
    }

    #[test]
    fn inner_loop_index_is_its_own() {
        let out = run(
            "{{#each groups}}{{@index}}[{{#each items}}{{@index}}{{/each}}]{{/each}}",
            json!({"groups": [{"items": [1, 2, 3]}, {"items": [4]}]}),
        );
        assert_eq!(out, "0[012]1[0]");
    }

    #[test]
    fn scalar_elements_still_get_bindings() {
        let out = run("{{#each tags}}{{@index}}{{/each}}", json!({"tags": ["x", "y"]}));
        assert_eq!(out, "01");
    }

    #[test]
    fn conditionals_and_helpers_inside_loop_body() {
        let out = run(
            "{{#each fields}}{{#if @first}}first:{{/if}}{{pascalCase name}} {{/each}}",
            json!({"fields": [{"name": "first-name"}, {"name": "last_name"}]}),
        );
        assert_eq!(out, "first:FirstName LastName ");
    }

    #[test]
    fn unclosed_each_is_left_literal() {
        assert_eq!(run("{{#each items}}X", json!({"items": [1]})), "{{#each items}}X");
    }
}
