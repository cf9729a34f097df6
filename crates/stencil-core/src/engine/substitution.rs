//! Plain `{{path}}` substitution, the last pipeline stage.

use std::convert::Infallible;

use crate::domain::value;
use crate::engine::{
    scope::Scope,
    syntax::{self, Tag},
};

/// Replace every resolvable `{{path}}` with its string form.
///
/// Undefined paths keep their directive text so typos stay visible in the
/// generated output.
pub(crate) fn substitute(src: &str, scope: &Scope<'_>) -> String {
    let directives = syntax::scan(src);
    syntax::rewrite(src, &directives, |directive| {
        Ok::<_, Infallible>(match directive.tag {
            Tag::Variable(path) => scope.resolve(path).map(|v| value::stringify(&v)),
            _ => None,
        })
    })
    .unwrap_or_else(|never| match never {})
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_path_is_preserved() {
        let ctx = json!({});
        assert_eq!(substitute("Hi {{missing}}", &Scope::root(&ctx)), "Hi {{missing}}");
    }

    #[test]
    fn defined_values_are_coerced() {
        let ctx = json!({"n": 3, "b": true, "s": "x", "nil": null, "list": [1, 2]});
        assert_eq!(
            substitute("{{n}} {{b}} {{s}} {{nil}} {{list}}", &Scope::root(&ctx)),
            "3 true x null 1,2"
        );
    }

    #[test]
    fn substituted_text_is_not_rescanned() {
        let ctx = json!({"a": "{{b}}", "b": "no"});
        assert_eq!(substitute("{{a}}", &Scope::root(&ctx)), "{{b}}");
    }

    #[test]
    fn helper_shaped_and_unknown_directives_stay() {
        let ctx = json!({"x": 1});
        assert_eq!(
            substitute("{{unknownHelper x}} {{#if}}", &Scope::root(&ctx)),
            "{{unknownHelper x}} {{#if}}"
        );
    }
}
