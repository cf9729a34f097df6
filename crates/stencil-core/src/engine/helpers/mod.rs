//! Named helper functions and the helper-application stage.

mod builtin;
mod mock;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use tracing::trace;

use crate::engine::{
    RenderError,
    error::HelperError,
    scope::Scope,
    syntax::{self, Tag},
};

/// Signature of a helper: one resolved argument in, replacement text out.
pub type HelperFn = dyn Fn(&Value) -> Result<String, HelperError> + Send + Sync;

/// Helpers shipped with the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinHelper {
    CamelCase,
    PascalCase,
    KebabCase,
    SnakeCase,
    Json,
    MockValue,
}

impl BuiltinHelper {
    pub const ALL: [BuiltinHelper; 6] = [
        Self::CamelCase,
        Self::PascalCase,
        Self::KebabCase,
        Self::SnakeCase,
        Self::Json,
        Self::MockValue,
    ];

    /// Name used in `{{name path}}` directives.
    pub fn name(self) -> &'static str {
        match self {
            Self::CamelCase => "camelCase",
            Self::PascalCase => "pascalCase",
            Self::KebabCase => "kebabCase",
            Self::SnakeCase => "snakeCase",
            Self::Json => "json",
            Self::MockValue => "mockValue",
        }
    }

    fn call(self, arg: &Value) -> Result<String, HelperError> {
        match self {
            Self::CamelCase => builtin::camel_case(arg),
            Self::PascalCase => builtin::pascal_case(arg),
            Self::KebabCase => builtin::kebab_case(arg),
            Self::SnakeCase => builtin::snake_case(arg),
            Self::Json => builtin::json(arg),
            Self::MockValue => mock::mock_value(arg),
        }
    }
}

/// A registered helper.
#[derive(Clone)]
pub enum Helper {
    Builtin(BuiltinHelper),
    Custom(Arc<HelperFn>),
}

impl Helper {
    pub fn call(&self, arg: &Value) -> Result<String, HelperError> {
        match self {
            Self::Builtin(builtin) => builtin.call(arg),
            Self::Custom(f) => f(arg),
        }
    }
}

impl fmt::Debug for Helper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Builtin(builtin) => f.debug_tuple("Builtin").field(builtin).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Name-keyed helper map. Registering an existing name replaces it.
#[derive(Debug, Clone, Default)]
pub struct HelperRegistry {
    helpers: HashMap<String, Helper>,
}

impl HelperRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry preloaded with every [`BuiltinHelper`].
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for builtin in BuiltinHelper::ALL {
            registry.register(builtin.name(), Helper::Builtin(builtin));
        }
        registry
    }

    pub fn register(&mut self, name: impl Into<String>, helper: Helper) {
        self.helpers.insert(name.into(), helper);
    }

    pub fn get(&self, name: &str) -> Option<&Helper> {
        self.helpers.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.helpers.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn list(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.helpers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

/// Replace every `{{helper path...}}` whose helper is registered.
///
/// A single argument is passed as its resolved value (`null` when
/// undefined); several arguments are passed as one array in order. Unknown
/// helper names leave the directive untouched.
pub(crate) fn apply(
    src: &str,
    scope: &Scope<'_>,
    registry: &HelperRegistry,
) -> Result<String, RenderError> {
    let directives = syntax::scan(src);
    syntax::rewrite(src, &directives, |directive| {
        let Tag::Helper { name, args } = &directive.tag else {
            return Ok(None);
        };
        let Some(helper) = registry.get(name) else {
            trace!(helper = *name, "unknown helper, directive kept");
            return Ok(None);
        };

        let arg = match args.as_slice() {
            [single] => resolve_or_null(scope, single),
            many => Value::Array(many.iter().map(|path| resolve_or_null(scope, path)).collect()),
        };

        helper
            .call(&arg)
            .map(Some)
            .map_err(|source| RenderError::Helper {
                helper: (*name).to_string(),
                source,
            })
    })
}

fn resolve_or_null(scope: &Scope<'_>, path: &str) -> Value {
    scope
        .resolve(path)
        .map(|v| v.into_owned())
        .unwrap_or(Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn run(src: &str, ctx: Value) -> Result<String, RenderError> {
        apply(src, &Scope::root(&ctx), &HelperRegistry::with_builtins())
    }

    #[test]
    fn builtins_are_registered_and_listed_sorted() {
        let registry = HelperRegistry::with_builtins();
        assert_eq!(
            registry.list(),
            vec!["camelCase", "json", "kebabCase", "mockValue", "pascalCase", "snakeCase"]
        );
        assert!(HelperRegistry::new().list().is_empty());
    }

    #[test]
    fn case_helpers_convert_resolved_value() {
        let ctx = json!({"a": "user-profile", "b": "UserProfile"});
        assert_eq!(run("{{pascalCase a}}", ctx.clone()).unwrap(), "UserProfile");
        assert_eq!(run("{{kebabCase b}}", ctx.clone()).unwrap(), "user-profile");
        assert_eq!(run("{{camelCase a}}", ctx.clone()).unwrap(), "userProfile");
        assert_eq!(run("{{snakeCase b}}", ctx).unwrap(), "user_profile");
    }

    #[test]
    fn unknown_helper_stays_literal() {
        assert_eq!(
            run("{{unknownHelper x}}", json!({"x": 1})).unwrap(),
            "{{unknownHelper x}}"
        );
    }

    #[test]
    fn plain_variables_are_not_touched() {
        assert_eq!(run("{{name}}", json!({"name": "x"})).unwrap(), "{{name}}");
    }

    #[test]
    fn helper_failure_is_wrapped_with_name() {
        let err = run("{{pascalCase missing}}", json!({})).unwrap_err();
        match err {
            RenderError::Helper { helper, source } => {
                assert_eq!(helper, "pascalCase");
                assert!(matches!(source, HelperError::InvalidArgument { .. }));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn multiple_arguments_arrive_as_array() {
        let mut registry = HelperRegistry::new();
        registry.register(
            "args",
            Helper::Custom(Arc::new(|v: &Value| Ok::<_, HelperError>(v.to_string()))),
        );
        let ctx = json!({"a": 1, "b": "two"});
        let out = apply("{{args a b missing}}", &Scope::root(&ctx), &registry).unwrap();
        assert_eq!(out, r#"[1,"two",null]"#);
    }

    #[test]
    fn re_registration_replaces_helper() {
        let mut registry = HelperRegistry::with_builtins();
        registry.register(
            "pascalCase",
            Helper::Custom(Arc::new(|_: &Value| Ok::<_, HelperError>("replaced".to_string()))),
        );
        let ctx = json!({"n": "x"});
        assert_eq!(
            apply("{{pascalCase n}}", &Scope::root(&ctx), &registry).unwrap(),
            "replaced"
        );
    }

    #[test]
    fn mock_value_with_loop_index() {
        let ctx = json!({"type": "email", "i": 3});
        assert_eq!(run("{{mockValue type i}}", ctx).unwrap(), "'user3@example.com'");
    }
}
