//! Render scopes and dotted-path resolution.

use std::borrow::Cow;

use serde_json::{Map, Value};

/// Synthetic bindings of the innermost `each` element.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct LoopBindings {
    index: usize,
    first: bool,
    last: bool,
    key: Value,
}

impl LoopBindings {
    pub(crate) fn new(index: usize, len: usize, element: &Value) -> Self {
        let key = element
            .get("key")
            .cloned()
            .unwrap_or_else(|| Value::from(index));
        Self {
            index,
            first: index == 0,
            last: index + 1 == len,
            key,
        }
    }

    /// Look up `index`, `first`, `last` or `key` (without the `@`).
    pub(crate) fn get(&self, name: &str) -> Option<Value> {
        match name {
            "index" => Some(Value::from(self.index)),
            "first" => Some(Value::Bool(self.first)),
            "last" => Some(Value::Bool(self.last)),
            "key" => Some(self.key.clone()),
            _ => None,
        }
    }
}

/// Data visible at one point of a template.
///
/// The root scope borrows the caller's context. Each `each` element gets an
/// owned scope: the enclosing data shallow-merged with the element's own
/// fields, plus that element's loop bindings.
#[derive(Debug, Clone)]
pub struct Scope<'a> {
    data: Cow<'a, Value>,
    bindings: Option<LoopBindings>,
}

impl<'a> Scope<'a> {
    pub fn root(context: &'a Value) -> Self {
        Self {
            data: Cow::Borrowed(context),
            bindings: None,
        }
    }

    pub(crate) fn for_element(&self, element: &Value, bindings: LoopBindings) -> Scope<'static> {
        let mut merged = match self.data.as_ref() {
            Value::Object(fields) => fields.clone(),
            _ => Map::new(),
        };
        if let Value::Object(fields) = element {
            for (name, value) in fields {
                merged.insert(name.clone(), value.clone());
            }
        }
        Scope {
            data: Cow::Owned(Value::Object(merged)),
            bindings: Some(bindings),
        }
    }

    /// Resolve a dotted path. `None` means undefined.
    ///
    /// `@` paths only ever see the innermost loop bindings, never context
    /// fields, even when a field of the same name exists.
    pub fn resolve(&self, path: &str) -> Option<Cow<'_, Value>> {
        if let Some(rest) = path.strip_prefix('@') {
            let mut segments = rest.split('.');
            let binding = self.bindings.as_ref()?.get(segments.next()?)?;
            return descend(&binding, segments).cloned().map(Cow::Owned);
        }
        descend(self.data.as_ref(), path.split('.')).map(Cow::Borrowed)
    }
}

fn descend<'v, 's>(root: &'v Value, segments: impl Iterator<Item = &'s str>) -> Option<&'v Value> {
    let mut current = root;
    for segment in segments {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}
