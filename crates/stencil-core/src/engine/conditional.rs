//! `{{#if path}} ... {{/if}}` evaluation. There is no else branch.

use std::convert::Infallible;

use crate::domain::value;
use crate::engine::{
    scope::Scope,
    syntax::{self, BlockKind},
};

/// Keep the bodies of truthy blocks and drop falsy or undefined ones.
pub(crate) fn evaluate(src: &str, scope: &Scope<'_>) -> String {
    let directives = syntax::scan(src);
    let blocks = syntax::top_level_blocks(&directives, BlockKind::If);
    if blocks.is_empty() {
        return src.to_owned();
    }

    syntax::splice(src, &blocks, |block| {
        let keep = scope
            .resolve(block.path)
            .is_some_and(|v| value::is_truthy(&v));
        Ok::<_, Infallible>(if keep {
            evaluate(&src[block.body.clone()], scope)
        } else {
            String::new()
        })
    })
    .unwrap_or_else(|never| match never {})
}
