//! Directive lexing and block matching.
//!
//! Every pipeline stage works on plain text: it scans the current string for
//! `{{ ... }}` directives, rewrites the ones it owns and hands the result to
//! the next stage, which scans again. Constructs revealed by an earlier stage
//! (a helper call produced by an `each` expansion, say) are therefore seen by
//! the later stages.
//!
//! Paired directives are matched by depth counting per block kind, so
//! `{{#each a}}{{#each b}}..{{/each}}..{{/each}}` pairs the outer opener with
//! the outer closer regardless of nesting depth.

use std::ops::Range;

/// Block directive kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BlockKind {
    Each,
    If,
}

/// Classified directive content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Tag<'a> {
    /// `{{#each path}}` / `{{#if path}}`
    Open { kind: BlockKind, path: &'a str },
    /// `{{/each}}` / `{{/if}}`
    Close(BlockKind),
    /// `{{name path [path...]}}`
    Helper { name: &'a str, args: Vec<&'a str> },
    /// `{{path}}`
    Variable(&'a str),
    /// Anything else between braces; always left as literal text.
    Unknown,
}

/// A directive and its byte span in the scanned source (`{{` through `}}`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Directive<'a> {
    pub span: Range<usize>,
    pub tag: Tag<'a>,
}

/// A matched top-level block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Block<'a> {
    pub path: &'a str,
    /// Opener through closer, inclusive.
    pub span: Range<usize>,
    /// Text strictly between opener and closer.
    pub body: Range<usize>,
}

/// Find every `{{ ... }}` directive in `src`, in document order.
///
/// A `{{` with no `}}` after it ends scanning; the remainder is text.
pub(crate) fn scan(src: &str) -> Vec<Directive<'_>> {
    let mut directives = Vec::new();
    let mut cursor = 0;

    while let Some(offset) = src[cursor..].find("{{") {
        let start = cursor + offset;
        let inner_start = start + 2;
        let Some(close) = src[inner_start..].find("}}") else {
            break;
        };
        let inner_end = inner_start + close;
        let end = inner_end + 2;

        directives.push(Directive {
            span: start..end,
            tag: classify(&src[inner_start..inner_end]),
        });
        cursor = end;
    }

    directives
}

fn classify(inner: &str) -> Tag<'_> {
    let inner = inner.trim();

    if let Some(rest) = inner.strip_prefix('#') {
        let mut parts = rest.split_whitespace();
        let kind = match parts.next() {
            Some("each") => BlockKind::Each,
            Some("if") => BlockKind::If,
            _ => return Tag::Unknown,
        };
        return match (parts.next(), parts.next()) {
            (Some(path), None) if is_path(path) => Tag::Open { kind, path },
            _ => Tag::Unknown,
        };
    }

    if let Some(rest) = inner.strip_prefix('/') {
        return match rest.trim() {
            "each" => Tag::Close(BlockKind::Each),
            "if" => Tag::Close(BlockKind::If),
            _ => Tag::Unknown,
        };
    }

    let mut parts = inner.split_whitespace();
    let Some(first) = parts.next() else {
        return Tag::Unknown;
    };
    let args: Vec<&str> = parts.collect();

    if args.is_empty() {
        return if is_path(first) {
            Tag::Variable(first)
        } else {
            Tag::Unknown
        };
    }

    if is_helper_name(first) && args.iter().all(|a| is_path(a)) {
        Tag::Helper { name: first, args }
    } else {
        Tag::Unknown
    }
}

fn is_path(s: &str) -> bool {
    !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '$' | '@' | '.' | '-'))
}

fn is_helper_name(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '$'))
}

/// Pair openers and closers of `kind`, returning only the outermost blocks.
///
/// A closer with no open block stays literal, and so does an opener that is
/// never closed (together with everything nested in it).
pub(crate) fn top_level_blocks<'a>(directives: &[Directive<'a>], kind: BlockKind) -> Vec<Block<'a>> {
    let mut blocks = Vec::new();
    let mut depth = 0usize;
    let mut open: Option<(usize, usize, &'a str)> = None;

    for directive in directives {
        match directive.tag {
            Tag::Open { kind: k, path } if k == kind => {
                if depth == 0 {
                    open = Some((directive.span.start, directive.span.end, path));
                }
                depth += 1;
            }
            Tag::Close(k) if k == kind => {
                if depth == 0 {
                    continue;
                }
                depth -= 1;
                if depth == 0 {
                    if let Some((start, body_start, path)) = open.take() {
                        blocks.push(Block {
                            path,
                            span: start..directive.span.end,
                            body: body_start..directive.span.start,
                        });
                    }
                }
            }
            _ => {}
        }
    }

    blocks
}

/// Replace each block's span with `f(block)`, copying the text in between.
pub(crate) fn splice<E>(
    src: &str,
    blocks: &[Block<'_>],
    mut f: impl FnMut(&Block<'_>) -> Result<String, E>,
) -> Result<String, E> {
    let mut out = String::with_capacity(src.len());
    let mut cursor = 0;
    for block in blocks {
        out.push_str(&src[cursor..block.span.start]);
        out.push_str(&f(block)?);
        cursor = block.span.end;
    }
    out.push_str(&src[cursor..]);
    Ok(out)
}

/// Rewrite individual directives. `Ok(None)` keeps the directive text as-is.
pub(crate) fn rewrite<E>(
    src: &str,
    directives: &[Directive<'_>],
    mut f: impl FnMut(&Directive<'_>) -> Result<Option<String>, E>,
) -> Result<String, E> {
    let mut out = String::with_capacity(src.len());
    let mut cursor = 0;
    for directive in directives {
        if let Some(replacement) = f(directive)? {
            out.push_str(&src[cursor..directive.span.start]);
            out.push_str(&replacement);
            cursor = directive.span.end;
        }
    }
    out.push_str(&src[cursor..]);
    Ok(out)
}
