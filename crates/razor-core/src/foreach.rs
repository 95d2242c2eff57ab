//! `@foreach(var x in xs) { ... }` to `@Html.foreach(xs, function(x) { ... })`
//!
//! Inline logic blocks are protected before scanning so the first `{` after
//! a loop header is always the loop body's own brace. Each body's matching
//! close becomes a loop placeholder, and all placeholders are resolved to
//! `})` once every loop in the text is rewritten. Loops nested in a body are
//! picked up by the same scan because it resumes right after each header.

use tracing::warn;

use crate::{
    brace::{close_with, find_matching_close},
    errors::{excerpt, BlockKind, Diagnostic, RewriteError},
    logic_block,
};

/// Opener of a loop construct
pub const LOOP_OPENER: &str = "@foreach(";

/// Variable name used when a header declares none
pub const FALLBACK_VARIABLE: &str = "item";

const LOOP_CLOSE_MARK: &str = "\u{E000}loop-close\u{E000}";

/// Declaration extracted from a loop header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoopHeader {
    pub variable: String,
    pub iterable: String,
    /// Text between the header's `)` and the body's `{`
    pub trailing: String,
}

/// Rewrites loop constructs into call-style helper invocations
#[derive(Debug, Clone)]
pub struct ForEachConverter {
    helpers_name: String,
}

impl ForEachConverter {
    pub fn new(helpers_name: impl Into<String>) -> Self {
        Self {
            helpers_name: helpers_name.into(),
        }
    }

    /// Rewrite every loop in `text`, appending non-fatal findings to `diagnostics`
    pub fn convert(
        &self,
        text: &str,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<String, RewriteError> {
        if !text.contains(LOOP_OPENER) {
            return Ok(text.to_string());
        }

        let mut work = logic_block::protect(text)?;
        let mut cursor = 0;

        while let Some(found) = work[cursor..].find(LOOP_OPENER) {
            let start = cursor + found;
            let args_start = start + LOOP_OPENER.len();

            let open = work[args_start..]
                .find('{')
                .map(|offset| args_start + offset)
                .ok_or_else(|| {
                    RewriteError::malformed(BlockKind::Loop, &source_excerpt(&work, start))
                })?;
            let close = find_matching_close(&work[open + 1..])
                .map(|offset| open + 1 + offset)
                .ok_or_else(|| {
                    RewriteError::malformed(BlockKind::Loop, &source_excerpt(&work, start))
                })?;

            let args = &work[args_start..open];
            let header = match parse_header(args) {
                Ok(header) => header,
                Err(reason) => {
                    let snippet = source_excerpt(&work, start);
                    if !split_declaration(args).0 {
                        warn!("foreach header has no 'var' declaration: '{snippet}'");
                    }
                    return Err(RewriteError::loop_syntax(reason, &snippet));
                }
            };
            if !header.declared {
                let diagnostic = Diagnostic::MissingVariable {
                    variable: header.value.variable.clone(),
                    excerpt: excerpt(&source_excerpt(&work, start)),
                };
                warn!("{diagnostic}");
                diagnostics.push(diagnostic);
            }

            // close first: it sits after the header, so `start..=open` stays valid
            close_with(&mut work, close, LOOP_CLOSE_MARK);
            let opener = self.call_opener(&header.value);
            work.replace_range(start..open + 1, &opener);
            cursor = start + opener.len();
        }

        let work = work.replace(LOOP_CLOSE_MARK, "})");
        Ok(logic_block::restore(&work))
    }

    fn call_opener(&self, header: &LoopHeader) -> String {
        format!(
            "@{}.foreach({}, function({}){}{{",
            self.helpers_name, header.iterable, header.variable, header.trailing
        )
    }
}

struct ParsedHeader {
    value: LoopHeader,
    /// False when the `var` keyword or the name after it was missing
    declared: bool,
}

/// Parse the argument text of a loop opener, up to (not including) the body brace
fn parse_header(args: &str) -> Result<ParsedHeader, &'static str> {
    let paren = args.rfind(')').ok_or("missing ')'")?;
    let inner = args[..paren].trim();
    let trailing = args[paren + 1..].to_string();

    let (declared, declaration) = split_declaration(inner);

    let (name, iterable) =
        split_on_in(declaration).ok_or("expected 'var <name> in <iterable>'")?;
    if iterable.is_empty() {
        return Err("missing iterable after 'in'");
    }

    // typed declarations such as `string s` keep only the name
    let name = name.split_whitespace().last().unwrap_or("");
    let (variable, declared) = if name.is_empty() {
        (FALLBACK_VARIABLE.to_string(), false)
    } else {
        (name.to_string(), declared)
    };

    Ok(ParsedHeader {
        value: LoopHeader {
            variable,
            iterable: iterable.to_string(),
            trailing,
        },
        declared,
    })
}

/// Strip a leading `var` keyword, reporting whether it was there
fn split_declaration(args: &str) -> (bool, &str) {
    let args = args.trim_start();
    match args.strip_prefix("var") {
        Some(rest) if rest.starts_with(char::is_whitespace) => (true, rest.trim_start()),
        _ => (false, args),
    }
}

/// Split at the first whitespace-delimited `in` keyword
fn split_on_in(declaration: &str) -> Option<(&str, &str)> {
    declaration
        .match_indices("in")
        .find(|(index, _)| {
            let before = declaration[..*index]
                .chars()
                .next_back()
                .map_or(true, char::is_whitespace);
            let after = declaration[index + 2..]
                .chars()
                .next()
                .is_some_and(char::is_whitespace);
            before && after
        })
        .map(|(index, _)| (declaration[..index].trim(), declaration[index + 2..].trim()))
}

/// Text from `start` as the author wrote it, for error messages
fn source_excerpt(work: &str, start: usize) -> String {
    let line = work[start..].lines().next().unwrap_or("");
    logic_block::restore(line).replace(LOOP_CLOSE_MARK, "}")
}
