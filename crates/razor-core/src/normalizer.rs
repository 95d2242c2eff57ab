//! Rewrites Razor-flavoured templates into syntax Vash understands.
//!
//! Passes run in a fixed order: ignore spans, then `@* *@` comments, then
//! literal token renames, then loop conversion. Stripping comes first so
//! commented-out constructs never reach the structural passes.

use regex::Regex;
use tracing::debug;

use crate::{
    brace::PLACEHOLDER_SIGIL,
    config::NormalizerConfig,
    errors::{excerpt, Diagnostic, RazorError, RewriteError},
    foreach::ForEachConverter,
    tokens,
};

/// Rewritten text plus the non-fatal findings collected on the way
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized {
    pub text: String,
    pub diagnostics: Vec<Diagnostic>,
}

/// Template rewriting pipeline, built once per configuration
#[derive(Debug, Clone)]
pub struct SyntaxNormalizer {
    ignore_span: Regex,
    comment: Regex,
    loops: ForEachConverter,
}

impl SyntaxNormalizer {
    pub fn new(config: &NormalizerConfig) -> Result<Self, RazorError> {
        if config.ignore_start.is_empty() || config.ignore_end.is_empty() {
            return Err(RazorError::Config(
                "ignore markers must not be empty".to_string(),
            ));
        }

        let ignore_span = span_regex(&config.ignore_start, &config.ignore_end)?;
        let comment = span_regex("@*", "*@")?;

        Ok(Self {
            ignore_span,
            comment,
            loops: ForEachConverter::new(config.helpers_name.as_str()),
        })
    }

    pub fn normalize(&self, text: &str) -> Result<Normalized, RewriteError> {
        let text = self.ignore_span.replace_all(text, "");
        let text = self.comment.replace_all(&text, "");
        // only live text can collide with placeholders
        if let Some(index) = text.find(PLACEHOLDER_SIGIL) {
            return Err(RewriteError::ReservedMarker {
                excerpt: excerpt(&text[index..]),
            });
        }

        let text = tokens::rewrite(&text);
        debug!(len = text.len(), "stripped comments and renamed tokens");

        let mut diagnostics = Vec::new();
        let text = self.loops.convert(&text, &mut diagnostics)?;
        debug!(len = text.len(), warnings = diagnostics.len(), "converted loops");

        Ok(Normalized { text, diagnostics })
    }
}

/// Normalize `text` with a one-off pipeline built from `config`
pub fn normalize(text: &str, config: &NormalizerConfig) -> Result<Normalized, RazorError> {
    Ok(SyntaxNormalizer::new(config)?.normalize(text)?)
}

fn span_pattern(start: &str, end: &str) -> String {
    format!("(?s){}.*?{}", regex::escape(start), regex::escape(end))
}

fn span_regex(start: &str, end: &str) -> Result<Regex, RazorError> {
    Regex::new(&span_pattern(start, end)).map_err(|e| RazorError::Config(e.to_string()))
}
