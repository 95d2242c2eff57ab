use std::{fmt, path::PathBuf};

use thiserror::Error;

/// Longest excerpt carried by an error or diagnostic, in characters
const EXCERPT_LEN: usize = 60;

/// Which kind of block lost its closing brace
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    /// `@{ ... }`
    Logic,
    /// `@foreach(...) { ... }`
    Loop,
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockKind::Logic => write!(f, "inline logic block"),
            BlockKind::Loop => write!(f, "foreach block"),
        }
    }
}

/// Fatal errors raised while rewriting a single template
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RewriteError {
    #[error("Malformed {kind}: no matching closing brace for '{excerpt}'")]
    MalformedBlock { kind: BlockKind, excerpt: String },

    #[error("Syntax error in foreach header ({reason}): '{excerpt}'")]
    LoopSyntax { reason: String, excerpt: String },

    #[error("Template contains a reserved placeholder character near '{excerpt}'")]
    ReservedMarker { excerpt: String },
}

impl RewriteError {
    pub fn malformed(kind: BlockKind, text: &str) -> Self {
        Self::MalformedBlock {
            kind,
            excerpt: excerpt(text),
        }
    }

    pub fn loop_syntax(reason: &str, text: &str) -> Self {
        Self::LoopSyntax {
            reason: reason.to_string(),
            excerpt: excerpt(text),
        }
    }
}

/// Non-fatal findings collected while rewriting, returned next to the output
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A foreach header had no `var` declaration; `variable` is the name used instead
    MissingVariable { variable: String, excerpt: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::MissingVariable { variable, excerpt } => write!(
                f,
                "foreach header has no 'var' declaration, using '{variable}': '{excerpt}'"
            ),
        }
    }
}

/// Errors from reading or writing the template cache file
#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Cache destination is not a '.json' file: {}", path.display())]
    NotJson { path: PathBuf },

    #[error("Cache destination does not exist: {}", path.display())]
    Missing { path: PathBuf },

    #[error("Cache I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cache serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Error types for razor core operations
#[derive(Error, Debug)]
pub enum RazorError {
    /// Template rewrite error
    #[error("Rewrite error: {0}")]
    Rewrite(#[from] RewriteError),

    /// Template cache error
    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),

    /// Failure reported by the template compiler
    #[error("Compile error: {0}")]
    Compile(#[from] anyhow::Error),

    /// File system error outside the cache
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for razor core operations
pub type Result<T> = std::result::Result<T, RazorError>;

/// First line of `text`, cut to a fixed number of characters
pub fn excerpt(text: &str) -> String {
    let line = text.lines().next().unwrap_or("").trim_end();
    match line.char_indices().nth(EXCERPT_LEN) {
        Some((cut, _)) => format!("{}...", &line[..cut]),
        None => line.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_excerpt_keeps_first_line() {
        assert_eq!(excerpt("@foreach(item) {\n x }"), "@foreach(item) {");
    }

    #[test]
    fn test_excerpt_truncates_on_char_boundary() {
        let long = "é".repeat(100);
        let cut = excerpt(&long);
        assert!(cut.ends_with("..."));
        assert_eq!(cut.chars().count(), EXCERPT_LEN + 3);
    }

    #[test]
    fn test_error_messages() {
        let err = RewriteError::malformed(BlockKind::Logic, " var x = 1;");
        assert_eq!(
            err.to_string(),
            "Malformed inline logic block: no matching closing brace for ' var x = 1;'"
        );
    }
}
