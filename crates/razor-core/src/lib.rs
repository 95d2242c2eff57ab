//! # Razor Core
//!
//! Rewrites templates written with Razor-style C# block syntax into syntax the
//! Vash template engine can compile, including:
//! - Brace matching that tolerates nested and sibling blocks
//! - Protection of inline `@{ ... }` logic blocks during scanning
//! - `@foreach(var x in xs) { ... }` to `@Html.foreach(xs, function(x) { ... })`
//! - Comment and ignore-span stripping plus C# member renames
//! - Template naming, models prelude and the JSON template cache
//!
//! Compiling the rewritten text is delegated to a [`TemplateCompiler`].

#![warn(clippy::all)]

pub mod brace;
pub mod cache;
pub mod compiler;
pub mod config;
pub mod errors;
pub mod foreach;
pub mod logic_block;
pub mod models;
pub mod naming;
pub mod normalizer;
pub mod precompile;
pub mod tokens;

// Re-export commonly used types
pub use cache::TemplateCache;
pub use compiler::{CompiledTemplate, TemplateCompiler};
pub use config::{NormalizerConfig, PrecompileConfig, TemplateOptions};
pub use errors::{BlockKind, CacheError, Diagnostic, RazorError, Result, RewriteError};
pub use foreach::{ForEachConverter, LoopHeader};
pub use models::Models;
pub use normalizer::{normalize, Normalized, SyntaxNormalizer};
pub use precompile::{Precompiled, Precompiler};

/// Crate version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize tracing for razor components, logging to stderr
pub fn init_tracing() {
    init_tracing_at(tracing::Level::INFO);
}

/// Initialize tracing with `level` as the default for razor crates
pub fn init_tracing_at(level: tracing::Level) {
    let level = level.as_str().to_ascii_lowercase();
    let mut filter = tracing_subscriber::EnvFilter::from_default_env();
    for target in ["razor_core", "razor_cli"] {
        if let Ok(directive) = format!("{target}={level}").parse() {
            filter = filter.add_directive(directive);
        }
    }
    // a subscriber installed by the host application takes precedence
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
