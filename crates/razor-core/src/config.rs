//! Configuration passed explicitly into each rewrite and precompile call

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub const DEFAULT_IGNORE_START: &str = "@*VASH_IGNORE_START*@";
pub const DEFAULT_IGNORE_END: &str = "@*VASH_IGNORE_END*@";
pub const DEFAULT_HELPERS_NAME: &str = "Html";
pub const DEFAULT_MODEL_NAME: &str = "Model";
pub const DEFAULT_PAGE_DIR_TYPE: &str = "pg";

/// Settings for [`crate::SyntaxNormalizer`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizerConfig {
    /// Marker opening a span that is deleted before any rewriting
    pub ignore_start: String,
    /// Marker closing an ignored span
    pub ignore_end: String,
    /// Helper namespace that receives the `foreach` call
    pub helpers_name: String,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            ignore_start: DEFAULT_IGNORE_START.to_string(),
            ignore_end: DEFAULT_IGNORE_END.to_string(),
            helpers_name: DEFAULT_HELPERS_NAME.to_string(),
        }
    }
}

/// Options record handed to the template compiler
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateOptions {
    pub model_name: String,
    pub helpers_name: String,
    pub debug: bool,
    pub debug_parser: bool,
}

impl Default for TemplateOptions {
    fn default() -> Self {
        Self {
            model_name: DEFAULT_MODEL_NAME.to_string(),
            helpers_name: DEFAULT_HELPERS_NAME.to_string(),
            debug: false,
            debug_parser: false,
        }
    }
}

impl TemplateOptions {
    /// Options with both debug flags set to `debug`
    pub fn with_debug(debug: bool) -> Self {
        Self {
            debug,
            debug_parser: debug,
            ..Default::default()
        }
    }
}

/// Settings for [`crate::Precompiler`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrecompileConfig {
    /// Directory type whose templates get the models prelude
    pub page_dir_type: String,
    /// Directory types searched for in template paths
    pub dir_types: Vec<String>,
    /// Concatenated models file prepended to page templates
    pub models_path: Option<PathBuf>,
    /// Keep debugging info in compiled output
    pub debug: bool,
}

impl Default for PrecompileConfig {
    fn default() -> Self {
        Self {
            page_dir_type: DEFAULT_PAGE_DIR_TYPE.to_string(),
            dir_types: vec![DEFAULT_PAGE_DIR_TYPE.to_string()],
            models_path: None,
            debug: false,
        }
    }
}
