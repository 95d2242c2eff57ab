use anyhow::Result;

use crate::config::TemplateOptions;

/// Output of a template compiler
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledTemplate {
    /// Serializable source of the render function, as stored in the cache
    pub client_source: String,
}

/// Engine that turns normalized template text into a render function
pub trait TemplateCompiler {
    fn compile(&self, text: &str, options: &TemplateOptions) -> Result<CompiledTemplate>;

    /// Get compiler name for debugging
    fn name(&self) -> &'static str;
}
