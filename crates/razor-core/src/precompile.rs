//! Read, normalize, compile and cache templates

use std::{fs, path::Path};

use tracing::{info, warn};

use crate::{
    cache::TemplateCache,
    compiler::TemplateCompiler,
    config::{NormalizerConfig, PrecompileConfig, TemplateOptions},
    errors::{CacheError, Diagnostic, Result},
    models::Models,
    naming,
    normalizer::{Normalized, SyntaxNormalizer},
};

/// A compiled template ready to be stored under `name`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Precompiled {
    pub name: String,
    pub contents: String,
    pub diagnostics: Vec<Diagnostic>,
}

/// Drives a [`TemplateCompiler`] over template files
pub struct Precompiler<C> {
    compiler: C,
    normalizer: SyntaxNormalizer,
    config: PrecompileConfig,
    options: TemplateOptions,
    models: Models,
}

impl<C: TemplateCompiler> Precompiler<C> {
    pub fn new(
        compiler: C,
        config: PrecompileConfig,
        normalizer_config: &NormalizerConfig,
    ) -> Result<Self> {
        let normalizer = SyntaxNormalizer::new(normalizer_config)?;
        let models = config
            .models_path
            .as_deref()
            .map(Models::load)
            .unwrap_or_default();
        let options = TemplateOptions {
            helpers_name: normalizer_config.helpers_name.clone(),
            ..TemplateOptions::with_debug(config.debug)
        };

        Ok(Self {
            compiler,
            normalizer,
            config,
            options,
            models,
        })
    }

    /// Normalize `contents`, or the file at `path` when no contents are given,
    /// and optionally write the result to `dest`
    pub fn normalize_template(
        &self,
        path: &Path,
        dest: Option<&Path>,
        contents: Option<&str>,
    ) -> Result<Normalized> {
        let normalized = match contents {
            Some(contents) => self.normalizer.normalize(contents)?,
            None => self.normalizer.normalize(&fs::read_to_string(path)?)?,
        };

        if let Some(dest) = dest {
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(dest, &normalized.text)?;
        }
        Ok(normalized)
    }

    /// Compile the template at `path`, naming it after its directory type and module
    pub fn precompile_file(&self, path: &Path) -> Result<Precompiled> {
        let display = path.to_string_lossy();
        let dir_type = naming::dir_type_from_path(
            &display,
            self.config.dir_types.as_slice(),
            &self.config.page_dir_type,
        );
        self.compile(path, None, &dir_type)
    }

    /// Recompile one template and replace its entry in the cache file.
    ///
    /// Returns the cache name the template was stored under.
    pub fn update_cache(
        &self,
        path: &Path,
        contents: Option<&str>,
        dir_type: &str,
        cache_path: &Path,
    ) -> Result<String> {
        let precompiled = self.compile(path, contents, dir_type)?;

        let mut cache = match TemplateCache::load(cache_path) {
            Ok(cache) => cache,
            Err(CacheError::Missing { .. }) => {
                warn!(path = %cache_path.display(), "cache file does not exist yet, creating it");
                TemplateCache::new()
            }
            Err(e) => return Err(e.into()),
        };

        if cache
            .insert(precompiled.name.as_str(), precompiled.contents)
            .is_none()
        {
            warn!(name = %precompiled.name, "there was no pre-existing cached template with that name");
        }
        cache.save(cache_path)?;

        info!(name = %precompiled.name, "updated template cache");
        Ok(precompiled.name)
    }

    fn compile(&self, path: &Path, contents: Option<&str>, dir_type: &str) -> Result<Precompiled> {
        let name = naming::template_name(&path.to_string_lossy(), dir_type);
        let normalized = self.normalize_template(path, None, contents)?;
        let text = self
            .models
            .prepend(dir_type, &self.config.page_dir_type, &normalized.text);

        let compiled = self.compiler.compile(&text, &self.options)?;
        info!(name = %name, compiler = self.compiler.name(), "precompiled template");

        Ok(Precompiled {
            name,
            contents: compiled.client_source,
            diagnostics: normalized.diagnostics,
        })
    }
}
