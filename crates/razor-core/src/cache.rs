//! Precompiled template cache persisted as a JSON object of name to source

use std::{fs, path::Path};

use indexmap::IndexMap;

use crate::errors::CacheError;

/// In-memory copy of a cache file, rewritten wholesale on save
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateCache {
    entries: IndexMap<String, String>,
}

impl TemplateCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read an existing `.json` cache file
    pub fn load(path: &Path) -> Result<Self, CacheError> {
        if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
            return Err(CacheError::NotJson {
                path: path.to_path_buf(),
            });
        }
        if !path.exists() {
            return Err(CacheError::Missing {
                path: path.to_path_buf(),
            });
        }

        let contents = fs::read_to_string(path)?;
        let entries = serde_json::from_str(&contents)?;
        Ok(Self { entries })
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    /// Store a compiled template, returning the entry it replaced
    pub fn insert(&mut self, name: impl Into<String>, compiled: impl Into<String>) -> Option<String> {
        self.entries.insert(name.into(), compiled.into())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Write the whole cache to `path`, creating parent directories
    pub fn save(&self, path: &Path) -> Result<(), CacheError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string(&self.entries)?)?;
        Ok(())
    }
}
