use std::{fs, path::Path};

use tracing::warn;

/// Model data made available to page templates as a leading logic block
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Models {
    prelude: String,
}

impl Models {
    /// Read a concatenated models file; a missing or unreadable file yields no prelude
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(source) => Self::from_source(&source),
            Err(e) => {
                warn!(path = %path.display(), "could not prepend models: {e}");
                Self::default()
            }
        }
    }

    pub fn from_source(source: &str) -> Self {
        Self {
            prelude: format!("@{{\n{source}\n}}\n\n"),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.prelude.is_empty()
    }

    /// Prefix `template` with the models block when it is a page template
    pub fn prepend(&self, dir_type: &str, page_dir_type: &str, template: &str) -> String {
        if dir_type == page_dir_type {
            format!("{}{template}", self.prelude)
        } else {
            template.to_string()
        }
    }
}
