//! Error definition documents.
//!
//! Definitions are written in YAML, grouped by module and optional
//! submodule. Document order is significant: it drives id assignment in
//! [`crate::registry`], so all maps here preserve insertion order.
//!
//! ```yaml
//! modules:
//!   core:
//!     errors:
//!       EC_CORE_NOMEM: "Out of memory"
//!     submodules:
//!       sched:
//!         errors:
//!           EC_SCHED_QUEUE_FULL: "Scheduler queue overflow"
//! ```

use indexmap::IndexMap;
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from reading or parsing a definition document.
#[derive(Debug, Error)]
pub enum DefsError {
    /// Definition file could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Document is not valid YAML or does not match the schema.
    #[error("invalid definition document: {0}")]
    Parse(#[from] serde_yaml_ng::Error),
}

/// Top-level definition document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogDefs {
    /// Modules in declaration order.
    #[serde(default)]
    pub modules: IndexMap<String, ModuleDefs>,
}

/// One module: its direct errors plus any submodules.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModuleDefs {
    /// Module-level errors, name to description, in declaration order.
    #[serde(default)]
    pub errors: IndexMap<String, String>,

    /// Submodules in declaration order.
    #[serde(default)]
    pub submodules: IndexMap<String, SubmoduleDefs>,
}

/// One submodule and its errors.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SubmoduleDefs {
    /// Submodule errors, name to description, in declaration order.
    #[serde(default)]
    pub errors: IndexMap<String, String>,
}

impl CatalogDefs {
    /// Parses a definition document from YAML text.
    pub fn from_yaml(text: &str) -> Result<Self, DefsError> {
        Ok(serde_yaml_ng::from_str(text)?)
    }

    /// Reads and parses a definition file.
    pub fn from_path(path: &Path) -> Result<Self, DefsError> {
        let text = fs::read_to_string(path).map_err(|source| DefsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&text)
    }

    /// Total number of declared errors across all modules and submodules.
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.modules
            .values()
            .map(|module| {
                module.errors.len()
                    + module
                        .submodules
                        .values()
                        .map(|sub| sub.errors.len())
                        .sum::<usize>()
            })
            .sum()
    }
}
