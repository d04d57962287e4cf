//! Id assignment and catalog construction.
//!
//! Walks a [`CatalogDefs`] document in declaration order and assigns ids:
//! module ids count up from [`START_MODULE_ID`], submodule ids from
//! [`START_SUBMODULE_ID`] within each module, error ids from
//! [`START_ERROR_ID`] within each (sub)module scope. Module-level errors
//! sit under submodule id 0. Each error is then packed through the
//! [`CodeLayout`] into its published code.
//!
//! The walk is strictly increasing per field, so a built catalog never
//! contains duplicate codes.

use crate::catalog::{Catalog, CatalogEntry};
use crate::defs::CatalogDefs;
use crate::layout::{CodeLayout, LayoutError};
use indexmap::IndexMap;
use thiserror::Error;
use tracing::debug;

/// First module id.
pub const START_MODULE_ID: u32 = 1;
/// First submodule id within a module (0 is reserved for module-level errors).
pub const START_SUBMODULE_ID: u32 = 1;
/// First error id within a scope.
pub const START_ERROR_ID: u32 = 1;

/// Errors from catalog construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// An assigned id did not fit the layout.
    #[error("cannot encode {name}: {source}")]
    Encode {
        name: String,
        #[source]
        source: LayoutError,
    },
}

/// Builds a [`Catalog`] from a definition document.
///
/// Entry order is declaration order, module-level errors first within each
/// module, then each submodule's errors.
pub fn build_catalog(defs: &CatalogDefs, layout: &CodeLayout) -> Result<Catalog, RegistryError> {
    let mut entries = Vec::with_capacity(defs.error_count());

    let mut module_id = START_MODULE_ID;
    for (module_name, module) in &defs.modules {
        push_scope(
            &mut entries,
            layout,
            module_name,
            None,
            module_id,
            0,
            &module.errors,
        )?;

        let mut submodule_id = START_SUBMODULE_ID;
        for (submodule_name, submodule) in &module.submodules {
            push_scope(
                &mut entries,
                layout,
                module_name,
                Some(submodule_name),
                module_id,
                submodule_id,
                &submodule.errors,
            )?;
            submodule_id += 1;
        }

        module_id += 1;
    }

    debug!(
        modules = defs.modules.len(),
        entries = entries.len(),
        "catalog built"
    );
    Ok(Catalog::new(entries))
}

fn push_scope(
    entries: &mut Vec<CatalogEntry>,
    layout: &CodeLayout,
    module: &str,
    submodule: Option<&str>,
    module_id: u32,
    submodule_id: u32,
    errors: &IndexMap<String, String>,
) -> Result<(), RegistryError> {
    let mut error_id = START_ERROR_ID;
    for (name, description) in errors {
        let code = layout
            .code_value(module_id, submodule_id, error_id)
            .map_err(|source| RegistryError::Encode {
                name: name.clone(),
                source,
            })?;

        entries.push(CatalogEntry {
            name: name.clone(),
            module: module.to_string(),
            submodule: submodule.map(str::to_string),
            code,
            description: description.clone(),
        });
        error_id += 1;
    }
    Ok(())
}
