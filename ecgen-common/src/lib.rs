//! Shared core for the error catalog generator.
//!
//! Error codes are defined in a YAML document, grouped by module and
//! submodule. This crate turns such a document into an ordered
//! [`catalog::Catalog`] of bit-packed codes and renders it as standalone
//! Rust source. Lookup is deliberately boring: a linear first-match scan
//! that falls back to `"Unknown error"` and can never fail.
//!
//! - [`catalog`] — the code/description table and lookup
//! - [`layout`] — bit-packed code layout (module/submodule/error fields)
//! - [`defs`] — YAML definition document schema
//! - [`registry`] — id assignment walk building a catalog from definitions
//! - [`emit`] — Rust source rendering
//! - [`config`] — environment configuration
//! - [`logging`] — tracing setup for the binaries

pub mod catalog;
pub mod config;
pub mod defs;
pub mod emit;
pub mod layout;
pub mod logging;
pub mod registry;

pub use catalog::{Catalog, CatalogEntry, ErrorCode, UNKNOWN_ERROR, describe_in};
pub use config::{ConfigError, GeneratorConfig};
pub use defs::{CatalogDefs, DefsError};
pub use emit::render_rust;
pub use layout::{CodeFields, CodeLayout, LayoutError};
pub use logging::{LogConfig, LoggingError, init_logging};
pub use registry::{RegistryError, build_catalog};
