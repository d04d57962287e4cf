//! Configuration for the generator.
//!
//! All knobs come from `ECGEN_` environment variables with validated
//! defaults; CLI flags override on top. Parsing collects every bad
//! variable before failing so misconfiguration is reported in one pass.

pub mod env;

pub use env::{EnvError, EnvParser};

use crate::layout::{CodeLayout, LayoutError};
use thiserror::Error;

/// Errors from assembling the generator configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// One or more environment variables were invalid.
    #[error("invalid environment: {}", format_env_errors(.0))]
    Env(Vec<EnvError>),

    /// The configured bit widths do not form a valid layout.
    #[error("invalid layout: {0}")]
    Layout(#[from] LayoutError),
}

fn format_env_errors(errors: &[EnvError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Generator configuration resolved from the environment.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Default log level (ECGEN_LOG).
    pub log_level: String,
    /// Code layout from ECGEN_MODULE_BITS / ECGEN_SUBMODULE_BITS /
    /// ECGEN_ERROR_BITS.
    pub layout: CodeLayout,
}

impl GeneratorConfig {
    /// Resolves configuration from the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut parser = EnvParser::new();

        let log_level = parser.get_log_level("LOG", "info");
        let module_bits = parser.get_u8_range("MODULE_BITS", 5, 1, 14);
        let submodule_bits = parser.get_u8_range("SUBMODULE_BITS", 5, 1, 14);
        let error_bits = parser.get_u8_range("ERROR_BITS", 6, 1, 14);

        if parser.has_errors() {
            return Err(ConfigError::Env(parser.take_errors()));
        }

        let layout = CodeLayout::new(module_bits, submodule_bits, error_bits)?;
        Ok(Self { log_level, layout })
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            layout: CodeLayout::default(),
        }
    }
}

#[cfg(test)]
pub(crate) fn env_test_lock() -> std::sync::MutexGuard<'static, ()> {
    use std::sync::{Mutex, OnceLock};

    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    ENV_LOCK.get_or_init(|| Mutex::new(())).lock().unwrap()
}
