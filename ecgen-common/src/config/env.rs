//! Environment variable parsing with type safety.
//!
//! A small typed parser for `ECGEN_` environment variables. Errors are
//! collected rather than returned eagerly so every bad variable can be
//! reported in one pass.

use std::env;
use thiserror::Error;

/// Errors that can occur during environment variable parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnvError {
    /// Invalid value for a variable.
    #[error("Invalid value for {var}: expected {expected}, got '{value}'")]
    InvalidValue {
        var: String,
        expected: String,
        value: String,
    },

    /// Value out of valid range.
    #[error("Value out of range for {var}: {value} (valid: {min}..={max})")]
    OutOfRange {
        var: String,
        value: String,
        min: String,
        max: String,
    },

    /// Invalid log level.
    #[error("Invalid log level for {var}: {value}")]
    InvalidLogLevel { var: String, value: String },
}

/// Type-safe environment variable parser.
///
/// Collects errors during parsing so all issues can be reported at once.
pub struct EnvParser {
    prefix: &'static str,
    errors: Vec<EnvError>,
}

impl EnvParser {
    /// Create a new parser with the ECGEN_ prefix.
    pub fn new() -> Self {
        Self {
            prefix: "ECGEN_",
            errors: Vec::new(),
        }
    }

    /// Get all accumulated errors.
    pub fn errors(&self) -> &[EnvError] {
        &self.errors
    }

    /// Check if any errors occurred.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Take ownership of errors.
    pub fn take_errors(&mut self) -> Vec<EnvError> {
        std::mem::take(&mut self.errors)
    }

    /// Get the full variable name with prefix.
    fn var_name(&self, name: &str) -> String {
        format!("{}{}", self.prefix, name)
    }

    /// Get a string value with default.
    pub fn get_string(&mut self, name: &str, default: &str) -> String {
        let var_name = self.var_name(name);
        env::var(&var_name).unwrap_or_else(|_| default.to_string())
    }

    /// Get a log level with default.
    ///
    /// Accepts: trace, debug, info, warn, error.
    pub fn get_log_level(&mut self, name: &str, default: &str) -> String {
        let var_name = self.var_name(name);
        match env::var(&var_name) {
            Ok(value) => match value.to_lowercase().as_str() {
                level @ ("trace" | "debug" | "info" | "warn" | "error") => level.to_string(),
                _ => {
                    self.errors.push(EnvError::InvalidLogLevel {
                        var: var_name,
                        value,
                    });
                    default.to_string()
                }
            },
            Err(_) => default.to_string(),
        }
    }

    /// Get a u8 value with default, validated against an inclusive range.
    pub fn get_u8_range(&mut self, name: &str, default: u8, min: u8, max: u8) -> u8 {
        let var_name = self.var_name(name);
        match env::var(&var_name) {
            Ok(value) => match value.trim().parse::<u8>() {
                Ok(parsed) if (min..=max).contains(&parsed) => parsed,
                Ok(parsed) => {
                    self.errors.push(EnvError::OutOfRange {
                        var: var_name,
                        value: parsed.to_string(),
                        min: min.to_string(),
                        max: max.to_string(),
                    });
                    default
                }
                Err(_) => {
                    self.errors.push(EnvError::InvalidValue {
                        var: var_name,
                        expected: "integer".to_string(),
                        value,
                    });
                    default
                }
            },
            Err(_) => default,
        }
    }
}

impl Default for EnvParser {
    fn default() -> Self {
        Self::new()
    }
}
