//! Error catalog generator CLI.
//!
//! Turns YAML error definitions into generated Rust code tables, and
//! answers code lookups from the command line.

#![forbid(unsafe_code)]

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use ecgen_common::catalog::{Catalog, ErrorCode};
use ecgen_common::defs::CatalogDefs;
use ecgen_common::layout::CodeLayout;
use ecgen_common::registry::build_catalog;
use ecgen_common::{GeneratorConfig, LogConfig, init_logging, render_rust};
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info};

#[derive(Parser)]
#[command(name = "ecgen")]
#[command(author, version, about = "Error catalog generator - YAML to Rust code tables")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Write JSON logs to this file in addition to stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Override the module field width in bits
    #[arg(long, global = true)]
    module_bits: Option<u8>,

    /// Override the submodule field width in bits
    #[arg(long, global = true)]
    submodule_bits: Option<u8>,

    /// Override the error field width in bits
    #[arg(long, global = true)]
    error_bits: Option<u8>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate Rust source from a definition file
    Generate {
        /// Path to the YAML file defining error codes
        yaml_file: PathBuf,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate a definition file and report counts
    Check {
        /// Path to the YAML file defining error codes
        yaml_file: PathBuf,
    },

    /// Print the assigned code table
    List {
        /// Path to the YAML file defining error codes
        yaml_file: PathBuf,

        /// Output format
        #[arg(long, default_value = "pretty")]
        format: OutputFormat,
    },

    /// Look up one code's description
    Describe {
        /// Path to the YAML file defining error codes
        yaml_file: PathBuf,

        /// The code, decimal or hex (e.g. -2113, -0x0841)
        #[arg(allow_hyphen_values = true)]
        code: String,
    },
}

#[derive(ValueEnum, Clone, Copy)]
enum OutputFormat {
    Json,
    Pretty,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = GeneratorConfig::from_env()?;

    let mut log_config = LogConfig::from_env(&config.log_level).with_stderr();
    if cli.verbose {
        log_config = log_config.with_level("debug");
    }
    if let Some(path) = &cli.log_file {
        log_config = log_config.with_file(path);
    }
    let _logging_guards = init_logging(&log_config)?;

    let layout = resolve_layout(&cli, &config)?;
    debug!(total_bits = layout.total_bits(), "layout resolved");

    match cli.command {
        Commands::Generate { yaml_file, output } => {
            let catalog = load_catalog(&yaml_file, &layout)?;
            let source = render_rust(&catalog);
            match output {
                Some(path) => {
                    fs::write(&path, &source)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    info!("Generated {} ({} codes)", path.display(), catalog.len());
                }
                None => print!("{source}"),
            }
        }

        Commands::Check { yaml_file } => {
            let defs = load_defs(&yaml_file)?;
            let catalog = build_catalog(&defs, &layout)?;
            let submodules: usize = defs.modules.values().map(|m| m.submodules.len()).sum();
            println!(
                "{}: {} modules, {} submodules, {} codes",
                yaml_file.display(),
                defs.modules.len(),
                submodules,
                catalog.len()
            );
        }

        Commands::List { yaml_file, format } => {
            let catalog = load_catalog(&yaml_file, &layout)?;
            match format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(catalog.entries())?);
                }
                OutputFormat::Pretty => print_table(&catalog),
            }
        }

        Commands::Describe { yaml_file, code } => {
            let value = parse_code(&code)?;
            let catalog = load_catalog(&yaml_file, &layout)?;

            println!("{}", catalog.describe(value));
            if let Some(entry) = catalog.get(value) {
                println!("  {} ({})", entry.name, entry.scope());
            }
            let fields = layout.decode(value);
            println!(
                "  module {} / submodule {} / error {}",
                fields.module_id, fields.submodule_id, fields.error_id
            );
        }
    }

    Ok(())
}

fn resolve_layout(cli: &Cli, config: &GeneratorConfig) -> Result<CodeLayout> {
    if cli.module_bits.is_none() && cli.submodule_bits.is_none() && cli.error_bits.is_none() {
        return Ok(config.layout);
    }

    let defaults = config.layout;
    let layout = CodeLayout::new(
        cli.module_bits.unwrap_or_else(|| defaults.module_bits()),
        cli.submodule_bits.unwrap_or_else(|| defaults.submodule_bits()),
        cli.error_bits.unwrap_or_else(|| defaults.error_bits()),
    )
    .context("invalid layout flags")?;
    Ok(layout)
}

fn load_defs(path: &PathBuf) -> Result<CatalogDefs> {
    CatalogDefs::from_path(path)
        .with_context(|| format!("failed to load definitions from {}", path.display()))
}

fn load_catalog(path: &PathBuf, layout: &CodeLayout) -> Result<Catalog> {
    let defs = load_defs(path)?;
    let catalog = build_catalog(&defs, layout).context("failed to build catalog")?;
    debug!(codes = catalog.len(), "catalog loaded");
    Ok(catalog)
}

fn print_table(catalog: &Catalog) {
    let name_width = catalog
        .iter()
        .map(|entry| entry.name.len())
        .max()
        .unwrap_or(0);

    for entry in catalog.iter() {
        println!(
            "-0x{:04x}  {:<name_width$}  {}",
            entry.code.unsigned_abs(),
            entry.name,
            entry.description
        );
    }
}

/// Parses a code from decimal or hex text, with an optional leading minus.
fn parse_code(text: &str) -> Result<ErrorCode> {
    let trimmed = text.trim();
    let (negative, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };

    let magnitude: i64 = if let Some(hex) = rest
        .strip_prefix("0x")
        .or_else(|| rest.strip_prefix("0X"))
    {
        i64::from_str_radix(hex, 16).with_context(|| format!("invalid hex code '{trimmed}'"))?
    } else {
        rest.parse()
            .with_context(|| format!("invalid code '{trimmed}'"))?
    };

    let value = if negative { -magnitude } else { magnitude };
    match i32::try_from(value) {
        Ok(code) => Ok(code),
        Err(_) => bail!("code '{trimmed}' is out of range"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_code_formats() {
        assert_eq!(parse_code("-2113").unwrap(), -2113);
        assert_eq!(parse_code("-0x0841").unwrap(), -0x0841);
        assert_eq!(parse_code("0x0841").unwrap(), 0x0841);
        assert_eq!(parse_code("0").unwrap(), 0);
        assert_eq!(parse_code(" -0X10 ").unwrap(), -16);
    }

    #[test]
    fn test_parse_code_rejects_garbage() {
        assert!(parse_code("banana").is_err());
        assert!(parse_code("0xZZ").is_err());
        assert!(parse_code("").is_err());
        assert!(parse_code("0x1ffffffff").is_err());
    }

    #[test]
    fn test_load_catalog_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("codes.yaml");
        fs::write(
            &path,
            "modules:\n  core:\n    errors:\n      EC_CORE_NOMEM: \"Out of memory\"\n",
        )
        .unwrap();

        let catalog = load_catalog(&path, &CodeLayout::default()).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.describe(-0x0801), "Out of memory");
        assert!(load_catalog(&dir.path().join("missing.yaml"), &CodeLayout::default()).is_err());
    }

    #[test]
    fn test_cli_parses_subcommands() {
        let cli = Cli::try_parse_from(["ecgen", "generate", "codes.yaml", "-o", "out.rs"]).unwrap();
        assert!(matches!(cli.command, Commands::Generate { .. }));

        let cli =
            Cli::try_parse_from(["ecgen", "describe", "codes.yaml", "-0x0841", "--verbose"])
                .unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Describe { code, .. } => assert_eq!(code, "-0x0841"),
            _ => panic!("expected describe"),
        }
    }
}
