//! Rust source emission.
//!
//! Renders a built [`Catalog`] into a standalone Rust source file: one
//! `pub const` per code, the `ERROR_DESCRIPTIONS` table in declaration
//! order, and a `describe` function with the `"Unknown error"` fallback.
//! The output depends on nothing outside core, so it can be dropped into
//! any crate (or pulled in with `include!`).

use crate::catalog::{Catalog, UNKNOWN_ERROR};
use std::fmt::Write;

const BANNER: &str = "// Auto-generated file. Do not edit. Changes will be overwritten.";

/// Renders `catalog` as Rust source text.
#[must_use]
pub fn render_rust(catalog: &Catalog) -> String {
    let max_name_len = catalog
        .iter()
        .map(|entry| entry.name.len())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    out.push_str(BANNER);
    out.push_str("\n\n");
    out.push_str("/// Numeric error code.\npub type ErrorCode = i32;\n");

    render_constants(&mut out, catalog);
    render_table(&mut out, catalog, max_name_len);
    render_describe(&mut out);
    out
}

fn render_constants(out: &mut String, catalog: &Catalog) {
    let mut current_scope: Option<String> = None;
    for entry in catalog.iter() {
        let scope = entry.scope();
        if current_scope.as_deref() != Some(scope.as_str()) {
            out.push('\n');
            let _ = writeln!(out, "// {}", scope);
            current_scope = Some(scope);
        }
        let _ = writeln!(
            out,
            "pub const {}: ErrorCode = -0x{:04x};",
            entry.name,
            entry.code.unsigned_abs()
        );
    }
}

fn render_table(out: &mut String, catalog: &Catalog, max_name_len: usize) {
    out.push('\n');
    out.push_str("/// Code/description pairs in declaration order.\n");
    out.push_str("pub static ERROR_DESCRIPTIONS: &[(ErrorCode, &str)] = &[\n");

    let mut current_scope: Option<String> = None;
    for entry in catalog.iter() {
        let scope = entry.scope();
        if current_scope.as_deref() != Some(scope.as_str()) {
            let _ = writeln!(out, "    /* {} */", scope);
            current_scope = Some(scope);
        }
        let _ = writeln!(
            out,
            "    ({}, {}\"{}\"),",
            entry.name,
            " ".repeat(max_name_len - entry.name.len()),
            escape(&entry.description)
        );
    }
    out.push_str("];\n");
}

fn render_describe(out: &mut String) {
    out.push('\n');
    let _ = writeln!(
        out,
        "/// Returns the description for `code`, or \"{UNKNOWN_ERROR}\" when unmapped."
    );
    out.push_str("pub fn describe(code: ErrorCode) -> &'static str {\n");
    out.push_str("    for (candidate, description) in ERROR_DESCRIPTIONS {\n");
    out.push_str("        if code == *candidate {\n");
    out.push_str("            return *description;\n");
    out.push_str("        }\n");
    out.push_str("    }\n");
    let _ = writeln!(out, "    \"{UNKNOWN_ERROR}\"");
    out.push_str("}\n");
}

/// Escapes a description for use inside a Rust string literal.
fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\t' => escaped.push_str("\\t"),
            '\r' => escaped.push_str("\\r"),
            _ => escaped.push(c),
        }
    }
    escaped
}
