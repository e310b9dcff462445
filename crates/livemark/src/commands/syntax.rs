//! `livemark syntax` command implementation.

use std::fmt::Write;

use lm_pipeline::{HelpContent, HelpOverlay};

use crate::error::CliError;
use crate::output::Output;

/// Execute the syntax command.
pub(crate) fn execute() -> Result<(), CliError> {
    let output = Output::new();
    output.highlight("Markup reference");
    output.result(&format_reference(HelpOverlay::content()))?;
    Ok(())
}

fn format_reference(content: &HelpContent) -> String {
    let width = content
        .metacharacters
        .iter()
        .map(|m| m.token.chars().count())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for m in content.metacharacters {
        writeln!(out, "  {:<width$}  {}", m.token, m.meaning).unwrap();
    }
    out.push_str("\nExample:\n\n");
    for line in content.example.lines() {
        writeln!(out, "  {line}").unwrap();
    }
    out
}
