//! Batch mode: run one operation over a file or stdin without the editor.

use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::ops::{line_count, normalize_line_endings, Affixes, Operation};
use crate::seq::Sequence;

/// Reads raw input from `path`, or stdin when `path` is `None` or `-`.
pub fn read_input(path: Option<&Path>) -> Result<Vec<u8>> {
    match path {
        Some(p) if p != Path::new("-") => {
            fs::read(p).with_context(|| format!("Failed to read {}", p.display()))
        }
        _ => {
            let mut raw = Vec::new();
            io::stdin()
                .lock()
                .read_to_end(&mut raw)
                .context("Failed to read stdin")?;
            Ok(raw)
        }
    }
}

/// Decodes raw input as sequence text with `\n` line endings.
pub fn decode(raw: Vec<u8>) -> Result<String> {
    let sequence = Sequence::try_from(raw)?;
    Ok(normalize_line_endings(sequence.as_str()))
}

/// Applies `op` to raw buffer content.
///
/// Fails with "Sequence should be string" when the input is not text.
pub fn transform(raw: Vec<u8>, op: Operation, affixes: Affixes<'_>) -> Result<String> {
    let text = decode(raw)?;
    let result = op.apply(&text, affixes);
    info!(operation = %op, lines = line_count(&text), "batch operation");
    Ok(result)
}

/// Writes `text` plus a final newline to `output` (a path, or `-` for stdout).
pub fn write_output(output: &str, text: &str) -> Result<()> {
    if output == "-" {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        writeln!(handle, "{}", text)?;
    } else {
        let mut file = fs::File::create(output)
            .with_context(|| format!("Failed to create {}", output))?;
        writeln!(file, "{}", text)?;
    }
    Ok(())
}

/// Full batch run: read, transform, write.
pub fn run_batch(
    input: Option<&Path>,
    output: &str,
    op: Operation,
    affixes: Affixes<'_>,
) -> Result<()> {
    let raw = read_input(input)?;
    let result = transform(raw, op, affixes)?;
    write_output(output, &result)
}
