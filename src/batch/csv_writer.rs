//! CSV writer for extracted cards.
//!
//! One file per card type: a header row from the property schema, then one
//! row per card.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::extract::ExtractedCardStats;

/// Quotes a field when it holds a comma, quote or line break.
/// Inner quotes are doubled.
fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn format_row<S: AsRef<str>>(fields: &[S]) -> String {
    fields
        .iter()
        .map(|f| escape_field(f.as_ref()))
        .collect::<Vec<_>>()
        .join(",")
}

/// Writes `header` and every card's values to `path`, replacing the file.
pub fn write_csv(path: &Path, header: &[String], cards: &[&ExtractedCardStats]) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create CSV file {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "{}", format_row(header)).context("Failed to write CSV header")?;
    for card in cards {
        writeln!(writer, "{}", format_row(card.values())).context("Failed to write CSV row")?;
    }
    writer.flush().context("Failed to flush CSV file")?;

    crate::log(&format!("Wrote {} entries to {}", cards.len(), path.display()));
    Ok(())
}
