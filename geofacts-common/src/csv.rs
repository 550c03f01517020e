//! Minimal CSV reader for the reference data files
//!
//! Handles a UTF-8 BOM, quoted fields (embedded commas, doubled quotes and
//! newlines) and both `\n` and `\r\n` record endings.

use crate::{Error, Result};
use std::path::Path;

/// Read and parse a CSV file into records
pub fn read_records(path: &Path) -> Result<Vec<Vec<String>>> {
    if !path.exists() {
        return Err(Error::NotFound(format!("CSV file not found: {}", path.display())));
    }
    let content = std::fs::read_to_string(path)?;
    Ok(parse_records(&content))
}

/// Parse CSV text into records
///
/// Blank lines produce no record.
pub fn parse_records(content: &str) -> Vec<Vec<String>> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);

    let mut records = Vec::new();
    let mut record: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = content.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    field.push('"');
                    chars.next();
                }
                '"' => in_quotes = false,
                _ => field.push(c),
            }
            continue;
        }

        match c {
            '"' if field.is_empty() => in_quotes = true,
            ',' => record.push(std::mem::take(&mut field)),
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' => end_record(&mut records, &mut record, &mut field),
            _ => field.push(c),
        }
    }
    end_record(&mut records, &mut record, &mut field);

    records
}

fn end_record(records: &mut Vec<Vec<String>>, record: &mut Vec<String>, field: &mut String) {
    if record.is_empty() && field.is_empty() {
        return;
    }
    record.push(std::mem::take(field));
    records.push(std::mem::take(record));
}
