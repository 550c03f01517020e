//! Glossary reference data
//!
//! Loads the glossary CSV (`Entry, Meaning, Range, Interpretation`) and
//! upserts it into the `glossary` table keyed on `entry`.

use crate::{Error, Result};
use sqlx::PgPool;
use std::path::Path;
use tracing::info;

/// Column widths of the `glossary` table
pub const ENTRY_MAX_CHARS: usize = 50;
pub const RANGE_MAX_CHARS: usize = 25;
pub const INTERPRETATION_MAX_CHARS: usize = 25;

/// One glossary term
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlossaryEntry {
    pub entry: String,
    pub meaning: String,
    pub range: Option<String>,
    pub interpretation: Option<String>,
}

impl GlossaryEntry {
    /// Check every value fits its column
    pub fn check_widths(&self) -> Result<()> {
        let fields = [
            ("entry", Some(self.entry.as_str()), ENTRY_MAX_CHARS),
            ("range", self.range.as_deref(), RANGE_MAX_CHARS),
            ("interpretation", self.interpretation.as_deref(), INTERPRETATION_MAX_CHARS),
        ];
        for (field, value, max) in fields {
            let Some(value) = value else { continue };
            let len = value.chars().count();
            if len > max {
                return Err(Error::InvalidInput(format!(
                    "Glossary entry '{}': '{}' is {} characters (max {})",
                    self.entry, field, len, max
                )));
            }
        }
        Ok(())
    }
}

/// Parsed glossary file
#[derive(Debug, Clone, Default)]
pub struct Glossary {
    entries: Vec<GlossaryEntry>,
}

impl Glossary {
    pub fn load(path: &Path) -> Result<Self> {
        Self::from_records(crate::csv::read_records(path)?)
    }

    pub fn from_csv_str(content: &str) -> Result<Self> {
        Self::from_records(crate::csv::parse_records(content))
    }

    fn from_records(records: Vec<Vec<String>>) -> Result<Self> {
        let mut rows = records.into_iter();
        let Some(header) = rows.next() else {
            return Ok(Self::default());
        };

        let column = |name: &str| header.iter().position(|h| h.trim().eq_ignore_ascii_case(name));
        let entry_col = column("Entry")
            .ok_or_else(|| Error::InvalidInput("Glossary CSV missing 'Entry' column".to_string()))?;
        let meaning_col = column("Meaning")
            .ok_or_else(|| Error::InvalidInput("Glossary CSV missing 'Meaning' column".to_string()))?;
        let range_col = column("Range");
        let interpretation_col = column("Interpretation");

        let cell = |row: &[String], col: Option<usize>| -> Option<String> {
            col.and_then(|i| row.get(i))
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let entries = rows
            .filter_map(|row| {
                let entry = cell(row.as_slice(), Some(entry_col))?;
                Some(GlossaryEntry {
                    entry,
                    meaning: cell(row.as_slice(), Some(meaning_col)).unwrap_or_default(),
                    range: cell(row.as_slice(), range_col),
                    interpretation: cell(row.as_slice(), interpretation_col),
                })
            })
            .collect();

        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[GlossaryEntry] {
        &self.entries
    }

    /// Case-insensitive lookup by entry name
    pub fn entry(&self, name: &str) -> Result<&GlossaryEntry> {
        self.entries
            .iter()
            .find(|e| e.entry.eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| Error::NotFound(format!("Entry '{}' not found in glossary.", name)))
    }
}

/// Upsert entries keyed on `entry`; returns the number written
///
/// Column widths are checked up front. Writes run in one transaction so a
/// failure leaves the table unchanged.
pub async fn upsert_glossary_entries(pool: &PgPool, entries: &[GlossaryEntry]) -> Result<usize> {
    if entries.is_empty() {
        info!("No glossary entries to upsert");
        return Ok(0);
    }

    for entry in entries {
        entry.check_widths()?;
    }

    let mut tx = pool.begin().await?;

    for entry in entries {
        sqlx::query(
            r#"
            INSERT INTO glossary (entry, meaning, range, interpretation)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (entry) DO UPDATE SET
                meaning = EXCLUDED.meaning,
                range = EXCLUDED.range,
                interpretation = EXCLUDED.interpretation,
                updated_at = now()
            "#,
        )
        .bind(&entry.entry)
        .bind(&entry.meaning)
        .bind(&entry.range)
        .bind(&entry.interpretation)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    info!(count = entries.len(), "✓ Upserted glossary entries");
    Ok(entries.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\u{feff}Entry,Meaning,Range,Interpretation\n\
        Gini Coefficient,\"Income inequality, 0 = equal\",0-100,Lower is better\n\
        PPP,Purchasing power parity,,\n\
        ,orphan row,,\n";

    #[test]
    fn test_parse_entries() {
        let glossary = Glossary::from_csv_str(SAMPLE).unwrap();
        assert_eq!(glossary.entries().len(), 2);

        let gini = &glossary.entries()[0];
        assert_eq!(gini.entry, "Gini Coefficient");
        assert_eq!(gini.meaning, "Income inequality, 0 = equal");
        assert_eq!(gini.range.as_deref(), Some("0-100"));
        assert_eq!(gini.interpretation.as_deref(), Some("Lower is better"));

        let ppp = &glossary.entries()[1];
        assert!(ppp.range.is_none());
        assert!(ppp.interpretation.is_none());
    }

    #[test]
    fn test_entry_lookup_case_insensitive() {
        let glossary = Glossary::from_csv_str(SAMPLE).unwrap();
        assert_eq!(glossary.entry("gini coefficient").unwrap().entry, "Gini Coefficient");
        assert!(glossary.entry("GDP").is_err());
    }

    #[test]
    fn test_missing_required_column() {
        assert!(Glossary::from_csv_str("Term,Meaning\nx,y\n").is_err());
    }

    #[test]
    fn test_over_long_values_named() {
        let csv = "Entry,Meaning,Range,Interpretation\n\
            Debt,Government debt,0-100,Lower is better\n\
            Inflation,Price growth,0-10,Moderate single digits are healthiest\n";
        let glossary = Glossary::from_csv_str(csv).unwrap();

        assert!(glossary.entries()[0].check_widths().is_ok());

        let err = glossary.entries()[1].check_widths().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid input: Glossary entry 'Inflation': 'interpretation' is 37 characters (max 25)"
        );
    }

    #[test]
    fn test_entry_width_counts_characters() {
        let entry = GlossaryEntry {
            entry: "é".repeat(ENTRY_MAX_CHARS),
            meaning: "accented".to_string(),
            range: None,
            interpretation: None,
        };
        assert!(entry.check_widths().is_ok());

        let entry = GlossaryEntry {
            entry: "x".repeat(ENTRY_MAX_CHARS + 1),
            ..entry
        };
        assert!(matches!(entry.check_widths(), Err(Error::InvalidInput(_))));
    }
}
