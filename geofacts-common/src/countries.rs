//! Country assignment lookup
//!
//! Reads the countries CSV that assigns each country to a continent and to
//! the LLM provider responsible for it. Layout:
//!
//! ```text
//! Continent,Count,OpenAI,Anthropic,Google,...
//! Africa,54,Nigeria,Kenya,Egypt,...
//! ```
//!
//! Column 0 is the continent, column 1 is ignored, columns 2.. hold one
//! country per LLM. All lookups are case-insensitive.

use crate::{Error, Result};
use std::collections::{BTreeSet, HashMap};
use std::path::Path;

/// A country with its continent and assigned LLM
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryAssignment {
    pub country: String,
    pub continent: String,
    pub llm: String,
}

/// Parsed countries CSV
#[derive(Debug, Clone, Default)]
pub struct CountryAssignments {
    continents: Vec<String>,
    llms: Vec<String>,
    countries: Vec<String>,
    by_continent: HashMap<String, Vec<String>>,
    by_llm: HashMap<String, Vec<String>>,
    by_country: HashMap<String, CountryAssignment>,
}

impl CountryAssignments {
    pub fn load(path: &Path) -> Result<Self> {
        let records = crate::csv::read_records(path)?;
        Ok(Self::from_records(records))
    }

    pub fn from_csv_str(content: &str) -> Self {
        Self::from_records(crate::csv::parse_records(content))
    }

    fn from_records(records: Vec<Vec<String>>) -> Self {
        let mut data = Self::default();
        let mut rows = records.into_iter();

        let Some(header) = rows.next() else {
            return data;
        };

        // (column index, llm name); blank header cells are skipped
        let llm_columns: Vec<(usize, String)> = header
            .iter()
            .enumerate()
            .skip(2)
            .map(|(i, name)| (i, name.trim().to_string()))
            .filter(|(_, name)| !name.is_empty())
            .collect();

        data.llms = llm_columns.iter().map(|(_, name)| name.clone()).collect();
        for llm in &data.llms {
            data.by_llm.insert(llm.to_lowercase(), Vec::new());
        }

        let mut continent_set = BTreeSet::new();
        let mut country_set = BTreeSet::new();

        for row in rows {
            let continent = match row.first().map(|c| c.trim()) {
                Some(c) if !c.is_empty() => c.to_string(),
                _ => continue,
            };
            continent_set.insert(continent.clone());

            let continent_key = continent.to_lowercase();
            data.by_continent.entry(continent_key.clone()).or_default();

            for (col, llm) in &llm_columns {
                let Some(country) = row.get(*col).map(|c| c.trim()) else {
                    continue;
                };
                if country.is_empty() {
                    continue;
                }
                country_set.insert(country.to_string());

                let continent_countries = data.by_continent.entry(continent_key.clone()).or_default();
                if !continent_countries.iter().any(|c| c == country) {
                    continent_countries.push(country.to_string());
                }

                let llm_countries = data.by_llm.entry(llm.to_lowercase()).or_default();
                if !llm_countries.iter().any(|c| c == country) {
                    llm_countries.push(country.to_string());
                }

                data.by_country.insert(
                    country.to_lowercase(),
                    CountryAssignment {
                        country: country.to_string(),
                        continent: continent.clone(),
                        llm: llm.clone(),
                    },
                );
            }
        }

        data.continents = continent_set.into_iter().collect();
        data.countries = country_set.into_iter().collect();
        data
    }

    /// All continents, sorted
    pub fn continents(&self) -> &[String] {
        &self.continents
    }

    /// LLM names in header order
    pub fn llms(&self) -> &[String] {
        &self.llms
    }

    /// All countries, sorted
    pub fn all_countries(&self) -> &[String] {
        &self.countries
    }

    /// Countries on a continent, in file order
    pub fn countries_by_continent(&self, continent: &str) -> Result<&[String]> {
        self.by_continent
            .get(&continent.trim().to_lowercase())
            .map(Vec::as_slice)
            .ok_or_else(|| {
                Error::NotFound(format!(
                    "Continent '{}' not found. Valid continents: {}",
                    continent,
                    self.continents.join(", ")
                ))
            })
    }

    /// Countries assigned to an LLM, in file order
    pub fn countries_by_llm(&self, llm: &str) -> Result<&[String]> {
        self.by_llm
            .get(&llm.trim().to_lowercase())
            .map(Vec::as_slice)
            .ok_or_else(|| {
                Error::NotFound(format!(
                    "LLM '{}' not found. Valid LLMs: {}",
                    llm,
                    self.llms.join(", ")
                ))
            })
    }

    /// Continent and LLM assignment for a country
    pub fn country_info(&self, country: &str) -> Result<&CountryAssignment> {
        self.by_country
            .get(&country.trim().to_lowercase())
            .ok_or_else(|| Error::NotFound(format!("Country '{}' not found in countries CSV", country)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\u{feff}Continent,Count,OpenAI,Anthropic,Groq\n\
        Africa,3,Nigeria,Kenya,Ghana\n\
        Europe,2,France,,Poland\n\
        ,,,,\n\
        Asia,1,,Japan,\n";

    #[test]
    fn test_continents_sorted() {
        let data = CountryAssignments::from_csv_str(SAMPLE);
        assert_eq!(data.continents(), ["Africa", "Asia", "Europe"]);
    }

    #[test]
    fn test_llms_in_header_order() {
        let data = CountryAssignments::from_csv_str(SAMPLE);
        assert_eq!(data.llms(), ["OpenAI", "Anthropic", "Groq"]);
    }

    #[test]
    fn test_all_countries_sorted() {
        let data = CountryAssignments::from_csv_str(SAMPLE);
        assert_eq!(
            data.all_countries(),
            ["France", "Ghana", "Japan", "Kenya", "Nigeria", "Poland"]
        );
    }

    #[test]
    fn test_countries_by_continent_case_insensitive() {
        let data = CountryAssignments::from_csv_str(SAMPLE);
        assert_eq!(
            data.countries_by_continent("africa").unwrap(),
            ["Nigeria", "Kenya", "Ghana"]
        );
        assert!(data.countries_by_continent("Atlantis").is_err());
    }

    #[test]
    fn test_countries_by_llm() {
        let data = CountryAssignments::from_csv_str(SAMPLE);
        assert_eq!(data.countries_by_llm("GROQ").unwrap(), ["Ghana", "Poland"]);
        assert_eq!(data.countries_by_llm("anthropic").unwrap(), ["Kenya", "Japan"]);
        assert!(data.countries_by_llm("unknown").is_err());
    }

    #[test]
    fn test_country_info() {
        let data = CountryAssignments::from_csv_str(SAMPLE);
        let info = data.country_info("poland").unwrap();
        assert_eq!(info.country, "Poland");
        assert_eq!(info.continent, "Europe");
        assert_eq!(info.llm, "Groq");
        assert!(data.country_info("Narnia").is_err());
    }
}
