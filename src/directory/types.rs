use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A country as returned by the remote directory
///
/// Field names follow the remote JSON. The list-all call projects fields, so
/// every collection defaults to empty when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Country {
    /// Unique ISO 3166-1 alpha-3 code
    pub cca3: String,
    pub name: CountryName,
    #[serde(default)]
    pub capital: Vec<String>,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub subregion: Option<String>,
    #[serde(default)]
    pub population: u64,
    #[serde(default)]
    pub flags: Flags,
    /// Language code to language name
    #[serde(default)]
    pub languages: BTreeMap<String, String>,
    #[serde(default)]
    pub currencies: BTreeMap<String, Currency>,
    /// Alpha-3 codes of neighbouring countries
    #[serde(default)]
    pub borders: Vec<String>,
    /// Top-level domains
    #[serde(default)]
    pub tld: Vec<String>,
}

impl Country {
    /// Case-insensitive substring match against any spoken language
    pub fn speaks(&self, language: &str) -> bool {
        let needle = language.to_lowercase();
        self.languages
            .values()
            .any(|lang| lang.to_lowercase().contains(&needle))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CountryName {
    pub common: String,
    #[serde(default)]
    pub official: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Flags {
    #[serde(default)]
    pub png: String,
    #[serde(default)]
    pub svg: String,
}

impl Flags {
    /// Preferred flag image, svg first
    pub fn best(&self) -> &str {
        if self.svg.is_empty() {
            &self.png
        } else {
            &self.svg
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Currency {
    pub name: String,
    #[serde(default)]
    pub symbol: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const GERMANY: &str = r#"{
        "cca3": "DEU",
        "name": { "common": "Germany", "official": "Federal Republic of Germany" },
        "capital": ["Berlin"],
        "region": "Europe",
        "subregion": "Western Europe",
        "population": 83240525,
        "flags": { "png": "https://flagcdn.com/w320/de.png", "svg": "https://flagcdn.com/de.svg" },
        "languages": { "deu": "German" },
        "currencies": { "EUR": { "name": "Euro", "symbol": "€" } },
        "borders": ["AUT", "BEL", "CZE"],
        "tld": [".de"]
    }"#;

    #[test]
    fn test_full_record_decodes() {
        let country: Country = serde_json::from_str(GERMANY).unwrap();
        assert_eq!(country.cca3, "DEU");
        assert_eq!(country.name.official, "Federal Republic of Germany");
        assert_eq!(country.population, 83_240_525);
        assert_eq!(country.currencies["EUR"].symbol.as_deref(), Some("€"));
        assert_eq!(country.borders.len(), 3);
    }

    #[test]
    fn test_projected_record_decodes_with_defaults() {
        // Antarctica-like record: no capital, no languages, no subregion
        let json = r#"{ "cca3": "ATA", "name": { "common": "Antarctica" }, "region": "Antarctic", "population": 1000 }"#;
        let country: Country = serde_json::from_str(json).unwrap();
        assert!(country.capital.is_empty());
        assert!(country.languages.is_empty());
        assert!(country.subregion.is_none());
        assert!(country.tld.is_empty());
    }

    #[test]
    fn test_speaks_is_case_insensitive_substring() {
        let country: Country = serde_json::from_str(GERMANY).unwrap();
        assert!(country.speaks("german"));
        assert!(country.speaks("ERM"));
        assert!(!country.speaks("french"));
    }

    #[test]
    fn test_flag_prefers_svg() {
        let mut flags = Flags {
            png: "a.png".to_string(),
            svg: "a.svg".to_string(),
        };
        assert_eq!(flags.best(), "a.svg");
        flags.svg.clear();
        assert_eq!(flags.best(), "a.png");
    }
}
