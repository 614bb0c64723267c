//! Hand-maintained fallback list of detail-page URLs.
//!
//! Used by link discovery only after every dynamic strategy comes back
//! empty. Entries are not checked for liveness. The list ships inside the
//! binary via `include_str!` and is parsed once into an immutable value.

use serde::Deserialize;
use std::collections::HashSet;
use thiserror::Error;

const STATES_INDEX_MARKER: &str = "facts-and-statistics/country/united-states";
const COUNTRIES_INDEX_MARKER: &str = "facts-and-statistics";

/// Error types for catalog loading.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to parse fallback catalog YAML: {0}")]
    YamlParse(#[from] serde_yml::Error),
    #[error("Duplicate URL in fallback catalog: {0}")]
    DuplicateUrl(String),
    #[error("Fallback catalog list '{0}' is empty")]
    EmptyList(&'static str),
}

#[derive(Deserialize, Debug)]
struct CatalogFile {
    countries: Vec<String>,
    states: Vec<String>,
}

/// Static country and US-state detail URLs, in file order.
#[derive(Debug, Clone)]
pub struct Catalog {
    countries: Vec<String>,
    states: Vec<String>,
}

impl Catalog {
    /// Parse a catalog from YAML with `countries` and `states` lists.
    pub fn parse(yaml_content: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_yml::from_str(yaml_content)?;
        check_list("countries", &file.countries)?;
        check_list("states", &file.states)?;
        Ok(Self {
            countries: file.countries,
            states: file.states,
        })
    }

    /// Load the catalog embedded at compile time.
    pub fn embedded() -> Result<Self, CatalogError> {
        Self::parse(include_str!("../seed_data/fallback_urls.yml"))
    }

    pub fn countries(&self) -> &[String] {
        &self.countries
    }

    pub fn states(&self) -> &[String] {
        &self.states
    }

    /// Picks the fallback list for an index URL.
    ///
    /// The United States country page doubles as the state index, so it is
    /// matched before the generic facts-and-statistics pattern.
    pub fn for_index(&self, index_url: &str) -> Option<&[String]> {
        if index_url.contains(STATES_INDEX_MARKER) {
            Some(&self.states)
        } else if index_url.contains(COUNTRIES_INDEX_MARKER) {
            Some(&self.countries)
        } else {
            None
        }
    }
}

fn check_list(name: &'static str, urls: &[String]) -> Result<(), CatalogError> {
    if urls.is_empty() {
        return Err(CatalogError::EmptyList(name));
    }
    let mut seen = HashSet::new();
    for url in urls {
        if !seen.insert(url.as_str()) {
            return Err(CatalogError::DuplicateUrl(url.clone()));
        }
    }
    Ok(())
}
