//! YAML file listing several searches for one session.
//!
//! ```yaml
//! searches:
//!   - link: "https://web.arbeitsagentur.de/ausbildungssuche/...?beruf=7856&ort=Berlin_13.38_52.53"
//!   - city: Hamburg
//!     job_id: 7856
//!     radius_km: 30
//!     lat: 53.55
//!     lon: 9.99
//!     offer_type: 109
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::link::parse_search_link;
use crate::params::SearchParameters;
use crate::{ConfigError, ParamError};

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SearchEntry {
    Link {
        link: String,
    },
    Manual {
        city: String,
        job_id: i64,
        radius_km: u32,
        lat: f64,
        lon: f64,
        offer_type: i64,
    },
}

impl SearchEntry {
    /// Resolves the entry into validated parameters.
    ///
    /// # Errors
    ///
    /// Returns [`ParamError`] if the link cannot be decoded or the manual
    /// fields fail validation.
    pub fn to_parameters(&self) -> Result<SearchParameters, ParamError> {
        match self {
            SearchEntry::Link { link } => parse_search_link(link),
            SearchEntry::Manual {
                city,
                job_id,
                radius_km,
                lat,
                lon,
                offer_type,
            } => SearchParameters::new(city, *job_id, *radius_km, *lat, *lon, *offer_type),
        }
    }

    /// The link itself for link entries, the parameter descriptor otherwise.
    ///
    /// # Errors
    ///
    /// Propagates validation errors from [`SearchEntry::to_parameters`].
    pub fn descriptor(&self) -> Result<String, ParamError> {
        match self {
            SearchEntry::Link { link } => Ok(link.trim().to_owned()),
            SearchEntry::Manual { .. } => Ok(self.to_parameters()?.descriptor()),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchesFile {
    pub searches: Vec<SearchEntry>,
}

/// Load and validate a searches file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, is empty, or
/// any entry fails parameter validation.
pub fn load_searches(path: &Path) -> Result<SearchesFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::SearchesFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_searches(&content)
}

fn parse_searches(content: &str) -> Result<SearchesFile, ConfigError> {
    let file: SearchesFile = serde_yaml::from_str(content)?;
    validate_searches(&file)?;
    Ok(file)
}

fn validate_searches(file: &SearchesFile) -> Result<(), ConfigError> {
    if file.searches.is_empty() {
        return Err(ConfigError::Validation(
            "searches file must list at least one search".to_string(),
        ));
    }

    for (index, entry) in file.searches.iter().enumerate() {
        entry.to_parameters().map_err(|e| {
            ConfigError::Validation(format!("search #{} is invalid: {e}", index + 1))
        })?;
    }

    Ok(())
}
