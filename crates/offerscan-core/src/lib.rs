pub mod app_config;
pub mod config;
pub mod link;
pub mod offer_type;
pub mod params;
pub mod searches;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use link::parse_search_link;
pub use offer_type::OfferType;
pub use params::SearchParameters;
pub use searches::{load_searches, SearchEntry, SearchesFile};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for env var {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read searches file {path}: {source}")]
    SearchesFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse searches file: {0}")]
    SearchesFileParse(#[from] serde_yaml::Error),

    #[error("searches file validation failed: {0}")]
    Validation(String),
}

/// Rejection of user-supplied search input. Raised before any network
/// activity so a malformed search never starts a partial run.
#[derive(Debug, Error, PartialEq)]
pub enum ParamError {
    #[error("field '{field}' is not a valid {expected}: \"{value}\"")]
    NotANumber {
        field: &'static str,
        expected: &'static str,
        value: String,
    },

    #[error("field '{field}' is out of range: {reason}")]
    OutOfRange { field: &'static str, reason: String },

    #[error("location must not be empty")]
    EmptyLocation,

    #[error("invalid search link: {0}")]
    InvalidLink(String),
}
