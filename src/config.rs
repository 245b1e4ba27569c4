//! Runtime configuration read from the process environment.
//!
//! `.env` files are loaded by the binary through `dotenvy` before
//! [`Config::from_env`] runs.

use std::path::PathBuf;

use reqwest::Url;
use thiserror::Error;

use crate::query::Escaping;

pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const DEFAULT_PER_PAGE: u32 = 9;
pub const DEFAULT_RECIPES_PATH: &str = "data/recipes.json";

pub const API_URL_VAR: &str = "GITHUB_API_URL";
pub const PER_PAGE_VAR: &str = "GITHUB_SEARCH_PER_PAGE";
pub const ESCAPING_VAR: &str = "GITHUB_QUERY_ESCAPING";
pub const RECIPES_PATH_VAR: &str = "RECIPES_PATH";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("GITHUB_API_URL is not a valid URL: {0}")]
    InvalidApiUrl(String),

    #[error("GITHUB_SEARCH_PER_PAGE must be a number between 1 and 100, got '{0}'")]
    InvalidPerPage(String),

    #[error("GITHUB_QUERY_ESCAPING: {0}")]
    InvalidEscaping(String),
}

#[derive(Clone, Debug)]
pub struct Config {
    /// Origin of the GitHub REST API.
    pub api_url: Url,
    /// Page size used by advanced searches.
    pub per_page: u32,
    pub escaping: Escaping,
    /// JSON document holding the recipe catalog.
    pub recipes_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: Url::parse(DEFAULT_API_URL).expect("default API URL is valid"),
            per_page: DEFAULT_PER_PAGE,
            escaping: Escaping::default(),
            recipes_path: PathBuf::from(DEFAULT_RECIPES_PATH),
        }
    }
}

impl Config {
    /// Reads the configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through an arbitrary key lookup.
    ///
    /// Unset and blank values fall back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Config::default();

        if let Some(raw) = get(API_URL_VAR) {
            config.api_url = Url::parse(raw.trim())
                .map_err(|e| ConfigError::InvalidApiUrl(format!("{raw}: {e}")))?;
        }

        if let Some(raw) = get(PER_PAGE_VAR) {
            config.per_page = raw
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|n| (1..=100).contains(n))
                .ok_or(ConfigError::InvalidPerPage(raw))?;
        }

        if let Some(raw) = get(ESCAPING_VAR) {
            config.escaping = raw.parse().map_err(ConfigError::InvalidEscaping)?;
        }

        if let Some(raw) = get(RECIPES_PATH_VAR) {
            config.recipes_path = PathBuf::from(raw);
        }

        Ok(config)
    }
}
