//! Error types for user search and user detail lookups.

use thiserror::Error;

/// Shown when a search is attempted without any criteria.
pub const MISSING_CRITERIA_MESSAGE: &str =
    "Please enter at least one search criteria (username, location, or minimum repos)";

/// Shown when the search endpoint could not be reached or answered badly.
pub const SEARCH_FAILED_MESSAGE: &str =
    "Error searching users. Please try different search criteria.";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// Input rejected before any request was sent.
    #[error("validation error: {0}")]
    Validation(String),

    /// Network failure, non-success status or undecodable body.
    #[error("transport error: {0}")]
    Transport(String),

    /// The requested login does not exist.
    #[error("user not found: {0}")]
    NotFound(String),
}

pub type SearchResult<T> = Result<T, SearchError>;

impl SearchError {
    /// Message suitable for showing to the person driving the search.
    pub fn user_message(&self) -> String {
        match self {
            SearchError::Validation(msg) => msg.clone(),
            SearchError::Transport(_) => SEARCH_FAILED_MESSAGE.to_string(),
            SearchError::NotFound(login) => format!("Could not load user: {login}"),
        }
    }
}
