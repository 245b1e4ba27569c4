use serde::{Deserialize, Serialize};

use crate::error::SearchError;

/// Optional criteria for an advanced user search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilters {
    /// Free text matched against logins and names.
    pub username: Option<String>,
    /// Free text matched against the profile location.
    pub location: Option<String>,
    /// Users must own strictly more public repositories than this.
    pub min_repositories: Option<u32>,
}

impl SearchFilters {
    /// Builds filters from raw form text.
    ///
    /// Blank fields are treated as absent. A non-blank minimum repository
    /// count that is not a non-negative integer is rejected.
    pub fn from_input(username: &str, location: &str, min_repos: &str) -> Result<Self, SearchError> {
        let min_repositories = match non_blank(min_repos) {
            Some(raw) => Some(raw.parse::<u32>().map_err(|_| {
                SearchError::Validation(format!(
                    "Minimum repositories must be a non-negative number, got '{raw}'"
                ))
            })?),
            None => None,
        };

        Ok(Self {
            username: non_blank(username).map(str::to_string),
            location: non_blank(location).map(str::to_string),
            min_repositories,
        })
    }

    pub fn with_username(self, username: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            ..self
        }
    }

    pub fn with_location(self, location: impl Into<String>) -> Self {
        Self {
            location: Some(location.into()),
            ..self
        }
    }

    pub fn with_min_repositories(self, min_repositories: u32) -> Self {
        Self {
            min_repositories: Some(min_repositories),
            ..self
        }
    }

    /// True when no criterion carries a value.
    pub fn is_empty(&self) -> bool {
        is_blank(self.username.as_deref())
            && is_blank(self.location.as_deref())
            && self.min_repositories.is_none()
    }
}

fn non_blank(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

/// Response from the GitHub Search Users API (`/search/users`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResultPage {
    pub total_count: u64,
    pub items: Vec<UserSummary>,
}

/// A single user item from the search results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: u64,
    pub login: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub html_url: Option<String>,
}

impl UserSummary {
    pub fn new(id: u64, login: impl Into<String>) -> Self {
        Self {
            id,
            login: login.into(),
            avatar_url: None,
            html_url: None,
        }
    }
}

/// Represents a GitHub user profile from the `/users/{username}` API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub login: String,
    pub id: u64,
    pub avatar_url: String,
    pub html_url: String,
    pub name: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub company: Option<String>,
    #[serde(default)]
    pub public_repos: u32,
    #[serde(default)]
    pub followers: u32,
    #[serde(default)]
    pub following: u32,
}

impl UserProfile {
    /// Name shown on a card: the display name, falling back to the login.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(&self.login)
    }
}
