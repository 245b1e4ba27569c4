//! GitHub user search with "load more" pagination, plus a small recipe
//! catalog.

pub mod cards;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod query;
pub mod recipes;
pub mod session;

pub use client::{GitHubClient, UserDirectory};
pub use config::Config;
pub use error::{SearchError, SearchResult};
pub use models::{SearchFilters, SearchResultPage, UserProfile, UserSummary};
pub use query::{build_query, build_query_with, Escaping, SearchQuery, TermEscaper};
pub use session::{has_more, AccumulatedResults, Phase, SearchSession, SearchState};
