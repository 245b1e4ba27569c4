#![allow(dead_code)]

use async_trait::async_trait;
use mockall::mock;

use github_user_search::client::UserDirectory;
use github_user_search::error::SearchResult;
use github_user_search::models::{SearchFilters, SearchResultPage, UserProfile, UserSummary};

mock! {
    pub Directory {}

    #[async_trait]
    impl UserDirectory for Directory {
        async fn search_users(
            &self,
            filters: &SearchFilters,
            page: u32,
            per_page: u32,
        ) -> SearchResult<SearchResultPage>;
        async fn fetch_user(&self, login: &str) -> SearchResult<UserProfile>;
    }
}

pub fn users(ids: std::ops::Range<u64>) -> Vec<UserSummary> {
    ids.map(|id| UserSummary::new(id, format!("user{id}"))).collect()
}

pub fn page(ids: std::ops::Range<u64>, total_count: u64) -> SearchResultPage {
    SearchResultPage {
        total_count,
        items: users(ids),
    }
}

pub fn profile(login: &str) -> UserProfile {
    UserProfile {
        login: login.to_string(),
        id: 1,
        avatar_url: format!("https://avatars.example/{login}"),
        html_url: format!("https://github.com/{login}"),
        name: None,
        bio: None,
        location: None,
        company: None,
        public_repos: 3,
        followers: 5,
        following: 1,
    }
}
