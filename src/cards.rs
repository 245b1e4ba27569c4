//! Per-result profile cards.
//!
//! Every search hit gets its own detail fetch. A failed fetch only turns
//! its own card into a placeholder; the rest of the grid still loads.

use std::sync::Arc;

use crate::client::UserDirectory;
use crate::error::SearchError;
use crate::models::{UserProfile, UserSummary};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserCard {
    Loaded(UserProfile),
    Unavailable { login: String, message: String },
}

impl UserCard {
    pub fn login(&self) -> &str {
        match self {
            UserCard::Loaded(profile) => &profile.login,
            UserCard::Unavailable { login, .. } => login,
        }
    }

    fn unavailable(login: &str) -> Self {
        UserCard::Unavailable {
            login: login.to_string(),
            message: SearchError::NotFound(login.to_string()).user_message(),
        }
    }
}

/// Fetches all profiles in parallel and returns the cards in input order.
pub async fn load_cards<D>(directory: Arc<D>, users: &[UserSummary]) -> Vec<UserCard>
where
    D: UserDirectory + ?Sized + 'static,
{
    let mut handles = Vec::with_capacity(users.len());
    for user in users {
        let directory = Arc::clone(&directory);
        let login = user.login.clone();
        handles.push(tokio::spawn(async move {
            directory.fetch_user(&login).await
        }));
    }

    let mut cards = Vec::with_capacity(users.len());
    for (user, handle) in users.iter().zip(handles) {
        let card = match handle.await {
            Ok(Ok(profile)) => UserCard::Loaded(profile),
            Ok(Err(err)) => {
                tracing::error!(login = %user.login, "could not load user: {err}");
                UserCard::unavailable(&user.login)
            }
            Err(join_err) => {
                tracing::error!(login = %user.login, "detail task failed: {join_err}");
                UserCard::unavailable(&user.login)
            }
        };
        cards.push(card);
    }
    cards
}
