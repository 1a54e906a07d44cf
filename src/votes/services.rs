use tracing::{info, warn};

use super::repo_types::{NewVote, Vote, VoteOutcome};
use crate::{error::AppError, store::Store, utils::derived_id};

pub const MAX_VOTER_NAME_CHARS: usize = 100;

/// Key under which a voter is remembered: whitespace collapsed, lowercased.
pub fn voter_key(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Records one vote for `theme_id`.
///
/// A name may vote once across all forms, and a theme accepts at most
/// `max_votes` votes. Rejections leave the store untouched.
pub async fn submit_vote(
    store: &dyn Store,
    theme_id: &str,
    voter_name: &str,
) -> Result<Vote, AppError> {
    let theme_id = theme_id.trim();
    let voter_name = voter_name.trim();
    if theme_id.is_empty() || voter_name.is_empty() {
        return Err(AppError::validation("Theme and voter name are required"));
    }
    if voter_name.chars().count() > MAX_VOTER_NAME_CHARS {
        return Err(AppError::validation(format!(
            "Voter name must be at most {MAX_VOTER_NAME_CHARS} characters"
        )));
    }

    let vote = NewVote {
        id: derived_id("vote", voter_name),
        theme_id: theme_id.to_string(),
        voter_name: voter_name.to_string(),
        voter_key: voter_key(voter_name),
    };

    match store.admit_vote(vote).await? {
        VoteOutcome::Recorded(vote) => {
            info!(vote_id = %vote.id, theme_id = %vote.theme_id, "vote recorded");
            Ok(vote)
        }
        VoteOutcome::AlreadyVoted => {
            warn!(%theme_id, "voter already voted");
            Err(AppError::AlreadyVoted)
        }
        VoteOutcome::ThemeNotFound => Err(AppError::NotFound("Theme not found".into())),
        VoteOutcome::ThemeFull => {
            warn!(%theme_id, "theme at capacity");
            Err(AppError::CapacityExceeded)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{store::memory::MemoryStore, themes::repo_types::NewTheme};

    async fn store_with_theme(id: &str, max_votes: i32) -> MemoryStore {
        let store = MemoryStore::new();
        store
            .create_theme(NewTheme {
                id: id.into(),
                name: id.to_uppercase(),
                max_votes,
                form_id: None,
            })
            .await
            .unwrap();
        store
    }

    #[test]
    fn voter_key_ignores_case_and_spacing() {
        assert_eq!(voter_key("  Alice   Smith "), "alice smith");
        assert_eq!(voter_key("ALICE\tsmith"), "alice smith");
    }

    #[tokio::test]
    async fn records_trimmed_name() {
        let store = store_with_theme("t1", 3).await;
        let vote = submit_vote(&store, "t1", "  Alice ").await.unwrap();
        assert_eq!(vote.voter_name, "Alice");
        assert_eq!(vote.theme_id, "t1");
        assert!(vote.id.starts_with("vote-alice-"));
    }

    #[tokio::test]
    async fn full_theme_rejects_without_writing() {
        let store = store_with_theme("t1", 1).await;
        submit_vote(&store, "t1", "Alice").await.unwrap();

        let err = submit_vote(&store, "t1", "Bob").await.unwrap_err();
        assert!(matches!(err, AppError::CapacityExceeded));
        assert_eq!(store.vote_count(), 1);
    }

    #[tokio::test]
    async fn one_vote_per_name_across_themes() {
        let store = store_with_theme("t1", 5).await;
        store
            .create_theme(NewTheme {
                id: "t2".into(),
                name: "Other".into(),
                max_votes: 5,
                form_id: None,
            })
            .await
            .unwrap();

        submit_vote(&store, "t1", "Alice Smith").await.unwrap();
        for again in ["alice smith", "  ALICE   SMITH "] {
            let err = submit_vote(&store, "t2", again).await.unwrap_err();
            assert!(matches!(err, AppError::AlreadyVoted));
        }
        assert_eq!(store.vote_count(), 1);
    }

    #[tokio::test]
    async fn already_voted_is_checked_before_theme() {
        let store = store_with_theme("t1", 5).await;
        submit_vote(&store, "t1", "Alice").await.unwrap();
        let err = submit_vote(&store, "missing", "Alice").await.unwrap_err();
        assert!(matches!(err, AppError::AlreadyVoted));
    }

    #[tokio::test]
    async fn unknown_theme_and_blank_input() {
        let store = store_with_theme("t1", 5).await;
        let err = submit_vote(&store, "missing", "Alice").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        let err = submit_vote(&store, "t1", "   ").await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        let err = submit_vote(&store, "", "Alice").await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(store.vote_count(), 0);
    }

    #[tokio::test]
    async fn overlong_names_are_rejected() {
        let store = store_with_theme("t1", 5).await;
        let long = "é".repeat(MAX_VOTER_NAME_CHARS + 1);
        let err = submit_vote(&store, "t1", &long).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(store.vote_count(), 0);

        let padded = format!("  {}  ", "a".repeat(MAX_VOTER_NAME_CHARS));
        submit_vote(&store, "t1", &padded).await.unwrap();
    }
}
