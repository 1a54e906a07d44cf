//! Persistence seam shared by every handler.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::{
    auth::repo_types::User,
    forms::repo_types::{FormDetails, NewForm},
    themes::repo_types::{NewTheme, Theme, ThemeSummary},
    votes::repo_types::{NewVote, VoteOutcome},
};

#[cfg(test)]
pub mod memory;
pub mod postgres;

pub use postgres::PgStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl StoreError {
    /// Maps unique and foreign key violations to domain errors.
    pub(crate) fn classify(err: sqlx::Error, conflict: &str, missing: &str) -> Self {
        if let sqlx::Error::Database(ref db_err) = err {
            if db_err.is_unique_violation() {
                return StoreError::Conflict(conflict.to_string());
            }
            if db_err.is_foreign_key_violation() {
                return StoreError::NotFound(missing.to_string());
            }
        }
        StoreError::Database(err)
    }
}

#[async_trait]
pub trait Store: Send + Sync {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;
    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError>;
    /// Fails with `Conflict` when the email is taken.
    async fn create_user(&self, email: &str, password_hash: &str) -> Result<User, StoreError>;

    async fn list_themes(&self) -> Result<Vec<ThemeSummary>, StoreError>;
    /// Inserts the themes whose ids are not present yet. Returns how many were written.
    async fn insert_themes_if_absent(&self, themes: &[NewTheme]) -> Result<u64, StoreError>;
    /// Fails with `NotFound` when `form_id` points nowhere.
    async fn create_theme(&self, theme: NewTheme) -> Result<Theme, StoreError>;

    /// Writes the form and all of its themes atomically.
    async fn create_form(&self, creator_id: Uuid, form: NewForm) -> Result<FormDetails, StoreError>;
    async fn list_forms_by_creator(&self, creator_id: Uuid) -> Result<Vec<FormDetails>, StoreError>;
    async fn get_form(&self, id: Uuid) -> Result<Option<FormDetails>, StoreError>;

    /// Checks the voter, the theme and its cap, then records the vote, as one unit.
    async fn admit_vote(&self, vote: NewVote) -> Result<VoteOutcome, StoreError>;
}
