use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::{Store, StoreError};
use crate::{
    auth::repo_types::User,
    forms::{self, repo_types::{FormDetails, NewForm}},
    themes::{self, repo_types::{NewTheme, Theme, ThemeSummary}},
    votes::{self, repo_types::{NewVote, VoteOutcome}},
};

#[derive(Clone)]
pub struct PgStore {
    db: PgPool,
}

impl PgStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        User::find_by_email(&self.db, email).await
    }

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        User::find_by_id(&self.db, id).await
    }

    async fn create_user(&self, email: &str, password_hash: &str) -> Result<User, StoreError> {
        User::create(&self.db, email, password_hash).await
    }

    async fn list_themes(&self) -> Result<Vec<ThemeSummary>, StoreError> {
        themes::repo::list_all(&self.db).await
    }

    async fn insert_themes_if_absent(&self, themes: &[NewTheme]) -> Result<u64, StoreError> {
        themes::repo::insert_if_absent(&self.db, themes).await
    }

    async fn create_theme(&self, theme: NewTheme) -> Result<Theme, StoreError> {
        themes::repo::insert(&self.db, &theme).await
    }

    async fn create_form(&self, creator_id: Uuid, form: NewForm) -> Result<FormDetails, StoreError> {
        forms::repo::create_with_themes(&self.db, creator_id, &form).await
    }

    async fn list_forms_by_creator(&self, creator_id: Uuid) -> Result<Vec<FormDetails>, StoreError> {
        forms::repo::list_by_creator(&self.db, creator_id).await
    }

    async fn get_form(&self, id: Uuid) -> Result<Option<FormDetails>, StoreError> {
        forms::repo::get(&self.db, id).await
    }

    async fn admit_vote(&self, vote: NewVote) -> Result<VoteOutcome, StoreError> {
        votes::repo::admit(&self.db, &vote).await
    }
}
