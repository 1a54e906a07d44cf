use std::sync::{
    atomic::{AtomicBool, Ordering},
    Mutex,
};

use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use super::{Store, StoreError};
use crate::{
    auth::repo_types::User,
    forms::repo_types::{Form, FormDetails, NewForm},
    themes::repo_types::{NewTheme, Theme, ThemeSummary},
    votes::repo_types::{NewVote, Vote, VoteOutcome},
};

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    forms: Vec<Form>,
    themes: Vec<Theme>,
    votes: Vec<(Vote, String)>,
}

impl Tables {
    fn summary(&self, theme: &Theme) -> ThemeSummary {
        let vote_count = self.votes.iter().filter(|(v, _)| v.theme_id == theme.id).count() as i64;
        ThemeSummary {
            vote_count,
            ..ThemeSummary::from(theme.clone())
        }
    }

    fn details(&self, form: &Form) -> FormDetails {
        FormDetails {
            form: form.clone(),
            themes: self
                .themes
                .iter()
                .filter(|t| t.form_id == Some(form.id))
                .map(|t| self.summary(t))
                .collect(),
        }
    }
}

/// Store backed by plain vectors, for tests.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    fail_reads: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `list_themes` fail until switched back.
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn vote_count(&self) -> usize {
        self.tables.lock().unwrap().votes.len()
    }

    pub fn form_count(&self) -> usize {
        self.tables.lock().unwrap().forms.len()
    }

    pub fn theme_count(&self) -> usize {
        self.tables.lock().unwrap().themes.len()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.users.iter().find(|u| u.id == id).cloned())
    }

    async fn create_user(&self, email: &str, password_hash: &str) -> Result<User, StoreError> {
        let mut tables = self.tables.lock().unwrap();
        if tables.users.iter().any(|u| u.email == email) {
            return Err(StoreError::Conflict("Email already registered".into()));
        }
        let user = User {
            id: Uuid::new_v4(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            created_at: OffsetDateTime::now_utc(),
        };
        tables.users.push(user.clone());
        Ok(user)
    }

    async fn list_themes(&self) -> Result<Vec<ThemeSummary>, StoreError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::Database(sqlx::Error::PoolTimedOut));
        }
        let tables = self.tables.lock().unwrap();
        Ok(tables.themes.iter().map(|t| tables.summary(t)).collect())
    }

    async fn insert_themes_if_absent(&self, themes: &[NewTheme]) -> Result<u64, StoreError> {
        let mut tables = self.tables.lock().unwrap();
        let mut written = 0;
        for theme in themes {
            if tables.themes.iter().all(|t| t.id != theme.id) {
                tables.themes.push(theme.clone().into());
                written += 1;
            }
        }
        Ok(written)
    }

    async fn create_theme(&self, theme: NewTheme) -> Result<Theme, StoreError> {
        let mut tables = self.tables.lock().unwrap();
        if let Some(form_id) = theme.form_id {
            if tables.forms.iter().all(|f| f.id != form_id) {
                return Err(StoreError::NotFound("Form not found".into()));
            }
        }
        if tables.themes.iter().any(|t| t.id == theme.id) {
            return Err(StoreError::Conflict("Theme already exists".into()));
        }
        let theme = Theme::from(theme);
        tables.themes.push(theme.clone());
        Ok(theme)
    }

    async fn create_form(&self, creator_id: Uuid, form: NewForm) -> Result<FormDetails, StoreError> {
        let mut tables = self.tables.lock().unwrap();
        let row = Form {
            id: form.id,
            title: form.title,
            description: form.description,
            creator_id,
            created_at: OffsetDateTime::now_utc(),
        };
        tables.forms.push(row.clone());
        tables.themes.extend(form.themes.into_iter().map(Theme::from));
        Ok(tables.details(&row))
    }

    async fn list_forms_by_creator(&self, creator_id: Uuid) -> Result<Vec<FormDetails>, StoreError> {
        let tables = self.tables.lock().unwrap();
        // Newest first; insertion order stands in for created_at.
        Ok(tables
            .forms
            .iter()
            .rev()
            .filter(|f| f.creator_id == creator_id)
            .map(|f| tables.details(f))
            .collect())
    }

    async fn get_form(&self, id: Uuid) -> Result<Option<FormDetails>, StoreError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.forms.iter().find(|f| f.id == id).map(|f| tables.details(f)))
    }

    async fn admit_vote(&self, vote: NewVote) -> Result<VoteOutcome, StoreError> {
        let mut tables = self.tables.lock().unwrap();
        if tables.votes.iter().any(|(_, key)| *key == vote.voter_key) {
            return Ok(VoteOutcome::AlreadyVoted);
        }
        let Some(theme) = tables.themes.iter().find(|t| t.id == vote.theme_id) else {
            return Ok(VoteOutcome::ThemeNotFound);
        };
        let summary = tables.summary(theme);
        if summary.vote_count >= i64::from(summary.max_votes) {
            return Ok(VoteOutcome::ThemeFull);
        }
        let row = Vote {
            id: vote.id,
            theme_id: vote.theme_id,
            voter_name: vote.voter_name,
            created_at: OffsetDateTime::now_utc(),
        };
        tables.votes.push((row.clone(), vote.voter_key));
        Ok(VoteOutcome::Recorded(row))
    }
}
