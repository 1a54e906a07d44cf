use serde::Serialize;
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::themes::repo_types::{NewTheme, ThemeSummary};

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Form {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub creator_id: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Form with its themes and their vote counts.
#[derive(Debug, Clone, Serialize)]
pub struct FormDetails {
    #[serde(flatten)]
    pub form: Form,
    pub themes: Vec<ThemeSummary>,
}

#[derive(Debug, Clone)]
pub struct NewForm {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub themes: Vec<NewTheme>,
}
