use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    pub id: String,
    pub name: String,
    pub max_votes: i32,
    pub form_id: Option<Uuid>,
}

/// A theme together with the number of votes it has received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ThemeSummary {
    pub id: String,
    pub name: String,
    pub max_votes: i32,
    pub form_id: Option<Uuid>,
    pub vote_count: i64,
}

impl From<Theme> for ThemeSummary {
    fn from(t: Theme) -> Self {
        Self {
            id: t.id,
            name: t.name,
            max_votes: t.max_votes,
            form_id: t.form_id,
            vote_count: 0,
        }
    }
}

/// Insert payload; the id is decided by the caller.
#[derive(Debug, Clone)]
pub struct NewTheme {
    pub id: String,
    pub name: String,
    pub max_votes: i32,
    pub form_id: Option<Uuid>,
}

impl From<NewTheme> for Theme {
    fn from(t: NewTheme) -> Self {
        Self {
            id: t.id,
            name: t.name,
            max_votes: t.max_votes,
            form_id: t.form_id,
        }
    }
}
