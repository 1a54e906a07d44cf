use serde::Serialize;
use sqlx::FromRow;
use time::OffsetDateTime;

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Vote {
    pub id: String,
    pub theme_id: String,
    pub voter_name: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone)]
pub struct NewVote {
    pub id: String,
    pub theme_id: String,
    /// Trimmed display name.
    pub voter_name: String,
    /// Normalized name, unique across all votes.
    pub voter_key: String,
}

/// Result of an admission attempt. Only `Recorded` writes a row.
#[derive(Debug, Clone)]
pub enum VoteOutcome {
    Recorded(Vote),
    AlreadyVoted,
    ThemeNotFound,
    ThemeFull,
}
