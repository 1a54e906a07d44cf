use sqlx::PgPool;

use crate::store::StoreError;
use crate::votes::repo_types::{NewVote, Vote, VoteOutcome};

/// Admission runs in one transaction. The theme row is locked so that
/// concurrent votes on the same theme see each other's counts, and the
/// unique `voter_key` index catches a concurrent vote under the same name.
pub async fn admit(db: &PgPool, vote: &NewVote) -> Result<VoteOutcome, StoreError> {
    let mut tx = db.begin().await?;

    let voted: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM votes WHERE voter_key = $1)")
        .bind(&vote.voter_key)
        .fetch_one(&mut *tx)
        .await?;
    if voted {
        return Ok(VoteOutcome::AlreadyVoted);
    }

    let max_votes: Option<i32> =
        sqlx::query_scalar("SELECT max_votes FROM themes WHERE id = $1 FOR UPDATE")
            .bind(&vote.theme_id)
            .fetch_optional(&mut *tx)
            .await?;
    let Some(max_votes) = max_votes else {
        return Ok(VoteOutcome::ThemeNotFound);
    };

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM votes WHERE theme_id = $1")
        .bind(&vote.theme_id)
        .fetch_one(&mut *tx)
        .await?;
    if count >= i64::from(max_votes) {
        return Ok(VoteOutcome::ThemeFull);
    }

    let inserted = sqlx::query_as::<_, Vote>(
        r#"
        INSERT INTO votes (id, theme_id, voter_name, voter_key)
        VALUES ($1, $2, $3, $4)
        RETURNING id, theme_id, voter_name, created_at
        "#,
    )
    .bind(&vote.id)
    .bind(&vote.theme_id)
    .bind(&vote.voter_name)
    .bind(&vote.voter_key)
    .fetch_one(&mut *tx)
    .await;

    match inserted {
        Ok(row) => {
            tx.commit().await?;
            Ok(VoteOutcome::Recorded(row))
        }
        Err(sqlx::Error::Database(ref db_err)) if db_err.is_unique_violation() => {
            Ok(VoteOutcome::AlreadyVoted)
        }
        Err(e) => Err(e.into()),
    }
}
