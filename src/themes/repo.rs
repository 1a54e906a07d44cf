use sqlx::{PgPool, Postgres, Transaction};

use crate::store::StoreError;
use crate::themes::repo_types::{NewTheme, Theme, ThemeSummary};

const SUMMARY_COLUMNS: &str = r#"
    SELECT t.id, t.name, t.max_votes, t.form_id, COUNT(v.id) AS vote_count
      FROM themes t
      LEFT JOIN votes v ON v.theme_id = t.id
"#;

pub async fn list_all(db: &PgPool) -> Result<Vec<ThemeSummary>, StoreError> {
    let sql = format!("{SUMMARY_COLUMNS} GROUP BY t.id ORDER BY t.created_at ASC, t.id ASC");
    let rows = sqlx::query_as::<_, ThemeSummary>(&sql).fetch_all(db).await?;
    Ok(rows)
}

/// Summaries for the themes of the given forms.
pub async fn list_by_forms(
    db: &PgPool,
    form_ids: &[uuid::Uuid],
) -> Result<Vec<ThemeSummary>, StoreError> {
    let sql = format!(
        "{SUMMARY_COLUMNS} WHERE t.form_id = ANY($1) GROUP BY t.id ORDER BY t.created_at ASC, t.id ASC"
    );
    let rows = sqlx::query_as::<_, ThemeSummary>(&sql)
        .bind(form_ids)
        .fetch_all(db)
        .await?;
    Ok(rows)
}

pub async fn insert_if_absent(db: &PgPool, themes: &[NewTheme]) -> Result<u64, StoreError> {
    let mut tx = db.begin().await?;
    let mut written = 0;
    for theme in themes {
        let res = sqlx::query(
            r#"
            INSERT INTO themes (id, name, max_votes, form_id)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(&theme.id)
        .bind(&theme.name)
        .bind(theme.max_votes)
        .bind(theme.form_id)
        .execute(&mut *tx)
        .await?;
        written += res.rows_affected();
    }
    tx.commit().await?;
    Ok(written)
}

pub async fn insert(db: &PgPool, theme: &NewTheme) -> Result<Theme, StoreError> {
    sqlx::query_as::<_, Theme>(
        r#"
        INSERT INTO themes (id, name, max_votes, form_id)
        VALUES ($1, $2, $3, $4)
        RETURNING id, name, max_votes, form_id
        "#,
    )
    .bind(&theme.id)
    .bind(&theme.name)
    .bind(theme.max_votes)
    .bind(theme.form_id)
    .fetch_one(db)
    .await
    .map_err(|e| StoreError::classify(e, "Theme already exists", "Form not found"))
}

/// Insert a theme within a transaction.
pub async fn insert_tx(
    tx: &mut Transaction<'_, Postgres>,
    theme: &NewTheme,
) -> Result<Theme, StoreError> {
    let row = sqlx::query_as::<_, Theme>(
        r#"
        INSERT INTO themes (id, name, max_votes, form_id)
        VALUES ($1, $2, $3, $4)
        RETURNING id, name, max_votes, form_id
        "#,
    )
    .bind(&theme.id)
    .bind(&theme.name)
    .bind(theme.max_votes)
    .bind(theme.form_id)
    .fetch_one(&mut **tx)
    .await?;
    Ok(row)
}
