use std::collections::HashMap;

use sqlx::PgPool;
use uuid::Uuid;

use crate::forms::repo_types::{Form, FormDetails, NewForm};
use crate::store::StoreError;
use crate::themes::{self, repo_types::ThemeSummary};

pub async fn create_with_themes(
    db: &PgPool,
    creator_id: Uuid,
    form: &NewForm,
) -> Result<FormDetails, StoreError> {
    let mut tx = db.begin().await?;

    let row = sqlx::query_as::<_, Form>(
        r#"
        INSERT INTO forms (id, title, description, creator_id)
        VALUES ($1, $2, $3, $4)
        RETURNING id, title, description, creator_id, created_at
        "#,
    )
    .bind(form.id)
    .bind(&form.title)
    .bind(&form.description)
    .bind(creator_id)
    .fetch_one(&mut *tx)
    .await
    .map_err(|e| StoreError::classify(e, "Form already exists", "Creator not found"))?;

    let mut created = Vec::with_capacity(form.themes.len());
    for theme in &form.themes {
        let theme = themes::repo::insert_tx(&mut tx, theme).await?;
        created.push(ThemeSummary::from(theme));
    }
    tx.commit().await?;

    Ok(FormDetails {
        form: row,
        themes: created,
    })
}

pub async fn list_by_creator(db: &PgPool, creator_id: Uuid) -> Result<Vec<FormDetails>, StoreError> {
    let rows = sqlx::query_as::<_, Form>(
        r#"
        SELECT id, title, description, creator_id, created_at
          FROM forms
         WHERE creator_id = $1
         ORDER BY created_at DESC
        "#,
    )
    .bind(creator_id)
    .fetch_all(db)
    .await?;

    attach_themes(db, rows).await
}

pub async fn get(db: &PgPool, id: Uuid) -> Result<Option<FormDetails>, StoreError> {
    let row = sqlx::query_as::<_, Form>(
        r#"SELECT id, title, description, creator_id, created_at FROM forms WHERE id = $1"#,
    )
    .bind(id)
    .fetch_optional(db)
    .await?;

    match row {
        Some(form) => Ok(attach_themes(db, vec![form]).await?.pop()),
        None => Ok(None),
    }
}

async fn attach_themes(db: &PgPool, forms: Vec<Form>) -> Result<Vec<FormDetails>, StoreError> {
    if forms.is_empty() {
        return Ok(Vec::new());
    }
    let ids: Vec<Uuid> = forms.iter().map(|f| f.id).collect();
    let mut by_form: HashMap<Uuid, Vec<ThemeSummary>> = HashMap::new();
    for theme in themes::repo::list_by_forms(db, &ids).await? {
        if let Some(form_id) = theme.form_id {
            by_form.entry(form_id).or_default().push(theme);
        }
    }
    Ok(forms
        .into_iter()
        .map(|form| FormDetails {
            themes: by_form.remove(&form.id).unwrap_or_default(),
            form,
        })
        .collect())
}
