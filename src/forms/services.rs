use tracing::info;
use uuid::Uuid;

use super::{
    dto::CreateFormRequest,
    repo_types::{FormDetails, NewForm},
};
use crate::{
    error::AppError,
    store::Store,
    themes::{repo_types::NewTheme, services::validate_theme_fields},
};

/// Turns a request into an insertable form. Nothing is written on error.
pub fn validate_form(req: CreateFormRequest) -> Result<NewForm, AppError> {
    let title = req.title.as_deref().map(str::trim).unwrap_or_default();
    if title.is_empty() || req.themes.is_empty() {
        return Err(AppError::validation(
            "Please provide a title and at least one option",
        ));
    }

    let form_id = Uuid::new_v4();
    let themes = req
        .themes
        .iter()
        .map(|t| -> Result<NewTheme, AppError> {
            let (name, max_votes) = validate_theme_fields(t.name.as_deref(), t.max_votes)?;
            Ok(NewTheme {
                id: Uuid::new_v4().to_string(),
                name,
                max_votes,
                form_id: Some(form_id),
            })
        })
        .collect::<Result<Vec<_>, AppError>>()?;

    let description = req
        .description
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty());

    Ok(NewForm {
        id: form_id,
        title: title.to_string(),
        description,
        themes,
    })
}

pub async fn create_form(
    store: &dyn Store,
    creator_id: Uuid,
    req: CreateFormRequest,
) -> Result<FormDetails, AppError> {
    let form = validate_form(req)?;
    let created = store.create_form(creator_id, form).await?;
    info!(form_id = %created.form.id, themes = created.themes.len(), "form created");
    Ok(created)
}

/// Public lookup; a malformed id reads as a missing form.
pub async fn get_form(store: &dyn Store, raw_id: &str) -> Result<FormDetails, AppError> {
    let not_found = || AppError::NotFound("Form not found".into());
    let id = Uuid::parse_str(raw_id.trim()).map_err(|_| not_found())?;
    store.get_form(id).await?.ok_or_else(not_found)
}
