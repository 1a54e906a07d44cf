use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    routing::get,
    Json, Router,
};
use tracing::instrument;

use super::{dto::CreateFormRequest, repo_types::FormDetails, services};
use crate::{
    auth::jwt::AuthUser,
    error::{AppError, AppJson},
    state::AppState,
};

pub fn form_routes() -> Router<AppState> {
    Router::new()
        .route("/forms", get(list_forms).post(create_form))
        .route("/forms/:id", get(get_form))
}

#[instrument(skip(state))]
pub async fn list_forms(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<FormDetails>>, AppError> {
    let forms = state.store.list_forms_by_creator(user_id).await?;
    Ok(Json(forms))
}

#[instrument(skip(state, payload))]
pub async fn create_form(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    AppJson(payload): AppJson<CreateFormRequest>,
) -> Result<(StatusCode, HeaderMap, Json<FormDetails>), AppError> {
    let form = services::create_form(state.store.as_ref(), user_id, payload).await?;
    state.themes.invalidate();

    let mut headers = HeaderMap::new();
    if let Ok(location) = HeaderValue::from_str(&format!("/api/forms/{}", form.form.id)) {
        headers.insert(header::LOCATION, location);
    }
    Ok((StatusCode::CREATED, headers, Json(form)))
}

#[instrument(skip(state))]
pub async fn get_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<FormDetails>, AppError> {
    let form = services::get_form(state.store.as_ref(), &id).await?;
    Ok(Json(form))
}
