use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use tracing::{info, instrument};

use super::{
    dto::CreateThemeRequest,
    repo_types::{Theme, ThemeSummary},
};
use crate::{
    auth::jwt::AuthUser,
    error::{AppError, AppJson},
    state::AppState,
};

pub fn theme_routes() -> Router<AppState> {
    Router::new().route("/themes", get(list_themes).post(create_theme))
}

#[instrument(skip(state))]
pub async fn list_themes(
    State(state): State<AppState>,
) -> Result<Json<Vec<ThemeSummary>>, AppError> {
    let themes = state.themes.list().await?;
    Ok(Json(themes))
}

#[instrument(skip(state, payload))]
pub async fn create_theme(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    AppJson(payload): AppJson<CreateThemeRequest>,
) -> Result<(StatusCode, Json<Theme>), AppError> {
    let theme = state.themes.create(user_id, payload).await?;
    info!(user_id = %user_id, theme_id = %theme.id, "theme created");
    Ok((StatusCode::CREATED, Json(theme)))
}
