use axum::{extract::State, routing::post, Json, Router};
use tracing::instrument;

use super::{dto::VoteRequest, repo_types::Vote, services};
use crate::{
    error::{AppError, AppJson},
    state::AppState,
};

pub fn vote_routes() -> Router<AppState> {
    Router::new().route("/votes", post(create_vote))
}

#[instrument(skip(state, payload))]
pub async fn create_vote(
    State(state): State<AppState>,
    AppJson(payload): AppJson<VoteRequest>,
) -> Result<Json<Vote>, AppError> {
    let vote = services::submit_vote(
        state.store.as_ref(),
        payload.theme_id.as_deref().unwrap_or_default(),
        payload.voter_name.as_deref().unwrap_or_default(),
    )
    .await?;
    Ok(Json(vote))
}
