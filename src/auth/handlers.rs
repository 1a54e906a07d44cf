use axum::{
    extract::{FromRef, State},
    http::header,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use tracing::{error, instrument};

use crate::{
    auth::{
        dto::{Credentials, MessageResponse, PublicUser, UserResponse},
        jwt::{cleared_cookie, AuthUser, JwtKeys},
        services,
    },
    error::{AppError, AppJson},
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/signup", post(signup))
        .route("/auth/signin", post(signin))
        .route("/auth/signout", post(signout))
}

pub fn me_routes() -> Router<AppState> {
    Router::new().route("/auth/me", get(get_me))
}

#[instrument(skip(state, payload))]
pub async fn signup(
    State(state): State<AppState>,
    AppJson(payload): AppJson<Credentials>,
) -> Result<Json<UserResponse>, AppError> {
    let user = services::signup(state.store.as_ref(), payload).await?;
    Ok(Json(UserResponse { user: user.into() }))
}

#[instrument(skip(state, payload))]
pub async fn signin(
    State(state): State<AppState>,
    AppJson(payload): AppJson<Credentials>,
) -> Result<impl IntoResponse, AppError> {
    let keys = JwtKeys::from_ref(&state);
    let (user, token) = services::authenticate(state.store.as_ref(), &keys, payload).await?;
    let cookie = keys.session_cookie(token, state.config.cookie_secure);

    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(UserResponse { user: user.into() }),
    ))
}

pub async fn signout() -> impl IntoResponse {
    (
        [(header::SET_COOKIE, cleared_cookie())],
        Json(MessageResponse {
            message: "Signed out successfully",
        }),
    )
}

#[instrument(skip(state))]
pub async fn get_me(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<PublicUser>, AppError> {
    let user = state.store.find_user_by_id(user_id).await?.ok_or_else(|| {
        error!(user_id = %user_id, "token names an unknown user");
        AppError::Unauthorized("User not found".into())
    })?;
    Ok(Json(user.into()))
}
