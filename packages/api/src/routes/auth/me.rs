use axum::{Extension, Json, extract::State};
use serde::Serialize;

use crate::{
    error::ApiError, middleware::jwt::AuthUser, routes::auth::PublicUser, state::AppState,
};

#[derive(Serialize)]
pub struct MeResponse {
    pub user: PublicUser,
}

#[tracing::instrument(name = "GET /auth/me", skip(state, user))]
pub async fn me(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<MeResponse>, ApiError> {
    let user = user.current_user(&state).await?;
    Ok(Json(MeResponse { user: user.into() }))
}
