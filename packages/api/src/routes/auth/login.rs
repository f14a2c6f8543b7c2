use axum::{Json, extract::State};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use serde::{Deserialize, Serialize};

use crate::{
    bad_request,
    entity::{prelude::*, user},
    error::ApiError,
    routes::auth::{PublicUser, valid_email},
    state::AppState,
};

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
    pub user: PublicUser,
}

/// The same "Invalid credentials" answer covers unknown accounts and
/// wrong passwords so the endpoint cannot be used to probe for emails.
#[tracing::instrument(name = "POST /auth/login", skip(state, request))]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let email = request.email.as_deref().unwrap_or("").trim();
    if !valid_email(email) {
        return Err(bad_request!("Valid email required"));
    }

    let password = request.password.as_deref().unwrap_or("");
    if password.is_empty() {
        return Err(bad_request!("Password required"));
    }

    let user = User::find()
        .filter(user::Column::Email.eq(email))
        .one(&state.db)
        .await?
        .ok_or_else(|| bad_request!("Invalid credentials"))?;

    if !bcrypt::verify(password, &user.password_hash)? {
        return Err(bad_request!("Invalid credentials"));
    }

    let token = state.issue_token(&user)?;

    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        token,
        user: user.into(),
    }))
}
