use axum::{Json, extract::State, http::StatusCode};
use chrono::Utc;
use kirana_types::create_id;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use serde::{Deserialize, Serialize};

use crate::{
    bad_request,
    entity::{prelude::*, sea_orm_active_enums::UserRole, user},
    error::ApiError,
    routes::auth::{PublicUser, valid_email},
    state::AppState,
};

/// Matches the original storefront's signup form.
const BCRYPT_COST: u32 = 10;

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

#[derive(Serialize)]
pub struct RegisterResponse {
    pub message: String,
    pub token: String,
    pub user: PublicUser,
}

#[tracing::instrument(name = "POST /auth/register", skip(state, request))]
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    let name = request.name.as_deref().unwrap_or("").trim().to_string();
    if name.chars().count() < 2 {
        return Err(bad_request!("Name must be at least 2 characters"));
    }

    let email = request.email.as_deref().unwrap_or("").trim().to_string();
    if !valid_email(&email) {
        return Err(bad_request!("Valid email required"));
    }

    let password = request.password.as_deref().unwrap_or("");
    if password.chars().count() < 6 {
        return Err(bad_request!("Password must be at least 6 characters"));
    }

    let phone = request.phone.filter(|phone| !phone.is_empty());
    if let Some(phone) = &phone
        && !(10..=15).contains(&phone.chars().count())
    {
        return Err(bad_request!("Phone number must be 10-15 digits"));
    }

    let existing = User::find()
        .filter(user::Column::Email.eq(&email))
        .one(&state.db)
        .await?;
    if existing.is_some() {
        return Err(bad_request!(
            "An account with this email already exists. Please use a different email or try logging in."
        ));
    }

    let password_hash = bcrypt::hash(password, BCRYPT_COST)?;

    let now = Utc::now().naive_utc();
    let user = user::ActiveModel {
        id: Set(create_id()),
        name: Set(name),
        email: Set(email),
        password_hash: Set(password_hash),
        phone: Set(phone),
        address: Set(request.address.filter(|address| !address.is_empty())),
        role: Set(UserRole::Customer),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(&state.db)
    .await?;

    let token = state.issue_token(&user)?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User created successfully".to_string(),
            token,
            user: user.into(),
        }),
    ))
}
