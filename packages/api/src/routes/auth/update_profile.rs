use axum::{Extension, Json, extract::State};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, Set};
use serde::Deserialize;

use crate::{
    bad_request,
    entity::user,
    error::ApiError,
    middleware::jwt::AuthUser,
    routes::Ack,
    state::AppState,
};

#[derive(Deserialize)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// Partial update: absent or empty fields are left alone, matching how
/// the storefront's profile form submits only what changed.
#[tracing::instrument(name = "PUT /auth/profile", skip(state, user, request))]
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<Json<Ack>, ApiError> {
    let user = user.current_user(&state).await?;

    let name = request.name.filter(|name| !name.trim().is_empty());
    if let Some(name) = &name
        && name.trim().chars().count() < 2
    {
        return Err(bad_request!("Name must be at least 2 characters"));
    }
    let phone = request.phone.filter(|phone| !phone.is_empty());
    if let Some(phone) = &phone
        && !(10..=15).contains(&phone.chars().count())
    {
        return Err(bad_request!("Phone number must be 10-15 digits"));
    }
    let address = request.address.filter(|address| !address.is_empty());

    if name.is_none() && phone.is_none() && address.is_none() {
        return Err(bad_request!("No fields to update"));
    }

    let mut active: user::ActiveModel = user.into();
    if let Some(name) = name {
        active.name = Set(name.trim().to_string());
    }
    if let Some(phone) = phone {
        active.phone = Set(Some(phone));
    }
    if let Some(address) = address {
        active.address = Set(Some(address.trim().to_string()));
    }
    active.updated_at = Set(Utc::now().naive_utc());
    active.update(&state.db).await?;

    Ok(Json(Ack::new("Profile updated successfully")))
}
