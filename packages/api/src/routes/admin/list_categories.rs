use axum::{Extension, Json, extract::State};
use sea_orm::{EntityTrait, QueryOrder};
use serde::Serialize;

use crate::{
    entity::{category, prelude::*},
    error::ApiError,
    middleware::jwt::AuthUser,
    state::AppState,
};

#[derive(Serialize)]
pub struct ListCategoriesResponse {
    pub categories: Vec<category::Model>,
}

/// Flat list for the admin category manager, without the product
/// counts the public endpoint computes.
#[tracing::instrument(name = "GET /admin/categories", skip(state, user))]
pub async fn list_categories(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<ListCategoriesResponse>, ApiError> {
    user.require_admin(&state).await?;

    let categories = Category::find()
        .order_by_asc(category::Column::Name)
        .all(&state.db)
        .await?;

    Ok(Json(ListCategoriesResponse { categories }))
}
