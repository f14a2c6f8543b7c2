use axum::{Json, extract::State};
use sea_orm::{EntityTrait, QueryOrder};
use serde::Serialize;

use crate::{
    entity::{category, prelude::*},
    error::ApiError,
    state::AppState,
};

#[derive(Serialize)]
pub struct AllCategoriesResponse {
    pub categories: Vec<category::Model>,
}

/// Flat category list for filter dropdowns. The admin panel reuses it.
#[tracing::instrument(name = "GET /products/categories/all", skip(state))]
pub async fn all_categories(
    State(state): State<AppState>,
) -> Result<Json<AllCategoriesResponse>, ApiError> {
    let categories = Category::find()
        .order_by_asc(category::Column::Name)
        .all(&state.db)
        .await?;

    Ok(Json(AllCategoriesResponse { categories }))
}
