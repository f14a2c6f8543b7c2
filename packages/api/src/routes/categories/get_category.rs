use axum::{
    Json,
    extract::{Path, State},
};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use serde::Serialize;

use crate::{
    entity::{category, prelude::*, product},
    error::ApiError,
    not_found,
    state::AppState,
};

#[derive(Serialize)]
pub struct CategoryDetail {
    #[serde(flatten)]
    pub category: category::Model,
    pub products: Vec<product::Model>,
    pub product_count: usize,
}

#[derive(Serialize)]
pub struct GetCategoryResponse {
    pub category: CategoryDetail,
}

#[tracing::instrument(name = "GET /categories/{id}", skip(state))]
pub async fn get_category(
    State(state): State<AppState>,
    Path(category_id): Path<String>,
) -> Result<Json<GetCategoryResponse>, ApiError> {
    let category = Category::find_by_id(&category_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| not_found!("Category not found"))?;

    let products = Product::find()
        .filter(product::Column::CategoryId.eq(&category_id))
        .filter(product::Column::IsActive.eq(true))
        .order_by_desc(product::Column::CreatedAt)
        .all(&state.db)
        .await?;

    let product_count = products.len();
    Ok(Json(GetCategoryResponse {
        category: CategoryDetail {
            category,
            products,
            product_count,
        },
    }))
}
