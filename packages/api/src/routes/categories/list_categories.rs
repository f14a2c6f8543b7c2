use std::collections::HashMap;

use axum::{Json, extract::State};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect};
use serde::Serialize;

use crate::{
    entity::{category, prelude::*, product},
    error::ApiError,
    state::AppState,
};

#[derive(Debug, Clone, Serialize)]
pub struct CategoryRow {
    #[serde(flatten)]
    pub category: category::Model,
    pub product_count: i64,
}

#[derive(Serialize)]
pub struct ListCategoriesResponse {
    pub categories: Vec<CategoryRow>,
}

/// Categories with the number of active products in each, for the
/// storefront's category browser.
#[tracing::instrument(name = "GET /categories", skip(state))]
pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<ListCategoriesResponse>, ApiError> {
    let categories = Category::find()
        .order_by_asc(category::Column::Name)
        .all(&state.db)
        .await?;

    let counts: Vec<(Option<String>, i64)> = Product::find()
        .select_only()
        .column(product::Column::CategoryId)
        .column_as(product::Column::Id.count(), "product_count")
        .filter(product::Column::IsActive.eq(true))
        .group_by(product::Column::CategoryId)
        .into_tuple()
        .all(&state.db)
        .await?;

    let counts: HashMap<String, i64> = counts
        .into_iter()
        .filter_map(|(category_id, count)| category_id.map(|id| (id, count)))
        .collect();

    let categories = categories
        .into_iter()
        .map(|category| {
            let product_count = counts.get(&category.id).copied().unwrap_or(0);
            CategoryRow {
                category,
                product_count,
            }
        })
        .collect();

    Ok(Json(ListCategoriesResponse { categories }))
}
