use axum::{
    Json,
    extract::{Query, State},
};
use sea_orm::{
    ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};
use serde::{Deserialize, Serialize};

use crate::{
    entity::{prelude::*, product},
    error::ApiError,
    routes::{Pagination, products::ProductRow},
    state::AppState,
};

const DEFAULT_PAGE_SIZE: u64 = 12;

#[derive(Deserialize)]
pub struct ListProductsQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub category: Option<String>,
    pub search: Option<String>,
}

#[derive(Serialize)]
pub struct ListProductsResponse {
    pub products: Vec<ProductRow>,
    pub pagination: Pagination,
}

/// Storefront catalog: active products only, newest first, optionally
/// narrowed by category or a name/description search.
#[tracing::instrument(name = "GET /products", skip(state))]
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ListProductsQuery>,
) -> Result<Json<ListProductsResponse>, ApiError> {
    let page = query.page.unwrap_or(1).max(1);
    let limit = query.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, 100);

    let mut condition = Condition::all().add(product::Column::IsActive.eq(true));
    if let Some(category) = &query.category {
        condition = condition.add(product::Column::CategoryId.eq(category));
    }
    if let Some(search) = &query.search
        && !search.is_empty()
    {
        condition = condition.add(
            Condition::any()
                .add(product::Column::Name.contains(search))
                .add(product::Column::Description.contains(search)),
        );
    }

    let total = Product::find()
        .filter(condition.clone())
        .count(&state.db)
        .await?;

    let rows = Product::find()
        .filter(condition)
        .find_also_related(Category)
        .order_by_desc(product::Column::CreatedAt)
        .offset((page - 1) * limit)
        .limit(limit)
        .all(&state.db)
        .await?;

    let products = rows
        .into_iter()
        .map(|(product, category)| ProductRow {
            product,
            category_name: category.map(|c| c.name),
        })
        .collect();

    Ok(Json(ListProductsResponse {
        products,
        pagination: Pagination::with_page_size(page, limit, total),
    }))
}
