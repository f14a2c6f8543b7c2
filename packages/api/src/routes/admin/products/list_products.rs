use axum::{
    Extension, Json,
    extract::{Query, State},
};
use sea_orm::{EntityTrait, PaginatorTrait, QueryOrder, QuerySelect};
use serde::Serialize;

use crate::{
    entity::{prelude::*, product},
    error::ApiError,
    middleware::jwt::AuthUser,
    routes::{Pagination, PaginationParams, products::ProductRow},
    state::AppState,
};

const DEFAULT_PAGE_SIZE: u64 = 20;

#[derive(Serialize)]
pub struct ListProductsResponse {
    pub products: Vec<ProductRow>,
    pub pagination: Pagination,
}

/// Unlike the storefront listing this one includes deactivated
/// products, so admins can find and restore them.
#[tracing::instrument(name = "GET /admin/products", skip(state, user))]
pub async fn list_products(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<ListProductsResponse>, ApiError> {
    user.require_admin(&state).await?;
    let (page, limit) = params.resolve(DEFAULT_PAGE_SIZE);

    let total = Product::find().count(&state.db).await?;

    let products = Product::find()
        .find_also_related(Category)
        .order_by_desc(product::Column::CreatedAt)
        .offset((page - 1) * limit)
        .limit(limit)
        .all(&state.db)
        .await?
        .into_iter()
        .map(|(product, category)| ProductRow {
            product,
            category_name: category.map(|c| c.name),
        })
        .collect();

    Ok(Json(ListProductsResponse {
        products,
        pagination: Pagination::new(page, limit, total),
    }))
}
