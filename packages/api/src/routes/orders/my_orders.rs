use axum::{
    Extension, Json,
    extract::{Query, State},
};
use serde::Serialize;

use crate::{
    error::ApiError,
    middleware::jwt::AuthUser,
    routes::{Pagination, PaginationParams},
    service::orders::{self, OrderSummary},
    state::AppState,
};

const DEFAULT_PAGE_SIZE: u64 = 10;

#[derive(Serialize)]
pub struct MyOrdersResponse {
    pub orders: Vec<OrderSummary>,
    pub pagination: Pagination,
}

#[tracing::instrument(name = "GET /orders/my-orders", skip(state, user))]
pub async fn my_orders(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<MyOrdersResponse>, ApiError> {
    let user_id = user.sub()?;
    let (page, limit) = params.resolve(DEFAULT_PAGE_SIZE);

    let (orders, total) = orders::my_orders(&state.db, user_id, page, limit).await?;

    Ok(Json(MyOrdersResponse {
        orders,
        pagination: Pagination::new(page, limit, total),
    }))
}
