use axum::{
    Extension, Json,
    extract::{Query, State},
};
use sea_orm::ActiveEnum;
use serde::{Deserialize, Serialize};

use crate::{
    bad_request,
    entity::sea_orm_active_enums::OrderStatus,
    error::ApiError,
    middleware::jwt::AuthUser,
    routes::Pagination,
    service::orders::{self, AdminOrderRow},
    state::AppState,
};

const DEFAULT_PAGE_SIZE: u64 = 20;

#[derive(Deserialize)]
pub struct ListOrdersQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub status: Option<String>,
}

#[derive(Serialize)]
pub struct ListOrdersResponse {
    pub orders: Vec<AdminOrderRow>,
    pub pagination: Pagination,
}

#[tracing::instrument(name = "GET /admin/orders", skip(state, user))]
pub async fn list_orders(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<ListOrdersQuery>,
) -> Result<Json<ListOrdersResponse>, ApiError> {
    user.require_admin(&state).await?;

    let page = query.page.unwrap_or(1).max(1);
    let limit = query.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, 100);

    let status = match query.status.as_deref().filter(|s| !s.is_empty()) {
        Some(value) => Some(
            OrderStatus::try_from_value(&value.to_string())
                .map_err(|_| bad_request!("Invalid status"))?,
        ),
        None => None,
    };

    let (orders, total) = orders::list_orders(&state.db, status, page, limit).await?;

    Ok(Json(ListOrdersResponse {
        orders,
        pagination: Pagination::new(page, limit, total),
    }))
}
