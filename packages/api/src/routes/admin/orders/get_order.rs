use axum::{
    Extension, Json,
    extract::{Path, State},
};
use serde::Serialize;

use crate::{
    error::ApiError,
    middleware::jwt::AuthUser,
    service::orders::{self, AdminOrderDetail},
    state::AppState,
};

#[derive(Serialize)]
pub struct GetOrderResponse {
    pub order: AdminOrderDetail,
}

#[tracing::instrument(name = "GET /admin/orders/{id}", skip(state, user))]
pub async fn get_order(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(order_id): Path<String>,
) -> Result<Json<GetOrderResponse>, ApiError> {
    user.require_admin(&state).await?;
    let order = orders::admin_get_order(&state.db, &order_id).await?;
    Ok(Json(GetOrderResponse { order }))
}
